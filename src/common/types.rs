// src/common/types.rs

use core::convert::TryFrom;
use core::fmt;
use core::time::Duration;

use super::error::Scd4xError;
use super::timing;
use super::units;

// --- Measured quantities ---

/// CO2 concentration as reported by the sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CarbonDioxide {
    ticks: u32,
    ppm: u32,
}

impl CarbonDioxide {
    pub fn from_ticks(ticks: u32) -> Self {
        CarbonDioxide {
            ticks,
            ppm: units::co2_ppm_from_ticks(ticks),
        }
    }

    /// Raw register value.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn ppm(&self) -> u32 {
        self.ppm
    }
}

impl fmt::Display for CarbonDioxide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ppm", self.ppm)
    }
}

/// Ambient temperature as reported by the sensor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Temperature {
    ticks: u32,
    degrees_celsius: f32,
    degrees_fahrenheit: f32,
}

impl Temperature {
    pub fn from_ticks(ticks: u32) -> Self {
        let degrees_celsius = units::celsius_from_ticks(ticks);
        Temperature {
            ticks,
            degrees_celsius,
            degrees_fahrenheit: units::fahrenheit_from_celsius(degrees_celsius),
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn degrees_celsius(&self) -> f32 {
        self.degrees_celsius
    }

    pub fn degrees_fahrenheit(&self) -> f32 {
        self.degrees_fahrenheit
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} °C", self.degrees_celsius)
    }
}

/// Relative humidity as reported by the sensor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Humidity {
    ticks: u32,
    percent_rh: f32,
}

impl Humidity {
    pub fn from_ticks(ticks: u32) -> Self {
        Humidity {
            ticks,
            percent_rh: units::percent_rh_from_ticks(ticks),
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn percent_rh(&self) -> f32 {
        self.percent_rh
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} %RH", self.percent_rh)
    }
}

/// Temperature offset applied by the sensor to compensate self-heating.
///
/// Built either from ticks read back from the device or from degrees
/// Celsius to be written to it. Default on a fresh sensor is 4 °C.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TemperatureOffset {
    ticks: u32,
    degrees_celsius: f32,
    degrees_fahrenheit: f32,
}

impl TemperatureOffset {
    pub fn from_ticks(ticks: u32) -> Self {
        let degrees_celsius = units::offset_celsius_from_ticks(ticks);
        TemperatureOffset {
            ticks,
            degrees_celsius,
            degrees_fahrenheit: units::fahrenheit_from_celsius(degrees_celsius),
        }
    }

    /// Keeps `degrees` as given and derives the nearest tick count.
    ///
    /// Offsets below zero cannot be encoded and are rejected.
    pub fn from_degrees_celsius(degrees: f32) -> Result<Self, Scd4xError> {
        let ticks = units::offset_ticks_from_celsius(degrees);
        if ticks < 0 || !degrees.is_finite() {
            return Err(Scd4xError::InvalidArgument("temperature offset must be a finite, non-negative number of degrees"));
        }
        Ok(TemperatureOffset {
            ticks: ticks as u32,
            degrees_celsius: degrees,
            degrees_fahrenheit: units::fahrenheit_from_celsius(degrees),
        })
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// The tick count as a register word, if it fits in 16 bits.
    pub fn register_value(&self) -> Result<u16, Scd4xError> {
        u16::try_from(self.ticks)
            .map_err(|_| Scd4xError::InvalidArgument("temperature offset exceeds the register range"))
    }

    pub fn degrees_celsius(&self) -> f32 {
        self.degrees_celsius
    }

    pub fn degrees_fahrenheit(&self) -> f32 {
        self.degrees_fahrenheit
    }
}

impl fmt::Display for TemperatureOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} °C", self.degrees_celsius)
    }
}

/// One sample from Read Measurement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement {
    pub co2: CarbonDioxide,
    pub temperature: Temperature,
    pub humidity: Humidity,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.co2, self.temperature, self.humidity)
    }
}

// --- Power mode ---

/// Selects which periodic measurement command is issued.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum PowerMode {
    /// New sample every 5 seconds.
    #[default]
    High = 1,
    /// New sample every 30 seconds.
    Low = 2,
}

impl PowerMode {
    pub fn update_interval(&self) -> Duration {
        match self {
            PowerMode::High => timing::HIGH_POWER_UPDATE_INTERVAL,
            PowerMode::Low => timing::LOW_POWER_UPDATE_INTERVAL,
        }
    }
}

impl TryFrom<u8> for PowerMode {
    type Error = Scd4xError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PowerMode::High),
            2 => Ok(PowerMode::Low),
            _ => Err(Scd4xError::InvalidArgument("unknown power mode")),
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(value: PowerMode) -> Self {
        value as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_co2() {
        for ticks in [50, 834] {
            let co2 = CarbonDioxide::from_ticks(ticks);
            assert_eq!(co2.ticks(), ticks);
            assert_eq!(co2.ppm(), ticks);
        }
    }

    #[test]
    fn test_temperature() {
        let t = Temperature::from_ticks(0);
        assert_eq!(t.ticks(), 0);
        assert_eq!(t.degrees_celsius(), -45.0);
        assert_eq!(t.degrees_fahrenheit(), -49.0);

        let t = Temperature::from_ticks(65536);
        assert_eq!(t.ticks(), 65536);
        assert_eq!(t.degrees_celsius(), 130.0);
        assert_eq!(t.degrees_fahrenheit(), 266.0);
    }

    #[test]
    fn test_humidity() {
        assert_eq!(Humidity::from_ticks(0).percent_rh(), 0.0);
        assert_eq!(Humidity::from_ticks(65536).percent_rh(), 100.0);
    }

    #[test]
    fn test_temperature_offset_from_ticks() {
        let offset = TemperatureOffset::from_ticks(0);
        assert_eq!(offset.degrees_celsius(), 0.0);
        assert_eq!(offset.degrees_fahrenheit(), 32.0);

        let offset = TemperatureOffset::from_ticks(65536);
        assert_eq!(offset.degrees_celsius(), 175.0);
        assert_eq!(offset.degrees_fahrenheit(), 347.0);
    }

    #[test]
    fn test_temperature_offset_from_degrees() {
        let offset = TemperatureOffset::from_degrees_celsius(0.0).unwrap();
        assert_eq!(offset.ticks(), 0);
        assert_eq!(offset.degrees_fahrenheit(), 32.0);

        let offset = TemperatureOffset::from_degrees_celsius(175.0).unwrap();
        assert_eq!(offset.ticks(), 65536);
        assert_eq!(offset.degrees_celsius(), 175.0);
        assert_eq!(offset.degrees_fahrenheit(), 347.0);

        let offset = TemperatureOffset::from_degrees_celsius(4.0).unwrap();
        assert_eq!(offset.ticks(), 1498);
        assert_eq!(offset.register_value(), Ok(1498));
    }

    #[test]
    fn test_temperature_offset_rejects_unencodable() {
        assert!(matches!(
            TemperatureOffset::from_degrees_celsius(-2.0),
            Err(Scd4xError::InvalidArgument(_))
        ));
        assert!(matches!(
            TemperatureOffset::from_degrees_celsius(f32::NAN),
            Err(Scd4xError::InvalidArgument(_))
        ));
        // 175 °C is full scale, one tick past the 16-bit register
        let offset = TemperatureOffset::from_degrees_celsius(175.0).unwrap();
        assert!(matches!(offset.register_value(), Err(Scd4xError::InvalidArgument(_))));
    }

    #[test]
    fn test_display() {
        let mut out = HeaplessString::<48>::new();
        write!(out, "{}", CarbonDioxide::from_ticks(834)).unwrap();
        assert_eq!(out.as_str(), "834 ppm");

        out.clear();
        write!(out, "{}", Temperature::from_ticks(0)).unwrap();
        assert_eq!(out.as_str(), "-45.0 °C");

        out.clear();
        write!(out, "{}", Humidity::from_ticks(32768)).unwrap();
        assert_eq!(out.as_str(), "50.0 %RH");

        out.clear();
        write!(out, "{}", TemperatureOffset::from_degrees_celsius(3.5).unwrap()).unwrap();
        assert_eq!(out.as_str(), "3.5 °C");

        out.clear();
        let sample = Measurement {
            co2: CarbonDioxide::from_ticks(500),
            temperature: Temperature::from_ticks(0),
            humidity: Humidity::from_ticks(0),
        };
        write!(out, "{}", sample).unwrap();
        assert_eq!(out.as_str(), "500 ppm, -45.0 °C, 0.0 %RH");
    }

    #[test]
    fn test_power_mode() {
        assert_eq!(PowerMode::try_from(1), Ok(PowerMode::High));
        assert_eq!(PowerMode::try_from(2), Ok(PowerMode::Low));
        assert_eq!(PowerMode::try_from(0), Err(Scd4xError::InvalidArgument("unknown power mode")));
        assert_eq!(PowerMode::try_from(3), Err(Scd4xError::InvalidArgument("unknown power mode")));
        assert_eq!(u8::from(PowerMode::Low), 2);
        assert_eq!(PowerMode::default(), PowerMode::High);
        assert_eq!(PowerMode::High.update_interval(), Duration::from_secs(5));
        assert_eq!(PowerMode::Low.update_interval(), Duration::from_secs(30));
    }
}
