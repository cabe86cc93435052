// src/device/mod.rs

//! Blocking SCD4x session.
//!
//! The sensor is always in one of three modes: idle, periodic measurement
//! or sleep. Each method documents the mode it requires. The session does
//! not track the mode; sending a command in the wrong mode usually results
//! in a NACK from the device.

mod transaction;

use crate::common::{
    address::Scd4xAddr,
    command::Command,
    error::Scd4xError,
    hal_traits::{Scd4xI2c, Scd4xTimer},
    response::{self, Response},
    types::{Measurement, PowerMode, TemperatureOffset},
};

/// Represents one SCD4x on a bus, for SYNCHRONOUS operations.
///
/// Every method issues exactly one command and never retries. The
/// `&mut self` receiver guarantees a single in-flight command; callers
/// sharing a sensor across threads must serialize access themselves.
#[derive(Debug)]
pub struct Scd4xDevice<IF>
where
    IF: Scd4xI2c + Scd4xTimer,
{
    interface: IF,
    address: Scd4xAddr,
}

impl<IF> Scd4xDevice<IF>
where
    IF: Scd4xI2c + Scd4xTimer,
{
    /// Uses the factory address 0x62.
    pub fn new(interface: IF) -> Self {
        Self::with_address(interface, Scd4xAddr::DEFAULT_ADDRESS)
    }

    pub fn with_address(interface: IF, address: Scd4xAddr) -> Self {
        Scd4xDevice { interface, address }
    }

    pub fn address(&self) -> Scd4xAddr {
        self.address
    }

    /// Destroys the session and returns the interface.
    pub fn release(self) -> IF {
        self.interface
    }

    // --- Measurement ---

    /// Starts periodic measurement at the interval selected by `power_mode`.
    ///
    /// Idle mode only. For an untyped mode value use
    /// `PowerMode::try_from(u8)`, which rejects unknown values.
    pub fn start_periodic_measurement(&mut self, power_mode: PowerMode) -> Result<(), Scd4xError<IF::Error>> {
        let command = match power_mode {
            PowerMode::High => Command::StartPeriodicMeasurement,
            PowerMode::Low => Command::StartLowPowerPeriodicMeasurement,
        };
        self.execute_no_response(&command)
    }

    /// Reads the latest sample.
    ///
    /// Fails with [`Scd4xError::Nack`] if no new sample is buffered; poll
    /// [`Self::get_data_ready_status`] first or treat the NACK as "not yet".
    pub fn read_measurement(&mut self) -> Result<Measurement, Scd4xError<IF::Error>> {
        match self.execute(&Command::ReadMeasurement)? {
            Response::Measurement(sample) => Ok(sample),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    /// Periodic measurement mode only. Waits 500 ms for the sensor to go idle.
    pub fn stop_periodic_measurement(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::StopPeriodicMeasurement)
    }

    /// Idle mode only. Result is read with [`Self::read_measurement`].
    pub fn measure_single_shot(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::MeasureSingleShot)
    }

    /// Idle mode only. CO2 reads as 0 in the following measurement.
    pub fn measure_single_shot_rht_only(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::MeasureSingleShotRhtOnly)
    }

    pub fn get_data_ready_status(&mut self) -> Result<bool, Scd4xError<IF::Error>> {
        match self.execute(&Command::GetDataReadyStatus)? {
            Response::DataReadyStatus(word) => Ok(response::data_ready_from_status(word)),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    // --- Signal compensation ---

    /// Idle mode only.
    pub fn get_temperature_offset(&mut self) -> Result<TemperatureOffset, Scd4xError<IF::Error>> {
        match self.execute(&Command::GetTemperatureOffset)? {
            Response::TemperatureOffset(offset) => Ok(offset),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    /// Idle mode only. Offsets outside the register range fail with
    /// [`Scd4xError::InvalidArgument`] before anything is sent.
    pub fn set_temperature_offset(&mut self, degrees_celsius: f32) -> Result<(), Scd4xError<IF::Error>> {
        let command = TemperatureOffset::from_degrees_celsius(degrees_celsius)
            .and_then(|offset| Command::set_temperature_offset(&offset))
            .map_err(|e| e.lift::<IF::Error>())?;
        self.execute_no_response(&command)
    }

    /// Metres above sea level. Idle mode only.
    pub fn get_sensor_altitude(&mut self) -> Result<u16, Scd4xError<IF::Error>> {
        match self.execute(&Command::GetSensorAltitude)? {
            Response::SensorAltitude(meters) => Ok(meters),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    /// Idle mode only. Overrides a previously set ambient pressure.
    pub fn set_sensor_altitude(&mut self, meters: u16) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::SetSensorAltitude { meters })
    }

    /// Pressure in hPa. Can be sent during periodic measurement and
    /// overrides the altitude setting.
    pub fn set_ambient_pressure(&mut self, hpa: u16) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::SetAmbientPressure { hpa })
    }

    // --- Field calibration ---

    /// Returns the correction in ppm, or [`response::FRC_FAILED`].
    ///
    /// Run periodic measurement for more than 3 minutes at a stable,
    /// known concentration, stop it, then call this in idle mode.
    pub fn perform_forced_recalibration(&mut self, target_co2_ppm: u16) -> Result<i32, Scd4xError<IF::Error>> {
        match self.execute(&Command::PerformForcedRecalibration { target_co2_ppm })? {
            Response::ForcedRecalibration(correction) => Ok(correction),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    /// Idle mode only. Enabled by default.
    pub fn get_automatic_self_calibration(&mut self) -> Result<bool, Scd4xError<IF::Error>> {
        match self.execute(&Command::GetAutomaticSelfCalibration)? {
            Response::AutomaticSelfCalibration(word) => Ok(word == 1),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    /// Idle mode only.
    pub fn set_automatic_self_calibration(&mut self, enabled: bool) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::SetAutomaticSelfCalibration { enabled })
    }

    // --- Advanced features ---

    /// Writes the current configuration to EEPROM. Idle mode only.
    ///
    /// Only call this after the configuration actually changed; the
    /// EEPROM is rated for about 2000 write cycles.
    pub fn persist_settings(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::PersistSettings)
    }

    /// 48-bit unique serial number. Idle mode only.
    pub fn get_serial_number(&mut self) -> Result<u64, Scd4xError<IF::Error>> {
        match self.execute(&Command::GetSerialNumber)? {
            Response::SerialNumber(serial) => Ok(serial),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    /// Returns 0 when no malfunction was detected. Blocks for about 5.5 s.
    pub fn perform_self_test(&mut self) -> Result<u16, Scd4xError<IF::Error>> {
        match self.execute(&Command::PerformSelfTest)? {
            Response::SelfTest(status) => Ok(status),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }

    /// Resets the EEPROM configuration and erases the FRC and ASC history.
    /// Idle mode only.
    pub fn perform_factory_reset(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::PerformFactoryReset)
    }

    /// Reloads settings from EEPROM. Stop periodic measurement first.
    pub fn reinit(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::Reinit)
    }

    // --- Low power ---

    /// Idle to sleep mode.
    pub fn power_down(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        self.execute_no_response(&Command::PowerDown)
    }

    /// Sleep to idle mode.
    ///
    /// The sensor often cannot acknowledge while it is still waking up, so
    /// a NACK counts as success. Any other error is returned.
    pub fn wake_up(&mut self) -> Result<(), Scd4xError<IF::Error>> {
        let command = Command::WakeUp;
        match self.execute_no_response(&command) {
            Err(Scd4xError::Nack(_)) => {
                log::debug!("scd4x: wake up not acknowledged, ignoring");
                self.delay(command.post_processing_time());
                Ok(())
            }
            other => other,
        }
    }

    fn execute_no_response(&mut self, command: &Command) -> Result<(), Scd4xError<IF::Error>> {
        match self.execute(command)? {
            Response::Empty => Ok(()),
            _ => Err(Scd4xError::UnexpectedResponse),
        }
    }
}
