// src/common/command.rs

//! SCD4x command definitions.
//!
//! Every command is a 16-bit opcode, optionally followed by one parameter
//! word with its checksum. See the SCD4x datasheet, section 3 "Digital interface".

use core::time::Duration;

use arrayvec::ArrayVec;

use super::crc::{self, WORD_WITH_CRC_LEN};
use super::error::Scd4xError;
use super::response::{self, Response};
use super::timing;
use super::types::TemperatureOffset;

/// Opcode plus one parameter word and its checksum.
pub const MAX_FRAME_LEN: usize = 2 + WORD_WITH_CRC_LEN;

/// Bytes written to the bus for one command.
pub type Frame = ArrayVec<u8, MAX_FRAME_LEN>;

/// Represents an SCD4x command together with its parameter, if any.
///
/// Parameters are stored as the register word that goes on the wire;
/// use the constructors to convert from physical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start periodic measurement, 5 s update interval. Idle mode only.
    StartPeriodicMeasurement,
    /// Start periodic measurement, 30 s update interval. Idle mode only.
    StartLowPowerPeriodicMeasurement,
    /// Read the buffered CO2, temperature and humidity sample.
    /// The sensor NACKs if no new sample is available.
    ReadMeasurement,
    /// Stop periodic measurement and return to idle mode.
    StopPeriodicMeasurement,

    GetTemperatureOffset,
    SetTemperatureOffset { ticks: u16 },
    GetSensorAltitude,
    SetSensorAltitude { meters: u16 },
    /// Continuous pressure compensation; overrides the altitude setting.
    /// Accepted during periodic measurement.
    SetAmbientPressure { hpa: u16 },

    /// Anchor the reading to a known reference concentration.
    PerformForcedRecalibration { target_co2_ppm: u16 },
    GetAutomaticSelfCalibration,
    SetAutomaticSelfCalibration { enabled: bool },

    GetDataReadyStatus,
    /// Store configuration in EEPROM. Only send when the configuration
    /// actually changed (EEPROM endures about 2000 write cycles).
    PersistSettings,
    GetSerialNumber,
    PerformSelfTest,
    /// Reset EEPROM configuration and erase the FRC/ASC history.
    PerformFactoryReset,
    /// Reload user settings from EEPROM. Stop periodic measurement first.
    Reinit,

    /// On-demand measurement, read out with [`Command::ReadMeasurement`].
    MeasureSingleShot,
    /// On-demand humidity and temperature only; CO2 reads as 0.
    MeasureSingleShotRhtOnly,
    /// Idle to sleep mode.
    PowerDown,
    /// Sleep to idle mode. The sensor usually NACKs this command.
    WakeUp,
}

impl Command {
    /// Builds a Set Temperature Offset command from an offset value.
    pub fn set_temperature_offset(offset: &TemperatureOffset) -> Result<Self, Scd4xError> {
        Ok(Command::SetTemperatureOffset {
            ticks: offset.register_value()?,
        })
    }

    /// The 16-bit command opcode.
    pub fn opcode(&self) -> u16 {
        match self {
            Command::StartPeriodicMeasurement => 0x21B1,
            Command::StartLowPowerPeriodicMeasurement => 0x21AC,
            Command::ReadMeasurement => 0xEC05,
            Command::StopPeriodicMeasurement => 0x3F86,
            Command::GetTemperatureOffset => 0x2318,
            Command::SetTemperatureOffset { .. } => 0x241D,
            Command::GetSensorAltitude => 0x2322,
            Command::SetSensorAltitude { .. } => 0x2427,
            Command::SetAmbientPressure { .. } => 0xE000,
            Command::PerformForcedRecalibration { .. } => 0x362F,
            Command::GetAutomaticSelfCalibration => 0x2313,
            Command::SetAutomaticSelfCalibration { .. } => 0x2416,
            Command::GetDataReadyStatus => 0xE4B8,
            Command::PersistSettings => 0x3615,
            Command::GetSerialNumber => 0x3682,
            Command::PerformSelfTest => 0x3639,
            Command::PerformFactoryReset => 0x3632,
            Command::Reinit => 0x3646,
            Command::MeasureSingleShot => 0x219D,
            Command::MeasureSingleShotRhtOnly => 0x2196,
            Command::PowerDown => 0x36E0,
            Command::WakeUp => 0x36F6,
        }
    }

    /// The parameter word sent after the opcode, if any.
    pub fn parameter(&self) -> Option<u16> {
        match self {
            Command::SetTemperatureOffset { ticks } => Some(*ticks),
            Command::SetSensorAltitude { meters } => Some(*meters),
            Command::SetAmbientPressure { hpa } => Some(*hpa),
            Command::PerformForcedRecalibration { target_co2_ppm } => Some(*target_co2_ppm),
            Command::SetAutomaticSelfCalibration { enabled } => Some(u16::from(*enabled)),
            _ => None,
        }
    }

    /// Number of bytes to read back, checksums included. `None` for
    /// write-only commands.
    pub fn response_len(&self) -> Option<usize> {
        let words = match self {
            Command::ReadMeasurement | Command::GetSerialNumber => 3,
            Command::GetTemperatureOffset
            | Command::GetSensorAltitude
            | Command::PerformForcedRecalibration { .. }
            | Command::GetAutomaticSelfCalibration
            | Command::GetDataReadyStatus
            | Command::PerformSelfTest => 1,
            _ => return None,
        };
        Some(words * WORD_WITH_CRC_LEN)
    }

    /// Time between the write and the read phase.
    pub fn read_delay(&self) -> Duration {
        match self {
            Command::PerformForcedRecalibration { .. } => timing::FORCED_RECALIBRATION_READ_DELAY,
            Command::PerformSelfTest => timing::SELF_TEST_READ_DELAY,
            _ if self.response_len().is_some() => timing::READ_DELAY,
            _ => timing::NONE,
        }
    }

    /// Maximum clock stretching during the read phase.
    pub fn timeout(&self) -> Duration {
        timing::NO_CLOCK_STRETCH
    }

    /// Minimum time before the sensor accepts the next command.
    pub fn post_processing_time(&self) -> Duration {
        match self {
            Command::StartPeriodicMeasurement
            | Command::SetTemperatureOffset { .. }
            | Command::SetSensorAltitude { .. }
            | Command::SetAmbientPressure { .. }
            | Command::SetAutomaticSelfCalibration { .. }
            | Command::PowerDown => timing::SHORT_SETTLE,
            Command::StopPeriodicMeasurement => timing::STOP_PERIODIC_MEASUREMENT_SETTLE,
            Command::PersistSettings | Command::PerformFactoryReset => timing::EEPROM_WRITE_SETTLE,
            Command::Reinit => timing::REINIT_SETTLE,
            Command::MeasureSingleShot => timing::SINGLE_SHOT_SETTLE,
            Command::MeasureSingleShotRhtOnly => timing::SINGLE_SHOT_RHT_ONLY_SETTLE,
            Command::WakeUp => timing::WAKE_UP_SETTLE,
            _ => timing::NONE,
        }
    }

    /// Formats the wire frame: big-endian opcode, then the parameter word
    /// followed by its checksum.
    pub fn format_into(&self) -> Frame {
        let mut frame = Frame::new();
        let [hi, lo] = self.opcode().to_be_bytes();
        frame.push(hi);
        frame.push(lo);
        if let Some(param) = self.parameter() {
            let word = param.to_be_bytes();
            frame.push(word[0]);
            frame.push(word[1]);
            frame.push(crc::calculate_crc8(&word));
        }
        frame
    }

    /// Validates `raw` (exactly [`Command::response_len`] bytes) and
    /// interprets it for this command.
    pub fn decode<E>(&self, raw: &[u8]) -> Result<Response, Scd4xError<E>>
    where
        E: core::fmt::Debug,
    {
        let response = match self {
            Command::ReadMeasurement => {
                Response::Measurement(response::measurement_from_words(response::read_words::<3, E>(raw)?))
            }
            Command::GetTemperatureOffset => {
                let [ticks] = response::read_words::<1, E>(raw)?;
                Response::TemperatureOffset(TemperatureOffset::from_ticks(ticks.into()))
            }
            Command::GetSensorAltitude => {
                let [meters] = response::read_words::<1, E>(raw)?;
                Response::SensorAltitude(meters)
            }
            Command::PerformForcedRecalibration { .. } => {
                let [word] = response::read_words::<1, E>(raw)?;
                Response::ForcedRecalibration(response::frc_correction_from_word(word))
            }
            Command::GetAutomaticSelfCalibration => {
                let [word] = response::read_words::<1, E>(raw)?;
                Response::AutomaticSelfCalibration(word)
            }
            Command::GetDataReadyStatus => {
                let [word] = response::read_words::<1, E>(raw)?;
                Response::DataReadyStatus(word)
            }
            Command::GetSerialNumber => {
                Response::SerialNumber(response::serial_number_from_words(response::read_words::<3, E>(raw)?))
            }
            Command::PerformSelfTest => {
                let [status] = response::read_words::<1, E>(raw)?;
                Response::SelfTest(status)
            }
            _ => {
                if !raw.is_empty() {
                    return Err(Scd4xError::InvalidLength { expected: 0, got: raw.len() });
                }
                Response::Empty
            }
        };
        Ok(response)
    }
}
