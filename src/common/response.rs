// src/common/response.rs

//! Typed command responses and the word-level decode routines behind them.

use super::crc::{self, WORD_LEN, WORD_WITH_CRC_LEN};
use super::error::Scd4xError;
use super::types::{CarbonDioxide, Humidity, Measurement, Temperature, TemperatureOffset};

/// Largest response any SCD4x command returns (3 words with checksums).
pub const MAX_RESPONSE_LEN: usize = 9;
/// Largest response after checksum removal.
pub const MAX_DATA_LEN: usize = MAX_RESPONSE_LEN / WORD_WITH_CRC_LEN * WORD_LEN;

/// Returned by Perform Forced Recalibration when the recalibration failed.
pub const FRC_FAILED: i32 = 0xFFFF;

/// Offset added by the sensor to the FRC correction so it fits a u16.
const FRC_BIAS: i32 = 0x8000;

/// Only the low 11 bits of the data ready word carry the flag.
pub const DATA_READY_MASK: u16 = 0x07FF;

/// The decoded result of one command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Response {
    /// Commands without a read phase.
    Empty,
    Measurement(Measurement),
    TemperatureOffset(TemperatureOffset),
    /// Metres above sea level.
    SensorAltitude(u16),
    /// Correction in ppm, or [`FRC_FAILED`].
    ForcedRecalibration(i32),
    /// Raw ASC word, 1 when enabled.
    AutomaticSelfCalibration(u16),
    /// Raw status word, see [`data_ready_from_status`].
    DataReadyStatus(u16),
    /// 48-bit serial number.
    SerialNumber(u64),
    /// 0 means no malfunction detected.
    SelfTest(u16),
}

/// Validates a raw response of exactly `W` words and returns the words.
pub fn read_words<const W: usize, E>(raw: &[u8]) -> Result<[u16; W], Scd4xError<E>>
where
    E: core::fmt::Debug,
{
    let expected = W * WORD_WITH_CRC_LEN;
    if raw.len() != expected {
        return Err(Scd4xError::InvalidLength { expected, got: raw.len() });
    }
    let data = crc::validate_and_strip::<MAX_DATA_LEN, E>(raw)?;

    let mut words = [0u16; W];
    for (word, bytes) in words.iter_mut().zip(data.chunks_exact(WORD_LEN)) {
        *word = u16::from_be_bytes([bytes[0], bytes[1]]);
    }
    Ok(words)
}

/// Builds a measurement from the CO2, temperature and humidity words.
pub fn measurement_from_words(words: [u16; 3]) -> Measurement {
    Measurement {
        co2: CarbonDioxide::from_ticks(words[0].into()),
        temperature: Temperature::from_ticks(words[1].into()),
        humidity: Humidity::from_ticks(words[2].into()),
    }
}

/// Removes the sensor's +0x8000 bias; the failure sentinel passes through.
pub fn frc_correction_from_word(word: u16) -> i32 {
    let raw = i32::from(word);
    if raw == FRC_FAILED {
        raw
    } else {
        raw - FRC_BIAS
    }
}

pub fn data_ready_from_status(word: u16) -> bool {
    word & DATA_READY_MASK != 0
}

pub fn serial_number_from_words(words: [u16; 3]) -> u64 {
    u64::from(words[0]) << 32 | u64::from(words[1]) << 16 | u64::from(words[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::crc::append_crc;

    fn framed(data: &[u8]) -> arrayvec::ArrayVec<u8, MAX_RESPONSE_LEN> {
        append_crc::<MAX_RESPONSE_LEN, ()>(data).unwrap()
    }

    #[test]
    fn test_read_words() {
        let raw = framed(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        assert_eq!(read_words::<3, ()>(&raw), Ok([0x1122, 0x3344, 0x5566]));
    }

    #[test]
    fn test_read_words_wrong_length() {
        let raw = framed(&[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(
            read_words::<3, ()>(&raw),
            Err(Scd4xError::InvalidLength { expected: 9, got: 6 })
        );
    }

    #[test]
    fn test_read_words_bad_crc() {
        let mut raw = framed(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        raw[8] ^= 0xFF;
        assert!(matches!(
            read_words::<3, ()>(&raw),
            Err(Scd4xError::CrcMismatch { word: 2, .. })
        ));
    }

    #[test]
    fn test_frc_correction() {
        assert_eq!(frc_correction_from_word(0xFFFF), 0xFFFF);
        assert_eq!(frc_correction_from_word(0x8032), 50);
        assert_eq!(frc_correction_from_word(0x8000), 0);
        assert_eq!(frc_correction_from_word(0x7FCE), -50);
    }

    #[test]
    fn test_data_ready() {
        assert!(!data_ready_from_status(0x0000));
        assert!(data_ready_from_status(0x0001));
        assert!(!data_ready_from_status(0x0800));
        assert!(data_ready_from_status(0x8006));
    }

    #[test]
    fn test_serial_number() {
        assert_eq!(serial_number_from_words([0x1122, 0x3344, 0x5566]), 0x1122_3344_5566);
        assert_eq!(serial_number_from_words([0xFFFF, 0xFFFF, 0xFFFF]), 0xFFFF_FFFF_FFFF);
    }

    #[test]
    fn test_measurement_from_words() {
        let sample = measurement_from_words([0x01F4, 0x6666, 0x5EB9]);
        assert_eq!(sample.co2.ppm(), 500);
        assert_eq!(sample.temperature.ticks(), 0x6666);
        assert!((sample.temperature.degrees_celsius() - 25.0).abs() < 0.01);
        assert!((sample.humidity.percent_rh() - 37.0).abs() < 0.01);
    }
}
