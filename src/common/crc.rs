// src/common/crc.rs

use super::error::Scd4xError;
use arrayvec::ArrayVec;
use crc::{Algorithm, Crc};

/// CRC-8 used by Sensirion sensors on every 16-bit word.
/// Polynomial: 0x31 (x^8 + x^5 + x^4 + 1)
/// Initial Value: 0xFF
/// Input Reflected: false
/// Output Reflected: false
/// Final XOR: 0x00
/// Check Value: 0xF7 (for "123456789"), catalogued as CRC-8/NRSC-5
pub const SENSIRION_CRC: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

const CRC_COMPUTER: Crc<u8> = Crc::<u8>::new(&SENSIRION_CRC);

/// Bytes per data word on the wire, excluding its checksum.
pub const WORD_LEN: usize = 2;
/// Bytes per data word on the wire, including its checksum.
pub const WORD_WITH_CRC_LEN: usize = 3;

/// Calculates the checksum of a single 2-byte word (byte 0 first).
#[inline]
pub fn calculate_crc8(word: &[u8]) -> u8 {
    CRC_COMPUTER.checksum(word)
}

/// Inserts a checksum byte after every 2-byte word of `data`.
///
/// # Returns
///
/// * `Err(Scd4xError::InvalidLength)` if `data` is not made of whole words.
/// * `Err(Scd4xError::BufferOverflow)` if the result does not fit in `N` bytes.
pub fn append_crc<const N: usize, E>(data: &[u8]) -> Result<ArrayVec<u8, N>, Scd4xError<E>>
where
    E: core::fmt::Debug,
{
    if data.len() % WORD_LEN != 0 {
        return Err(Scd4xError::InvalidLength {
            expected: data.len() + 1,
            got: data.len(),
        });
    }
    let needed = data.len() / WORD_LEN * WORD_WITH_CRC_LEN;
    if needed > N {
        return Err(Scd4xError::BufferOverflow { needed, got: N });
    }

    let mut out = ArrayVec::new();
    for word in data.chunks_exact(WORD_LEN) {
        out.push(word[0]);
        out.push(word[1]);
        out.push(calculate_crc8(word));
    }
    Ok(out)
}

/// Checks every `[hi, lo, crc]` group of a response and returns the data
/// bytes with the checksums removed, in order.
///
/// # Returns
///
/// * `Err(Scd4xError::InvalidLength)` if `data` is not made of whole groups.
/// * `Err(Scd4xError::BufferOverflow)` if the stripped data does not fit in `N` bytes.
/// * `Err(Scd4xError::CrcMismatch)` for the first group whose checksum is wrong.
pub fn validate_and_strip<const N: usize, E>(data: &[u8]) -> Result<ArrayVec<u8, N>, Scd4xError<E>>
where
    E: core::fmt::Debug,
{
    let remainder = data.len() % WORD_WITH_CRC_LEN;
    if remainder != 0 {
        return Err(Scd4xError::InvalidLength {
            expected: data.len() - remainder + WORD_WITH_CRC_LEN,
            got: data.len(),
        });
    }
    let needed = data.len() / WORD_WITH_CRC_LEN * WORD_LEN;
    if needed > N {
        return Err(Scd4xError::BufferOverflow { needed, got: N });
    }

    let mut out = ArrayVec::new();
    for (index, group) in data.chunks_exact(WORD_WITH_CRC_LEN).enumerate() {
        let calculated = calculate_crc8(&group[..WORD_LEN]);
        if calculated != group[2] {
            return Err(Scd4xError::CrcMismatch {
                word: index,
                received: group[2],
                calculated,
            });
        }
        out.push(group[0]);
        out.push(group[1]);
    }
    Ok(out)
}
