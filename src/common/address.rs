// src/common/address.rs

use super::error::Scd4xError;
use core::convert::TryFrom;
use core::fmt;

/// 7-bit I2C address of an SCD4x.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Scd4xAddr(u8);

impl Scd4xAddr {
    /// Factory address of every SCD40/SCD41.
    pub const DEFAULT_ADDRESS: Scd4xAddr = Scd4xAddr(0x62);

    /// Creates a new `Scd4xAddr` if `address` fits in 7 bits.
    /// Returns `Result<Self, Scd4xError<()>>` because validation itself
    /// cannot cause an I/O error.
    pub fn new(address: u8) -> Result<Self, Scd4xError> {
        if Self::is_valid_address(address) {
            Ok(Scd4xAddr(address))
        } else {
            Err(Scd4xError::InvalidAddress(address))
        }
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_valid_address(address: u8) -> bool {
        address <= 0x7F
    }
}

impl Default for Scd4xAddr {
    fn default() -> Self {
        Self::DEFAULT_ADDRESS
    }
}

impl TryFrom<u8> for Scd4xAddr {
    type Error = Scd4xError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scd4xAddr> for u8 {
    fn from(value: Scd4xAddr) -> Self {
        value.0
    }
}

impl fmt::Display for Scd4xAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(Scd4xAddr::new(0x00).is_ok());
        assert!(Scd4xAddr::new(0x62).is_ok());
        assert!(Scd4xAddr::new(0x7F).is_ok());
    }

    #[test]
    fn test_invalid_addresses() {
        assert_eq!(Scd4xAddr::new(0x80), Err(Scd4xError::InvalidAddress(0x80)));
        assert_eq!(Scd4xAddr::try_from(0xC4), Err(Scd4xError::InvalidAddress(0xC4)));
    }

    #[test]
    fn test_default_address() {
        assert_eq!(Scd4xAddr::default().as_u8(), 0x62);
        assert_eq!(u8::from(Scd4xAddr::DEFAULT_ADDRESS), 0x62);
        assert_eq!(Scd4xAddr::DEFAULT_ADDRESS.to_string(), "0x62");
    }
}
