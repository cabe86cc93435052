// src/common/error.rs

use super::hal_traits::{BusError, BusErrorKind};

/// Errors returned by the codec functions and by [`crate::Scd4xDevice`].
///
/// `E` is the transport's error type. Pure codec functions that cannot touch
/// the bus use the default `E = ()`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Scd4xError<E = ()>
where
    E: core::fmt::Debug,
{
    /// The sensor did not acknowledge. On Read Measurement this means no new
    /// sample is buffered yet.
    #[error("device did not acknowledge: {0:?}")]
    Nack(E),

    /// Clock stretching exceeded the command's timeout.
    #[error("bus timeout: {0:?}")]
    Timeout(E),

    /// Any other transport failure.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// Received checksum does not match the one calculated over the word.
    #[error("CRC mismatch in word {word}: received {received:#04x}, calculated {calculated:#04x}")]
    CrcMismatch { word: usize, received: u8, calculated: u8 },

    /// Argument cannot be represented on the wire or names no known variant.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Bus address does not fit in 7 bits.
    #[error("invalid I2C address: {0:#04x}")]
    InvalidAddress(u8),

    /// Buffer length does not match the word framing.
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// Fixed-capacity buffer was too small.
    #[error("buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },

    /// Decoded response does not belong to the command that was issued.
    #[error("unexpected response")]
    UnexpectedResponse,
}

impl<E: BusError> Scd4xError<E> {
    /// Sorts a transport error into the NACK / timeout / I/O variants.
    pub fn from_bus(error: E) -> Self {
        match error.kind() {
            BusErrorKind::Nack => Scd4xError::Nack(error),
            BusErrorKind::Timeout => Scd4xError::Timeout(error),
            BusErrorKind::Other => Scd4xError::Io(error),
        }
    }
}

impl<E: core::fmt::Debug> Scd4xError<E> {
    /// Returns `true` for a device NACK.
    pub fn is_nack(&self) -> bool {
        matches!(self, Scd4xError::Nack(_))
    }

    /// Re-types an error that carries no transport payload.
    ///
    /// Transport variants cannot be produced by the codec, so they map onto
    /// `UnexpectedResponse` rather than being dropped silently.
    pub(crate) fn lift<F: core::fmt::Debug>(self) -> Scd4xError<F> {
        match self {
            Scd4xError::CrcMismatch { word, received, calculated } => {
                Scd4xError::CrcMismatch { word, received, calculated }
            }
            Scd4xError::InvalidArgument(msg) => Scd4xError::InvalidArgument(msg),
            Scd4xError::InvalidAddress(addr) => Scd4xError::InvalidAddress(addr),
            Scd4xError::InvalidLength { expected, got } => Scd4xError::InvalidLength { expected, got },
            Scd4xError::BufferOverflow { needed, got } => Scd4xError::BufferOverflow { needed, got },
            Scd4xError::Nack(_)
            | Scd4xError::Timeout(_)
            | Scd4xError::Io(_)
            | Scd4xError::UnexpectedResponse => Scd4xError::UnexpectedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum MockBusError {
        Nack,
        Stretch,
        Wire,
    }

    impl BusError for MockBusError {
        fn kind(&self) -> BusErrorKind {
            match self {
                MockBusError::Nack => BusErrorKind::Nack,
                MockBusError::Stretch => BusErrorKind::Timeout,
                MockBusError::Wire => BusErrorKind::Other,
            }
        }
    }

    #[test]
    fn test_bus_errors_are_classified() {
        assert_eq!(Scd4xError::from_bus(MockBusError::Nack), Scd4xError::Nack(MockBusError::Nack));
        assert_eq!(Scd4xError::from_bus(MockBusError::Stretch), Scd4xError::Timeout(MockBusError::Stretch));
        assert_eq!(Scd4xError::from_bus(MockBusError::Wire), Scd4xError::Io(MockBusError::Wire));
        assert!(Scd4xError::from_bus(MockBusError::Nack).is_nack());
        assert!(!Scd4xError::from_bus(MockBusError::Wire).is_nack());
    }

    #[test]
    fn test_lift_keeps_codec_errors() {
        let err: Scd4xError = Scd4xError::CrcMismatch { word: 1, received: 0x00, calculated: 0x92 };
        let lifted: Scd4xError<MockBusError> = err.lift();
        assert_eq!(lifted, Scd4xError::CrcMismatch { word: 1, received: 0x00, calculated: 0x92 });

        let lifted: Scd4xError<MockBusError> = Scd4xError::<()>::InvalidArgument("x").lift();
        assert_eq!(lifted, Scd4xError::InvalidArgument("x"));
    }

    #[test]
    fn test_display_messages() {
        let err: Scd4xError = Scd4xError::CrcMismatch { word: 2, received: 0x01, calculated: 0x92 };
        assert_eq!(err.to_string(), "CRC mismatch in word 2: received 0x01, calculated 0x92");
        let err: Scd4xError = Scd4xError::InvalidAddress(0x80);
        assert_eq!(err.to_string(), "invalid I2C address: 0x80");
    }
}
