// src/common/hal_traits.rs

use core::fmt::Debug;
use core::time::Duration;

/// Coarse classification of a transport failure.
///
/// The driver only needs to tell these three apart: a NACK has protocol
/// meaning (no data buffered, sensor still waking), the rest is propagated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BusErrorKind {
    /// The addressed device did not acknowledge.
    Nack,
    /// The device held the clock longer than the allowed stretch.
    Timeout,
    /// Anything else (arbitration loss, overrun, port closed...).
    Other,
}

/// Implemented by transport error types so the driver can classify them.
pub trait BusError: Debug {
    fn kind(&self) -> BusErrorKind;
}

/// Abstraction for timer/delay operations required by the SCD4x timing contract.
///
/// Note: the `impl-native` feature provides this on top of
/// `embedded_hal::delay::DelayNs`.
pub trait Scd4xTimer {
    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Byte-oriented I2C transceiver used by the driver.
///
/// Both operations are blocking. A failed operation must leave the bus idle
/// so the next command can be issued.
pub trait Scd4xI2c {
    /// Associated error type for communication errors.
    type Error: BusError;

    /// Writes `bytes` to the device at `address` in one transfer.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buffer` from the device at `address` in one transfer.
    ///
    /// `timeout` bounds clock stretching. `Duration::ZERO` means the device
    /// is not expected to stretch at all; implementations that cannot
    /// enforce a bound may ignore it.
    fn read(&mut self, address: u8, buffer: &mut [u8], timeout: Duration) -> Result<(), Self::Error>;
}

/// Error wrapper for transports built on `embedded-hal` I2C buses.
#[cfg(feature = "impl-native")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeI2cError<E>(pub E);

#[cfg(feature = "impl-native")]
impl<E: embedded_hal::i2c::Error> BusError for NativeI2cError<E> {
    fn kind(&self) -> BusErrorKind {
        match self.0.kind() {
            embedded_hal::i2c::ErrorKind::NoAcknowledge(_) => BusErrorKind::Nack,
            _ => BusErrorKind::Other,
        }
    }
}

/// Bundles an `embedded-hal` 1.0 I2C bus and delay provider into a driver interface.
///
/// Clock stretching on these buses is handled by the peripheral, so the
/// per-command timeout is not enforced here.
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct NativeAdapter<I2C, D> {
    i2c: I2C,
    delay: D,
}

#[cfg(feature = "impl-native")]
impl<I2C, D> NativeAdapter<I2C, D>
where
    I2C: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        NativeAdapter { i2c, delay }
    }

    /// Gives back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

#[cfg(feature = "impl-native")]
impl<I2C, D> Scd4xI2c for NativeAdapter<I2C, D>
where
    I2C: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    type Error = NativeI2cError<I2C::Error>;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes).map_err(NativeI2cError)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8], _timeout: Duration) -> Result<(), Self::Error> {
        self.i2c.read(address, buffer).map_err(NativeI2cError)
    }
}

#[cfg(feature = "impl-native")]
impl<I2C, D> Scd4xTimer for NativeAdapter<I2C, D>
where
    I2C: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

#[cfg(all(test, feature = "impl-native"))]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockHalError(ErrorKind);

    impl embedded_hal::i2c::Error for MockHalError {
        fn kind(&self) -> ErrorKind {
            self.0
        }
    }

    struct MockBus {
        fail_with: Option<ErrorKind>,
        last_address: Option<u8>,
    }

    impl ErrorType for MockBus {
        type Error = MockHalError;
    }

    impl embedded_hal::i2c::I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = Some(address);
            if let Some(kind) = self.fail_with {
                return Err(MockHalError(kind));
            }
            for op in operations {
                if let Operation::Read(buf) = op {
                    buf.fill(0xAB);
                }
            }
            Ok(())
        }
    }

    struct MockDelay(u64);

    impl embedded_hal::delay::DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0 += ns as u64;
        }
    }

    #[test]
    fn test_native_error_classification() {
        let nack = NativeI2cError(MockHalError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)));
        assert_eq!(nack.kind(), BusErrorKind::Nack);
        let other = NativeI2cError(MockHalError(ErrorKind::Bus));
        assert_eq!(other.kind(), BusErrorKind::Other);
    }

    #[test]
    fn test_native_adapter_forwards_operations() {
        let bus = MockBus { fail_with: None, last_address: None };
        let mut adapter = NativeAdapter::new(bus, MockDelay(0));

        let mut buf = [0u8; 3];
        adapter.read(0x62, &mut buf, Duration::ZERO).unwrap();
        assert_eq!(buf, [0xAB; 3]);
        adapter.delay_ms(2);

        let (bus, delay) = adapter.release();
        assert_eq!(bus.last_address, Some(0x62));
        assert!(delay.0 >= 2_000_000);
    }

    #[test]
    fn test_native_adapter_propagates_nack() {
        let bus = MockBus {
            fail_with: Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            last_address: None,
        };
        let mut adapter = NativeAdapter::new(bus, MockDelay(0));
        let err = adapter.write(0x62, &[0x36, 0xF6]).unwrap_err();
        assert_eq!(err.kind(), BusErrorKind::Nack);
    }
}
