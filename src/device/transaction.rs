// src/device/transaction.rs

use super::Scd4xDevice;
use crate::common::{
    command::Command,
    error::Scd4xError,
    hal_traits::{Scd4xI2c, Scd4xTimer},
    response::{Response, MAX_RESPONSE_LEN},
};
use core::time::Duration;

impl<IF> Scd4xDevice<IF>
where
    IF: Scd4xI2c + Scd4xTimer,
{
    /// Runs one command: write, wait, read, decode, settle.
    ///
    /// Transport errors abort immediately and skip the settle time; the
    /// caller decides how long to back off.
    pub(super) fn execute(&mut self, command: &Command) -> Result<Response, Scd4xError<IF::Error>> {
        let address = self.address.as_u8();
        let frame = command.format_into();

        log::debug!("scd4x: {:?} (opcode {:#06x})", command, command.opcode());
        log::trace!("scd4x: write {:02x?}", frame.as_slice());
        self.interface
            .write(address, &frame)
            .map_err(Scd4xError::from_bus)?;

        let response = match command.response_len() {
            Some(len) => {
                self.delay(command.read_delay());

                let mut buffer = [0u8; MAX_RESPONSE_LEN];
                let raw = buffer
                    .get_mut(..len)
                    .ok_or(Scd4xError::<IF::Error>::BufferOverflow { needed: len, got: MAX_RESPONSE_LEN })?;
                self.interface
                    .read(address, raw, command.timeout())
                    .map_err(Scd4xError::from_bus)?;
                log::trace!("scd4x: read {:02x?}", &*raw);

                command.decode::<IF::Error>(raw)?
            }
            None => Response::Empty,
        };

        self.delay(command.post_processing_time());
        Ok(response)
    }

    /// Blocks for `duration`, in whole milliseconds where possible.
    pub(super) fn delay(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let us = duration.as_micros();
        if us % 1000 == 0 {
            self.interface.delay_ms(saturate(us / 1000));
        } else {
            self.interface.delay_us(saturate(us));
        }
    }
}

fn saturate(value: u128) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
