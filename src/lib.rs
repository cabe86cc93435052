// src/lib.rs

//! Blocking driver for the Sensirion SCD4x (SCD40/SCD41) CO2, temperature
//! and humidity sensor.
//!
//! [`common`] holds the transport-free codec: command frames, checksums,
//! response decoding and unit conversion. [`device`] drives one sensor over
//! anything implementing [`Scd4xI2c`] and [`Scd4xTimer`].
//!
//! ```no_run
//! use scd4x::{PowerMode, Scd4xDevice, Scd4xError, Scd4xI2c, Scd4xTimer};
//!
//! fn sample<IF: Scd4xI2c + Scd4xTimer>(
//!     sensor: &mut Scd4xDevice<IF>,
//! ) -> Result<u32, Scd4xError<IF::Error>> {
//!     sensor.wake_up()?;
//!     sensor.start_periodic_measurement(PowerMode::High)?;
//!     while !sensor.get_data_ready_status()? {}
//!     let measurement = sensor.read_measurement()?;
//!     sensor.stop_periodic_measurement()?;
//!     Ok(measurement.co2.ppm())
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod common;
pub mod device;

// Re-export key types for convenience
pub use common::{
    BusError, BusErrorKind, CarbonDioxide, Command, Humidity, Measurement, PowerMode, Response,
    Scd4xAddr, Scd4xError, Scd4xI2c, Scd4xTimer, Temperature, TemperatureOffset,
};
pub use device::Scd4xDevice;

#[cfg(feature = "impl-native")]
pub use common::{NativeAdapter, NativeI2cError};
