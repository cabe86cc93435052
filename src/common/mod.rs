// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod command;
pub mod crc;
pub mod error;
pub mod hal_traits;
pub mod response;
pub mod timing;
pub mod types;
pub mod units;

// --- Re-export key types/traits/functions for easier access ---

// From address.rs
pub use address::Scd4xAddr;

// From command.rs
pub use command::{Command, Frame, MAX_FRAME_LEN};

// From crc.rs
pub use crc::{append_crc, calculate_crc8, validate_and_strip};

// From error.rs
pub use error::Scd4xError;

// From hal_traits.rs
pub use hal_traits::{BusError, BusErrorKind, Scd4xI2c, Scd4xTimer};

// From response.rs
pub use response::{Response, FRC_FAILED, MAX_RESPONSE_LEN};

// From types.rs
pub use types::{CarbonDioxide, Humidity, Measurement, PowerMode, Temperature, TemperatureOffset};

// timing.rs and units.rs are reached through their module paths.

// --- Feature-gated re-exports ---

// Native HAL integration (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::{NativeAdapter, NativeI2cError};
