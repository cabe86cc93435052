// src/common/timing.rs

use core::time::Duration;

// Values follow the SCD4x datasheet command table. Clock stretching is not
// used by any SCD4x command, so every read timeout is zero.

/// Read timeout meaning "no clock stretching expected".
pub const NO_CLOCK_STRETCH: Duration = Duration::ZERO;

/// Used where a command has no pre-read delay or no settle time.
pub const NONE: Duration = Duration::ZERO;

// === Pre-read delays (between write and read phase) ===

/// Standard command execution time before a response can be read.
pub const READ_DELAY: Duration = Duration::from_millis(1);
/// Forced recalibration computes the correction before answering.
pub const FORCED_RECALIBRATION_READ_DELAY: Duration = Duration::from_millis(400);
/// Self test runs for several seconds before answering.
pub const SELF_TEST_READ_DELAY: Duration = Duration::from_millis(5500);

// === Post-processing (settle) times ===

/// Settle time after configuration writes, start measurement and power down.
pub const SHORT_SETTLE: Duration = Duration::from_millis(1);
/// Sensor needs this long to finish the running measurement and go idle.
pub const STOP_PERIODIC_MEASUREMENT_SETTLE: Duration = Duration::from_millis(500);
/// EEPROM write time for persist settings and factory reset.
pub const EEPROM_WRITE_SETTLE: Duration = Duration::from_millis(800);
/// Reinit and wake up reload settings from EEPROM.
pub const REINIT_SETTLE: Duration = Duration::from_millis(20);
pub const WAKE_UP_SETTLE: Duration = Duration::from_millis(20);
/// Full single-shot CO2 measurement.
pub const SINGLE_SHOT_SETTLE: Duration = Duration::from_millis(1350);
/// Single-shot humidity and temperature only.
pub const SINGLE_SHOT_RHT_ONLY_SETTLE: Duration = Duration::from_millis(50);

// === Measurement intervals ===

pub const HIGH_POWER_UPDATE_INTERVAL: Duration = Duration::from_secs(5);
pub const LOW_POWER_UPDATE_INTERVAL: Duration = Duration::from_secs(30);
