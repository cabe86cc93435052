// src/common/units.rs

//! Conversions between raw register ticks and physical units.
//!
//! The sensor registers are 16 bits wide, so the defined tick domain is
//! `0..=65535`. The functions accept any `u32` (65536 is the conventional
//! full-scale reference point), but precision outside the register range
//! is not meaningful.

/// Full-scale divisor shared by all scaled quantities (2^16).
pub const TICKS_FULL_SCALE: f32 = 65536.0;

/// CO2 concentration in ppm. The register holds ppm directly.
#[inline]
pub const fn co2_ppm_from_ticks(ticks: u32) -> u32 {
    ticks
}

/// Ambient temperature: `-45 + 175 * ticks / 2^16`.
#[inline]
pub fn celsius_from_ticks(ticks: u32) -> f32 {
    -45.0 + 175.0 * ticks as f32 / TICKS_FULL_SCALE
}

/// Relative humidity: `100 * ticks / 2^16`.
#[inline]
pub fn percent_rh_from_ticks(ticks: u32) -> f32 {
    100.0 * ticks as f32 / TICKS_FULL_SCALE
}

/// Temperature offset: `175 * ticks / 2^16`. No -45 bias, unlike [`celsius_from_ticks`].
#[inline]
pub fn offset_celsius_from_ticks(ticks: u32) -> f32 {
    175.0 * ticks as f32 / TICKS_FULL_SCALE
}

/// Inverse of [`offset_celsius_from_ticks`], rounded to the nearest tick
/// (halves away from zero).
///
/// Negative offsets give negative tick counts; the caller decides whether
/// that is representable.
#[inline]
pub fn offset_ticks_from_celsius(celsius: f32) -> i32 {
    round_half_away(celsius * TICKS_FULL_SCALE / 175.0)
}

#[inline]
pub fn fahrenheit_from_celsius(celsius: f32) -> f32 {
    32.0 + celsius * 9.0 / 5.0
}

// core has no f32::round without std
fn round_half_away(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}
