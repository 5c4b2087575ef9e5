//! Free-Space Link Budget — Friis Transmission
//!
//! Computes received carrier power over an unobstructed line-of-sight path
//! from transmit power, antenna gains, a fixed transmitter line loss and the
//! free-space path gain `(λ / 4πd)²`. Noise power is the spectral density
//! integrated over the channel bandwidth.
//!
//! All quantities here are linear (watts, metres, plain ratios). The dB
//! helpers exist for reporting only.
//!
//! ## Example
//!
//! ```rust
//! use linkrate_core::link_budget::{received_power_w, noise_power_w};
//! use linkrate_core::{GainMode, LinkParams};
//!
//! let params = LinkParams::new(1000.0, 40.0, 2.4e9, 10.0, 30.0, 1e-20, 1e6);
//! let c = received_power_w(&params, GainMode::RawFactor).unwrap();
//! let n = noise_power_w(params.noise_density_j, params.bandwidth_hz);
//!
//! assert!(c > 0.0);
//! assert_eq!(n, 1e-14);
//! ```

use std::f64::consts::PI;

use crate::types::{DomainError, GainMode, LinkParams, LinkResult};

/// Speed of light (m/s).
pub const SPEED_OF_LIGHT_M_S: f64 = 2.99792458e8;

/// Transmitter-to-antenna line loss (dB).
pub const LINE_LOSS_DB: f64 = -1.0;

/// Atmospheric loss (linear). Free space, so unity.
pub const ATMOSPHERIC_LOSS: f64 = 1.0;

pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Line loss as a linear ratio, `10^(-1/10)`.
pub fn line_loss_linear() -> f64 {
    10.0_f64.powf(LINE_LOSS_DB / 10.0)
}

/// Carrier wavelength in metres, `c / f`.
pub fn wavelength_m(frequency_hz: f64) -> LinkResult<f64> {
    if frequency_hz == 0.0 {
        return Err(DomainError::DivisionByZero { quantity: "wavelength" }.into());
    }
    Ok(SPEED_OF_LIGHT_M_S / frequency_hz)
}

/// Kilometres to metres.
pub fn km_to_m(distance_km: f64) -> f64 {
    distance_km * METERS_PER_KILOMETER
}

/// Free-space path gain `(λ / (4π·d))²` (linear, ≤ 1 in the far field).
pub fn free_space_path_gain(wavelength_m: f64, distance_m: f64) -> LinkResult<f64> {
    let denominator = 4.0 * PI * distance_m;
    if denominator == 0.0 {
        return Err(DomainError::DivisionByZero { quantity: "path gain" }.into());
    }
    Ok((wavelength_m / denominator).powi(2))
}

/// Free-space path loss in dB.
///
/// FSPL = 20*log10(4*pi*d*f/c)
///
/// Returns 0.0 for non-positive distance or frequency.
pub fn free_space_path_loss_db(frequency_hz: f64, distance_m: f64) -> f64 {
    if distance_m <= 0.0 || frequency_hz <= 0.0 {
        return 0.0;
    }
    20.0 * (4.0 * PI * distance_m * frequency_hz / SPEED_OF_LIGHT_M_S).log10()
}

/// Received carrier power `C` in watts.
///
/// C = P_t · L_l · G_t · (λ/4πd)² · L_a · G_r
///
/// The factors are multiplied in exactly this order. With
/// [`GainMode::RawFactor`] the gains enter as given.
pub fn received_power_w(params: &LinkParams, gain_mode: GainMode) -> LinkResult<f64> {
    let wavelength = wavelength_m(params.frequency_hz)?;
    let distance = km_to_m(params.distance_km);
    let path_gain = free_space_path_gain(wavelength, distance)?;

    let power = params.tx_power_w
        * line_loss_linear()
        * gain_mode.factor(params.tx_gain_db)
        * path_gain
        * ATMOSPHERIC_LOSS
        * gain_mode.factor(params.rx_gain_db);

    tracing::trace!(wavelength, distance, path_gain, power, "received power");
    Ok(power)
}

/// Noise power `N = N0 · B` in watts.
pub fn noise_power_w(noise_density_j: f64, bandwidth_hz: f64) -> f64 {
    noise_density_j * bandwidth_hz
}

pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

/// dB value of a power or ratio, `None` when it has no logarithm.
pub(crate) fn checked_db(linear: f64) -> Option<f64> {
    (linear > 0.0).then(|| linear_to_db(linear))
}
