//! Shannon Channel Capacity — AWGN
//!
//! Shannon-Hartley limit for a band-limited channel with additive white
//! Gaussian noise:
//!
//! ```text
//! C = B · log2(1 + S/N)   bits/s
//! ```
//!
//! Every step is checked: a zero noise power, a non-positive logarithm
//! argument, or a non-finite capacity is a [`DomainError`] rather than a
//! silent NaN.
//!
//! ## Example
//!
//! ```rust
//! use linkrate_core::channel_capacity::{awgn_capacity, floor_bitrate};
//!
//! // C/N = 1 gives exactly one bit per hertz
//! let cap = awgn_capacity(1.0e6, 1.0).unwrap();
//! assert_eq!(cap, 1.0e6);
//! assert_eq!(floor_bitrate(cap).unwrap().as_i64(), Some(1_000_000));
//! ```

use std::f64::consts::LN_2;

use crate::types::{DomainError, LinkResult, MaxBitrate};

/// Carrier-to-noise ratio `C/N` (linear).
pub fn carrier_to_noise(carrier_w: f64, noise_w: f64) -> LinkResult<f64> {
    if noise_w == 0.0 {
        return Err(DomainError::DivisionByZero { quantity: "carrier-to-noise ratio" }.into());
    }
    Ok(carrier_w / noise_w)
}

/// Spectral efficiency `log2(1 + C/N)` in bits/s/Hz.
///
/// Evaluated as `ln(x) / ln 2`. A NaN ratio passes through and is rejected
/// when the capacity is floored.
pub fn spectral_efficiency(cnr: f64) -> LinkResult<f64> {
    let argument = 1.0 + cnr;
    if argument <= 0.0 {
        return Err(DomainError::LogarithmArgument { argument }.into());
    }
    Ok(argument.ln() / LN_2)
}

/// Shannon capacity of an AWGN channel in bits/s.
///
/// # Arguments
/// * `bandwidth_hz` - Channel bandwidth in Hz
/// * `cnr` - Carrier-to-noise ratio (linear scale, **not** dB)
pub fn awgn_capacity(bandwidth_hz: f64, cnr: f64) -> LinkResult<f64> {
    Ok(bandwidth_hz * spectral_efficiency(cnr)?)
}

/// Floor a capacity to whole bits per second.
pub fn floor_bitrate(capacity_bps: f64) -> LinkResult<MaxBitrate> {
    MaxBitrate::from_capacity(capacity_bps).ok_or_else(|| {
        DomainError::NonFinite {
            quantity: "capacity",
            value: capacity_bps,
        }
        .into()
    })
}
