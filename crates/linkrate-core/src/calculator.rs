//! Maximum Bitrate Calculator
//!
//! Chains the Friis received-power estimate into the Shannon-Hartley limit
//! and floors the result to whole bits per second.
//!
//! ```text
//! λ = c / f
//! d = dist_km · 1000
//! C = P_t · L_l · G_t · (λ / 4πd)² · L_a · G_r
//! N = N0 · B
//! R = ⌊ B · log2(1 + C/N) ⌋
//! ```
//!
//! ## Example
//!
//! ```rust
//! use linkrate_core::{LinkBudgetCalculator, LinkParams};
//!
//! let params = LinkParams::new(1000.0, 40.0, 2.4e9, 10.0, 30.0, 1e-20, 1e6);
//! let rate = LinkBudgetCalculator::new().compute(&params).unwrap();
//! assert_eq!(rate.as_i64(), Some(26_488_989));
//! ```

use serde::Serialize;

use crate::channel_capacity::{awgn_capacity, carrier_to_noise, floor_bitrate, spectral_efficiency};
use crate::link_budget::{
    checked_db, free_space_path_gain, free_space_path_loss_db, km_to_m, line_loss_linear,
    noise_power_w, received_power_w, wavelength_m, ATMOSPHERIC_LOSS,
};
use crate::types::{GainMode, LinkParams, LinkResult, MaxBitrate};

/// Every intermediate quantity of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkBudgetReport {
    pub params: LinkParams,
    pub gain_mode: GainMode,
    /// Carrier wavelength (m)
    pub wavelength_m: f64,
    /// Link distance (m)
    pub distance_m: f64,
    /// Transmitter line loss (linear)
    pub line_loss: f64,
    /// Atmospheric loss (linear)
    pub atmospheric_loss: f64,
    /// Factor applied for the transmitter gain
    pub tx_gain_factor: f64,
    /// Factor applied for the receiver gain
    pub rx_gain_factor: f64,
    /// Free-space path gain (λ/4πd)²
    pub path_gain: f64,
    /// Free-space path loss (dB, positive)
    pub path_loss_db: f64,
    /// Received carrier power (W)
    pub received_power_w: f64,
    /// Received carrier power (dBW), if positive
    pub received_power_dbw: Option<f64>,
    /// Noise power over the bandwidth (W)
    pub noise_power_w: f64,
    /// Noise power (dBW), if positive
    pub noise_power_dbw: Option<f64>,
    /// Carrier-to-noise ratio (linear)
    pub cnr: f64,
    /// Carrier-to-noise ratio (dB), if positive
    pub cnr_db: Option<f64>,
    /// log2(1 + C/N) (bits/s/Hz)
    pub spectral_efficiency: f64,
    /// Unfloored Shannon capacity (bits/s)
    pub capacity_bps: f64,
    /// Floored capacity (bits/s)
    pub max_bitrate_bps: MaxBitrate,
}

/// Evaluates the link for a given gain interpretation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkBudgetCalculator {
    gain_mode: GainMode,
}

impl LinkBudgetCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gain_mode(mut self, gain_mode: GainMode) -> Self {
        self.gain_mode = gain_mode;
        self
    }

    pub fn gain_mode(&self) -> GainMode {
        self.gain_mode
    }

    /// Maximum achievable bitrate, floored to whole bits per second.
    pub fn compute(&self, params: &LinkParams) -> LinkResult<MaxBitrate> {
        let carrier = received_power_w(params, self.gain_mode)?;
        let noise = noise_power_w(params.noise_density_j, params.bandwidth_hz);
        let cnr = carrier_to_noise(carrier, noise)?;
        let capacity = awgn_capacity(params.bandwidth_hz, cnr)?;
        let rate = floor_bitrate(capacity)?;

        tracing::debug!(
            carrier_w = carrier,
            noise_w = noise,
            cnr,
            capacity_bps = capacity,
            max_bitrate_bps = %rate,
            "link evaluated"
        );
        Ok(rate)
    }

    /// Same evaluation as [`compute`](Self::compute), keeping every
    /// intermediate value.
    pub fn report(&self, params: &LinkParams) -> LinkResult<LinkBudgetReport> {
        let wavelength = wavelength_m(params.frequency_hz)?;
        let distance = km_to_m(params.distance_km);
        let path_gain = free_space_path_gain(wavelength, distance)?;
        let received = received_power_w(params, self.gain_mode)?;
        let noise = noise_power_w(params.noise_density_j, params.bandwidth_hz);
        let cnr = carrier_to_noise(received, noise)?;
        let efficiency = spectral_efficiency(cnr)?;
        let capacity = params.bandwidth_hz * efficiency;
        let max_bitrate = floor_bitrate(capacity)?;

        Ok(LinkBudgetReport {
            params: *params,
            gain_mode: self.gain_mode,
            wavelength_m: wavelength,
            distance_m: distance,
            line_loss: line_loss_linear(),
            atmospheric_loss: ATMOSPHERIC_LOSS,
            tx_gain_factor: self.gain_mode.factor(params.tx_gain_db),
            rx_gain_factor: self.gain_mode.factor(params.rx_gain_db),
            path_gain,
            path_loss_db: free_space_path_loss_db(params.frequency_hz, distance),
            received_power_w: received,
            received_power_dbw: checked_db(received),
            noise_power_w: noise,
            noise_power_dbw: checked_db(noise),
            cnr,
            cnr_db: checked_db(cnr),
            spectral_efficiency: efficiency,
            capacity_bps: capacity,
            max_bitrate_bps: max_bitrate,
        })
    }
}

/// Maximum bitrate with the gains taken as raw factors.
pub fn max_bitrate(params: &LinkParams) -> LinkResult<MaxBitrate> {
    LinkBudgetCalculator::new().compute(params)
}
