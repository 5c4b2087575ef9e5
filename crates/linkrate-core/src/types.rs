//! Core types for link rate calculations
//!
//! This module defines the input record, the result type, and the error
//! taxonomy shared by the link budget and capacity modules.
//!
//! ## Units
//!
//! Every input is taken as-is, in the units named by its field. No unit
//! detection or conversion is attempted beyond kilometres to metres inside
//! the Friis step.
//!
//! ```text
//!   tx_w ─┐
//!   tx_gain_db ─┤
//!   freq_hz ────┼──▶ Friis ──▶ C ─┐
//!   dist_km ────┤                 ├──▶ Shannon ──▶ floor ──▶ bits/s
//!   rx_gain_db ─┘                 │
//!   n0_j ───────┬──▶ N = n0·B ────┘
//!   bw_hz ──────┘
//! ```

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Result type for link rate operations
pub type LinkResult<T> = Result<T, LinkError>;

/// Errors that can occur while evaluating a link
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinkError {
    #[error("Expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    #[error("Invalid value for {name}: {value:?} is not a real number")]
    InputFormat { name: &'static str, value: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl LinkError {
    /// True for the wrong-argument-count case, which is not a failure.
    pub fn is_usage(&self) -> bool {
        matches!(self, LinkError::ArgumentCount { .. })
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, LinkError::Domain(_))
    }
}

/// Arithmetic domain failures raised during evaluation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Division by zero while computing {quantity}")]
    DivisionByZero { quantity: &'static str },

    #[error("Logarithm argument {argument} is not positive")]
    LogarithmArgument { argument: f64 },

    #[error("{quantity} is not finite ({value})")]
    NonFinite { quantity: &'static str, value: f64 },
}

/// How the two antenna gain inputs enter the received-power product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainMode {
    /// Gains multiply the product as given, without a dB conversion.
    #[default]
    RawFactor,
    /// Gains are converted with `10^(g/10)` before multiplying.
    Decibel,
}

impl GainMode {
    /// Multiplicative factor contributed by a gain input.
    pub fn factor(self, gain_db: f64) -> f64 {
        match self {
            GainMode::RawFactor => gain_db,
            GainMode::Decibel => 10.0_f64.powf(gain_db / 10.0),
        }
    }
}

/// The seven inputs of one link evaluation.
///
/// Field order matches the command-line argument order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkParams {
    /// Transmitted power (W)
    pub tx_power_w: f64,
    /// Transmitter antenna gain (dB)
    pub tx_gain_db: f64,
    /// Carrier frequency (Hz)
    pub frequency_hz: f64,
    /// Transmitter to receiver distance (km)
    pub distance_km: f64,
    /// Receiver antenna gain (dB)
    pub rx_gain_db: f64,
    /// Noise spectral density (J, i.e. W/Hz)
    pub noise_density_j: f64,
    /// Channel bandwidth (Hz)
    pub bandwidth_hz: f64,
}

impl LinkParams {
    /// Number of scalar inputs.
    pub const COUNT: usize = 7;

    /// Argument names, in order.
    pub const FIELD_NAMES: [&'static str; Self::COUNT] = [
        "tx_w",
        "tx_gain_db",
        "freq_hz",
        "dist_km",
        "rx_gain_db",
        "n0_j",
        "bw_hz",
    ];

    pub fn new(
        tx_power_w: f64,
        tx_gain_db: f64,
        frequency_hz: f64,
        distance_km: f64,
        rx_gain_db: f64,
        noise_density_j: f64,
        bandwidth_hz: f64,
    ) -> Self {
        Self {
            tx_power_w,
            tx_gain_db,
            frequency_hz,
            distance_km,
            rx_gain_db,
            noise_density_j,
            bandwidth_hz,
        }
    }

    /// Build from exactly seven values in argument order.
    pub fn from_slice(values: &[f64]) -> LinkResult<Self> {
        match *values {
            [tx_w, tx_gain, freq, dist, rx_gain, n0, bw] => {
                Ok(Self::new(tx_w, tx_gain, freq, dist, rx_gain, n0, bw))
            }
            _ => Err(LinkError::ArgumentCount {
                expected: Self::COUNT,
                actual: values.len(),
            }),
        }
    }

    /// Parse seven textual arguments.
    ///
    /// The count is checked before any value is parsed, so a malformed token
    /// in a wrong-length argument list still reports `ArgumentCount`.
    pub fn parse_args<S: AsRef<str>>(args: &[S]) -> LinkResult<Self> {
        if args.len() != Self::COUNT {
            return Err(LinkError::ArgumentCount {
                expected: Self::COUNT,
                actual: args.len(),
            });
        }

        let mut values = [0.0; Self::COUNT];
        for ((slot, raw), name) in values.iter_mut().zip(args).zip(Self::FIELD_NAMES) {
            let raw = raw.as_ref();
            *slot = raw.trim().parse::<f64>().map_err(|_| LinkError::InputFormat {
                name,
                value: raw.to_string(),
            })?;
        }
        Self::from_slice(&values)
    }

    pub fn to_array(&self) -> [f64; Self::COUNT] {
        [
            self.tx_power_w,
            self.tx_gain_db,
            self.frequency_hz,
            self.distance_km,
            self.rx_gain_db,
            self.noise_density_j,
            self.bandwidth_hz,
        ]
    }
}

/// Floored channel capacity in bits per second.
///
/// Holds an integral, finite `f64` so capacities beyond `i64` stay exact.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MaxBitrate(f64);

impl MaxBitrate {
    /// Floor a finite capacity. Returns `None` for NaN or infinities.
    pub fn from_capacity(capacity_bps: f64) -> Option<Self> {
        if !capacity_bps.is_finite() {
            return None;
        }
        // `+ 0.0` folds -0.0 into 0.0
        Some(Self(capacity_bps.floor() + 0.0))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// The value as `i64`, if it fits.
    pub fn as_i64(self) -> Option<i64> {
        const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
        if self.0 >= -LIMIT && self.0 < LIMIT {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for MaxBitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Integral floats format exactly with zero precision.
        write!(f, "{:.0}", self.0)
    }
}

impl Serialize for MaxBitrate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(v) => serializer.serialize_i64(v),
            None => serializer.serialize_f64(self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_args_in_order() {
        let params =
            LinkParams::parse_args(&["1000", "40", "2.4e9", "10", "30", "1e-20", "1e6"]).unwrap();
        assert_eq!(params, LinkParams::new(1000.0, 40.0, 2.4e9, 10.0, 30.0, 1e-20, 1e6));
        assert_eq!(params.to_array()[2], 2.4e9);
    }

    #[test]
    fn test_parse_args_wrong_count() {
        let err = LinkParams::parse_args(&["1", "2", "3"]).unwrap_err();
        assert_eq!(err, LinkError::ArgumentCount { expected: 7, actual: 3 });
        assert!(err.is_usage());
    }

    #[test]
    fn test_count_checked_before_format() {
        let err = LinkParams::parse_args(&["abc", "2", "3"]).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_parse_args_malformed() {
        let err =
            LinkParams::parse_args(&["1000", "40", "2.4GHz", "10", "30", "1e-20", "1e6"]).unwrap_err();
        assert_eq!(
            err,
            LinkError::InputFormat { name: "freq_hz", value: "2.4GHz".into() }
        );
        assert!(!err.is_domain());
        assert!(err.to_string().contains("freq_hz"));
    }

    #[test]
    fn test_parse_args_negative_and_special() {
        let params = LinkParams::parse_args(&["1", "-3", "1e9", "0.5", "-2.5", "1e-15", "inf"]).unwrap();
        assert_eq!(params.tx_gain_db, -3.0);
        assert_eq!(params.rx_gain_db, -2.5);
        assert!(params.bandwidth_hz.is_infinite());
    }

    #[test]
    fn test_digit_grouping_rejected() {
        let err = LinkParams::parse_args(&["1_000", "40", "2.4e9", "10", "30", "1e-20", "1e6"]).unwrap_err();
        assert_eq!(err, LinkError::InputFormat { name: "tx_w", value: "1_000".into() });

        let params = LinkParams::parse_args(&["1", "-.5", "1e9", "-inf", "1", "-nan", "1e6"]).unwrap();
        assert_eq!(params.tx_gain_db, -0.5);
        assert_eq!(params.distance_km, f64::NEG_INFINITY);
        assert!(params.noise_density_j.is_nan());
    }

    #[test]
    fn test_from_slice_wrong_length() {
        assert!(LinkParams::from_slice(&[1.0; 6]).unwrap_err().is_usage());
        assert!(LinkParams::from_slice(&[1.0; 8]).unwrap_err().is_usage());
    }

    #[test]
    fn test_gain_mode_factor() {
        assert_eq!(GainMode::default(), GainMode::RawFactor);
        assert_eq!(GainMode::RawFactor.factor(40.0), 40.0);
        assert_relative_eq!(GainMode::Decibel.factor(30.0), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(GainMode::Decibel.factor(0.0), 1.0);
    }

    #[test]
    fn test_max_bitrate_floor() {
        let rate = MaxBitrate::from_capacity(26488989.668484624).unwrap();
        assert_eq!(rate.as_i64(), Some(26488989));
        assert_eq!(rate.to_string(), "26488989");

        let negative = MaxBitrate::from_capacity(-867980.3261263263).unwrap();
        assert_eq!(negative.as_i64(), Some(-867981));
    }

    #[test]
    fn test_max_bitrate_negative_zero() {
        let rate = MaxBitrate::from_capacity(-0.0).unwrap();
        assert_eq!(rate.to_string(), "0");
    }

    #[test]
    fn test_max_bitrate_large_values() {
        let rate = MaxBitrate::from_capacity(1e20).unwrap();
        assert_eq!(rate.as_i64(), None);
        assert_eq!(rate.to_string(), "100000000000000000000");
        assert!(MaxBitrate::from_capacity(f64::NAN).is_none());
        assert!(MaxBitrate::from_capacity(f64::INFINITY).is_none());
    }

    #[test]
    fn test_params_json() {
        let params = LinkParams::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0);
        let json = serde_json::to_string(&params).unwrap();
        let back: LinkParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
        assert_eq!(serde_json::to_string(&MaxBitrate::from_capacity(12.7).unwrap()).unwrap(), "12");
    }
}
