//! # Free-Space Link Rate Library
//!
//! Computes the maximum achievable data rate of a free-space radio link.
//! Received power comes from the Friis transmission equation, and the rate
//! limit from the Shannon-Hartley theorem.
//!
//! ## Signal Flow
//!
//! ```text
//! LinkParams → Friis (C) ─┐
//!            → N0·B  (N) ─┴→ B·log2(1 + C/N) → floor → MaxBitrate
//! ```
//!
//! ## Example
//!
//! ```rust
//! use linkrate_core::prelude::*;
//!
//! let params = LinkParams::new(
//!     1000.0, // tx_w
//!     40.0,   // tx_gain_db
//!     2.4e9,  // freq_hz
//!     10.0,   // dist_km
//!     30.0,   // rx_gain_db
//!     1e-20,  // n0_j
//!     1e6,    // bw_hz
//! );
//!
//! let rate = max_bitrate(&params).unwrap();
//! assert_eq!(rate.to_string(), "26488989");
//! ```
//!
//! ## Antenna gains
//!
//! By default the two `_db` gain inputs are multiplied into the power product
//! as given, with no conversion from decibels. Use
//! [`GainMode::Decibel`] to convert them to linear ratios first.

pub mod calculator;
pub mod channel_capacity;
pub mod link_budget;
pub mod observe;
pub mod types;

pub use calculator::{max_bitrate, LinkBudgetCalculator, LinkBudgetReport};
pub use types::{DomainError, GainMode, LinkError, LinkParams, LinkResult, MaxBitrate};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::{max_bitrate, LinkBudgetCalculator, LinkBudgetReport};
    pub use crate::types::{DomainError, GainMode, LinkError, LinkParams, LinkResult, MaxBitrate};
}
