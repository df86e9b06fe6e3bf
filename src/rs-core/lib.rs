//! Estimation of the currently-available network bandwidth, from the transfers performed by an
//! adaptive media player.
//!
//! Estimates are produced by taking the minimum of two exponentially-weighted moving averages
//! of the measured bandwidth: one evolving fast, the other slowly. Estimates thus fall quickly
//! when the bandwidth degrades, but only raise once a better bandwidth has been measured for some
//! time.

use wasm_bindgen::prelude::*;

pub mod adaptive;
pub mod bindings;
mod utils;

pub use adaptive::{
    BandwidthEstimator, BandwidthEstimatorConfig, ConfigurationError, Ewma, HalfLifeKind,
    SharedBandwidthEstimator,
};
pub use utils::logger::{Logger, LoggerLevel};
