//! Bandwidth estimation, on which the choice of the next quality to request is based.

mod bandwidth_estimator;
mod configuration;
mod ewma;
mod shared;

pub use bandwidth_estimator::BandwidthEstimator;
pub use configuration::{BandwidthEstimatorConfig, ConfigurationError, HalfLifeKind};
pub use ewma::Ewma;
pub use shared::SharedBandwidthEstimator;
