use thiserror::Error;

use crate::Logger;

const DEFAULT_SLOW_HALF_LIFE: f64 = 10.;
const DEFAULT_FAST_HALF_LIFE: f64 = 2.;
const DEFAULT_BANDWIDTH_ESTIMATE: f64 = 500_000.;

/// Options on which a `BandwidthEstimator` is constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct BandwidthEstimatorConfig {
    /// "Half life", in number of samples, of the slowly-evolving average.
    ///
    /// The larger it is, the longer it takes for a raise in bandwidth to be reflected in
    /// estimates.
    pub slow_half_life: f64,

    /// "Half life", in number of samples, of the fast-evolving average.
    ///
    /// Governs how quickly estimates fall after the bandwidth degraded. Should be lower than
    /// `slow_half_life`.
    pub fast_half_life: f64,

    /// Estimate, in bits per second, returned as long as no sample has been added.
    pub default_estimate: f64,
}

impl Default for BandwidthEstimatorConfig {
    fn default() -> Self {
        Self {
            slow_half_life: DEFAULT_SLOW_HALF_LIFE,
            fast_half_life: DEFAULT_FAST_HALF_LIFE,
            default_estimate: DEFAULT_BANDWIDTH_ESTIMATE,
        }
    }
}

impl BandwidthEstimatorConfig {
    /// Check that those options can be relied on to build a `BandwidthEstimator`.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_half_life(HalfLifeKind::Slow, self.slow_half_life)?;
        check_half_life(HalfLifeKind::Fast, self.fast_half_life)?;
        if !self.default_estimate.is_finite() || self.default_estimate < 0. {
            return Err(ConfigurationError::InvalidDefaultEstimate(
                self.default_estimate,
            ));
        }
        if self.fast_half_life >= self.slow_half_life {
            Logger::lazy_warn(&|| {
                format!(
                    "Bandwidth: fast half life ({}) not lower than slow half life ({}), \
                     estimates won't adapt down faster than up",
                    self.fast_half_life, self.slow_half_life
                )
            });
        }
        Ok(())
    }
}

fn check_half_life(which: HalfLifeKind, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0. {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidHalfLife { which, value })
    }
}

/// Identify one of the two averages of a `BandwidthEstimator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalfLifeKind {
    Slow,
    Fast,
}

impl std::fmt::Display for HalfLifeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HalfLifeKind::Slow => write!(f, "slow"),
            HalfLifeKind::Fast => write!(f, "fast"),
        }
    }
}

/// Error returned when a `BandwidthEstimatorConfig` cannot be used.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationError {
    #[error("Invalid {which} half life: {value}. It should be a finite, non-negative number.")]
    InvalidHalfLife { which: HalfLifeKind, value: f64 },
    #[error("Invalid default bandwidth estimate: {0}. It should be a finite, non-negative number.")]
    InvalidDefaultEstimate(f64),
}
