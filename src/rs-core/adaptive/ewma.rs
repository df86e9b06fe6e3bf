/// Exponentially-weighted moving average over a series of samples.
///
/// Every sample counts for exactly `1` in the total weight and the history is multiplied by
/// `alpha` each time one is added. The "half life" is thus a number of samples: after that many
/// of them, an older sample only weighs half of what it did.
#[derive(Clone, Debug)]
pub struct Ewma {
    half_life: f64,
    alpha: f64,
    last_estimate: f64,
    total_weight: u64,
}

impl Ewma {
    /// Creates a new `Ewma` with the given "half life", in samples.
    ///
    /// About half of the estimated value will come from the last `half_life` samples by weight.
    /// A `half_life` of `0` disables decay altogether.
    pub fn new(half_life: f64) -> Self {
        Self::with_initial(half_life, 0., 0)
    }

    /// Creates a new `Ewma` starting from an already-known estimate and weight.
    pub fn with_initial(half_life: f64, estimate: f64, weight: u64) -> Self {
        debug_assert!(half_life >= 0., "negative half life: {half_life}");
        // Larger values of alpha expire historical data more slowly.
        let alpha = if half_life == 0. {
            0.
        } else {
            f64::exp(0.5f64.ln() / half_life)
        };
        Self {
            half_life,
            alpha,
            last_estimate: estimate,
            total_weight: weight,
        }
    }

    /// Adds new sample to the `Ewma`.
    pub fn sample(&mut self, val: f64) {
        self.last_estimate = val * (1. - self.alpha) + self.alpha * self.last_estimate;
        self.total_weight += 1;
    }

    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    /// Amount of samples added to this `Ewma` (initial weight included).
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Accumulated value, without the zero-history bias correction.
    pub fn raw_estimate(&self) -> f64 {
        self.last_estimate
    }

    /// Get the current estimate produced by the `Ewma`.
    ///
    /// The first samples are corrected for the implicit `0` history the average starts from.
    /// Without any sample, the raw (usually `0.`) value is returned as is.
    pub fn estimate(&self) -> f64 {
        if self.alpha != 0. {
            let zero_factor = 1. - self.alpha.powf(self.total_weight as f64);
            if zero_factor != 0. {
                return self.last_estimate / zero_factor;
            }
        }
        self.last_estimate
    }
}
