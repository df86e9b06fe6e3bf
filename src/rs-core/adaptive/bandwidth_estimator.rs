use super::{
    configuration::{BandwidthEstimatorConfig, ConfigurationError},
    ewma::Ewma,
};
use crate::Logger;

/// Transfers shorter than that, in milliseconds, are considered to have lasted that long.
///
/// Timers are not precise enough to measure them, and would lead to unrealistic spikes.
const MINIMUM_TRANSFER_DURATION_MS: f64 = 2.;

/// Amount of samples the fast average should have received before being relied on.
const MINIMUM_WEIGHT: u64 = 1;

/// Bandwidth estimates, in bits per second, derived from measured transfers.
///
/// Each transfer feeds two `Ewma`: one with a short half life, one with a long one. The lowest of
/// both is reported, so a drop in bandwidth shows up after a single sample while a raise is only
/// trusted once the slow average caught up with it.
#[derive(Clone, Debug)]
pub struct BandwidthEstimator {
    default_estimate: f64,
    fast_ewma: Ewma,
    slow_ewma: Ewma,
}

impl BandwidthEstimator {
    /// Creates a new `BandwidthEstimator`.
    ///
    /// Both half lives are in number of samples and should not be negative. `default_estimate`,
    /// in bits per second, is what will be returned until a first sample is added.
    pub fn new(slow_half_life: f64, fast_half_life: f64, default_estimate: f64) -> Self {
        Self {
            default_estimate,
            fast_ewma: Ewma::new(fast_half_life),
            slow_ewma: Ewma::new(slow_half_life),
        }
    }

    /// Creates a new `BandwidthEstimator` after checking the given options.
    pub fn from_config(config: &BandwidthEstimatorConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self::new(
            config.slow_half_life,
            config.fast_half_life,
            config.default_estimate,
        ))
    }

    /// Feed the `BandwidthEstimator` a new bandwidth data sample.
    ///
    /// `duration_ms` should be the time taken by the transfer in milliseconds and `num_bytes`
    /// the amount of bytes it transferred. Transfers of `0` bytes are ignored.
    pub fn sample(&mut self, duration_ms: f64, num_bytes: u64) {
        self.sample_bytes(duration_ms, num_bytes as f64);
    }

    /// Same as `sample`, for hosts which count bytes as floating-point numbers.
    ///
    /// Only strictly positive amounts are taken into account.
    pub(crate) fn sample_bytes(&mut self, duration_ms: f64, num_bytes: f64) {
        if num_bytes.is_nan() || num_bytes <= 0. {
            Logger::debug("Bandwidth: ignoring sample without any byte transferred");
            return;
        }
        // NaN durations are clamped too.
        let duration_ms = if duration_ms >= MINIMUM_TRANSFER_DURATION_MS {
            duration_ms
        } else {
            MINIMUM_TRANSFER_DURATION_MS
        };
        let bandwidth = num_bytes * 8000. / duration_ms;
        Logger::lazy_debug(&|| {
            format!(
                "Bandwidth: new sample of {num_bytes}B in {duration_ms}ms ({bandwidth}bps)"
            )
        });
        self.fast_ewma.sample(bandwidth);
        self.slow_ewma.sample(bandwidth);
    }

    /// Returns `true` if enough samples have been added to produce an actual estimate.
    pub fn can_estimate(&self) -> bool {
        self.fast_ewma.total_weight() >= MINIMUM_WEIGHT
    }

    /// Get the current estimate made by the `BandwidthEstimator`, in bits per second.
    ///
    /// Returns the configured default estimate if it does not have enough data yet.
    pub fn get_estimate(&self) -> f64 {
        if self.can_estimate() {
            self.fast_ewma.estimate().min(self.slow_ewma.estimate())
        } else {
            self.default_estimate
        }
    }

    pub fn default_estimate(&self) -> f64 {
        self.default_estimate
    }

    /// Current estimate of the fast-evolving average alone.
    pub fn fast_estimate(&self) -> f64 {
        self.fast_ewma.estimate()
    }

    /// Current estimate of the slowly-evolving average alone.
    pub fn slow_estimate(&self) -> f64 {
        self.slow_ewma.estimate()
    }

    /// Amount of samples taken into account until now.
    pub fn total_weight(&self) -> u64 {
        self.fast_ewma.total_weight()
    }

    /// Reset the `BandwidthEstimator` as if there was no sample added yet.
    pub fn reset(&mut self) {
        self.fast_ewma = Ewma::new(self.fast_ewma.half_life());
        self.slow_ewma = Ewma::new(self.slow_ewma.half_life());
    }

    /// Dispose of this `BandwidthEstimator`. It holds no resource, so this only drops it.
    pub fn destroy(self) {}
}

impl Default for BandwidthEstimator {
    fn default() -> Self {
        let config = BandwidthEstimatorConfig::default();
        Self::new(
            config.slow_half_life,
            config.fast_half_life,
            config.default_estimate,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use parking_lot::Mutex;
    use rstest::rstest;
    use tracing::Level;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    /// Feed one valid and one empty sample with a subscriber accepting logs up to `max_level`.
    fn logs_of_samples(max_level: Level) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut est = BandwidthEstimator::new(10., 2., 0.);
            est.sample(1000., 125_000);
            est.sample(1000., 0);
        });
        logs.text()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-6 * expected.abs().max(1.),
            "{actual} != {expected}"
        );
    }

    #[test]
    fn test_default_estimate_before_sample() {
        let est = BandwidthEstimator::new(10., 2., 123_456.);
        assert!(!est.can_estimate());
        assert_eq!(est.get_estimate(), 123_456.);
        assert_eq!(est.total_weight(), 0);
    }

    #[test]
    fn test_single_sample() {
        let mut est = BandwidthEstimator::new(10., 2., 500_000.);
        est.sample(1000., 125_000);
        assert!(est.can_estimate());
        assert_close(est.fast_estimate(), 1_000_000.);
        assert_close(est.slow_estimate(), 1_000_000.);
        assert_close(est.get_estimate(), 1_000_000.);
    }

    #[rstest]
    #[case(0.)]
    #[case(1.)]
    #[case(-5.)]
    #[case(f64::NAN)]
    fn test_duration_floor(#[case] duration_ms: f64) {
        let mut est = BandwidthEstimator::new(10., 2., 0.);
        est.sample(duration_ms, 1000);
        assert_close(est.get_estimate(), 4_000_000.);
    }

    #[test]
    fn test_zero_bytes_ignored() {
        let mut est = BandwidthEstimator::new(10., 2., 42.);
        est.sample(100., 0);
        assert!(!est.can_estimate());
        assert_eq!(est.get_estimate(), 42.);

        est.sample(1000., 125_000);
        est.sample(1., 0);
        est.sample(1000., 125_000);
        est.sample(0., 0);
        assert_eq!(est.total_weight(), 2);
        assert_close(est.get_estimate(), 1_000_000.);
    }

    #[test]
    fn test_converges_to_constant_bandwidth() {
        let mut est = BandwidthEstimator::default();
        for _ in 0..300 {
            est.sample(500., 250_000);
        }
        assert_close(est.fast_estimate(), 4_000_000.);
        assert_close(est.slow_estimate(), 4_000_000.);
        assert_close(est.get_estimate(), 4_000_000.);
    }

    #[test]
    fn test_adapts_down_fast() {
        let mut est = BandwidthEstimator::new(10., 2., 0.);
        for _ in 0..100 {
            est.sample(1000., 1_250_000);
        }
        est.sample(1000., 12_500);
        assert!(est.fast_estimate() < est.slow_estimate());
        assert_eq!(est.get_estimate(), est.fast_estimate());
        assert!(est.get_estimate() < 10_000_000.);
    }

    #[test]
    fn test_adapts_up_slowly() {
        let mut est = BandwidthEstimator::new(10., 2., 0.);
        for _ in 0..100 {
            est.sample(1000., 12_500);
        }
        est.sample(1000., 1_250_000);
        assert!(est.slow_estimate() < est.fast_estimate());
        assert_eq!(est.get_estimate(), est.slow_estimate());
    }

    #[test]
    fn test_no_decay() {
        let mut est = BandwidthEstimator::new(0., 0., 0.);
        est.sample(1000., 1000);
        est.sample(1000., 3000);
        assert_eq!(est.get_estimate(), 24_000.);
    }

    #[test]
    fn test_reset() {
        let mut est = BandwidthEstimator::new(10., 2., 7.);
        est.sample(1000., 125_000);
        est.reset();
        assert!(!est.can_estimate());
        assert_eq!(est.get_estimate(), 7.);
        est.sample(1000., 250_000);
        assert_close(est.get_estimate(), 2_000_000.);
    }

    #[test]
    fn test_sample_logs_follow_subscriber_level() {
        assert_eq!(logs_of_samples(Level::INFO), "");

        let debug_logs = logs_of_samples(Level::DEBUG);
        assert!(debug_logs.contains("new sample of 125000B in 1000ms (1000000bps)"));
        assert!(debug_logs.contains("ignoring sample without any byte transferred"));
    }

    #[test]
    fn test_sample_without_subscriber() {
        let mut est = BandwidthEstimator::new(10., 2., 0.);
        est.sample(1000., 125_000);
        est.sample(1000., 0);
        assert_eq!(est.total_weight(), 1);
    }

    #[test]
    fn test_fractional_bytes() {
        let mut est = BandwidthEstimator::new(10., 2., 0.);
        est.sample_bytes(1., 0.5);
        assert!(est.can_estimate());
        assert_close(est.get_estimate(), 2000.);

        est.sample_bytes(1., -3.);
        est.sample_bytes(1., f64::NAN);
        assert_eq!(est.total_weight(), 1);
    }

    #[test]
    fn test_from_config() {
        let est = BandwidthEstimator::from_config(&BandwidthEstimatorConfig::default());
        assert_eq!(est.map(|e| e.get_estimate()), Ok(500_000.));

        let invalid = BandwidthEstimatorConfig {
            fast_half_life: -1.,
            ..Default::default()
        };
        assert!(BandwidthEstimator::from_config(&invalid).is_err());
    }
}
