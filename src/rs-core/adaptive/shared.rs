use std::sync::Arc;

use parking_lot::Mutex;

use super::bandwidth_estimator::BandwidthEstimator;

/// `BandwidthEstimator` which can be fed from multiple threads at once.
///
/// Every operation takes the same lock, so samples are never interleaved with each other nor
/// with a read of the estimate. Cloning it gives another handle on the same estimator.
#[derive(Clone, Debug)]
pub struct SharedBandwidthEstimator {
    inner: Arc<Mutex<BandwidthEstimator>>,
}

impl SharedBandwidthEstimator {
    pub fn new(estimator: BandwidthEstimator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(estimator)),
        }
    }

    /// See `BandwidthEstimator::sample`.
    pub fn sample(&self, duration_ms: f64, num_bytes: u64) {
        self.inner.lock().sample(duration_ms, num_bytes);
    }

    pub fn can_estimate(&self) -> bool {
        self.inner.lock().can_estimate()
    }

    pub fn get_estimate(&self) -> f64 {
        self.inner.lock().get_estimate()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Run `func` on the estimator while holding the lock.
    pub fn with<T>(&self, func: impl FnOnce(&mut BandwidthEstimator) -> T) -> T {
        func(&mut self.inner.lock())
    }
}

impl From<BandwidthEstimator> for SharedBandwidthEstimator {
    fn from(estimator: BandwidthEstimator) -> Self {
        Self::new(estimator)
    }
}
