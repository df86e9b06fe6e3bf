use crate::{
    adaptive::{BandwidthEstimator, BandwidthEstimatorConfig},
    utils::logger::LoggerLevel,
    wasm_bindgen, Logger,
};

use wasm_bindgen::JsError;

use super::LogLevel;

/// Bandwidth estimator exposed to the JavaScript-side.
///
/// The JavaScript download logic should call `sample` once each time a transfer (or a measured
/// part of one) ended and `getEstimate` when it needs to choose the next quality to load.
#[wasm_bindgen(js_name = BandwidthEstimator)]
pub struct JsBandwidthEstimator {
    estimator: BandwidthEstimator,
}

#[wasm_bindgen(js_class = BandwidthEstimator)]
impl JsBandwidthEstimator {
    /// Create a new estimator. Throws if one of the given options is negative or not finite.
    #[wasm_bindgen(constructor)]
    pub fn new(
        slow_half_life: f64,
        fast_half_life: f64,
        default_estimate: f64,
    ) -> Result<JsBandwidthEstimator, JsError> {
        let config = BandwidthEstimatorConfig {
            slow_half_life,
            fast_half_life,
            default_estimate,
        };
        let estimator = BandwidthEstimator::from_config(&config).map_err(|err| {
            Logger::lazy_error(&|| format!("Bandwidth: cannot create estimator: {err}"));
            JsError::new(&err.to_string())
        })?;
        Logger::lazy_info(&|| {
            format!(
                "Bandwidth: estimator created (slow: {slow_half_life}, fast: {fast_half_life}, \
                 default: {default_estimate}bps)"
            )
        });
        Ok(Self { estimator })
    }

    /// Add a transfer of `num_bytes` bytes which took `duration_ms` milliseconds.
    ///
    /// Any amount of bytes that is not a finite number greater than `0` is ignored.
    pub fn sample(&mut self, duration_ms: f64, num_bytes: f64) {
        if num_bytes.is_finite() {
            self.estimator.sample_bytes(duration_ms, num_bytes);
        }
    }

    #[wasm_bindgen(js_name = canEstimate)]
    pub fn can_estimate(&self) -> bool {
        self.estimator.can_estimate()
    }

    /// Current estimate, in bits per second.
    #[wasm_bindgen(js_name = getEstimate)]
    pub fn get_estimate(&self) -> f64 {
        self.estimator.get_estimate()
    }

    pub fn reset(&mut self) {
        self.estimator.reset();
    }

    /// Nothing is held on behalf of the estimator, there is nothing to release.
    pub fn destroy(&self) {}
}

/// Update the maximum level at which logs are emitted. `undefined` disables logs.
#[wasm_bindgen(js_name = setLoggerLevel)]
pub fn set_logger_level(level: Option<LogLevel>) {
    let level = match level {
        None => LoggerLevel::None,
        Some(LogLevel::Error) => LoggerLevel::Error,
        Some(LogLevel::Warn) => LoggerLevel::Warn,
        Some(LogLevel::Info) => LoggerLevel::Info,
        Some(LogLevel::Debug) => LoggerLevel::Debug,
    };
    Logger::set_logger_level(level);
}
