mod api;
mod js_functions;

pub use api::{set_logger_level, JsBandwidthEstimator};
pub use js_functions::*;
