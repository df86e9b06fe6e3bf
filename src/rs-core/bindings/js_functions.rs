use crate::wasm_bindgen;

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);
}

/// Levels with which a log can be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    /// Log level reserved for very important errors and highly unexpected events.
    Error = 0,

    /// Log level reserved for less important errors and unexpected events.
    Warn = 1,

    /// Log level reserved for important events
    Info = 2,

    /// Log level used when debugging. Small-ish yet impactful events should be logged with it.
    Debug = 3,
}

/// Emit a log through the host: the JavaScript console when running as WebAssembly, `tracing`
/// otherwise, where it is only output if the native caller installed a subscriber.
#[cfg(target_arch = "wasm32")]
pub(crate) fn log_to_host(log_level: LogLevel, log: &str) {
    jsLog(log_level, log);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log_to_host(log_level: LogLevel, log: &str) {
    match log_level {
        LogLevel::Error => tracing::error!("{log}"),
        LogLevel::Warn => tracing::warn!("{log}"),
        LogLevel::Info => tracing::info!("{log}"),
        LogLevel::Debug => tracing::debug!("{log}"),
    }
}
