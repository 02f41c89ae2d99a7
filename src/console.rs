//! Console logging
//!
//! In the browser every message goes to `web_sys::console`. Native builds
//! (unit tests, tooling) emit `tracing` events instead, since the JS console
//! imports panic outside a wasm host.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

#[cfg(target_arch = "wasm32")]
pub fn emit(level: Level, message: &str) {
    let value = wasm_bindgen::JsValue::from_str(message);
    match level {
        Level::Debug => web_sys::console::debug_1(&value),
        Level::Info => web_sys::console::log_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Error => web_sys::console::error_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn emit(level: Level, message: &str) {
    match level {
        Level::Debug => tracing::debug!(target: "techdocs_versioning", "{}", message),
        Level::Info => tracing::info!(target: "techdocs_versioning", "{}", message),
        Level::Warn => tracing::warn!(target: "techdocs_versioning", "{}", message),
        Level::Error => tracing::error!(target: "techdocs_versioning", "{}", message),
    }
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::console::emit($crate::console::Level::Debug, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::console::emit($crate::console::Level::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::console::emit($crate::console::Level::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::console::emit($crate::console::Level::Error, &format!($($arg)*))
    };
}
