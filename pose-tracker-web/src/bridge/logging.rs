//! Console logging for the browser build
//!
//! Routes the `log` facade to the browser console via `wasm_logger`.

use wasm_bindgen::prelude::*;

fn parse_level(level: &str) -> log::Level {
    match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    }
}

/// Initialize console logging: "trace", "debug", "info", "warn" or "error".
/// Unknown levels fall back to "info".
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    wasm_logger::init(wasm_logger::Config::new(parse_level(level)));
    log::info!("pose tracker logging at {level}");
}
