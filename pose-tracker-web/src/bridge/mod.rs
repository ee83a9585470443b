//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod logging;
mod tracker_handle;

pub use logging::init_logging;
pub use tracker_handle::PoseTracker;
