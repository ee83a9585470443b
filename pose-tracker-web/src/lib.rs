//! Pose Tracker Web - stable pose labels and exercise rep counting
//!
//! Turns a noisy per-frame stream of pose classifier results into a debounced
//! pose label and per-exercise repetition counts. The classifier itself runs
//! outside this crate (in the browser, in JavaScript).
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod classifier;
pub mod config;
pub mod error;
pub mod session;
pub mod tracking;

mod bridge;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{init_logging, PoseTracker};

pub use classifier::{ClassificationSample, FrameClassifier, RankedPose, StabilizedClassification};
pub use config::TrackerConfig;
pub use error::TrackerError;
pub use session::{Catalog, ReadModel, Session};
pub use tracking::{ExerciseDefinition, ExerciseProgress};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Crate version, for diagnostics
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
