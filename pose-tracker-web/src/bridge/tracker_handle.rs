//! PoseTracker handle - one JS-owned session
//!
//! The classification network runs in JavaScript; each frame's ranked result
//! is handed here and the updated read model comes back as a plain object.
//!
//! ```javascript
//! const tracker = new PoseTracker('{"resetLimit": 20}');
//! tracker.loadCatalog(catalogJson);
//! // per frame
//! const model = tracker.processFrame([{ poseName: 'tree', confidence: 6.1 }, ...]);
//! ```

use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::classifier::ClassificationSample;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::session::{Catalog, Session};

impl From<TrackerError> for JsValue {
    fn from(err: TrackerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Serialize with plain objects for maps so `exercises` reads as `{ name: reps }`
fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or_else(|e| {
        warn!("read model serialization failed: {e}");
        JsValue::NULL
    })
}

/// Pose stabilization and rep counting session for one tracked user
#[wasm_bindgen]
pub struct PoseTracker {
    session: Session,
}

#[wasm_bindgen]
impl PoseTracker {
    /// Create a tracker; `config_json` may set any subset of the options
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PoseTracker, JsValue> {
        let config = match config_json {
            Some(json) => TrackerConfig::from_json(&json)?,
            None => TrackerConfig::default(),
        };
        Ok(PoseTracker {
            session: Session::new(config)?,
        })
    }

    /// Load `{ poses, exercises }`. Returns messages for rejected exercises.
    #[wasm_bindgen(js_name = loadCatalog)]
    pub fn load_catalog(&mut self, json: &str) -> Result<JsValue, JsValue> {
        let catalog = Catalog::from_json(json)?;
        let rejected: Vec<String> = self
            .session
            .load_catalog(catalog)?
            .iter()
            .map(ToString::to_string)
            .collect();
        Ok(to_js(&rejected))
    }

    /// Load the pose labels in classifier output order
    #[wasm_bindgen(js_name = loadVocabulary)]
    pub fn load_vocabulary(&mut self, labels: JsValue) -> Result<(), JsValue> {
        let labels: Vec<String> = serde_wasm_bindgen::from_value(labels)
            .map_err(|e| TrackerError::Catalog(e.to_string()))?;
        Ok(self.session.load_vocabulary(labels)?)
    }

    #[wasm_bindgen(js_name = registerExercise)]
    pub fn register_exercise(&mut self, name: &str, poses: JsValue) -> Result<(), JsValue> {
        let poses: Vec<String> = serde_wasm_bindgen::from_value(poses)
            .map_err(|e| TrackerError::invalid_definition(name, e.to_string()))?;
        Ok(self.session.register_exercise(name, poses)?)
    }

    /// Process one frame's `[{ poseName, confidence }]` list.
    /// Anything unreadable (including `null` from a failed classifier call)
    /// counts as a dropped frame.
    #[wasm_bindgen(js_name = processFrame)]
    pub fn process_frame(&mut self, sample: JsValue) -> JsValue {
        let sample = match serde_wasm_bindgen::from_value::<ClassificationSample>(sample) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("{}", TrackerError::OracleUnavailable(e.to_string()));
                ClassificationSample::empty()
            }
        };
        to_js(&*self.session.process_frame(&sample))
    }

    /// Process a raw model output vector indexed in vocabulary order
    #[wasm_bindgen(js_name = processScores)]
    pub fn process_scores(&mut self, scores: &[f64]) -> JsValue {
        to_js(&*self.session.process_scores(scores))
    }

    #[wasm_bindgen(js_name = readModel)]
    pub fn read_model(&self) -> JsValue {
        to_js(&*self.session.read_model())
    }

    /// Pointer, stale frames and reps for one exercise, or `null`
    #[wasm_bindgen(js_name = exerciseProgress)]
    pub fn exercise_progress(&self, name: &str) -> JsValue {
        match self.session.progress(name) {
            Some(progress) => to_js(&progress),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = setConfidenceThreshold)]
    pub fn set_confidence_threshold(&mut self, threshold: f64) -> Result<(), JsValue> {
        Ok(self.session.set_confidence_threshold(threshold)?)
    }

    #[wasm_bindgen(js_name = setSmoothingWidth)]
    pub fn set_smoothing_width(&mut self, width: u32) -> Result<(), JsValue> {
        Ok(self.session.set_smoothing_width(width as usize)?)
    }

    #[wasm_bindgen(js_name = setResetLimit)]
    pub fn set_reset_limit(&mut self, limit: u32) -> Result<(), JsValue> {
        Ok(self.session.set_reset_limit(limit)?)
    }

    #[wasm_bindgen(js_name = setUndefinedPose)]
    pub fn set_undefined_pose(&mut self, name: &str) -> Result<(), JsValue> {
        Ok(self.session.set_undefined_pose(name)?)
    }

    #[wasm_bindgen(js_name = setUndefinedExercise)]
    pub fn set_undefined_exercise(&mut self, name: &str) -> Result<(), JsValue> {
        Ok(self.session.set_undefined_exercise(name)?)
    }

    /// Keep exercise progress reset while `hold` is true
    #[wasm_bindgen(js_name = setHoldReset)]
    pub fn set_hold_reset(&mut self, hold: bool) {
        self.session.set_hold_reset(hold);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = clearCounts)]
    pub fn clear_counts(&mut self) {
        self.session.clear_counts();
    }
}
