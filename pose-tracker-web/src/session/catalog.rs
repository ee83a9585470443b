//! Catalog - the pose labels and exercises shipped alongside a classifier model
//!
//! JSON shape:
//! ```json
//! {
//!   "poses": ["t_pose", "tree", "warrior"],
//!   "exercises": [{ "name": "tree-to-t", "sequence": ["tree", "t_pose"] }]
//! }
//! ```
//! `poses` must follow the classifier's output index order.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::tracking::ExerciseDefinition;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub poses: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseDefinition>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        Ok(serde_json::from_str(json)?)
    }
}
