//! Tracker configuration
//!
//! All values may change at runtime through the session setters and apply
//! from the next processed frame.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Default minimum top-1 score for a frame to count as a detection
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 5.0;

/// Default rolling window for label smoothing (1 = no smoothing)
pub const DEFAULT_SMOOTHING_WIDTH: usize = 1;

/// Default stale frames tolerated before an in-progress sequence is dropped
pub const DEFAULT_RESET_LIMIT: u32 = 20;

pub const DEFAULT_UNDEFINED_POSE: &str = "undefined_pose";
pub const DEFAULT_UNDEFINED_EXERCISE: &str = "undefined_exercise";

/// Runtime configuration for one tracking session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Relative score the raw top-1 label must reach (may be negative)
    pub confidence_threshold: f64,
    /// Number of recent top-1 labels voted over
    pub smoothing_width: usize,
    /// Consecutive stale frames tolerated mid-sequence
    pub reset_limit: u32,
    /// Sentinel emitted when no known pose is detected
    pub undefined_pose: String,
    /// Sentinel reported when no exercise has completed a rep
    pub undefined_exercise: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            smoothing_width: DEFAULT_SMOOTHING_WIDTH,
            reset_limit: DEFAULT_RESET_LIMIT,
            undefined_pose: DEFAULT_UNDEFINED_POSE.to_string(),
            undefined_exercise: DEFAULT_UNDEFINED_EXERCISE.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        check_threshold(self.confidence_threshold)?;
        check_smoothing_width(self.smoothing_width)?;
        check_reset_limit(self.reset_limit)?;
        check_sentinel(&self.undefined_pose)?;
        check_sentinel(&self.undefined_exercise)?;
        Ok(())
    }
}

pub(crate) fn check_threshold(threshold: f64) -> Result<(), TrackerError> {
    if threshold.is_finite() {
        Ok(())
    } else {
        Err(TrackerError::InvalidConfig(format!(
            "confidence threshold must be finite, got {threshold}"
        )))
    }
}

pub(crate) fn check_smoothing_width(width: usize) -> Result<(), TrackerError> {
    if width == 0 {
        return Err(TrackerError::InvalidConfig(
            "smoothing width must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_reset_limit(limit: u32) -> Result<(), TrackerError> {
    if limit == 0 {
        return Err(TrackerError::InvalidConfig(
            "reset limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_sentinel(name: &str) -> Result<(), TrackerError> {
    if name.trim().is_empty() {
        return Err(TrackerError::InvalidConfig(
            "sentinel names must not be empty".to_string(),
        ));
    }
    Ok(())
}
