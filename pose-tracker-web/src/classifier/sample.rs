//! Per-frame classification results
//!
//! `ClassificationSample` is what the external classifier hands over for one
//! frame; `StabilizedClassification` is what the stabilizer emits for it.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::vocabulary::PoseVocabulary;

/// One (label, score) pair. Field names match the JS `{ poseName, confidence }` shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPose {
    pub pose_name: String,
    /// Relative score; more negative means less confident than its peers
    pub confidence: f64,
}

impl RankedPose {
    pub fn new(pose_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            pose_name: pose_name.into(),
            confidence,
        }
    }
}

/// One frame's ranked classifier output, highest score first.
/// Deserializes from a plain `[{ poseName, confidence }]` list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RankedPose>", into = "Vec<RankedPose>")]
pub struct ClassificationSample {
    poses: Vec<RankedPose>,
}

impl ClassificationSample {
    /// Build a sample, dropping non-finite scores and duplicate labels
    /// (the higher-scored duplicate is kept) and sorting by descending score.
    pub fn new(poses: Vec<RankedPose>) -> Self {
        let mut poses: Vec<RankedPose> = poses
            .into_iter()
            .filter(|p| p.confidence.is_finite())
            .collect();
        poses.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        let mut seen = HashSet::new();
        poses.retain(|p| seen.insert(p.pose_name.clone()));

        Self { poses }
    }

    /// A dropped frame: the classifier produced nothing
    pub fn empty() -> Self {
        Self { poses: Vec::new() }
    }

    /// Convenience constructor from `(label, score)` pairs
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, score)| RankedPose::new(name, score))
                .collect(),
        )
    }

    /// Decode a raw model output vector whose indices follow vocabulary order.
    ///
    /// Extra trailing scores with no matching label are ignored.
    pub fn from_scores(vocabulary: &PoseVocabulary, scores: &[f64]) -> Self {
        Self::new(
            vocabulary
                .labels()
                .iter()
                .zip(scores)
                .map(|(label, &score)| RankedPose::new(label.as_str(), score))
                .collect(),
        )
    }

    /// Highest-scored entry, if any
    pub fn top(&self) -> Option<&RankedPose> {
        self.poses.first()
    }

    pub fn poses(&self) -> &[RankedPose] {
        &self.poses
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }
}

impl From<Vec<RankedPose>> for ClassificationSample {
    fn from(poses: Vec<RankedPose>) -> Self {
        Self::new(poses)
    }
}

impl From<ClassificationSample> for Vec<RankedPose> {
    fn from(sample: ClassificationSample) -> Self {
        sample.poses
    }
}

/// Stabilizer output for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilizedClassification {
    /// Smoothed top label, or the undefined-pose sentinel
    pub pose_name: String,
    /// Relative score of `pose_name`; 0.0 for the sentinel
    pub confidence: f64,
    /// The frame's ranked list as reported by the classifier (not smoothed)
    pub ranked: Vec<RankedPose>,
    /// True when `pose_name` is the sentinel
    pub undefined: bool,
}

impl StabilizedClassification {
    pub fn undefined(sentinel: &str, ranked: Vec<RankedPose>) -> Self {
        Self {
            pose_name: sentinel.to_string(),
            confidence: 0.0,
            ranked,
            undefined: true,
        }
    }

    /// Whether this frame may drive the movement tracker
    pub fn qualifies(&self, threshold: f64) -> bool {
        !self.undefined && self.confidence >= threshold
    }
}
