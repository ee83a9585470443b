//! Pose stabilizer - debounces the per-frame top-1 label
//!
//! Votes over the last N top-1 labels, then gates the result on the newest
//! frame's raw score. Low-confidence and dropped frames never count as a
//! detection.

use log::{debug, warn};

use super::buffer::{BufferedLabel, LabelBuffer};
use super::sample::{ClassificationSample, RankedPose, StabilizedClassification};
use super::vocabulary::PoseVocabulary;
use crate::config::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_SMOOTHING_WIDTH, DEFAULT_UNDEFINED_POSE};
use crate::error::TrackerError;

/// Rolling-vote stabilizer for one session
pub struct PoseStabilizer {
    buffer: LabelBuffer,
    /// Minimum raw top-1 score to accept a frame
    threshold: f64,
    /// Sentinel label for frames with no known pose
    undefined_pose: String,
}

impl PoseStabilizer {
    pub fn new(smoothing_width: usize, threshold: f64, undefined_pose: impl Into<String>) -> Self {
        Self {
            buffer: LabelBuffer::new(smoothing_width),
            threshold,
            undefined_pose: undefined_pose.into(),
        }
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// Resize the voting window; newest entries survive a shrink
    pub fn set_smoothing_width(&mut self, width: usize) {
        self.buffer.resize(width);
    }

    pub fn set_undefined_pose(&mut self, name: impl Into<String>) {
        self.undefined_pose = name.into();
    }

    pub fn smoothing_width(&self) -> usize {
        self.buffer.capacity()
    }

    /// Number of frames currently in the voting window
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Stabilize one frame
    pub fn observe(
        &mut self,
        sample: &ClassificationSample,
        vocabulary: &PoseVocabulary,
    ) -> StabilizedClassification {
        let ranked = self.known_ranking(sample, vocabulary);

        // Dropped frame: no evidence either way, leave the window alone
        let Some(top) = sample.top() else {
            return StabilizedClassification::undefined(&self.undefined_pose, ranked);
        };

        let known = vocabulary.contains(&top.pose_name);
        if !known {
            let err = TrackerError::OutOfVocabularyLabel(top.pose_name.clone());
            warn!("{err}; coercing to `{}`", self.undefined_pose);
        }

        // Sub-threshold frames vote as "no pose" so they cannot outvote a confident one
        let accepted = known && top.confidence >= self.threshold;
        self.buffer.push(BufferedLabel {
            pose: accepted.then(|| top.pose_name.clone()),
            score: if accepted { top.confidence } else { 0.0 },
        });

        if !accepted {
            return StabilizedClassification::undefined(&self.undefined_pose, ranked);
        }

        match self.buffer.majority() {
            Some(BufferedLabel {
                pose: Some(pose),
                score,
            }) => StabilizedClassification {
                pose_name: pose.clone(),
                confidence: *score,
                ranked,
                undefined: false,
            },
            _ => StabilizedClassification::undefined(&self.undefined_pose, ranked),
        }
    }

    /// Forget the voting window (explicit session reset only)
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Frame ranking restricted to known labels, or `[sentinel, 0.0]` if none remain
    fn known_ranking(
        &self,
        sample: &ClassificationSample,
        vocabulary: &PoseVocabulary,
    ) -> Vec<RankedPose> {
        let ranked: Vec<RankedPose> = sample
            .poses()
            .iter()
            .filter(|p| vocabulary.contains(&p.pose_name))
            .cloned()
            .collect();

        let dropped = sample.len() - ranked.len();
        if dropped > 0 {
            debug!("dropped {dropped} out-of-vocabulary entries from ranking");
        }

        if ranked.is_empty() {
            vec![RankedPose::new(self.undefined_pose.as_str(), 0.0)]
        } else {
            ranked
        }
    }
}

impl Default for PoseStabilizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_SMOOTHING_WIDTH,
            DEFAULT_CONFIDENCE_THRESHOLD,
            DEFAULT_UNDEFINED_POSE,
        )
    }
}
