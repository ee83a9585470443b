//! Read model - the externally observable state after each frame
//!
//! Built fresh for every frame and handed out behind an `Arc`, so readers
//! never see a half-applied update.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classifier::{PoseVocabulary, RankedPose, StabilizedClassification};
use crate::config::TrackerConfig;
use crate::tracking::{CurrentExercise, ExerciseRegistry, ExerciseSnapshot};

/// Snapshot of a session, shaped for the UI
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadModel {
    /// Stable pose and its confidence (sentinel / 0.0 when nothing is detected)
    pub pose: RankedPose,
    /// The frame's ranked poses
    pub poses: Vec<RankedPose>,
    /// Most recently advanced exercise with reps (sentinel / 0 when none)
    pub exercise: CurrentExercise,
    /// Rep count per exercise
    pub exercises: BTreeMap<String, u32>,
    pub learned_poses: Vec<String>,
    pub learned_exercises: Vec<String>,
    /// True while the last stable classification is below threshold
    pub detecting: bool,
    /// True until the pose vocabulary is loaded
    pub loading: bool,
    /// Frames processed so far
    pub frames: u64,
}

impl ReadModel {
    /// State before any frame or catalog
    pub fn initial(config: &TrackerConfig) -> Self {
        Self::assemble(
            config,
            &StabilizedClassification::undefined(
                &config.undefined_pose,
                vec![RankedPose::new(config.undefined_pose.as_str(), 0.0)],
            ),
            &ExerciseSnapshot::default(),
            &PoseVocabulary::default(),
            &ExerciseRegistry::default(),
            true,
            0,
        )
    }

    pub(crate) fn assemble(
        config: &TrackerConfig,
        stabilized: &StabilizedClassification,
        snapshot: &ExerciseSnapshot,
        vocabulary: &PoseVocabulary,
        registry: &ExerciseRegistry,
        loading: bool,
        frames: u64,
    ) -> Self {
        let exercise = snapshot.current.clone().unwrap_or_else(|| CurrentExercise {
            name: config.undefined_exercise.clone(),
            reps: 0,
        });

        let exercises: BTreeMap<String, u32> = if snapshot.counts.is_empty() {
            BTreeMap::from([(config.undefined_exercise.clone(), 0)])
        } else {
            snapshot.counts.iter().cloned().collect()
        };

        let learned_poses = if vocabulary.is_empty() {
            vec![config.undefined_pose.clone()]
        } else {
            vocabulary.labels().to_vec()
        };

        let learned_exercises = if registry.is_empty() {
            vec![config.undefined_exercise.clone()]
        } else {
            registry.names()
        };

        Self {
            pose: RankedPose::new(stabilized.pose_name.as_str(), stabilized.confidence),
            poses: stabilized.ranked.clone(),
            exercise,
            exercises,
            learned_poses,
            learned_exercises,
            detecting: !stabilized.qualifies(config.confidence_threshold),
            loading,
            frames,
        }
    }
}
