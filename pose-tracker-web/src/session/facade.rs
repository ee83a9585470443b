//! Session facade - one tracked user, one frame at a time
//!
//! Owns the stabilizer, registry and tracker for a single stream. Nothing is
//! shared between sessions; dropping a session discards all of its state.

use std::sync::Arc;

use log::{info, warn};

use super::catalog::Catalog;
use super::read_model::ReadModel;
use crate::classifier::{
    classify_or_empty, ClassificationSample, FrameClassifier, PoseStabilizer, PoseVocabulary,
    RankedPose, StabilizedClassification,
};
use crate::config::{self, TrackerConfig};
use crate::error::TrackerError;
use crate::tracking::{ExerciseDefinition, ExerciseProgress, ExerciseRegistry, MovementTracker};

/// Pose stabilization and rep counting for one stream of frames
pub struct Session {
    config: TrackerConfig,
    vocabulary: PoseVocabulary,
    vocabulary_loaded: bool,
    registry: ExerciseRegistry,
    stabilizer: PoseStabilizer,
    tracker: MovementTracker,
    /// While set, exercise progress is reset on every frame
    hold_reset: bool,
    frames: u64,
    last_pose: StabilizedClassification,
    read_model: Arc<ReadModel>,
}

impl Session {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;

        Ok(Self {
            stabilizer: PoseStabilizer::new(
                config.smoothing_width,
                config.confidence_threshold,
                config.undefined_pose.as_str(),
            ),
            tracker: MovementTracker::new(config.reset_limit),
            vocabulary: PoseVocabulary::default(),
            vocabulary_loaded: false,
            registry: ExerciseRegistry::new(),
            hold_reset: false,
            frames: 0,
            last_pose: StabilizedClassification::undefined(
                &config.undefined_pose,
                vec![RankedPose::new(config.undefined_pose.as_str(), 0.0)],
            ),
            read_model: Arc::new(ReadModel::initial(&config)),
            config,
        })
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Load the pose vocabulary. Allowed once per session.
    pub fn load_vocabulary<S: Into<String>>(
        &mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<(), TrackerError> {
        if self.vocabulary_loaded {
            return Err(TrackerError::VocabularyAlreadyLoaded);
        }

        self.vocabulary = PoseVocabulary::new(labels)?;
        self.vocabulary_loaded = true;
        info!("pose vocabulary loaded: {} labels", self.vocabulary.len());
        self.refresh();
        Ok(())
    }

    /// Register one exercise against the loaded vocabulary
    pub fn register_exercise<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        sequence: impl IntoIterator<Item = S>,
    ) -> Result<(), TrackerError> {
        self.register_definition(ExerciseDefinition::new(name, sequence))
    }

    pub fn register_definition(&mut self, definition: ExerciseDefinition) -> Result<(), TrackerError> {
        if !self.vocabulary_loaded {
            return Err(TrackerError::VocabularyNotLoaded);
        }

        let registered = self.registry.register(definition, &self.vocabulary)?;
        info!(
            "exercise registered: {} ({} poses)",
            registered.name,
            registered.sequence.len()
        );
        self.refresh();
        Ok(())
    }

    /// Load vocabulary and exercises together.
    ///
    /// A bad vocabulary fails the whole call. Rejected exercises are returned
    /// and logged; the rest stay registered.
    pub fn load_catalog(&mut self, catalog: Catalog) -> Result<Vec<TrackerError>, TrackerError> {
        self.load_vocabulary(catalog.poses)?;

        let mut rejected = Vec::new();
        for definition in catalog.exercises {
            if let Err(err) = self.register_definition(definition) {
                warn!("skipping exercise: {err}");
                rejected.push(err);
            }
        }
        Ok(rejected)
    }

    // ========================================================================
    // FRAME PROCESSING
    // ========================================================================

    /// Run one frame through stabilizer and tracker. Never fails; the worst
    /// case is the undefined pose with no exercise progress.
    pub fn process_frame(&mut self, sample: &ClassificationSample) -> Arc<ReadModel> {
        self.frames += 1;

        if self.hold_reset {
            self.tracker.reset_progress();
        }

        let stabilized = self.stabilizer.observe(sample, &self.vocabulary);

        if !self.hold_reset {
            if stabilized.qualifies(self.config.confidence_threshold) {
                self.tracker.advance(&self.registry, &stabilized.pose_name);
            } else {
                self.tracker.advance_stale(&self.registry);
            }
        }

        self.last_pose = stabilized;
        self.refresh();
        Arc::clone(&self.read_model)
    }

    /// Classify `frame` with an external classifier, then process it.
    /// A classifier failure is treated as a dropped frame.
    pub fn process_with<C>(&mut self, classifier: &mut C, frame: &C::Frame) -> Arc<ReadModel>
    where
        C: FrameClassifier + ?Sized,
    {
        let sample = classify_or_empty(classifier, frame);
        self.process_frame(&sample)
    }

    /// Process a raw score vector indexed in vocabulary order
    pub fn process_scores(&mut self, scores: &[f64]) -> Arc<ReadModel> {
        let sample = ClassificationSample::from_scores(&self.vocabulary, scores);
        self.process_frame(&sample)
    }

    pub fn read_model(&self) -> Arc<ReadModel> {
        Arc::clone(&self.read_model)
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Clear the smoothing window and all in-progress sequences.
    /// Vocabulary, exercises and rep counts are kept.
    pub fn reset(&mut self) {
        self.stabilizer.clear();
        self.tracker.reset_progress();
        self.refresh();
    }

    /// Zero every rep count
    pub fn clear_counts(&mut self) {
        self.tracker.clear_counts();
        self.refresh();
    }

    /// Hold exercise progress at zero while `hold` is set
    pub fn set_hold_reset(&mut self, hold: bool) {
        self.hold_reset = hold;
    }

    // ========================================================================
    // CONFIGURATION (applies from the next frame)
    // ========================================================================

    pub fn set_confidence_threshold(&mut self, threshold: f64) -> Result<(), TrackerError> {
        config::check_threshold(threshold)?;
        self.config.confidence_threshold = threshold;
        self.stabilizer.set_threshold(threshold);
        Ok(())
    }

    pub fn set_smoothing_width(&mut self, width: usize) -> Result<(), TrackerError> {
        config::check_smoothing_width(width)?;
        self.config.smoothing_width = width;
        self.stabilizer.set_smoothing_width(width);
        Ok(())
    }

    pub fn set_reset_limit(&mut self, limit: u32) -> Result<(), TrackerError> {
        config::check_reset_limit(limit)?;
        self.config.reset_limit = limit;
        self.tracker.set_reset_limit(limit);
        Ok(())
    }

    pub fn set_undefined_pose(&mut self, name: &str) -> Result<(), TrackerError> {
        config::check_sentinel(name)?;
        self.config.undefined_pose = name.to_string();
        self.stabilizer.set_undefined_pose(name);
        Ok(())
    }

    pub fn set_undefined_exercise(&mut self, name: &str) -> Result<(), TrackerError> {
        config::check_sentinel(name)?;
        self.config.undefined_exercise = name.to_string();
        Ok(())
    }

    // ========================================================================
    // INTROSPECTION
    // ========================================================================

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> Option<&PoseVocabulary> {
        self.vocabulary_loaded.then_some(&self.vocabulary)
    }

    pub fn registry(&self) -> &ExerciseRegistry {
        &self.registry
    }

    /// Progress of one exercise (pointer, stale frames, reps)
    pub fn progress(&self, name: &str) -> Option<ExerciseProgress> {
        self.tracker.progress(&self.registry, name)
    }

    pub fn is_holding_reset(&self) -> bool {
        self.hold_reset
    }

    /// Frames currently held in the smoothing window
    pub fn buffered_frames(&self) -> usize {
        self.stabilizer.buffered()
    }

    fn refresh(&mut self) {
        let snapshot = self.tracker.snapshot(&self.registry);
        self.read_model = Arc::new(ReadModel::assemble(
            &self.config,
            &self.last_pose,
            &snapshot,
            &self.vocabulary,
            &self.registry,
            !self.vocabulary_loaded,
            self.frames,
        ));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            stabilizer: PoseStabilizer::default(),
            tracker: MovementTracker::default(),
            vocabulary: PoseVocabulary::default(),
            vocabulary_loaded: false,
            registry: ExerciseRegistry::new(),
            hold_reset: false,
            frames: 0,
            last_pose: StabilizedClassification::undefined(
                config::DEFAULT_UNDEFINED_POSE,
                vec![RankedPose::new(config::DEFAULT_UNDEFINED_POSE, 0.0)],
            ),
            read_model: Arc::new(ReadModel::initial(&TrackerConfig::default())),
            config: TrackerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut session = Session::new(TrackerConfig {
            reset_limit: 3,
            ..TrackerConfig::default()
        })
        .unwrap();
        session.load_vocabulary(["a", "b", "c"]).unwrap();
        session.register_exercise("ab", ["a", "b"]).unwrap();
        session
    }

    fn pose(label: &str) -> ClassificationSample {
        ClassificationSample::from_pairs([(label, 8.0), ("c", 1.0)])
    }

    #[test]
    fn test_no_frames_yields_defaults() {
        let session = Session::new(TrackerConfig::default()).unwrap();
        assert_eq!(*session.read_model(), ReadModel::initial(&TrackerConfig::default()));
        assert_eq!(*Session::default().read_model(), *session.read_model());
    }

    #[test]
    fn test_rep_counted_through_facade() {
        let mut session = session();
        session.process_frame(&pose("a"));
        let model = session.process_frame(&pose("b"));
        assert_eq!(model.exercises.get("ab"), Some(&1));
        assert_eq!(model.exercise.name, "ab");
        assert_eq!(model.pose.pose_name, "b");
        assert!(!model.detecting);
        assert!(!model.loading);
    }

    #[test]
    fn test_below_threshold_never_advances() {
        let mut session = session();
        for label in ["a", "b", "a", "b"] {
            let model = session.process_frame(&ClassificationSample::from_pairs([(label, 4.0)]));
            assert_eq!(model.pose.pose_name, "undefined_pose");
            assert!(model.detecting);
        }
        assert_eq!(session.progress("ab").unwrap(), ExerciseProgress::default());
    }

    #[test]
    fn test_reset_keeps_counts() {
        let mut session = session();
        for label in ["a", "b", "a"] {
            session.process_frame(&pose(label));
        }
        session.reset();
        assert_eq!(session.buffered_frames(), 0);
        assert_eq!(session.progress("ab").unwrap().pointer, 0);
        assert_eq!(session.read_model().exercises.get("ab"), Some(&1));

        session.clear_counts();
        assert_eq!(session.read_model().exercises.get("ab"), Some(&0));
    }

    #[test]
    fn test_hold_reset_pins_progress() {
        let mut session = session();
        session.set_hold_reset(true);
        assert!(session.is_holding_reset());
        for label in ["a", "b", "a", "b"] {
            let model = session.process_frame(&pose(label));
            assert_eq!(model.pose.pose_name, label);
        }
        assert_eq!(session.progress("ab").unwrap().reps, 0);

        session.set_hold_reset(false);
        assert!(!session.is_holding_reset());
        session.process_frame(&pose("a"));
        session.process_frame(&pose("b"));
        assert_eq!(session.progress("ab").unwrap().reps, 1);
    }

    #[test]
    fn test_setters_validate() {
        let mut session = session();
        assert!(session.set_smoothing_width(0).is_err());
        assert!(session.set_reset_limit(0).is_err());
        assert!(session.set_confidence_threshold(f64::INFINITY).is_err());
        assert!(session.set_undefined_pose("").is_err());
        assert_eq!(session.config().smoothing_width, 1);
    }

    #[test]
    fn test_threshold_change_applies_next_frame() {
        let mut session = session();
        let before = session.process_frame(&pose("a"));
        session.set_confidence_threshold(9.0).unwrap();
        assert!(!session.read_model().detecting);
        assert_eq!(before.pose.pose_name, "a");

        let after = session.process_frame(&pose("a"));
        assert!(after.detecting);
    }

    #[test]
    fn test_sentinel_change_applies_next_frame() {
        let mut session = session();
        session.set_undefined_pose("no_pose").unwrap();
        session.set_undefined_exercise("no_exercise").unwrap();

        let model = session.process_frame(&ClassificationSample::from_pairs([("a", 1.0)]));
        assert_eq!(model.pose.pose_name, "no_pose");
        assert_eq!(model.exercise.name, "no_exercise");
        assert_eq!(model.exercise.reps, 0);
    }

    #[test]
    fn test_vocabulary_loaded_once() {
        let mut session = session();
        let labels = session.vocabulary().unwrap().labels().to_vec();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert!(Session::default().vocabulary().is_none());
        assert_eq!(
            session.load_vocabulary(["x"]),
            Err(TrackerError::VocabularyAlreadyLoaded)
        );
    }

    #[test]
    fn test_register_requires_vocabulary() {
        let mut session = Session::default();
        assert_eq!(
            session.register_exercise("ab", ["a", "b"]),
            Err(TrackerError::VocabularyNotLoaded)
        );
    }

    #[test]
    fn test_process_scores_uses_vocabulary_order() {
        let mut session = session();
        let model = session.process_scores(&[6.0, 9.0, 0.0]);
        assert_eq!(model.pose.pose_name, "b");
        assert_eq!(model.poses.len(), 3);
    }
}
