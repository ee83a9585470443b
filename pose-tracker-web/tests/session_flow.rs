//! End-to-end frame sequences through the session facade

use pose_tracker_web::{
    Catalog, ClassificationSample, FrameClassifier, ReadModel, Session, TrackerConfig,
    TrackerError,
};

const RESET_LIMIT: u32 = 5;

fn catalog() -> Catalog {
    Catalog::from_json(
        r#"{
            "poses": ["t_pose", "tree", "warrior", "squat"],
            "exercises": [
                { "name": "tree-to-t", "sequence": ["tree", "t_pose"] },
                { "name": "warrior-flow", "sequence": ["warrior", "tree", "warrior"] }
            ]
        }"#,
    )
    .unwrap()
}

fn session() -> Session {
    let mut session = Session::new(TrackerConfig {
        reset_limit: RESET_LIMIT,
        ..TrackerConfig::default()
    })
    .unwrap();
    let rejected = session.load_catalog(catalog()).unwrap();
    assert!(rejected.is_empty());
    session
}

fn detected(label: &str) -> ClassificationSample {
    ClassificationSample::from_pairs([(label, 7.0), ("squat", 2.0), ("t_pose", -1.5)])
}

fn faint(label: &str) -> ClassificationSample {
    ClassificationSample::from_pairs([(label, 1.0)])
}

fn reps(model: &ReadModel, name: &str) -> u32 {
    model.exercises.get(name).copied().unwrap_or_default()
}

/// Stand-in for the JS classifier: scores arrive per frame, `None` means it threw
struct ScriptedClassifier;

impl FrameClassifier for ScriptedClassifier {
    type Frame = Option<(&'static str, f64)>;

    fn classify(&mut self, frame: &Self::Frame) -> Result<ClassificationSample, TrackerError> {
        match frame {
            Some((label, score)) => Ok(ClassificationSample::from_pairs([(*label, *score)])),
            None => Err(TrackerError::OracleUnavailable("inference rejected".to_string())),
        }
    }
}

#[test]
fn sequence_counts_one_rep_per_traversal() {
    let mut session = session();
    session.process_frame(&detected("tree"));
    let model = session.process_frame(&detected("t_pose"));
    assert_eq!(reps(&model, "tree-to-t"), 1);
    assert_eq!(session.progress("tree-to-t").unwrap().pointer, 0);

    session.process_frame(&detected("tree"));
    let model = session.process_frame(&detected("t_pose"));
    assert_eq!(reps(&model, "tree-to-t"), 2);
    assert_eq!(model.exercise.name, "tree-to-t");
    assert_eq!(model.exercise.reps, 2);
}

#[test]
fn long_pause_drops_half_finished_sequence() {
    let mut session = session();
    session.process_frame(&detected("tree"));
    for _ in 0..=RESET_LIMIT {
        session.process_frame(&faint("tree"));
    }
    let model = session.process_frame(&detected("t_pose"));
    assert_eq!(reps(&model, "tree-to-t"), 0);
}

#[test]
fn short_pause_keeps_sequence() {
    let mut session = session();
    session.process_frame(&detected("tree"));
    for _ in 0..RESET_LIMIT - 1 {
        session.process_frame(&ClassificationSample::empty());
    }
    let model = session.process_frame(&detected("t_pose"));
    assert_eq!(reps(&model, "tree-to-t"), 1);
}

#[test]
fn spurious_pose_between_steps_is_tolerated() {
    let mut session = session();
    for label in ["tree", "squat", "t_pose"] {
        session.process_frame(&detected(label));
    }
    assert_eq!(reps(&session.read_model(), "tree-to-t"), 1);
}

#[test]
fn low_confidence_frames_never_detect() {
    let mut session = session();
    for label in ["tree", "t_pose", "warrior", "tree", "warrior"] {
        let model = session.process_frame(&faint(label));
        assert_eq!(model.pose.pose_name, "undefined_pose");
        assert_eq!(model.pose.confidence, 0.0);
        assert!(model.detecting);
    }
    for name in ["tree-to-t", "warrior-flow"] {
        assert_eq!(session.progress(name).unwrap().pointer, 0);
    }
}

#[test]
fn smoothing_suppresses_single_frame_flicker() {
    let mut session = session();
    session.set_smoothing_width(3).unwrap();
    session.process_frame(&detected("tree"));
    session.process_frame(&detected("tree"));
    let model = session.process_frame(&detected("warrior"));
    assert_eq!(model.pose.pose_name, "tree");
    assert_eq!(model.poses[0].pose_name, "warrior");
}

#[test]
fn reset_and_clear_counts() {
    let mut session = session();
    for label in ["tree", "t_pose", "warrior", "tree"] {
        session.process_frame(&detected(label));
    }
    assert_eq!(session.progress("warrior-flow").unwrap().pointer, 2);

    session.reset();
    assert_eq!(session.progress("warrior-flow").unwrap().pointer, 0);
    assert_eq!(session.buffered_frames(), 0);
    assert_eq!(reps(&session.read_model(), "tree-to-t"), 1);

    session.clear_counts();
    assert_eq!(reps(&session.read_model(), "tree-to-t"), 0);
}

#[test]
fn bad_registration_leaves_registry_intact() {
    let mut session = session();
    let one = session.register_exercise("hold", ["tree"]);
    assert!(matches!(one, Err(TrackerError::InvalidDefinition { .. })));
    let none = session.register_exercise("nothing", Vec::<String>::new());
    assert!(matches!(none, Err(TrackerError::InvalidDefinition { .. })));

    assert_eq!(session.registry().len(), 2);
    session.process_frame(&detected("tree"));
    let model = session.process_frame(&detected("t_pose"));
    assert_eq!(reps(&model, "tree-to-t"), 1);
}

#[test]
fn catalog_rejects_only_bad_exercises() {
    let mut session = Session::default();
    let rejected = session
        .load_catalog(
            Catalog::from_json(
                r#"{"poses":["a","b"],"exercises":[
                    {"name":"ok","sequence":["a","b"]},
                    {"name":"short","sequence":["a"]},
                    {"name":"unknown","sequence":["a","z"]}
                ]}"#,
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(rejected.len(), 2);
    assert_eq!(session.read_model().learned_exercises, vec!["ok".to_string()]);
    assert_eq!(
        session.read_model().learned_poses,
        vec!["a".to_string(), "b".to_string()]
    );
    assert!(!session.read_model().loading);
}

#[test]
fn classifier_failures_degrade_to_undefined() {
    let mut session = session();
    let mut classifier = ScriptedClassifier;

    session.process_with(&mut classifier, &Some(("tree", 8.0)));
    let model = session.process_with(&mut classifier, &None);
    assert_eq!(model.pose.pose_name, "undefined_pose");
    assert!(model.detecting);

    let model = session.process_with(&mut classifier, &Some(("t_pose", 8.0)));
    assert_eq!(reps(&model, "tree-to-t"), 1);
}

#[test]
fn out_of_vocabulary_label_is_undefined() {
    let mut session = session();
    let model = session.process_frame(&ClassificationSample::from_pairs([("plank", 9.0)]));
    assert_eq!(model.pose.pose_name, "undefined_pose");
    assert_eq!(model.poses[0].pose_name, "undefined_pose");
}

#[test]
fn untouched_session_reports_defaults() {
    let config = TrackerConfig::default();
    let session = Session::new(config.clone()).unwrap();
    assert_eq!(*session.read_model(), ReadModel::initial(&config));
}

#[test]
fn snapshots_are_immutable() {
    let mut session = session();
    let before = session.process_frame(&detected("tree"));
    session.process_frame(&detected("t_pose"));
    assert_eq!(reps(&before, "tree-to-t"), 0);
    assert_eq!(before.frames, 1);
}

#[test]
fn sessions_are_independent() {
    let mut first = session();
    let mut second = session();
    first.process_frame(&detected("tree"));
    second.process_frame(&detected("squat"));
    first.process_frame(&detected("t_pose"));
    second.process_frame(&detected("t_pose"));
    assert_eq!(reps(&first.read_model(), "tree-to-t"), 1);
    assert_eq!(reps(&second.read_model(), "tree-to-t"), 0);
}
