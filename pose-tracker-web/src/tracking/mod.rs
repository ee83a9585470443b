//! Tracking module - exercise definitions and repetition counting
//!
//! Re-exports only. All logic in submodules.

mod progress;
mod registry;
mod tracker;

pub use progress::ExerciseProgress;
pub use registry::{ExerciseDefinition, ExerciseRegistry, MIN_SEQUENCE_LEN};
pub use tracker::{CurrentExercise, ExerciseSnapshot, MovementTracker};
