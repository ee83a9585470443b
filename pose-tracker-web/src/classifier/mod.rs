//! Classifier module - per-frame label stabilization
//!
//! Note: the pose classification network runs outside Rust.
//! Rust handles vocabulary checks, label smoothing and confidence gating.

mod buffer;
mod oracle;
mod sample;
mod stabilizer;
mod vocabulary;

pub use buffer::{BufferedLabel, LabelBuffer};
pub use oracle::{classify_or_empty, FrameClassifier};
pub use sample::{ClassificationSample, RankedPose, StabilizedClassification};
pub use stabilizer::PoseStabilizer;
pub use vocabulary::PoseVocabulary;
