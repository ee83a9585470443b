//! Frame classifier seam
//!
//! The pose classification network lives outside this crate (in the browser it
//! runs in JavaScript). Anything that can turn a frame into a ranked sample
//! implements `FrameClassifier`.

use log::warn;

use super::sample::ClassificationSample;
use crate::error::TrackerError;

/// External per-frame classifier
pub trait FrameClassifier {
    /// Whatever the classifier needs per frame (keypoints, tensors, ...)
    type Frame: ?Sized;

    fn classify(&mut self, frame: &Self::Frame) -> Result<ClassificationSample, TrackerError>;
}

/// Run the classifier, substituting an empty sample on failure
pub fn classify_or_empty<C>(classifier: &mut C, frame: &C::Frame) -> ClassificationSample
where
    C: FrameClassifier + ?Sized,
{
    match classifier.classify(frame) {
        Ok(sample) => sample,
        Err(err) => {
            warn!("classification failed, treating frame as dropped: {err}");
            ClassificationSample::empty()
        }
    }
}
