//! Per-exercise progress through its reference sequence

use serde::Serialize;

/// Mutable state for one registered exercise
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    /// Index of the next expected pose (0 = not started)
    pub pointer: usize,
    /// Consecutive frames since the last advance that did not continue the sequence
    pub stale_frames: u32,
    /// Completed repetitions
    pub reps: u32,
    /// Tracker tick of the most recent pointer advance
    pub last_advance: Option<u64>,
}

impl ExerciseProgress {
    pub fn in_progress(&self) -> bool {
        self.pointer > 0
    }

    /// Move past the expected pose. Returns true if this completed a repetition.
    pub(crate) fn step(&mut self, sequence_len: usize, tick: u64) -> bool {
        self.pointer += 1;
        self.stale_frames = 0;
        self.last_advance = Some(tick);

        if self.pointer >= sequence_len {
            self.reps += 1;
            self.pointer = 0;
            return true;
        }
        false
    }

    /// Count a non-continuing frame. Returns true if the sequence was dropped.
    pub(crate) fn mark_stale(&mut self, reset_limit: u32) -> bool {
        if !self.in_progress() {
            return false;
        }

        self.stale_frames += 1;
        if self.stale_frames > reset_limit {
            self.restart();
            return true;
        }
        false
    }

    /// Abandon the current sequence, keeping completed reps
    pub(crate) fn restart(&mut self) {
        self.pointer = 0;
        self.stale_frames = 0;
    }
}
