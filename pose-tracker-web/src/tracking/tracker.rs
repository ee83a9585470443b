//! Movement tracker - per-exercise sequence state machines
//!
//! Each exercise walks a pointer through its reference poses. A matching
//! stabilized label advances it; anything else mid-sequence counts as stale.
//! Too many stale frames in a row drop the half-finished sequence so it
//! cannot complete minutes later.

use log::debug;
use serde::Serialize;

use super::progress::ExerciseProgress;
use super::registry::ExerciseRegistry;
use crate::config::DEFAULT_RESET_LIMIT;

/// Exercise reported as "current" in the read model
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrentExercise {
    pub name: String,
    pub reps: u32,
}

/// Tracker output after one frame
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExerciseSnapshot {
    /// Exercise with reps > 0 that advanced most recently
    pub current: Option<CurrentExercise>,
    /// Rep count per exercise, registration order
    pub counts: Vec<(String, u32)>,
}

/// Sequence state machines for every registered exercise.
///
/// `progress[i]` belongs to the registry's i-th definition; the registry is
/// append-only so new definitions just grow the tail.
pub struct MovementTracker {
    progress: Vec<ExerciseProgress>,
    /// Stale frames tolerated before a sequence is dropped
    reset_limit: u32,
    /// Frames seen, used to order advances
    tick: u64,
}

impl MovementTracker {
    pub fn new(reset_limit: u32) -> Self {
        Self {
            progress: Vec::new(),
            reset_limit,
            tick: 0,
        }
    }

    pub fn set_reset_limit(&mut self, limit: u32) {
        self.reset_limit = limit;
    }

    pub fn reset_limit(&self) -> u32 {
        self.reset_limit
    }

    /// Qualifying frame with stabilized label `pose`
    pub fn advance(&mut self, registry: &ExerciseRegistry, pose: &str) -> ExerciseSnapshot {
        self.sync(registry);
        self.tick += 1;

        for (definition, progress) in registry.definitions().iter().zip(&mut self.progress) {
            if definition.sequence[progress.pointer] == pose {
                if progress.step(definition.sequence.len(), self.tick) {
                    debug!("{} rep completed ({} total)", definition.name, progress.reps);
                }
            } else if progress.mark_stale(self.reset_limit) {
                debug!("{} sequence dropped, off-pattern too long at `{pose}`", definition.name);
                // The dropping frame may itself open a fresh attempt
                if definition.sequence[0] == pose {
                    progress.step(definition.sequence.len(), self.tick);
                }
            }
        }

        self.snapshot(registry)
    }

    /// Undefined or low-confidence frame
    pub fn advance_stale(&mut self, registry: &ExerciseRegistry) -> ExerciseSnapshot {
        self.sync(registry);
        self.tick += 1;

        for (definition, progress) in registry.definitions().iter().zip(&mut self.progress) {
            if progress.mark_stale(self.reset_limit) {
                debug!("{} sequence dropped after {} stale frames", definition.name, self.reset_limit + 1);
            }
        }

        self.snapshot(registry)
    }

    /// Abandon every in-progress sequence; rep counts survive
    pub fn reset_progress(&mut self) {
        self.progress.iter_mut().for_each(ExerciseProgress::restart);
    }

    /// Zero every rep count
    pub fn clear_counts(&mut self) {
        self.progress.iter_mut().for_each(|p| p.reps = 0);
    }

    /// Progress for a registered exercise
    pub fn progress(&self, registry: &ExerciseRegistry, name: &str) -> Option<ExerciseProgress> {
        let index = registry.position(name)?;
        Some(self.progress.get(index).cloned().unwrap_or_default())
    }

    /// Current exercise and counts without consuming a frame
    pub fn snapshot(&self, registry: &ExerciseRegistry) -> ExerciseSnapshot {
        let mut current: Option<(&str, &ExerciseProgress)> = None;
        let mut counts = Vec::with_capacity(registry.len());

        for (index, definition) in registry.definitions().iter().enumerate() {
            let Some(progress) = self.progress.get(index) else {
                counts.push((definition.name.clone(), 0));
                continue;
            };
            counts.push((definition.name.clone(), progress.reps));

            if progress.reps == 0 {
                continue;
            }
            // Strictly newer wins, so same-tick ties keep the earlier registration
            let newer = match current {
                Some((_, best)) => progress.last_advance > best.last_advance,
                None => true,
            };
            if newer {
                current = Some((definition.name.as_str(), progress));
            }
        }

        ExerciseSnapshot {
            current: current.map(|(name, progress)| CurrentExercise {
                name: name.to_string(),
                reps: progress.reps,
            }),
            counts,
        }
    }

    /// One progress entry per registered definition
    fn sync(&mut self, registry: &ExerciseRegistry) {
        if self.progress.len() < registry.len() {
            self.progress.resize_with(registry.len(), ExerciseProgress::default);
        }
    }
}

impl Default for MovementTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_LIMIT)
    }
}
