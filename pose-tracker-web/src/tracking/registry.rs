//! Exercise registry - named pose sequences that count as one repetition
//!
//! Append-only: definitions never change once registered, and a rejected
//! registration leaves earlier ones untouched.

use serde::{Deserialize, Serialize};

use crate::classifier::PoseVocabulary;
use crate::error::TrackerError;

/// Minimum reference poses in a sequence
pub const MIN_SEQUENCE_LEN: usize = 2;

/// An exercise as an ordered list of reference poses
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub name: String,
    pub sequence: Vec<String>,
}

impl ExerciseDefinition {
    pub fn new<S: Into<String>>(name: impl Into<String>, sequence: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the definition against a vocabulary
    pub fn validate(&self, vocabulary: &PoseVocabulary) -> Result<(), TrackerError> {
        if self.name.trim().is_empty() {
            return Err(TrackerError::invalid_definition(&self.name, "name must not be empty"));
        }
        if self.sequence.len() < MIN_SEQUENCE_LEN {
            return Err(TrackerError::invalid_definition(
                &self.name,
                format!(
                    "sequence needs at least {MIN_SEQUENCE_LEN} poses, got {}",
                    self.sequence.len()
                ),
            ));
        }
        if let Some(unknown) = self.sequence.iter().find(|p| !vocabulary.contains(p)) {
            return Err(TrackerError::invalid_definition(
                &self.name,
                format!("pose `{unknown}` is not in the vocabulary"),
            ));
        }
        Ok(())
    }
}

/// Registered exercises in registration order
#[derive(Clone, Debug, Default)]
pub struct ExerciseRegistry {
    definitions: Vec<ExerciseDefinition>,
}

impl ExerciseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a definition
    pub fn register(
        &mut self,
        definition: ExerciseDefinition,
        vocabulary: &PoseVocabulary,
    ) -> Result<&ExerciseDefinition, TrackerError> {
        definition.validate(vocabulary)?;
        if self.get(&definition.name).is_some() {
            return Err(TrackerError::invalid_definition(
                &definition.name,
                "an exercise with this name is already registered",
            ));
        }

        self.definitions.push(definition);
        Ok(&self.definitions[self.definitions.len() - 1])
    }

    pub fn get(&self, name: &str) -> Option<&ExerciseDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Reference sequence for `name`
    pub fn sequence(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|d| d.sequence.as_slice())
    }

    pub fn names(&self) -> Vec<String> {
        self.definitions.iter().map(|d| d.name.clone()).collect()
    }

    pub fn definitions(&self) -> &[ExerciseDefinition] {
        &self.definitions
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.definitions.iter().position(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
