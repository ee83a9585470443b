//! Pose vocabulary - the labels the classifier was trained on
//!
//! Order matters: it matches the classifier's output index order.

use std::collections::HashSet;

use crate::error::TrackerError;

/// Immutable set of known static pose labels
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseVocabulary {
    labels: Vec<String>,
    known: HashSet<String>,
}

impl PoseVocabulary {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Result<Self, TrackerError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut known = HashSet::with_capacity(labels.len());

        for label in &labels {
            if label.trim().is_empty() {
                return Err(TrackerError::InvalidConfig(
                    "pose labels must not be empty".to_string(),
                ));
            }
            if !known.insert(label.clone()) {
                return Err(TrackerError::InvalidConfig(format!(
                    "duplicate pose label `{label}`"
                )));
            }
        }

        Ok(Self { labels, known })
    }

    pub fn contains(&self, label: &str) -> bool {
        self.known.contains(label)
    }

    /// Labels in classifier output order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_duplicates() {
        assert!(PoseVocabulary::new(["tree", "tree"]).is_err());
    }

    #[test]
    fn test_rejects_blank_label() {
        assert!(PoseVocabulary::new(["tree", " "]).is_err());
    }

    #[test]
    fn test_keeps_order() {
        let vocab = PoseVocabulary::new(["warrior", "tree"]).unwrap();
        assert_eq!(vocab.labels(), &["warrior".to_string(), "tree".to_string()]);
        assert!(vocab.contains("tree"));
        assert!(!vocab.contains("plank"));
    }
}
