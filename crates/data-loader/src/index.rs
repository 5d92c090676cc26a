//! Loading and validating a train/test split.
//!
//! A split is two interaction files living in the same directory. Both are
//! parsed in parallel with Rayon, indexed into [`Ratings`] tables and then
//! validated.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

/// A train set and a test set produced by some partitioning procedure
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Ratings,
    pub test: Ratings,
}

impl Split {
    pub fn new(train: Ratings, test: Ratings) -> Self {
        Self { train, test }
    }

    /// Load `train_file` and `test_file` from `data_dir`.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Build the per-user indices
    /// 3. Validate both tables
    pub fn load(data_dir: &Path, train_file: &str, test_file: &str) -> Result<Self> {
        info!("Loading split from {:?}", data_dir);

        let train_path = data_dir.join(train_file);
        let test_path = data_dir.join(test_file);

        let (train, test) = rayon::join(
            || parser::parse_interactions(&train_path),
            || parser::parse_interactions(&test_path),
        );

        let train = Ratings::from_records(train?);
        let test = Ratings::from_records(test?);

        debug!(
            "Parsed {} train and {} test interactions",
            train.len(),
            test.len()
        );

        train.validate()?;
        test.validate()?;

        let split = Self { train, test };
        split.log_overlap();
        Ok(split)
    }

    /// Items shared by train and test are expected; identical
    /// (user, item) pairs usually point to a leaking partition.
    fn log_overlap(&self) {
        let leaked = self
            .test
            .iter()
            .filter(|t| {
                self.train
                    .user_interactions_or_empty(&t.user_id)
                    .iter()
                    .any(|r| r.item_id == t.item_id)
            })
            .count();
        if leaked > 0 {
            tracing::warn!("{} test interactions also appear in the train set", leaked);
        }
    }
}

impl Ratings {
    /// Validate data integrity
    ///
    /// Check that:
    /// - user and item ids are non-empty
    /// - scores, when present, are finite numbers
    pub fn validate(&self) -> Result<()> {
        for interaction in &self.interactions {
            if interaction.user_id.is_empty() || interaction.item_id.is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "empty id in interaction {:?}",
                    interaction
                )));
            }
            if let Some(score) = interaction.score {
                if !score.is_finite() {
                    return Err(DataLoadError::InvalidValue {
                        field: "score".to_string(),
                        value: score.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_split() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.dat"), "u1::i1::4\nu2::i2::3\n").unwrap();
        fs::write(dir.path().join("test.dat"), "u1::i3::5\n").unwrap();

        let split = Split::load(dir.path(), "train.dat", "test.dat").unwrap();
        assert_eq!(split.train.len(), 2);
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.test.get_user_interactions("u1").unwrap()[0].item_id, "i3");
    }

    #[test]
    fn test_split_from_tables() {
        let train = Ratings::from_records(vec![Interaction::new("u1", "i1", 4.0)]);
        let test = Ratings::from_records(vec![Interaction::new("u1", "i2", 5.0)]);

        let split = Split::new(train, test);
        assert_eq!(split.train.get_user_interactions("u1").unwrap()[0].item_id, "i1");
        assert_eq!(split.test.get_user_interactions("u1").unwrap()[0].item_id, "i2");
    }

    #[test]
    fn test_load_split_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.dat"), "u1::i1::4\n").unwrap();
        fs::write(dir.path().join("test.dat"), "u1::i3::bad\n").unwrap();

        let err = Split::load(dir.path(), "train.dat", "test.dat").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_validate_rejects_nan_scores() {
        let ratings = Ratings::from_records(vec![Interaction::new("u1", "i1", f32::NAN)]);
        assert!(matches!(
            ratings.validate(),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_unscored() {
        let ratings = Ratings::from_records(vec![Interaction::unscored("u1", "i1")]);
        assert!(ratings.validate().is_ok());
    }
}
