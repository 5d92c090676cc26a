//! TrainingItems methodology: every item of the train set is a candidate,
//! except what the user already saw in training.

use super::{ItemPool, unseen_items};
use crate::error::Result;
use crate::traits::{CandidateMethodology, CandidateStream};
use data_loader::Ratings;
use std::fmt;
use tracing::debug;

/// Candidates of u = (items anywhere in the train set, optionally rated
/// `>= threshold`) minus items in u's train interactions.
///
/// The train-set item pool is memoized per instance exactly like
/// [`super::TestItemsMethodology`] does for the test set.
#[derive(Default)]
pub struct TrainingItemsMethodology {
    threshold: Option<f32>,
    train_pool: ItemPool,
}

impl TrainingItemsMethodology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Forget the memoized train-set item pool
    pub fn reset_cache(&mut self) {
        self.train_pool.reset();
    }

    pub fn is_cached(&self) -> bool {
        self.train_pool.is_populated()
    }
}

impl CandidateMethodology for TrainingItemsMethodology {
    fn filter_single<'a>(
        &'a self,
        user_id: &str,
        train_set: &'a Ratings,
        _test_set: &'a Ratings,
    ) -> Result<CandidateStream<'a>> {
        let pool = self.train_pool.get_or_compute(train_set, self.threshold)?;
        debug!("{}: {} pooled train items for user {}", self, pool.len(), user_id);

        Ok(unseen_items(pool, train_set, user_id))
    }

    fn threshold(&self) -> Option<f32> {
        self.threshold
    }
}

impl fmt::Display for TrainingItemsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainingItemsMethodology")
    }
}

impl fmt::Debug for TrainingItemsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainingItemsMethodology(only_greater_eq={:?})", self.threshold)
    }
}
