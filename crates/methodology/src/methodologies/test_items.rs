//! TestItems methodology: every item of the test set is a candidate, except
//! what the user already saw in training.

use super::{ItemPool, unseen_items};
use crate::error::Result;
use crate::traits::{CandidateMethodology, CandidateStream};
use data_loader::Ratings;
use std::fmt;
use tracing::debug;

/// Candidates of u = (items anywhere in the test set, optionally rated
/// `>= threshold`) minus items in u's train interactions.
///
/// ## Caching
/// The test-set item pool is computed on the first call and reused for
/// every later user, whatever test set they pass. An instance therefore
/// belongs to a single train/test split; call
/// [`TestItemsMethodology::reset_cache`] before reusing it on another one.
#[derive(Default)]
pub struct TestItemsMethodology {
    threshold: Option<f32>,
    test_pool: ItemPool,
}

impl TestItemsMethodology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only test items that received a score `>= threshold`
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Forget the memoized test-set item pool
    pub fn reset_cache(&mut self) {
        self.test_pool.reset();
    }

    pub fn is_cached(&self) -> bool {
        self.test_pool.is_populated()
    }
}

impl CandidateMethodology for TestItemsMethodology {
    fn filter_single<'a>(
        &'a self,
        user_id: &str,
        train_set: &'a Ratings,
        test_set: &'a Ratings,
    ) -> Result<CandidateStream<'a>> {
        let pool = self.test_pool.get_or_compute(test_set, self.threshold)?;
        debug!("{}: {} pooled test items for user {}", self, pool.len(), user_id);

        Ok(unseen_items(pool, train_set, user_id))
    }

    fn threshold(&self) -> Option<f32> {
        self.threshold
    }
}

impl fmt::Display for TestItemsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestItemsMethodology")
    }
}

impl fmt::Debug for TestItemsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestItemsMethodology(only_greater_eq={:?})", self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Interaction;
    use std::collections::HashSet;

    fn collect(stream: CandidateStream<'_>) -> HashSet<String> {
        stream.collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_test_items_minus_seen() {
        let train = Ratings::from_records(vec![Interaction::new("u1", "i1", 4.0)]);
        let test = Ratings::from_records(vec![
            Interaction::new("u1", "i1", 3.0),
            Interaction::new("u2", "i2", 2.0),
            Interaction::new("u2", "i3", 5.0),
        ]);

        let methodology = TestItemsMethodology::new();
        let items = collect(methodology.filter_single("u1", &train, &test).unwrap());
        assert_eq!(items, set(&["i2", "i3"]));
    }

    #[test]
    fn test_threshold_applies_to_pool() {
        let train = Ratings::from_records(vec![Interaction::new("u1", "i1", 4.0)]);
        let test = Ratings::from_records(vec![
            Interaction::new("u1", "i1", 5.0),
            Interaction::new("u2", "i2", 2.0),
            Interaction::new("u2", "i3", 4.0),
        ]);

        let methodology = TestItemsMethodology::new().with_threshold(3.0);
        let u1 = collect(methodology.filter_single("u1", &train, &test).unwrap());
        let u2 = collect(methodology.filter_single("u2", &train, &test).unwrap());

        assert_eq!(u1, set(&["i3"]));
        assert_eq!(u2, set(&["i1", "i3"]));
    }

    #[test]
    fn test_cache_is_reused_until_reset() {
        let train = Ratings::new();
        let first = Ratings::from_records(vec![Interaction::new("u1", "i1", 1.0)]);
        let second = Ratings::from_records(vec![Interaction::new("u1", "i2", 1.0)]);

        let mut methodology = TestItemsMethodology::new();
        assert!(!methodology.is_cached());

        assert_eq!(collect(methodology.filter_single("u1", &train, &first).unwrap()), set(&["i1"]));
        assert!(methodology.is_cached());
        // stale pool from the first test set
        assert_eq!(collect(methodology.filter_single("u1", &train, &second).unwrap()), set(&["i1"]));

        methodology.reset_cache();
        assert_eq!(collect(methodology.filter_single("u1", &train, &second).unwrap()), set(&["i2"]));
    }

    #[test]
    fn test_labels() {
        let methodology = TestItemsMethodology::new();
        assert_eq!(methodology.to_string(), "TestItemsMethodology");
        assert_eq!(format!("{:?}", methodology), "TestItemsMethodology(only_greater_eq=None)");
    }
}
