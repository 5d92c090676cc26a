//! TestRatings methodology: a user's candidates are the items of their own
//! test interactions.

use crate::error::Result;
use crate::traits::{CandidateMethodology, CandidateStream};
use data_loader::Ratings;
use std::fmt;

/// Candidates of u = items in u's test interactions, optionally only those
/// rated `>= threshold`.
///
/// Duplicated test interactions produce duplicated items here; the table
/// form of [`crate::filter_all`] removes them.
#[derive(Default)]
pub struct TestRatingsMethodology {
    threshold: Option<f32>,
}

impl TestRatingsMethodology {
    pub fn new() -> Self {
        Self { threshold: None }
    }

    /// Keep only test items rated `>= threshold`
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

impl CandidateMethodology for TestRatingsMethodology {
    fn filter_single<'a>(
        &'a self,
        user_id: &str,
        _train_set: &'a Ratings,
        test_set: &'a Ratings,
    ) -> Result<CandidateStream<'a>> {
        let user_test = test_set.get_user_interactions(user_id)?;
        let threshold = self.threshold;

        Ok(CandidateStream::new(
            user_test
                .iter()
                .filter(move |interaction| threshold.is_none_or(|t| interaction.meets_threshold(t)))
                .map(|interaction| interaction.item_id.clone()),
        ))
    }

    fn threshold(&self) -> Option<f32> {
        self.threshold
    }
}

impl fmt::Display for TestRatingsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestRatingsMethodology")
    }
}

impl fmt::Debug for TestRatingsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestRatingsMethodology(only_greater_eq={:?})", self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MethodologyError;
    use data_loader::{DataLoadError, Interaction};

    fn test_set() -> Ratings {
        Ratings::from_records(vec![
            Interaction::new("u1", "i1", 0.8),
            Interaction::new("u1", "i2", 0.3),
            Interaction::new("u1", "i1", 0.9),
        ])
    }

    #[test]
    fn test_all_test_items_without_threshold() {
        let methodology = TestRatingsMethodology::new();
        let train = Ratings::new();
        let test = test_set();

        let items: Vec<String> = methodology.filter_single("u1", &train, &test).unwrap().collect();
        // duplicates are left for the aggregation step
        assert_eq!(items, vec!["i1", "i2", "i1"]);
    }

    #[test]
    fn test_threshold_filters_low_scores() {
        let methodology = TestRatingsMethodology::new().with_threshold(0.5);
        let train = Ratings::new();
        let test = test_set();

        let items: Vec<String> = methodology.filter_single("u1", &train, &test).unwrap().collect();
        assert_eq!(items, vec!["i1", "i1"]);
    }

    #[test]
    fn test_everything_below_threshold_is_empty() {
        let methodology = TestRatingsMethodology::new().with_threshold(1.0);
        let train = Ratings::new();
        let test = test_set();

        assert_eq!(methodology.filter_single("u1", &train, &test).unwrap().count(), 0);
    }

    #[test]
    fn test_unknown_test_user_is_a_lookup_error() {
        let methodology = TestRatingsMethodology::new();
        let train = Ratings::new();
        let test = test_set();

        let err = methodology.filter_single("u9", &train, &test).unwrap_err();
        assert!(matches!(
            err,
            MethodologyError::Lookup(DataLoadError::UserNotFound { .. })
        ));
    }

    #[test]
    fn test_labels() {
        let methodology = TestRatingsMethodology::new().with_threshold(3.0);
        assert_eq!(methodology.to_string(), "TestRatingsMethodology");
        assert_eq!(
            format!("{:?}", methodology),
            "TestRatingsMethodology(only_greater_eq=Some(3.0))"
        );
        assert_eq!(methodology.threshold(), Some(3.0));
    }
}
