//! Core trait and stream type for candidate methodologies.
//!
//! A methodology decides, for a single user, which items are eligible to
//! appear in that user's recommendation list. Batch orchestration over all
//! users lives in [`crate::filter_all`] and works with any implementor.

use crate::error::Result;
use data_loader::{ItemId, Ratings};
use std::fmt;

/// Per-user candidate generation policy.
///
/// `Display` gives the short methodology name used for logging; `Debug`
/// gives a repr-style description including the configured threshold.
pub trait CandidateMethodology: fmt::Display + fmt::Debug {
    /// Compute the candidate items of `user_id`.
    ///
    /// The returned stream borrows from `self` and both tables and is only
    /// evaluated as it is consumed.
    ///
    /// # Returns
    /// * `Ok(CandidateStream)` - The (lazy) candidate items
    /// * `Err` - If a required lookup fails, e.g. the user is absent from
    ///   the test set for test-based methodologies
    fn filter_single<'a>(
        &'a self,
        user_id: &str,
        train_set: &'a Ratings,
        test_set: &'a Ratings,
    ) -> Result<CandidateStream<'a>>;

    /// The `only_greater_eq` cutoff, if any
    fn threshold(&self) -> Option<f32> {
        None
    }
}

/// A lazy, single-pass sequence of candidate item ids.
///
/// The stream cannot be restarted: once it has been drained, further calls
/// to `next` return `None`. An exhausted stream is not the same thing as a
/// user with no candidates, so callers must not iterate it twice.
pub struct CandidateStream<'a> {
    inner: Box<dyn Iterator<Item = ItemId> + 'a>,
}

impl<'a> CandidateStream<'a> {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = ItemId> + 'a,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// A stream that yields nothing
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Iterator for CandidateStream<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for CandidateStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateStream")
            .field("size_hint", &self.inner.size_hint())
            .finish()
    }
}
