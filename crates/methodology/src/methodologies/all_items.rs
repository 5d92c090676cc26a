//! AllItems methodology: a fixed item universe, minus what the user
//! already saw in training.

use super::unseen_items;
use crate::error::Result;
use crate::traits::{CandidateMethodology, CandidateStream};
use data_loader::{ItemId, Ratings};
use std::collections::HashSet;
use std::fmt;

/// Candidates of u = `universe` minus items in u's train interactions.
///
/// The universe is fixed at construction. This methodology has no
/// threshold: [`CandidateMethodology::threshold`] is always `None`.
pub struct AllItemsMethodology {
    universe: HashSet<ItemId>,
}

impl AllItemsMethodology {
    pub fn new<I, S>(universe: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self {
            universe: universe.into_iter().map(Into::into).collect(),
        }
    }

    pub fn universe(&self) -> &HashSet<ItemId> {
        &self.universe
    }
}

impl CandidateMethodology for AllItemsMethodology {
    fn filter_single<'a>(
        &'a self,
        user_id: &str,
        train_set: &'a Ratings,
        _test_set: &'a Ratings,
    ) -> Result<CandidateStream<'a>> {
        Ok(unseen_items(&self.universe, train_set, user_id))
    }
}

impl fmt::Display for AllItemsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AllItemsMethodology")
    }
}

impl fmt::Debug for AllItemsMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AllItemsMethodology(items_list={:?})", self.universe)
    }
}
