//! Concrete candidate methodologies.
//!
//! Following the precision-oriented evaluation taxonomy, each methodology
//! defines a different candidate universe for a user u:
//!
//! | Methodology              | Candidates of u                                  |
//! |--------------------------|--------------------------------------------------|
//! | TestRatingsMethodology   | items in u's test interactions                   |
//! | TestItemsMethodology     | items anywhere in the test set, minus u's train  |
//! | TrainingItemsMethodology | items anywhere in the train set, minus u's train |
//! | AllItemsMethodology      | a fixed item universe, minus u's train           |

pub mod all_items;
pub mod test_items;
pub mod test_ratings;
pub mod training_items;

pub use all_items::AllItemsMethodology;
pub use test_items::TestItemsMethodology;
pub use test_ratings::TestRatingsMethodology;
pub use training_items::TrainingItemsMethodology;

use crate::error::Result;
use crate::threshold::filter_only_greater_eq;
use crate::traits::CandidateStream;
use data_loader::{ItemId, Ratings};
use std::cell::OnceCell;
use std::collections::HashSet;
use tracing::debug;

/// One-shot memo of the global item pool of a table.
///
/// The pool is computed from the first table it sees and never recomputed
/// until [`ItemPool::reset`] is called. `OnceCell` makes the owning
/// methodology `!Sync`: each thread needs its own instance.
#[derive(Default)]
pub(crate) struct ItemPool {
    cell: OnceCell<HashSet<ItemId>>,
}

impl ItemPool {
    /// Return the memoized pool, computing it from `table` on first use
    pub(crate) fn get_or_compute(
        &self,
        table: &Ratings,
        threshold: Option<f32>,
    ) -> Result<&HashSet<ItemId>> {
        if let Some(pool) = self.cell.get() {
            return Ok(pool);
        }

        let pool: HashSet<ItemId> = match threshold {
            Some(_) => filter_only_greater_eq(table, threshold)?.into_iter().collect(),
            None => table.item_id_column().cloned().collect(),
        };
        debug!(
            "Computed item pool of {} items (threshold: {:?})",
            pool.len(),
            threshold
        );

        Ok(self.cell.get_or_init(|| pool))
    }

    pub(crate) fn is_populated(&self) -> bool {
        self.cell.get().is_some()
    }

    pub(crate) fn reset(&mut self) {
        self.cell.take();
    }
}

/// Lazily yield the items of `pool` that `user_id` has not interacted with
/// in `train_set`.
///
/// A user with no train interactions sees the whole pool.
pub(crate) fn unseen_items<'a>(
    pool: &'a HashSet<ItemId>,
    train_set: &'a Ratings,
    user_id: &str,
) -> CandidateStream<'a> {
    let seen: HashSet<&'a str> = train_set
        .user_interactions_or_empty(user_id)
        .iter()
        .map(|interaction| interaction.item_id.as_str())
        .collect();

    CandidateStream::new(
        pool.iter()
            .filter(move |item_id| !seen.contains(item_id.as_str()))
            .cloned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Interaction;

    #[test]
    fn test_item_pool_is_memoized() {
        let first = Ratings::from_records(vec![Interaction::new("u1", "i1", 1.0)]);
        let second = Ratings::from_records(vec![Interaction::new("u1", "i2", 1.0)]);

        let mut pool = ItemPool::default();
        assert!(!pool.is_populated());

        assert!(pool.get_or_compute(&first, None).unwrap().contains("i1"));
        assert!(pool.is_populated());
        assert!(pool.get_or_compute(&second, None).unwrap().contains("i1"));

        pool.reset();
        assert!(pool.get_or_compute(&second, None).unwrap().contains("i2"));
    }

    #[test]
    fn test_unseen_items_for_unknown_user() {
        let train = Ratings::from_records(vec![Interaction::new("u1", "i1", 1.0)]);
        let pool: HashSet<ItemId> = ["i1", "i2"].iter().map(|s| s.to_string()).collect();

        let mut items: Vec<ItemId> = unseen_items(&pool, &train, "ghost").collect();
        items.sort();
        assert_eq!(items, vec!["i1".to_string(), "i2".to_string()]);
    }
}
