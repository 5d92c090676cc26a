//! Score threshold filtering shared by every methodology.

use crate::error::{MethodologyError, Result};
use data_loader::{ItemId, Ratings};

/// Item ids of every interaction in `collection` whose score is `>= threshold`.
///
/// Duplicates are kept, one entry per qualifying interaction. Interactions
/// with no score never qualify.
///
/// Fails with [`MethodologyError::MissingThreshold`] when `threshold` is
/// `None`; callers decide beforehand whether filtering applies.
pub fn filter_only_greater_eq(collection: &Ratings, threshold: Option<f32>) -> Result<Vec<ItemId>> {
    let threshold = threshold.ok_or(MethodologyError::MissingThreshold)?;

    Ok(collection
        .iter()
        .filter(|interaction| interaction.meets_threshold(threshold))
        .map(|interaction| interaction.item_id.clone())
        .collect())
}
