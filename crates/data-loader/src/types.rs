//! Core domain types for train/test rating tables.
//!
//! This module defines the interaction record and the [`Ratings`] table that
//! candidate methodologies read from. Ids are plain strings so that any
//! dataset (numeric MovieLens ids, IMDb `tt...` ids, ...) can be loaded
//! without conversion.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a user
pub type UserId = String;

/// Identifier of an item
pub type ItemId = String;

// =============================================================================
// Interaction
// =============================================================================

/// A single recorded interaction between a user and an item.
///
/// Two interactions refer to the same event when their `(user_id, item_id)`
/// pair matches; the score is payload, not identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: UserId,
    pub item_id: ItemId,
    /// Explicit feedback, if the dataset records one
    pub score: Option<f32>,
    /// Unix timestamp when the interaction happened
    pub timestamp: Option<i64>,
}

impl Interaction {
    /// Create an interaction with a score and no timestamp
    pub fn new(user_id: impl Into<UserId>, item_id: impl Into<ItemId>, score: f32) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            score: Some(score),
            timestamp: None,
        }
    }

    /// Create an implicit-feedback interaction (no score)
    pub fn unscored(user_id: impl Into<UserId>, item_id: impl Into<ItemId>) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            score: None,
            timestamp: None,
        }
    }

    /// Attach a timestamp (builder style)
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns true if the score is `>= threshold`.
    ///
    /// An interaction without a score never meets a threshold.
    pub fn meets_threshold(&self, threshold: f32) -> bool {
        self.score.is_some_and(|score| score >= threshold)
    }
}

impl PartialEq for Interaction {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.item_id == other.item_id
    }
}

impl Eq for Interaction {}

impl Hash for Interaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_id.hash(state);
        self.item_id.hash(state);
    }
}

// =============================================================================
// Ratings - one side of a train/test split
// =============================================================================

/// An ordered table of interactions with a per-user index.
///
/// Interaction order is insertion order. The user index duplicates the
/// records so that [`Ratings::get_user_interactions`] can hand out a slice.
#[derive(Debug, Clone, Default)]
pub struct Ratings {
    pub(crate) interactions: Vec<Interaction>,
    pub(crate) user_index: HashMap<UserId, Vec<Interaction>>,
}

impl Ratings {
    /// Creates a new, empty table
    pub fn new() -> Self {
        Self {
            interactions: Vec::new(),
            user_index: HashMap::new(),
        }
    }

    /// Build a table from any sequence of interactions, keeping their order
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Interaction>,
    {
        let mut ratings = Self::new();
        for interaction in records {
            ratings.insert(interaction);
        }
        ratings
    }

    /// Append an interaction and update the user index
    pub fn insert(&mut self, interaction: Interaction) {
        self.user_index
            .entry(interaction.user_id.clone())
            .or_default()
            .push(interaction.clone());
        self.interactions.push(interaction);
    }

    /// Number of interactions
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Iterate over every interaction in table order
    pub fn iter(&self) -> std::slice::Iter<'_, Interaction> {
        self.interactions.iter()
    }

    /// User ids in interaction order, with repetition
    pub fn user_id_column(&self) -> impl Iterator<Item = &UserId> + '_ {
        self.interactions.iter().map(|i| &i.user_id)
    }

    /// Item ids in interaction order, with repetition
    pub fn item_id_column(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.interactions.iter().map(|i| &i.item_id)
    }

    /// Get all interactions of a user.
    ///
    /// Fails with [`DataLoadError::UserNotFound`] if the user has none.
    pub fn get_user_interactions(&self, user_id: &str) -> Result<&[Interaction]> {
        self.user_index
            .get(user_id)
            .map(|v| v.as_slice())
            .ok_or_else(|| DataLoadError::UserNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Get all interactions of a user, or an empty slice if there are none
    pub fn user_interactions_or_empty(&self, user_id: &str) -> &[Interaction] {
        self.user_index
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct user ids
    pub fn unique_user_ids(&self) -> HashSet<&UserId> {
        self.user_index.keys().collect()
    }

    /// Distinct item ids
    pub fn unique_item_ids(&self) -> HashSet<&ItemId> {
        self.item_id_column().collect()
    }

    /// (users, items, interactions) counts for reporting
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.user_index.len(),
            self.unique_item_ids().len(),
            self.interactions.len(),
        )
    }
}

impl<'a> IntoIterator for &'a Ratings {
    type Item = &'a Interaction;
    type IntoIter = std::slice::Iter<'a, Interaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Interaction> for Ratings {
    fn from_iter<I: IntoIterator<Item = Interaction>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
