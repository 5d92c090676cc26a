//! Tabular form of a batch filtering result.

use crate::traits::CandidateStream;
use data_loader::{ItemId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `(user_id, item_id)` row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidatePair {
    pub user_id: UserId,
    pub item_id: ItemId,
}

/// Two-column table of candidate pairs, one row per distinct
/// (user, candidate item) pair, in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateTable {
    rows: Vec<CandidatePair>,
}

impl CandidateTable {
    pub const COLUMNS: [&'static str; 2] = ["user_id", "item_id"];

    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Drain `stream` and append one row per distinct item of `user_id`.
    ///
    /// Deduplication is per user: the same item may appear for many users.
    pub fn extend_user(&mut self, user_id: &UserId, stream: CandidateStream<'_>) {
        let mut seen: HashSet<ItemId> = HashSet::new();
        for item_id in stream {
            if seen.insert(item_id.clone()) {
                self.rows.push(CandidatePair {
                    user_id: user_id.clone(),
                    item_id,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CandidatePair] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidatePair> {
        self.rows.iter()
    }

    pub fn user_id_column(&self) -> impl Iterator<Item = &UserId> + '_ {
        self.rows.iter().map(|row| &row.user_id)
    }

    pub fn item_id_column(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.rows.iter().map(|row| &row.item_id)
    }

    /// Candidate items of one user, in row order
    pub fn candidates_for(&self, user_id: &str) -> Vec<&ItemId> {
        self.rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| &row.item_id)
            .collect()
    }
}

impl<'a> IntoIterator for &'a CandidateTable {
    type Item = &'a CandidatePair;
    type IntoIter = std::slice::Iter<'a, CandidatePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
