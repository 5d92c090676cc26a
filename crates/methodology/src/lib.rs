//! Candidate-item methodologies for offline recommender evaluation.
//!
//! Given a train/test split, a methodology decides which items are eligible
//! to appear in each user's recommendation list. This crate provides:
//! - The CandidateMethodology trait and its four implementations
//! - `filter_all` for applying a methodology to every test user
//! - CandidateTable, the eager two-column form of the result
//!
//! ## Architecture
//! 1. A methodology computes one user's candidates as a lazy stream
//! 2. `filter_all` calls it for every distinct test-set user
//! 3. The caller picks the output shape: a deduplicated table, or the
//!    per-user streams themselves
//!
//! ## Example Usage
//! ```ignore
//! use methodology::{filter_all, OutputShape, TestItemsMethodology};
//!
//! let methodology = TestItemsMethodology::new().with_threshold(3.0);
//! let table = filter_all(&methodology, &split.train, &split.test, OutputShape::Table)?
//!     .into_table()
//!     .unwrap_or_default();
//!
//! for pair in &table {
//!     println!("{} -> {}", pair.user_id, pair.item_id);
//! }
//! ```
//!
//! ## Threading
//! TestItems and TrainingItems memoize their global item pool in a
//! `OnceCell`, so they are `!Sync`. Give every worker its own instance.

pub mod error;
pub mod traits;
pub mod threshold;
pub mod methodologies;
pub mod filter_all;
pub mod table;
pub mod kind;

// Re-export main types
pub use error::{MethodologyError, Result};
pub use traits::{CandidateMethodology, CandidateStream};
pub use threshold::filter_only_greater_eq;
pub use methodologies::{
    AllItemsMethodology, TestItemsMethodology, TestRatingsMethodology, TrainingItemsMethodology,
};
pub use filter_all::{FilterResult, OutputShape, filter_all};
pub use table::{CandidatePair, CandidateTable};
pub use kind::{MethodologyKind, build_methodology};
