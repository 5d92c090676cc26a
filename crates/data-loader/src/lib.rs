//! # Data Loader Crate
//!
//! This crate loads train/test splits of user-item interactions and exposes
//! them as indexed rating tables.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Interaction, Ratings)
//! - **parser**: Parse `::`-separated split files into Rust structs
//! - **index**: Load and validate a whole train/test split
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Split;
//! use std::path::Path;
//!
//! let split = Split::load(Path::new("data/split"), "train.dat", "test.dat")?;
//!
//! let seen = split.train.user_interactions_or_empty("u1");
//! let to_predict = split.test.get_user_interactions("u1")?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::Split;
pub use types::{
    // Type aliases
    UserId,
    ItemId,
    // Core types
    Interaction,
    Ratings,
};
