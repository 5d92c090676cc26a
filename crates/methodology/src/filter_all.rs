//! Batch orchestration: apply one methodology to every test-set user.
//!
//! This is a free function over any [`CandidateMethodology`] rather than a
//! trait method, so every strategy shares exactly the same aggregation.

use crate::error::Result;
use crate::table::CandidateTable;
use crate::traits::{CandidateMethodology, CandidateStream};
use data_loader::{Ratings, UserId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Output shape requested from [`filter_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// Eager two-column table of distinct (user, item) pairs
    #[default]
    Table,
    /// One lazy candidate stream per test-set user
    PerUserStream,
}

/// Result of [`filter_all`], one variant per [`OutputShape`]
#[derive(Debug)]
pub enum FilterResult<'a> {
    Table(CandidateTable),
    /// Streams are handed over undrained; each can be consumed once
    PerUserStream(HashMap<UserId, CandidateStream<'a>>),
}

impl<'a> FilterResult<'a> {
    pub fn into_table(self) -> Option<CandidateTable> {
        match self {
            FilterResult::Table(table) => Some(table),
            FilterResult::PerUserStream(_) => None,
        }
    }

    pub fn into_streams(self) -> Option<HashMap<UserId, CandidateStream<'a>>> {
        match self {
            FilterResult::Table(_) => None,
            FilterResult::PerUserStream(streams) => Some(streams),
        }
    }
}

/// Compute the candidates of every distinct user of `test_set`.
///
/// ## Algorithm
/// 1. Collect the distinct user ids of the test set
/// 2. Call `filter_single` for each user; lookups happen here, but the
///    returned streams are not consumed
/// 3. For [`OutputShape::Table`], drain every stream into a
///    [`CandidateTable`], dropping duplicate items within a user
/// 4. For [`OutputShape::PerUserStream`], return the streams as they are
///
/// Users whose candidates are all filtered out contribute no rows to the
/// table and an empty stream to the mapping.
#[instrument(skip_all, fields(methodology = %methodology, shape = ?shape))]
pub fn filter_all<'a, M>(
    methodology: &'a M,
    train_set: &'a Ratings,
    test_set: &'a Ratings,
    shape: OutputShape,
) -> Result<FilterResult<'a>>
where
    M: CandidateMethodology + ?Sized,
{
    let users: HashSet<&UserId> = test_set.user_id_column().collect();
    info!("Filtering items based on {} for {} users", methodology, users.len());

    let mut filtered: HashMap<UserId, CandidateStream<'a>> = HashMap::with_capacity(users.len());
    for user_id in users {
        let stream = methodology.filter_single(user_id, train_set, test_set)?;
        filtered.insert(user_id.clone(), stream);
    }

    match shape {
        OutputShape::Table => {
            let mut table = CandidateTable::new();
            for (user_id, stream) in filtered {
                table.extend_user(&user_id, stream);
            }
            debug!("Built candidate table with {} rows", table.len());
            Ok(FilterResult::Table(table))
        }
        OutputShape::PerUserStream => Ok(FilterResult::PerUserStream(filtered)),
    }
}
