//! Selecting a methodology by name.
//!
//! Front-ends (the CLI, configuration files of an evaluation run) refer to
//! methodologies by a kebab-case name; [`build_methodology`] turns that name
//! plus its parameters into a ready-to-use trait object.

use crate::error::{MethodologyError, Result};
use crate::methodologies::*;
use crate::traits::CandidateMethodology;
use data_loader::ItemId;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodologyKind {
    TestRatings,
    TestItems,
    TrainingItems,
    AllItems,
}

impl MethodologyKind {
    pub const ALL: [MethodologyKind; 4] = [
        MethodologyKind::TestRatings,
        MethodologyKind::TestItems,
        MethodologyKind::TrainingItems,
        MethodologyKind::AllItems,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodologyKind::TestRatings => "test-ratings",
            MethodologyKind::TestItems => "test-items",
            MethodologyKind::TrainingItems => "training-items",
            MethodologyKind::AllItems => "all-items",
        }
    }
}

impl fmt::Display for MethodologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodologyKind {
    type Err = MethodologyError;

    fn from_str(s: &str) -> Result<Self> {
        MethodologyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MethodologyError::UnknownMethodology(s.to_string()))
    }
}

/// Build the methodology named by `kind`.
///
/// * `threshold` - `only_greater_eq` cutoff; must be finite, rejected for `AllItems`
/// * `universe` - item universe; required for `AllItems`, ignored otherwise
pub fn build_methodology(
    kind: MethodologyKind,
    threshold: Option<f32>,
    universe: Option<HashSet<ItemId>>,
) -> Result<Box<dyn CandidateMethodology>> {
    if let Some(t) = threshold.filter(|t| !t.is_finite()) {
        return Err(MethodologyError::InvalidThreshold(t));
    }

    let methodology: Box<dyn CandidateMethodology> = match kind {
        MethodologyKind::TestRatings => {
            let m = TestRatingsMethodology::new();
            Box::new(match threshold {
                Some(t) => m.with_threshold(t),
                None => m,
            })
        }
        MethodologyKind::TestItems => {
            let m = TestItemsMethodology::new();
            Box::new(match threshold {
                Some(t) => m.with_threshold(t),
                None => m,
            })
        }
        MethodologyKind::TrainingItems => {
            let m = TrainingItemsMethodology::new();
            Box::new(match threshold {
                Some(t) => m.with_threshold(t),
                None => m,
            })
        }
        MethodologyKind::AllItems => {
            if threshold.is_some() {
                return Err(MethodologyError::ThresholdNotSupported {
                    methodology: "AllItemsMethodology".to_string(),
                });
            }
            let universe = universe.ok_or_else(|| MethodologyError::MissingUniverse {
                methodology: "AllItemsMethodology".to_string(),
            })?;
            Box::new(AllItemsMethodology::new(universe))
        }
    };

    Ok(methodology)
}
