//! Filter Engine
//!
//! Criteria over dataset records, combined with logical AND. Applying a
//! [`FilterSet`] borrows the matching records into a new vector and leaves the
//! dataset untouched, so the same filter applied twice yields the same view.

use super::error::{PipelineError, PipelineResult};
use crate::dataset::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector value meaning "no governorate filter"
pub const ALL_GOVERNORATES: &str = "All";

/// Governorate selector state
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GovernorateSelection {
    #[default]
    All,
    Only(String),
}

impl GovernorateSelection {
    /// Parse a selector value, treating `None` and the `All` sentinel as no filter
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => GovernorateSelection::All,
            Some(v) if v == ALL_GOVERNORATES => GovernorateSelection::All,
            Some(v) => GovernorateSelection::Only(v.to_string()),
        }
    }

    pub fn only(name: impl Into<String>) -> Self {
        GovernorateSelection::Only(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            GovernorateSelection::All => ALL_GOVERNORATES,
            GovernorateSelection::Only(name) => name,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            GovernorateSelection::All => true,
            GovernorateSelection::Only(name) => record.governorate.as_deref() == Some(name),
        }
    }
}

impl From<String> for GovernorateSelection {
    fn from(value: String) -> Self {
        if value == ALL_GOVERNORATES {
            GovernorateSelection::All
        } else {
            GovernorateSelection::Only(value)
        }
    }
}

impl From<GovernorateSelection> for String {
    fn from(value: GovernorateSelection) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for GovernorateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive tourism index range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexRange {
    lo: f64,
    hi: f64,
}

impl IndexRange {
    /// Create a range, rejecting reversed or non-finite bounds
    pub fn new(lo: f64, hi: f64) -> PipelineResult<Self> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(PipelineError::InvalidRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    /// Whether the range collapses to a single value
    pub fn is_single_point(&self) -> bool {
        self.lo == self.hi
    }
}

/// Observed min/max of the tourism index over a subset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexBounds {
    pub min: f64,
    pub max: f64,
}

impl IndexBounds {
    /// Observe bounds over the records that carry an index.
    ///
    /// Returns `None` when no record has an index.
    pub fn observe(records: &[&Record]) -> Option<Self> {
        let mut values = records.iter().filter_map(|r| r.tourism_index);
        let first = values.next()?;

        let (min, max) = values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
        Some(Self { min, max })
    }

    /// Whether the subset holds a single distinct index value
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Range covering the whole observed span
    pub fn full_range(&self) -> IndexRange {
        IndexRange {
            lo: self.min,
            hi: self.max,
        }
    }

    /// Restrict a requested range to the observed span
    pub fn clamp(&self, requested: IndexRange) -> IndexRange {
        let lo = requested.lo.clamp(self.min, self.max);
        let hi = requested.hi.clamp(self.min, self.max);
        IndexRange { lo, hi: hi.max(lo) }
    }
}

/// A single filter predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Governorate equality (or no-op for `All`)
    Governorate(GovernorateSelection),
    /// Tourism index within an inclusive range
    IndexRange(IndexRange),
    /// Tourism index present
    RequireIndex,
    /// Attraction label present
    RequireLabel,
    /// Raw region refers to a governorate rather than a town
    GovernorateLevel,
}

impl Criterion {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Criterion::Governorate(selection) => selection.matches(record),
            Criterion::IndexRange(range) => record
                .tourism_index
                .map(|v| range.contains(v))
                .unwrap_or(false),
            Criterion::RequireIndex => record.tourism_index.is_some(),
            Criterion::RequireLabel => record.attraction.is_some(),
            Criterion::GovernorateLevel => record.is_governorate_level(),
        }
    }
}

/// Conjunction of criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    criteria: Vec<Criterion>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn governorate(self, selection: GovernorateSelection) -> Self {
        self.with(Criterion::Governorate(selection))
    }

    pub fn index_range(self, range: IndexRange) -> Self {
        self.with(Criterion::IndexRange(range))
    }

    pub fn require_index(self) -> Self {
        self.with(Criterion::RequireIndex)
    }

    pub fn require_label(self) -> Self {
        self.with(Criterion::RequireLabel)
    }

    pub fn governorate_level(self) -> Self {
        self.with(Criterion::GovernorateLevel)
    }

    /// Check if a record satisfies every criterion
    pub fn matches(&self, record: &Record) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }

    /// Borrow the matching records, preserving order
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
