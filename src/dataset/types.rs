//! Dataset record types
//!
//! Raw cell representations and the records the dashboard pipeline works on.

use crate::pipeline::{normalize_region, recode_attraction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Text that marks a governorate-level reference in the raw region column
pub const GOVERNORATE_MARKER: &str = "Governorate";

/// Raw value of the attraction-existence column.
///
/// The source column mixes booleans, integers and free text, so each cell is
/// kept as the representation it was read as. The recoder is the only place
/// that turns these into canonical labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawAttraction {
    Bool(bool),
    Number(f64),
    Text(String),
    Missing,
}

impl RawAttraction {
    /// Type a raw CSV cell
    pub fn from_cell(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return RawAttraction::Missing;
        }

        match cell {
            "True" | "true" | "TRUE" => return RawAttraction::Bool(true),
            "False" | "false" | "FALSE" => return RawAttraction::Bool(false),
            _ => {}
        }

        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => RawAttraction::Number(n),
            _ => RawAttraction::Text(cell.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawAttraction::Missing)
    }
}

/// Canonical attraction-existence label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttractionLabel {
    #[serde(rename = "Exists")]
    Exists,
    #[serde(rename = "Does Not Exist")]
    DoesNotExist,
}

impl AttractionLabel {
    /// Both labels in canonical order
    pub const ALL: [AttractionLabel; 2] = [AttractionLabel::Exists, AttractionLabel::DoesNotExist];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttractionLabel::Exists => "Exists",
            AttractionLabel::DoesNotExist => "Does Not Exist",
        }
    }
}

impl fmt::Display for AttractionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the tourism dataset with its derived fields attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Source line number (1-based, header included)
    pub row: usize,
    /// Raw hierarchical region reference
    pub raw_region: Option<String>,
    /// Raw attraction-existence cell
    pub raw_attraction: RawAttraction,
    /// Tourism index score
    pub tourism_index: Option<f64>,
    /// Derived governorate label
    pub governorate: Option<String>,
    /// Derived attraction label
    pub attraction: Option<AttractionLabel>,
}

impl Record {
    /// Build a record from raw values, deriving the governorate and label
    pub fn new(
        row: usize,
        raw_region: Option<String>,
        raw_attraction: RawAttraction,
        tourism_index: Option<f64>,
    ) -> Self {
        let governorate = normalize_region(raw_region.as_deref());
        let attraction = recode_attraction(&raw_attraction);
        Self {
            row,
            raw_region,
            raw_attraction,
            tourism_index,
            governorate,
            attraction,
        }
    }

    /// Whether the raw region refers to a governorate rather than a town
    pub fn is_governorate_level(&self) -> bool {
        self.raw_region
            .as_deref()
            .map(|r| r.contains(GOVERNORATE_MARKER))
            .unwrap_or(false)
    }
}

/// The loaded dataset. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Attach the path the dataset was loaded from
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Summary counts for health reporting and startup logs
    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            records: self.records.len(),
            ..Default::default()
        };

        for record in &self.records {
            if record.is_governorate_level() {
                stats.governorate_level += 1;
            }
            if record.tourism_index.is_some() {
                stats.with_index += 1;
            }
            if record.attraction.is_some() {
                stats.labeled += 1;
            } else if !record.raw_attraction.is_missing() {
                stats.unrecognized_attraction_values += 1;
            }
        }

        stats
    }
}

/// Dataset summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub records: usize,
    pub governorate_level: usize,
    pub with_index: usize,
    pub labeled: usize,
    /// Present raw attraction values that matched neither canonical label
    pub unrecognized_attraction_values: usize,
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "records={}, governorate_level={}, with_index={}, labeled={}, unrecognized_attraction_values={}",
            self.records,
            self.governorate_level,
            self.with_index,
            self.labeled,
            self.unrecognized_attraction_values
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_attraction_from_cell() {
        assert_eq!(RawAttraction::from_cell(""), RawAttraction::Missing);
        assert_eq!(RawAttraction::from_cell("  "), RawAttraction::Missing);
        assert_eq!(RawAttraction::from_cell("True"), RawAttraction::Bool(true));
        assert_eq!(RawAttraction::from_cell("false"), RawAttraction::Bool(false));
        assert_eq!(RawAttraction::from_cell("1"), RawAttraction::Number(1.0));
        assert_eq!(RawAttraction::from_cell("0.0"), RawAttraction::Number(0.0));
        assert_eq!(
            RawAttraction::from_cell("does not exist"),
            RawAttraction::Text("does not exist".to_string())
        );
    }

    #[test]
    fn test_record_derives_fields() {
        let record = Record::new(
            2,
            Some("http://example.org/North_Governorate".to_string()),
            RawAttraction::Bool(true),
            Some(42.0),
        );

        assert_eq!(record.governorate.as_deref(), Some("North"));
        assert_eq!(record.attraction, Some(AttractionLabel::Exists));
        assert!(record.is_governorate_level());
    }

    #[test]
    fn test_town_level_record() {
        let record = Record::new(
            3,
            Some("http://example.org/Zahle".to_string()),
            RawAttraction::Missing,
            None,
        );

        assert!(!record.is_governorate_level());
        assert_eq!(record.attraction, None);
    }

    #[test]
    fn test_dataset_stats() {
        let dataset = Dataset::new(vec![
            Record::new(2, Some("a/Akkar_Governorate".into()), RawAttraction::Bool(true), Some(1.0)),
            Record::new(3, Some("a/Halba".into()), RawAttraction::Text("maybe".into()), None),
            Record::new(4, None, RawAttraction::Missing, Some(3.0)),
        ]);

        let stats = dataset.stats();
        assert_eq!(stats.records, 3);
        assert_eq!(stats.governorate_level, 1);
        assert_eq!(stats.with_index, 2);
        assert_eq!(stats.labeled, 1);
        assert_eq!(stats.unrecognized_attraction_values, 1);
    }
}
