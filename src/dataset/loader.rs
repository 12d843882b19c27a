//! Dataset Loader
//!
//! Reads the tourism dataset from a delimited file, resolves the columns the
//! dashboard consumes by header name, and attaches derived fields to every row.

use super::error::{DatasetError, DatasetResult};
use super::types::{Dataset, RawAttraction, Record};
use crate::config::DatasetConfig;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default header of the raw region column
pub const DEFAULT_REGION_COLUMN: &str = "refArea";
/// Default header of the attraction-existence column
pub const DEFAULT_ATTRACTION_COLUMN: &str =
    "Existence of touristic attractions prone to be exploited and developed - exists";
/// Default header of the tourism index column
pub const DEFAULT_INDEX_COLUMN: &str = "Tourism Index";

/// Loader with configurable column mapping
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    region_column: String,
    attraction_column: String,
    index_column: String,
    delimiter: u8,
}

/// Column positions resolved from the header row
struct ColumnIndices {
    region: usize,
    attraction: usize,
    index: usize,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    /// Create a loader for the standard tourism dataset layout
    pub fn new() -> Self {
        Self {
            region_column: DEFAULT_REGION_COLUMN.to_string(),
            attraction_column: DEFAULT_ATTRACTION_COLUMN.to_string(),
            index_column: DEFAULT_INDEX_COLUMN.to_string(),
            delimiter: b',',
        }
    }

    /// Create a loader from the dataset section of the config
    pub fn from_config(config: &DatasetConfig) -> DatasetResult<Self> {
        let delimiter = match config.delimiter.as_bytes() {
            [b] => *b,
            _ => return Err(DatasetError::InvalidDelimiter(config.delimiter.clone())),
        };

        Ok(Self::new()
            .with_region_column(&config.region_column)
            .with_attraction_column(&config.attraction_column)
            .with_index_column(&config.index_column)
            .with_delimiter(delimiter))
    }

    pub fn with_region_column(mut self, column: &str) -> Self {
        self.region_column = column.to_string();
        self
    }

    pub fn with_attraction_column(mut self, column: &str) -> Self {
        self.attraction_column = column.to_string();
        self
    }

    pub fn with_index_column(mut self, column: &str) -> Self {
        self.index_column = column.to_string();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load the dataset from a file
    pub fn load(&self, path: &Path) -> DatasetResult<Dataset> {
        let file = File::open(path).map_err(|e| DatasetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let dataset = self.read(file, &path.display().to_string())?;
        Ok(dataset.with_source(path))
    }

    /// Load the dataset from an in-memory string
    pub fn load_str(&self, data: &str) -> DatasetResult<Dataset> {
        self.read(data.as_bytes(), "<memory>")
    }

    fn read<R: Read>(&self, source: R, source_name: &str) -> DatasetResult<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let columns = self.resolve_columns(&headers, source_name)?;

        let mut records = Vec::new();
        let mut rows_failed = 0usize;
        let mut invalid_index_values = 0usize;

        for (line_num, result) in reader.records().enumerate() {
            let row = line_num + 2;

            let raw = match result {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(row, error = %e, "Skipping unreadable row");
                    rows_failed += 1;
                    continue;
                }
            };

            let raw_region = raw
                .get(columns.region)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            let raw_attraction = raw
                .get(columns.attraction)
                .map(RawAttraction::from_cell)
                .unwrap_or(RawAttraction::Missing);

            let tourism_index = match raw.get(columns.index).map(str::trim) {
                None | Some("") => None,
                Some(s) => match s.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(v),
                    _ => {
                        invalid_index_values += 1;
                        None
                    }
                },
            };

            records.push(Record::new(row, raw_region, raw_attraction, tourism_index));
        }

        if rows_failed > 0 {
            tracing::warn!(rows_failed, "Some rows could not be read from {}", source_name);
        }
        if invalid_index_values > 0 {
            tracing::warn!(
                invalid_index_values,
                "Non-numeric '{}' values treated as missing",
                self.index_column
            );
        }

        let dataset = Dataset::new(records);
        let stats = dataset.stats();
        if stats.unrecognized_attraction_values > 0 {
            tracing::warn!(
                unrecognized_attraction_values = stats.unrecognized_attraction_values,
                "Attraction values outside the recognized set are excluded from charts"
            );
        }
        tracing::info!("Loaded dataset from {}: {}", source_name, stats);

        Ok(dataset)
    }

    fn resolve_columns(
        &self,
        headers: &csv::StringRecord,
        source_name: &str,
    ) -> DatasetResult<ColumnIndices> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn {
                    column: name.to_string(),
                    source_name: source_name.to_string(),
                })
        };

        Ok(ColumnIndices {
            region: find(&self.region_column)?,
            attraction: find(&self.attraction_column)?,
            index: find(&self.index_column)?,
        })
    }
}

/// Load a dataset using the configured column mapping
pub fn load_dataset(config: &DatasetConfig) -> DatasetResult<Dataset> {
    DatasetLoader::from_config(config)?.load(Path::new(&config.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::AttractionLabel;
    use std::io::Write;

    const HEADER: &str = "refArea,Tourism Index,Existence of touristic attractions prone to be exploited and developed - exists";

    #[test]
    fn test_load_str() {
        let data = format!(
            "{HEADER}
http://dbpedia.org/resource/Beirut_Governorate,12,True
http://dbpedia.org/resource/Akkar_Governorate,7.5,does not exist
http://dbpedia.org/resource/Halba,,1
,3,"
        );

        let dataset = DatasetLoader::new().load_str(&data).unwrap();
        let records = dataset.records();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].row, 2);
        assert_eq!(records[0].governorate.as_deref(), Some("Beirut"));
        assert_eq!(records[0].tourism_index, Some(12.0));
        assert_eq!(records[0].attraction, Some(AttractionLabel::Exists));
        assert_eq!(records[1].attraction, Some(AttractionLabel::DoesNotExist));
        assert_eq!(records[2].tourism_index, None);
        assert_eq!(records[2].attraction, Some(AttractionLabel::Exists));
        assert_eq!(records[3].governorate, None);
        assert_eq!(records[3].attraction, None);
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let data = "refArea,Tourism Index\nBeirut_Governorate,3";

        let err = DatasetLoader::new().load_str(data).unwrap_err();
        match err {
            DatasetError::MissingColumn { column, .. } => {
                assert_eq!(column, DEFAULT_ATTRACTION_COLUMN)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_index_is_absent() {
        let data = format!("{HEADER}\nx/Nabatieh_Governorate,n/a,exists");

        let dataset = DatasetLoader::new().load_str(&data).unwrap();
        assert_eq!(dataset.records()[0].tourism_index, None);
        assert_eq!(dataset.records()[0].attraction, Some(AttractionLabel::Exists));
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let data = "area;score;flag\nx/South_Governorate;4;0";

        let dataset = DatasetLoader::new()
            .with_region_column("area")
            .with_index_column("score")
            .with_attraction_column("flag")
            .with_delimiter(b';')
            .load_str(data)
            .unwrap();

        let record = &dataset.records()[0];
        assert_eq!(record.governorate.as_deref(), Some("South"));
        assert_eq!(record.tourism_index, Some(4.0));
        assert_eq!(record.attraction, Some(AttractionLabel::DoesNotExist));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "x/Mount_Lebanon_Governorate,20,True").unwrap();

        let dataset = DatasetLoader::new().load(file.path()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.source().map(|p| p.as_path()), Some(file.path()));
        assert_eq!(dataset.records()[0].governorate.as_deref(), Some("Mount Lebanon"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetLoader::new()
            .load(&dir.path().join("absent.csv"))
            .unwrap_err();

        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_invalid_delimiter_config() {
        let config = DatasetConfig {
            delimiter: ";;".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            DatasetLoader::from_config(&config),
            Err(DatasetError::InvalidDelimiter(_))
        ));
    }
}
