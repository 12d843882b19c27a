//! Tourism Dataset
//!
//! Loading and representation of the source table:
//!
//! - **Types**: raw cell values, canonical labels, records with derived fields
//! - **Loader**: delimited-file reader with header-based column mapping
//! - **Errors**: fatal load-time failures (missing columns, unreadable file)
//!
//! The dataset is loaded once and never mutated afterwards; every view over it
//! is a vector of borrowed records.

mod error;
mod loader;
mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{
    load_dataset, DatasetLoader, DEFAULT_ATTRACTION_COLUMN, DEFAULT_INDEX_COLUMN,
    DEFAULT_REGION_COLUMN,
};
pub use types::{AttractionLabel, Dataset, DatasetStats, RawAttraction, Record, GOVERNORATE_MARKER};
