//! # Tourism Dashboard
//!
//! Tourism in Lebanon - an interactive dashboard service over a governorate
//! tourism dataset. It derives a governorate label and a canonical
//! attraction label for every row, filters by governorate and tourism index
//! range, and aggregates the result into two chart specifications.
//!
//! ## Modules
//!
//! - [`dataset`]: Source file loading and record types
//! - [`pipeline`]: Normalization, recoding, filtering, aggregation, charts
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tourism_dashboard::dataset::DatasetLoader;
//! use tourism_dashboard::pipeline::{Dashboard, DashboardState};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DatasetLoader::new().load(Path::new("Tourism-Lebanon-2023.csv"))?;
//!
//!     let output = Dashboard::new().render(&dataset, &DashboardState::default())?;
//!
//!     println!("{} labeled governorate rows", output.proportion.total());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod pipeline;

// Re-export top-level types for convenience
pub use dataset::{
    AttractionLabel, Dataset, DatasetError, DatasetLoader, DatasetResult, RawAttraction, Record,
};

pub use pipeline::{
    Dashboard, DashboardOutput, DashboardState, DistributionChart, FilterSet,
    GovernorateSelection, IndexRange, PipelineError, PipelineResult, ProportionChart,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, ChartsConfig, Config, ConfigError, DatasetConfig, LoggingConfig};
