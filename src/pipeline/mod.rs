//! Dashboard Pipeline
//!
//! Derivation, filtering and aggregation behind the two dashboard charts:
//!
//! - **Region**: raw region reference → governorate label
//! - **Recode**: raw attraction value → canonical label
//! - **Filter**: AND-combined criteria producing borrowed views
//! - **Aggregate**: label proportions and binned distributions
//! - **Chart**: serializable chart specifications
//! - **View**: `(dataset, view state) → dashboard output`
//!
//! # Example
//!
//! ```rust,ignore
//! use tourism_dashboard::dataset::DatasetLoader;
//! use tourism_dashboard::pipeline::{Dashboard, DashboardState, GovernorateSelection};
//!
//! let dataset = DatasetLoader::new().load("Tourism-Lebanon-2023.csv".as_ref())?;
//!
//! let mut state = DashboardState::default();
//! state.distribution.governorate = GovernorateSelection::only("Akkar");
//! state.distribution.min = Some(10.0);
//!
//! let output = Dashboard::new().render(&dataset, &state)?;
//! println!("{}", serde_json::to_string_pretty(&output)?);
//! ```

mod aggregate;
mod chart;
mod error;
mod filter;
mod recode;
mod region;
mod view;

pub use aggregate::{
    distribution, proportions, Bin, Histogram, LabelCount, LabelSeries, DEFAULT_BIN_COUNT,
};
pub use chart::{DistributionChart, Palette, ProportionChart, RangeControl, Series, Slice};
pub use error::{PipelineError, PipelineResult};
pub use filter::{
    Criterion, FilterSet, GovernorateSelection, IndexBounds, IndexRange, ALL_GOVERNORATES,
};
pub use recode::recode_attraction;
pub use region::{normalize_region, GOVERNORATE_SUFFIX};
pub use view::{
    governorate_options, Dashboard, DashboardOutput, DashboardState, DistributionView,
    OptionScope, ProportionView, SelectorOptions,
};
