//! Dashboard rendering
//!
//! Each interaction renders from scratch: the caller passes the dataset and
//! the complete view state, and gets back both chart specs and the selector
//! options. No state is kept between renders.
//!
//! ```text
//! (Dataset, DashboardState) → filter → bounds → filter → aggregate → charts
//! ```

use super::aggregate::{distribution, proportions, DEFAULT_BIN_COUNT};
use super::chart::{DistributionChart, ProportionChart, RangeControl};
use super::error::{PipelineError, PipelineResult};
use super::filter::{FilterSet, GovernorateSelection, IndexBounds, IndexRange, ALL_GOVERNORATES};
use crate::dataset::{Dataset, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// View state of the proportion chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProportionView {
    #[serde(default)]
    pub governorate: GovernorateSelection,
}

/// View state of the distribution chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionView {
    #[serde(default)]
    pub governorate: GovernorateSelection,
    /// Requested lower bound; defaults to the observed minimum
    #[serde(default)]
    pub min: Option<f64>,
    /// Requested upper bound; defaults to the observed maximum
    #[serde(default)]
    pub max: Option<f64>,
}

/// Complete view state. Each chart has its own governorate selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default)]
    pub proportion: ProportionView,
    #[serde(default)]
    pub distribution: DistributionView,
}

/// Which records feed a governorate selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionScope {
    /// Every record
    #[default]
    All,
    /// Governorate-level records only
    GovernorateLevel,
}

/// Options of both governorate selectors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOptions {
    pub proportion: Vec<String>,
    pub distribution: Vec<String>,
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOutput {
    pub proportion: ProportionChart,
    pub distribution: DistributionChart,
    pub options: SelectorOptions,
}

/// Renders dashboard output from a dataset and a view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    bin_count: usize,
    governorate_level_only: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            governorate_level_only: true,
        }
    }

    /// Set the number of histogram bins
    pub fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.bin_count = bin_count;
        self
    }

    /// Restrict the proportion chart to governorate-level records
    pub fn with_governorate_level_only(mut self, enabled: bool) -> Self {
        self.governorate_level_only = enabled;
        self
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    fn proportion_scope(&self) -> OptionScope {
        if self.governorate_level_only {
            OptionScope::GovernorateLevel
        } else {
            OptionScope::All
        }
    }

    /// Render both charts and both selectors
    pub fn render(&self, dataset: &Dataset, state: &DashboardState) -> PipelineResult<DashboardOutput> {
        let distribution = self.distribution_chart(dataset, &state.distribution)?;
        let proportion = self.proportion_chart(dataset, &state.proportion);

        let options = SelectorOptions {
            proportion: governorate_options(dataset, self.proportion_scope()),
            distribution: governorate_options(dataset, OptionScope::All),
        };

        Ok(DashboardOutput {
            proportion,
            distribution,
            options,
        })
    }

    /// Proportion chart for one governorate selection
    pub fn proportion_chart(&self, dataset: &Dataset, view: &ProportionView) -> ProportionChart {
        let mut filter = FilterSet::new();
        if self.governorate_level_only {
            filter = filter.governorate_level();
        }
        let subset = filter
            .governorate(view.governorate.clone())
            .apply(dataset.records());

        let counts = proportions(&subset);
        tracing::debug!(
            governorate = %view.governorate,
            records = subset.len(),
            slices = counts.len(),
            "Rendered proportion chart"
        );

        ProportionChart::new(view.governorate.clone(), &counts)
    }

    /// Distribution chart for one governorate selection and index range.
    ///
    /// Range bounds are observed on the governorate subset, so they move with
    /// the selected governorate. A requested range is clamped into them.
    pub fn distribution_chart(
        &self,
        dataset: &Dataset,
        view: &DistributionView,
    ) -> PipelineResult<DistributionChart> {
        let requested = match (view.min, view.max) {
            (Some(lo), Some(hi)) => Some(IndexRange::new(lo, hi)?),
            (Some(v), None) | (None, Some(v)) if !v.is_finite() => {
                return Err(PipelineError::InvalidRange { lo: v, hi: v });
            }
            _ => None,
        };

        let subset = FilterSet::new()
            .governorate(view.governorate.clone())
            .require_index()
            .require_label()
            .apply(dataset.records());

        let Some(bounds) = IndexBounds::observe(&subset) else {
            tracing::debug!(governorate = %view.governorate, "Distribution subset is empty");
            return Ok(DistributionChart::new(
                view.governorate.clone(),
                Default::default(),
                None,
            ));
        };

        let selected = match requested {
            Some(range) => bounds.clamp(range),
            None => {
                let lo = view.min.unwrap_or(bounds.min).clamp(bounds.min, bounds.max);
                let hi = view.max.unwrap_or(bounds.max).clamp(bounds.min, bounds.max);
                IndexRange::new(lo, hi)?
            }
        };

        let in_range = FilterSet::new().index_range(selected).apply(subset);
        let histogram = distribution(&in_range, self.bin_count)?;

        tracing::debug!(
            governorate = %view.governorate,
            lo = selected.lo(),
            hi = selected.hi(),
            records = in_range.len(),
            bins = histogram.bins.len(),
            "Rendered distribution chart"
        );

        Ok(DistributionChart::new(
            view.governorate.clone(),
            histogram,
            Some(RangeControl::new(bounds, selected)),
        ))
    }

    /// Range control for a governorate without rendering the chart
    pub fn range_control(&self, dataset: &Dataset, governorate: &GovernorateSelection) -> Option<RangeControl> {
        let subset = FilterSet::new()
            .governorate(governorate.clone())
            .require_index()
            .require_label()
            .apply(dataset.records());

        IndexBounds::observe(&subset).map(|b| RangeControl::new(b, b.full_range()))
    }
}

/// `All` followed by the sorted distinct governorates in scope
pub fn governorate_options(dataset: &Dataset, scope: OptionScope) -> Vec<String> {
    let in_scope = |r: &&Record| match scope {
        OptionScope::All => true,
        OptionScope::GovernorateLevel => r.is_governorate_level(),
    };

    let names: BTreeSet<&str> = dataset
        .records()
        .iter()
        .filter(in_scope)
        .filter_map(|r| r.governorate.as_deref())
        .collect();

    std::iter::once(ALL_GOVERNORATES)
        .chain(names)
        .map(str::to_string)
        .collect()
}
