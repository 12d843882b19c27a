//! Chart specifications
//!
//! The labeled, colored data handed to the external chart renderer. Nothing
//! here draws anything; a spec is plain serializable data.

use super::aggregate::{Bin, Histogram, LabelCount};
use super::filter::{GovernorateSelection, IndexBounds, IndexRange};
use crate::dataset::AttractionLabel;
use serde::Serialize;

pub const PROPORTION_TITLE: &str = "Potential for Sustainable Tourism";
pub const DISTRIBUTION_TITLE: &str = "Distribution of Tourism Index by Attraction Availability";
pub const DISTRIBUTION_X_LABEL: &str = "Tourism Index";
pub const DISTRIBUTION_Y_LABEL: &str = "Number of Towns";
pub const DISTRIBUTION_LEGEND_TITLE: &str = "Attractions";

/// Fixed color assignment for the two canonical labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub exists: &'static str,
    pub does_not_exist: &'static str,
}

impl Palette {
    /// Colors of the proportion chart
    pub const PROPORTION: Palette = Palette {
        exists: "green",
        does_not_exist: "tomato",
    };

    /// Colors of the distribution chart
    pub const DISTRIBUTION: Palette = Palette {
        exists: "#2ECC71",
        does_not_exist: "#E74C3C",
    };

    pub fn color(&self, label: AttractionLabel) -> &'static str {
        match label {
            AttractionLabel::Exists => self.exists,
            AttractionLabel::DoesNotExist => self.does_not_exist,
        }
    }
}

/// One slice of the proportion chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: AttractionLabel,
    pub count: usize,
    /// Share of all labeled records, in percent
    pub percent: f64,
    pub color: String,
}

/// Proportion (pie) chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionChart {
    pub title: String,
    pub governorate: GovernorateSelection,
    pub slices: Vec<Slice>,
}

impl ProportionChart {
    pub fn new(governorate: GovernorateSelection, counts: &[LabelCount]) -> Self {
        let total: usize = counts.iter().map(|c| c.count).sum();

        let slices = counts
            .iter()
            .map(|c| Slice {
                label: c.label,
                count: c.count,
                percent: c.count as f64 * 100.0 / total as f64,
                color: Palette::PROPORTION.color(c.label).to_string(),
            })
            .collect();

        Self {
            title: PROPORTION_TITLE.to_string(),
            governorate,
            slices,
        }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// State of the tourism index range control
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeControl {
    /// Observed minimum of the current subset
    pub min: f64,
    /// Observed maximum of the current subset
    pub max: f64,
    /// Selected lower bound
    pub lo: f64,
    /// Selected upper bound
    pub hi: f64,
}

impl RangeControl {
    pub fn new(bounds: IndexBounds, selected: IndexRange) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
            lo: selected.lo(),
            hi: selected.hi(),
        }
    }

    /// The control collapses to a single point
    pub fn is_single_point(&self) -> bool {
        self.min == self.max
    }
}

/// One grouped series of the histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: AttractionLabel,
    pub color: String,
    pub counts: Vec<usize>,
}

/// Grouped histogram chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub governorate: GovernorateSelection,
    pub bins: Vec<Bin>,
    pub series: Vec<Series>,
    /// Absent when the current subset holds no indexed, labeled record
    pub range: Option<RangeControl>,
    pub summary: Option<String>,
    pub caption: Option<String>,
}

impl DistributionChart {
    pub fn new(
        governorate: GovernorateSelection,
        histogram: Histogram,
        range: Option<RangeControl>,
    ) -> Self {
        let series = histogram
            .series
            .into_iter()
            .map(|s| Series {
                label: s.label,
                color: Palette::DISTRIBUTION.color(s.label).to_string(),
                counts: s.counts,
            })
            .collect();

        let summary = range
            .map(|r| format!("Tourism Index range selected: {} to {}", r.lo, r.hi));
        let caption = range.map(|r| {
            format!(
                "This selected range highlights variation in touristic infrastructure among towns in '{}', \
                 with Tourism Index scores between {} and {}.",
                governorate, r.lo, r.hi
            )
        });

        Self {
            title: DISTRIBUTION_TITLE.to_string(),
            x_label: DISTRIBUTION_X_LABEL.to_string(),
            y_label: DISTRIBUTION_Y_LABEL.to_string(),
            legend_title: DISTRIBUTION_LEGEND_TITLE.to_string(),
            governorate,
            bins: histogram.bins,
            series,
            range,
            summary,
            caption,
        }
    }

    pub fn total(&self) -> usize {
        self.series.iter().flat_map(|s| s.counts.iter()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::aggregate::LabelSeries;

    #[test]
    fn test_proportion_chart_percentages() {
        let counts = [
            LabelCount {
                label: AttractionLabel::Exists,
                count: 3,
            },
            LabelCount {
                label: AttractionLabel::DoesNotExist,
                count: 1,
            },
        ];

        let chart = ProportionChart::new(GovernorateSelection::All, &counts);
        assert_eq!(chart.title, PROPORTION_TITLE);
        assert_eq!(chart.total(), 4);
        assert_eq!(chart.slices[0].percent, 75.0);
        assert_eq!(chart.slices[0].color, "green");
        assert_eq!(chart.slices[1].percent, 25.0);
        assert_eq!(chart.slices[1].color, "tomato");
    }

    #[test]
    fn test_empty_proportion_chart() {
        let chart = ProportionChart::new(GovernorateSelection::only("North"), &[]);
        assert!(chart.is_empty());
        assert_eq!(chart.total(), 0);
    }

    #[test]
    fn test_distribution_chart_colors_and_summary() {
        let histogram = Histogram {
            bins: vec![Bin {
                lower: 1.0,
                upper: 2.0,
            }],
            series: vec![
                LabelSeries {
                    label: AttractionLabel::Exists,
                    counts: vec![2],
                },
                LabelSeries {
                    label: AttractionLabel::DoesNotExist,
                    counts: vec![1],
                },
            ],
        };
        let bounds = IndexBounds { min: 1.0, max: 2.0 };
        let range = RangeControl::new(bounds, bounds.full_range());

        let chart = DistributionChart::new(GovernorateSelection::only("Beirut"), histogram, Some(range));

        assert_eq!(chart.series[0].color, "#2ECC71");
        assert_eq!(chart.series[1].color, "#E74C3C");
        assert_eq!(chart.total(), 3);
        assert_eq!(
            chart.summary.as_deref(),
            Some("Tourism Index range selected: 1 to 2")
        );
        assert!(chart.caption.unwrap().contains("towns in 'Beirut'"));
    }

    #[test]
    fn test_empty_distribution_chart() {
        let chart = DistributionChart::new(GovernorateSelection::All, Histogram::default(), None);
        assert!(chart.is_empty());
        assert!(chart.range.is_none());
        assert!(chart.summary.is_none());
    }

    #[test]
    fn test_chart_serializes_labels() {
        let counts = [LabelCount {
            label: AttractionLabel::DoesNotExist,
            count: 1,
        }];
        let chart = ProportionChart::new(GovernorateSelection::All, &counts);

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["slices"][0]["label"], "Does Not Exist");
        assert_eq!(json["governorate"], "All");
    }
}
