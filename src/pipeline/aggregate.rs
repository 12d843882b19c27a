//! Aggregator
//!
//! Proportion and distribution aggregates over a filtered view.
//!
//! # Binning
//!
//! The distribution aggregate splits the observed `[min, max]` span into
//! equal-width bins. Bin `i` covers `(edge_i, edge_i+1]`, except the first
//! bin which also includes `min`. A value sitting exactly on a shared edge is
//! therefore counted in the lower bin. When `min == max` there is a single
//! bin `[min, min]` holding every value.

use super::error::{PipelineError, PipelineResult};
use crate::dataset::{AttractionLabel, Record};
use serde::Serialize;
use std::collections::HashMap;

/// Default number of histogram bins
pub const DEFAULT_BIN_COUNT: usize = 20;

/// Count of records carrying one label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: AttractionLabel,
    pub count: usize,
}

/// Count records per attraction label.
///
/// Unlabeled records are skipped. Results are ordered by count descending,
/// ties broken by canonical label order. An empty view yields an empty list.
pub fn proportions(records: &[&Record]) -> Vec<LabelCount> {
    let mut counts: HashMap<AttractionLabel, usize> = HashMap::new();

    for label in records.iter().filter_map(|r| r.attraction) {
        *counts.entry(label).or_default() += 1;
    }

    let mut result: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();

    result.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
    result
}

/// One histogram bin covering `(lower, upper]`; the first bin also holds `lower`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
}

/// Per-label counts across the bins of a histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSeries {
    pub label: AttractionLabel,
    pub counts: Vec<usize>,
}

impl LabelSeries {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Grouped frequency table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    /// One series per label present in the view, in canonical order
    pub series: Vec<LabelSeries>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total number of counted records
    pub fn total(&self) -> usize {
        self.series.iter().map(LabelSeries::total).sum()
    }

    pub fn series_for(&self, label: AttractionLabel) -> Option<&LabelSeries> {
        self.series.iter().find(|s| s.label == label)
    }
}

/// Bin the tourism index of labeled records, grouped by label.
///
/// Records missing either the index or the label are not counted.
pub fn distribution(records: &[&Record], bin_count: usize) -> PipelineResult<Histogram> {
    if bin_count == 0 {
        return Err(PipelineError::ZeroBins);
    }

    let points: Vec<(f64, AttractionLabel)> = records
        .iter()
        .filter_map(|r| Some((r.tourism_index?, r.attraction?)))
        .collect();

    let Some(&(first, _)) = points.first() else {
        return Ok(Histogram::default());
    };

    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), &(v, _)| (min.min(v), max.max(v)));

    let edges = bin_edges(min, max, bin_count);
    let bins: Vec<Bin> = edges
        .windows(2)
        .map(|w| Bin {
            lower: w[0],
            upper: w[1],
        })
        .collect();

    let mut counts: HashMap<AttractionLabel, Vec<usize>> = HashMap::new();
    for (value, label) in points {
        let idx = bin_index(&edges, value);
        counts.entry(label).or_insert_with(|| vec![0; bins.len()])[idx] += 1;
    }

    let series = AttractionLabel::ALL
        .iter()
        .filter_map(|label| {
            counts.remove(label).map(|counts| LabelSeries {
                label: *label,
                counts,
            })
        })
        .collect();

    Ok(Histogram { bins, series })
}

/// Bin edges spanning `[min, max]`; a degenerate span yields a single bin
fn bin_edges(min: f64, max: f64, bin_count: usize) -> Vec<f64> {
    if min == max {
        return vec![min, max];
    }

    let width = (max - min) / bin_count as f64;
    let mut edges: Vec<f64> = (0..bin_count).map(|i| min + width * i as f64).collect();
    edges.push(max);
    edges
}

/// Index of the bin holding `value`; shared edges resolve to the lower bin
fn bin_index(edges: &[f64], value: f64) -> usize {
    let last = edges.len() - 2;
    edges[1..].partition_point(|&upper| upper < value).min(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawAttraction;
    use crate::pipeline::{FilterSet, IndexRange};

    fn labeled(index: Option<f64>, exists: Option<bool>) -> Record {
        let raw = match exists {
            Some(b) => RawAttraction::Bool(b),
            None => RawAttraction::Missing,
        };
        Record::new(0, Some("x/Beirut_Governorate".into()), raw, index)
    }

    fn five_records() -> Vec<Record> {
        vec![
            labeled(Some(10.0), Some(true)),
            labeled(Some(20.0), Some(true)),
            labeled(Some(30.0), Some(false)),
            labeled(Some(40.0), Some(true)),
            labeled(Some(50.0), Some(false)),
        ]
    }

    #[test]
    fn test_proportions_after_range_filter() {
        let records = five_records();
        let view = FilterSet::new()
            .index_range(IndexRange::new(10.0, 30.0).unwrap())
            .apply(&records);

        let counts = proportions(&view);
        assert_eq!(
            counts,
            vec![
                LabelCount {
                    label: AttractionLabel::Exists,
                    count: 2,
                },
                LabelCount {
                    label: AttractionLabel::DoesNotExist,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_proportions_empty() {
        assert!(proportions(&[]).is_empty());
    }

    #[test]
    fn test_proportions_skip_unlabeled() {
        let records = vec![
            labeled(Some(1.0), None),
            labeled(Some(2.0), Some(false)),
            labeled(None, Some(false)),
        ];
        let view: Vec<&Record> = records.iter().collect();

        let counts = proportions(&view);
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 2);
        assert_eq!(counts[0].label, AttractionLabel::DoesNotExist);
    }

    #[test]
    fn test_proportions_tie_uses_canonical_order() {
        let records = vec![labeled(None, Some(false)), labeled(None, Some(true))];
        let view: Vec<&Record> = records.iter().collect();

        let counts = proportions(&view);
        assert_eq!(counts[0].label, AttractionLabel::Exists);
        assert_eq!(counts[1].label, AttractionLabel::DoesNotExist);
    }

    #[test]
    fn test_distribution_counts_sum() {
        let mut records = five_records();
        records.push(labeled(None, Some(true)));
        records.push(labeled(Some(25.0), None));
        let view: Vec<&Record> = records.iter().collect();

        let hist = distribution(&view, DEFAULT_BIN_COUNT).unwrap();
        assert_eq!(hist.bins.len(), DEFAULT_BIN_COUNT);
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.series_for(AttractionLabel::Exists).unwrap().total(), 3);
        assert_eq!(hist.series_for(AttractionLabel::DoesNotExist).unwrap().total(), 2);
        assert_eq!(hist.bins.first().unwrap().lower, 10.0);
        assert_eq!(hist.bins.last().unwrap().upper, 50.0);
    }

    #[test]
    fn test_shared_edge_goes_to_lower_bin() {
        // Span 0..40 in 4 bins: edges 0, 10, 20, 30, 40
        let records = vec![
            labeled(Some(0.0), Some(true)),
            labeled(Some(10.0), Some(true)),
            labeled(Some(20.0), Some(true)),
            labeled(Some(40.0), Some(true)),
        ];
        let view: Vec<&Record> = records.iter().collect();

        let hist = distribution(&view, 4).unwrap();
        let counts = &hist.series_for(AttractionLabel::Exists).unwrap().counts;
        assert_eq!(counts, &vec![2, 1, 0, 1]);
    }

    #[test]
    fn test_degenerate_span_single_bin() {
        let records = vec![labeled(Some(7.0), Some(true)), labeled(Some(7.0), Some(false))];
        let view: Vec<&Record> = records.iter().collect();

        let hist = distribution(&view, DEFAULT_BIN_COUNT).unwrap();
        assert_eq!(
            hist.bins,
            vec![Bin {
                lower: 7.0,
                upper: 7.0,
            }]
        );
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_distribution_empty() {
        let hist = distribution(&[], DEFAULT_BIN_COUNT).unwrap();
        assert!(hist.is_empty());
        assert!(hist.series.is_empty());
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_zero_bins_rejected() {
        let records = five_records();
        let view: Vec<&Record> = records.iter().collect();
        assert_eq!(distribution(&view, 0), Err(PipelineError::ZeroBins));
    }

    #[test]
    fn test_series_only_for_present_labels() {
        let records = vec![labeled(Some(1.0), Some(false)), labeled(Some(3.0), Some(false))];
        let view: Vec<&Record> = records.iter().collect();

        let hist = distribution(&view, 2).unwrap();
        assert_eq!(hist.series.len(), 1);
        assert_eq!(hist.series[0].label, AttractionLabel::DoesNotExist);
        assert_eq!(hist.series[0].counts, vec![1, 1]);
    }
}
