use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::date::NormalizedDate;
use crate::core::types::{AthleteResults, Metric, RawResult};
use crate::error::{AnalysisError, AnalysisResult};

pub const DEFAULT_SCORE_AXIS_LABEL: &str = "Score";
pub const DEFAULT_AVERAGE_AXIS_LABEL: &str = "Average per Arrow";

/// How an exact zero value is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroValuePolicy {
    /// Zero is indistinguishable from a missing value and becomes a gap.
    #[default]
    TreatAsGap,
    /// Zero is plotted as a real point.
    Preserve,
}

/// One athlete's values keyed by normalized date.
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteSeries {
    pub athlete_id: String,
    pub name: String,
    pub values: BTreeMap<NormalizedDate, Option<f64>>,
    pub dropped_dates: usize,
}

impl AthleteSeries {
    #[must_use]
    pub fn value_at(&self, date: NormalizedDate) -> Option<f64> {
        self.values.get(&date).copied().flatten()
    }
}

/// One athlete's values positionally aligned to the shared label axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub athlete_id: String,
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl AlignedSeries {
    /// Number of plotted (non-gap) points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

/// Shared date axis plus one aligned series per athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedChartData {
    pub labels: Vec<String>,
    pub dates: Vec<NormalizedDate>,
    pub series: Vec<AlignedSeries>,
    pub metric: Metric,
    pub y_axis_label: String,
    /// Gaps are bridged by interpolation instead of breaking the line.
    #[serde(default = "default_span_gaps")]
    pub span_gaps: bool,
}

fn default_span_gaps() -> bool {
    true
}

impl AlignedChartData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn series_for(&self, athlete_id: &str) -> Option<&AlignedSeries> {
        self.series
            .iter()
            .find(|series| series.athlete_id == athlete_id)
    }

    /// Checks that every series and the canonical dates match the label axis.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.dates.len() != self.labels.len() {
            return Err(AnalysisError::InvalidData(format!(
                "chart has {} labels but {} dates",
                self.labels.len(),
                self.dates.len()
            )));
        }
        for series in &self.series {
            if series.values.len() != self.labels.len() {
                return Err(AnalysisError::InvalidData(format!(
                    "series `{}` has {} values for {} labels",
                    series.athlete_id,
                    series.values.len(),
                    self.labels.len()
                )));
            }
        }
        if self.dates.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(AnalysisError::InvalidData(
                "chart dates must be strictly ascending".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Merges per-athlete result lists onto one chronological axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAligner {
    zero_value_policy: ZeroValuePolicy,
    score_axis_label: String,
    average_axis_label: String,
}

impl Default for SeriesAligner {
    fn default() -> Self {
        Self {
            zero_value_policy: ZeroValuePolicy::default(),
            score_axis_label: DEFAULT_SCORE_AXIS_LABEL.to_owned(),
            average_axis_label: DEFAULT_AVERAGE_AXIS_LABEL.to_owned(),
        }
    }
}

impl SeriesAligner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_zero_value_policy(mut self, policy: ZeroValuePolicy) -> Self {
        self.zero_value_policy = policy;
        self
    }

    #[must_use]
    pub fn with_axis_labels(
        mut self,
        score_axis_label: impl Into<String>,
        average_axis_label: impl Into<String>,
    ) -> Self {
        self.score_axis_label = score_axis_label.into();
        self.average_axis_label = average_axis_label.into();
        self
    }

    #[must_use]
    pub fn zero_value_policy(&self) -> ZeroValuePolicy {
        self.zero_value_policy
    }

    #[must_use]
    pub fn axis_label(&self, metric: Metric) -> &str {
        match metric {
            Metric::Score => &self.score_axis_label,
            Metric::AveragePerArrow => &self.average_axis_label,
        }
    }

    /// Builds the shared axis and one gap-filled series per athlete.
    ///
    /// Results whose date cannot be normalized contribute nothing. The
    /// operation never fails and never mutates its input.
    #[must_use]
    pub fn align(&self, sets: &[AthleteResults], metric: Metric) -> AlignedChartData {
        let collected: Vec<AthleteSeries> = sets
            .iter()
            .map(|set| self.collect_series(set, metric))
            .collect();

        let axis: BTreeSet<NormalizedDate> = collected
            .iter()
            .flat_map(|series| series.values.keys().copied())
            .collect();
        let dates: Vec<NormalizedDate> = axis.into_iter().collect();
        let labels = dates.iter().map(|date| date.display_label()).collect();

        let series = collected
            .into_iter()
            .map(|athlete| AlignedSeries {
                values: dates.iter().map(|date| athlete.value_at(*date)).collect(),
                athlete_id: athlete.athlete_id,
                name: athlete.name,
            })
            .collect::<Vec<_>>();

        debug!(
            athletes = sets.len(),
            label_count = dates.len(),
            ?metric,
            "aligned result series"
        );

        AlignedChartData {
            labels,
            dates,
            series,
            metric,
            y_axis_label: self.axis_label(metric).to_owned(),
            span_gaps: true,
        }
    }

    /// Reduces one athlete's results to a date-keyed map (last write wins).
    #[must_use]
    pub fn collect_series(&self, set: &AthleteResults, metric: Metric) -> AthleteSeries {
        let mut values = BTreeMap::new();
        let mut dropped_dates = 0_usize;
        for result in &set.results {
            let Some(date) = result.normalized_date() else {
                dropped_dates += 1;
                continue;
            };
            values.insert(date, self.select_value(result, metric));
        }

        if dropped_dates > 0 {
            warn!(
                athlete_id = %set.athlete_id,
                dropped_dates,
                kept_dates = values.len(),
                "dropped results with unparseable dates"
            );
        }

        AthleteSeries {
            athlete_id: set.athlete_id.clone(),
            name: set.athlete_name.clone(),
            values,
            dropped_dates,
        }
    }

    /// Picks the plotted value of one result, `None` meaning a gap.
    #[must_use]
    pub fn select_value(&self, result: &RawResult, metric: Metric) -> Option<f64> {
        let average = match metric {
            Metric::AveragePerArrow => result
                .average_per_arrow
                .filter(|value| self.keeps_average(*value)),
            Metric::Score => None,
        };
        let value = average.or(result.score)?;
        if value.is_nan() {
            return None;
        }
        if value == 0.0 && self.zero_value_policy == ZeroValuePolicy::TreatAsGap {
            return None;
        }
        Some(value)
    }

    /// A zero average only replaces the score when zeros are preserved.
    fn keeps_average(&self, average: f64) -> bool {
        match self.zero_value_policy {
            ZeroValuePolicy::TreatAsGap => is_truthy(average),
            ZeroValuePolicy::Preserve => !average.is_nan(),
        }
    }
}

fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Aligns with default labels and zero handling.
///
/// `use_average` plots the per-arrow average where a result carries one and
/// falls back to the raw score otherwise.
#[must_use]
pub fn align(sets: &[AthleteResults], use_average: bool) -> AlignedChartData {
    SeriesAligner::default().align(sets, Metric::from_use_average(use_average))
}
