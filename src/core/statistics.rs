use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::catalog::CompetitionCatalog;
use crate::core::date::NormalizedDate;
use crate::core::primitives::round_decimal_places;
use crate::core::types::RawResult;
use crate::error::{AnalysisError, AnalysisResult};

pub const DEFAULT_RECENT_WINDOW: usize = 10;
pub const DEFAULT_ESTIMATED_FIELD_SIZE: f64 = 30.0;

/// Tuning for recent-form statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsOptions {
    /// Number of most recent competitions considered for recent form.
    pub recent_window: usize,
    /// Assumed number of participants used to estimate a percentile.
    pub estimated_field_size: f64,
}

impl Default for StatisticsOptions {
    fn default() -> Self {
        Self {
            recent_window: DEFAULT_RECENT_WINDOW,
            estimated_field_size: DEFAULT_ESTIMATED_FIELD_SIZE,
        }
    }
}

impl StatisticsOptions {
    pub fn validate(self) -> AnalysisResult<()> {
        if self.recent_window == 0 {
            return Err(AnalysisError::InvalidConfig(
                "recent window must be > 0".to_owned(),
            ));
        }
        if !self.estimated_field_size.is_finite() || self.estimated_field_size <= 0.0 {
            return Err(AnalysisError::InvalidConfig(
                "estimated field size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalCount {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    pub total: usize,
}

impl MedalCount {
    #[must_use]
    pub fn from_results(results: &[RawResult]) -> Self {
        let mut medals = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.position {
                Some(1) => medals.gold += 1,
                Some(2) => medals.silver += 1,
                Some(3) => medals.bronze += 1,
                _ => {}
            }
        }
        medals
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentForm {
    pub avg_position: Option<f64>,
    pub avg_percentile: Option<f64>,
    pub top_finishes: usize,
    pub competitions_analyzed: usize,
}

impl RecentForm {
    /// Summarizes positions over the most recent competitions.
    ///
    /// Results with an unreadable date are ordered as if held on 2000-01-01.
    #[must_use]
    pub fn from_results(results: &[RawResult], options: StatisticsOptions) -> Self {
        let fallback = NormalizedDate::from_ymd(2000, 1, 1);
        let mut dated: Vec<(Option<NormalizedDate>, &RawResult)> = results
            .iter()
            .map(|result| (result.normalized_date().or(fallback), result))
            .collect();
        dated.sort_by(|a, b| b.0.cmp(&a.0));

        let recent: Vec<&RawResult> = dated
            .into_iter()
            .take(options.recent_window)
            .map(|(_, result)| result)
            .collect();
        let positions: Vec<u32> = recent
            .iter()
            .filter_map(|result| result.position)
            .filter(|position| *position > 0)
            .collect();
        if positions.is_empty() {
            return Self::default();
        }

        let avg_position =
            positions.iter().map(|p| f64::from(*p)).sum::<f64>() / positions.len() as f64;
        let percentile = (avg_position / options.estimated_field_size * 100.0).min(100.0);

        Self {
            avg_position: round_decimal_places(avg_position, 1),
            avg_percentile: round_decimal_places(percentile, 1),
            top_finishes: positions.iter().filter(|position| **position <= 3).count(),
            competitions_analyzed: recent.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBest {
    pub score: f64,
    pub competition: Option<String>,
    pub date: Option<String>,
    pub competition_type: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub count: usize,
    pub best_score: f64,
}

/// Athlete statistics computed from a full result history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_competitions: usize,
    pub medals: MedalCount,
    pub recent_form: RecentForm,
    pub best_scores_by_category: IndexMap<String, CategoryBest>,
    pub category_breakdown: IndexMap<String, CategoryBreakdown>,
    pub best_score: Option<f64>,
    pub best_score_competition: Option<String>,
}

impl StatisticsSummary {
    #[must_use]
    pub fn compute(
        results: &[RawResult],
        catalog: &CompetitionCatalog,
        options: StatisticsOptions,
    ) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let summary = Self {
            total_competitions: results.len(),
            medals: MedalCount::from_results(results),
            recent_form: RecentForm::from_results(results, options),
            best_scores_by_category: best_scores_by_category(results, catalog),
            category_breakdown: category_breakdown(results, catalog),
            best_score: None,
            best_score_competition: None,
        };
        let summary = match overall_best(results) {
            Some(best) => Self {
                best_score: best.score,
                best_score_competition: best.competition_name.clone(),
                ..summary
            },
            None => summary,
        };

        debug!(
            total_competitions = summary.total_competitions,
            categories = summary.category_breakdown.len(),
            "computed athlete statistics"
        );
        summary
    }
}

fn positive_score(result: &RawResult) -> Option<f64> {
    result
        .score
        .filter(|score| *score != 0.0 && !score.is_nan())
}

/// Best non-zero score per catalog category; ties keep the earlier result.
#[must_use]
pub fn best_scores_by_category(
    results: &[RawResult],
    catalog: &CompetitionCatalog,
) -> IndexMap<String, CategoryBest> {
    let mut best: IndexMap<String, CategoryBest> = IndexMap::new();
    for result in results {
        let (Some(competition_type), Some(score)) =
            (result.competition_type.as_deref(), positive_score(result))
        else {
            continue;
        };
        let category = catalog.category_of(competition_type);
        let replace = best
            .get(category)
            .is_none_or(|current| score > current.score);
        if replace {
            best.insert(
                category.to_owned(),
                CategoryBest {
                    score,
                    competition: result.competition_name.clone(),
                    date: result.date.clone(),
                    competition_type: competition_type.to_owned(),
                },
            );
        }
    }
    best
}

/// Result count and best score for every category the catalog knows.
#[must_use]
pub fn category_breakdown(
    results: &[RawResult],
    catalog: &CompetitionCatalog,
) -> IndexMap<String, CategoryBreakdown> {
    catalog
        .categories()
        .into_iter()
        .map(|category| {
            let in_category: Vec<&RawResult> = results
                .iter()
                .filter(|result| catalog.result_in_category(result, &category))
                .collect();
            let best_score = in_category
                .iter()
                .filter_map(|result| result.score)
                .filter(|score| !score.is_nan())
                .map(OrderedFloat)
                .max()
                .map_or(0.0, |score| score.0);
            let breakdown = CategoryBreakdown {
                count: in_category.len(),
                best_score,
            };
            (category, breakdown)
        })
        .collect()
}

/// First result holding the maximum score, missing scores counting as zero.
#[must_use]
pub fn overall_best(results: &[RawResult]) -> Option<&RawResult> {
    let key = |result: &RawResult| OrderedFloat(result.score.filter(|s| !s.is_nan()).unwrap_or(0.0));
    let mut best: Option<&RawResult> = None;
    for result in results {
        if best.is_none_or(|current| key(result) > key(current)) {
            best = Some(result);
        }
    }
    best
}
