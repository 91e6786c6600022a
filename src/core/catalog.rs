use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::rounded_ratio;
use crate::core::types::RawResult;
use crate::error::{AnalysisError, AnalysisResult};

pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Static facts about one competition format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionInfo {
    pub competition_type: String,
    pub category: String,
    #[serde(default)]
    pub arrow_count: Option<u32>,
    #[serde(default)]
    pub max_score: Option<u32>,
}

impl CompetitionInfo {
    #[must_use]
    pub fn new(competition_type: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            competition_type: competition_type.into(),
            category: category.into(),
            arrow_count: None,
            max_score: None,
        }
    }

    #[must_use]
    pub fn with_arrow_count(mut self, arrow_count: u32) -> Self {
        self.arrow_count = Some(arrow_count);
        self
    }

    #[must_use]
    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = Some(max_score);
        self
    }
}

/// Lookup table from competition type to category and arrow count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitionCatalog {
    entries: IndexMap<String, CompetitionInfo>,
}

impl CompetitionCatalog {
    /// Builds a catalog; the first entry wins for a repeated competition type.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = CompetitionInfo>) -> Self {
        let mut map = IndexMap::new();
        for entry in entries {
            map.entry(entry.competition_type.clone()).or_insert(entry);
        }
        Self { entries: map }
    }

    /// Parses a JSON array of [`CompetitionInfo`] entries.
    pub fn from_json_str(input: &str) -> AnalysisResult<Self> {
        let entries: Vec<CompetitionInfo> = serde_json::from_str(input).map_err(|e| {
            AnalysisError::InvalidData(format!("failed to parse competition catalog: {e}"))
        })?;
        let catalog = Self::from_entries(entries);
        debug!(entries = catalog.len(), "loaded competition catalog");
        Ok(catalog)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, competition_type: &str) -> Option<&CompetitionInfo> {
        self.entries.get(competition_type)
    }

    #[must_use]
    pub fn category_of(&self, competition_type: &str) -> &str {
        self.get(competition_type)
            .map_or(UNKNOWN_CATEGORY, |info| info.category.as_str())
    }

    #[must_use]
    pub fn arrow_count(&self, competition_type: &str) -> Option<u32> {
        self.get(competition_type).and_then(|info| info.arrow_count)
    }

    /// Distinct categories in ascending order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.entries
            .values()
            .map(|info| info.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn types_in_category(&self, category: &str) -> Vec<String> {
        let mut types: Vec<String> = self
            .entries
            .values()
            .filter(|info| info.category == category)
            .map(|info| info.competition_type.clone())
            .collect();
        types.sort();
        types
    }

    /// Score per arrow rounded to two decimals.
    #[must_use]
    pub fn average_per_arrow(&self, score: f64, competition_type: &str) -> Option<f64> {
        let arrow_count = self.arrow_count(competition_type)?;
        rounded_ratio(score, arrow_count, 2)
    }

    /// Copies `results`, filling `average_per_arrow` and `arrow_count` where
    /// the score is non-zero and the competition type is known.
    #[must_use]
    pub fn with_averages(&self, results: &[RawResult]) -> Vec<RawResult> {
        results
            .iter()
            .map(|result| {
                let mut enriched = result.clone();
                let score = result.score.filter(|score| *score != 0.0 && !score.is_nan());
                if let (Some(score), Some(competition_type)) =
                    (score, result.competition_type.as_deref())
                {
                    enriched.average_per_arrow = self.average_per_arrow(score, competition_type);
                    enriched.arrow_count = self.arrow_count(competition_type);
                }
                enriched
            })
            .collect()
    }

    #[must_use]
    pub fn filter_by_category(&self, results: &[RawResult], category: &str) -> Vec<RawResult> {
        results
            .iter()
            .filter(|result| self.result_in_category(result, category))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn result_in_category(&self, result: &RawResult, category: &str) -> bool {
        result
            .competition_type
            .as_deref()
            .is_some_and(|competition_type| self.category_of(competition_type) == category)
    }
}
