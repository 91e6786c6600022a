use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::catalog::CompetitionCatalog;
use crate::core::date::NormalizedDate;
use crate::core::types::RawResult;
use crate::error::{AnalysisError, AnalysisResult};

/// Filter parameters chosen in the analysis form.
///
/// Every field is optional; present fields must all match. The date window is
/// inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultQuery {
    #[serde(default)]
    pub competition_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub start_date: Option<NormalizedDate>,
    #[serde(default)]
    pub end_date: Option<NormalizedDate>,
}

impl ResultQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_competition_type(mut self, competition_type: impl Into<String>) -> Self {
        self.competition_type = Some(competition_type.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_date_window(
        mut self,
        start_date: Option<NormalizedDate>,
        end_date: Option<NormalizedDate>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.competition_type.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AnalysisError::InvalidData(format!(
                    "query start date {start} is after end date {end}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn matches(&self, result: &RawResult, catalog: &CompetitionCatalog) -> bool {
        if let Some(expected) = self.competition_type.as_deref() {
            if result.competition_type.as_deref() != Some(expected) {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            if !catalog.result_in_category(result, category) {
                return false;
            }
        }
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }
        let Some(date) = result.normalized_date() else {
            return false;
        };
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }

    /// Keeps the results matching every present criterion.
    #[must_use]
    pub fn apply(&self, results: &[RawResult], catalog: &CompetitionCatalog) -> Vec<RawResult> {
        if self.is_unfiltered() {
            return results.to_vec();
        }
        let kept: Vec<RawResult> = results
            .iter()
            .filter(|result| self.matches(result, catalog))
            .cloned()
            .collect();
        trace!(
            original_count = results.len(),
            kept_count = kept.len(),
            "applied result query"
        );
        kept
    }
}
