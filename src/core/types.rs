use serde::{Deserialize, Serialize};

use crate::core::date::{NormalizedDate, normalize_optional_date};

/// One athlete result as delivered by the results feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_per_arrow: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_count: Option<u32>,
}

impl RawResult {
    #[must_use]
    pub fn new(date: impl Into<String>, score: f64) -> Self {
        Self {
            date: Some(date.into()),
            score: Some(score),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_average_per_arrow(mut self, average: f64) -> Self {
        self.average_per_arrow = Some(average);
        self
    }

    #[must_use]
    pub fn with_competition(
        mut self,
        name: impl Into<String>,
        competition_type: impl Into<String>,
    ) -> Self {
        self.competition_name = Some(name.into());
        self.competition_type = Some(competition_type.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn normalized_date(&self) -> Option<NormalizedDate> {
        normalize_optional_date(self.date.as_deref())
    }
}

/// Result list of one selected athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteResults {
    pub athlete_id: String,
    pub athlete_name: String,
    pub results: Vec<RawResult>,
}

impl AthleteResults {
    #[must_use]
    pub fn new(
        athlete_id: impl Into<String>,
        athlete_name: impl Into<String>,
        results: Vec<RawResult>,
    ) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            athlete_name: athlete_name.into(),
            results,
        }
    }
}

/// Plotted quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Score,
    AveragePerArrow,
}

impl Metric {
    #[must_use]
    pub fn from_use_average(use_average: bool) -> Self {
        if use_average {
            Self::AveragePerArrow
        } else {
            Self::Score
        }
    }
}
