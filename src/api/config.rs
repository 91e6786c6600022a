use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_AVERAGE_AXIS_LABEL, DEFAULT_SCORE_AXIS_LABEL, SeriesAligner, StatisticsOptions, Theme,
    ZeroValuePolicy,
};
use crate::error::{AnalysisError, AnalysisResult};

/// Public analysis configuration.
///
/// Serializable so dashboards can persist and reload their setup; missing
/// fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub zero_value_policy: ZeroValuePolicy,
    #[serde(default = "default_score_axis_label")]
    pub score_axis_label: String,
    #[serde(default = "default_average_axis_label")]
    pub average_axis_label: String,
    #[serde(default)]
    pub statistics: StatisticsOptions,
    #[serde(default)]
    pub initial_theme: Theme,
    /// Fill `average_per_arrow` from the competition catalog when the feed
    /// does not supply it.
    #[serde(default = "default_compute_missing_averages")]
    pub compute_missing_averages: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            zero_value_policy: ZeroValuePolicy::default(),
            score_axis_label: default_score_axis_label(),
            average_axis_label: default_average_axis_label(),
            statistics: StatisticsOptions::default(),
            initial_theme: Theme::default(),
            compute_missing_averages: default_compute_missing_averages(),
        }
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
    pub fn with_statistics(mut self, statistics: StatisticsOptions) -> Self {
        self.statistics = statistics;
        self
    }

    #[must_use]
    pub fn with_initial_theme(mut self, theme: Theme) -> Self {
        self.initial_theme = theme;
        self
    }

    #[must_use]
    pub fn with_compute_missing_averages(mut self, enabled: bool) -> Self {
        self.compute_missing_averages = enabled;
        self
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.score_axis_label.trim().is_empty() || self.average_axis_label.trim().is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "axis labels must not be empty".to_owned(),
            ));
        }
        self.statistics.validate()
    }

    /// Aligner configured with this config's labels and zero handling.
    #[must_use]
    pub fn aligner(&self) -> SeriesAligner {
        SeriesAligner::new()
            .with_zero_value_policy(self.zero_value_policy)
            .with_axis_labels(
                self.score_axis_label.clone(),
                self.average_axis_label.clone(),
            )
    }

    pub fn from_json_str(input: &str) -> AnalysisResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AnalysisError::InvalidConfig(format!("failed to parse analysis config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> AnalysisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AnalysisError::InvalidConfig(format!("failed to serialize analysis config: {e}"))
        })
    }
}

fn default_score_axis_label() -> String {
    DEFAULT_SCORE_AXIS_LABEL.to_owned()
}

fn default_average_axis_label() -> String {
    DEFAULT_AVERAGE_AXIS_LABEL.to_owned()
}

fn default_compute_missing_averages() -> bool {
    true
}
