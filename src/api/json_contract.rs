use serde::{Deserialize, Serialize};

use crate::core::{AlignedChartData, RawResult, StatisticsSummary};
use crate::error::{AnalysisError, AnalysisResult};

pub const CHART_DATA_JSON_SCHEMA_V1: u32 = 1;
pub const STATISTICS_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataJsonContractV1 {
    pub schema_version: u32,
    pub chart: AlignedChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsJsonContractV1 {
    pub schema_version: u32,
    pub statistics: StatisticsSummary,
}

/// Parses the results feed payload for one athlete.
///
/// The payload must be a JSON array of result records.
pub fn parse_results_payload(input: &str) -> AnalysisResult<Vec<RawResult>> {
    let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
        AnalysisError::InvalidData(format!("failed to parse results payload: {e}"))
    })?;
    if !value.is_array() {
        return Err(AnalysisError::InvalidData(
            "results payload must be a json array".to_owned(),
        ));
    }
    serde_json::from_value(value).map_err(|e| {
        AnalysisError::InvalidData(format!("failed to decode result records: {e}"))
    })
}

impl AlignedChartData {
    pub fn to_json_contract_v1_pretty(&self) -> AnalysisResult<String> {
        let payload = ChartDataJsonContractV1 {
            schema_version: CHART_DATA_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AnalysisError::InvalidData(format!("failed to serialize chart contract v1: {e}"))
        })
    }

    /// Accepts either a bare chart payload or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> AnalysisResult<Self> {
        let chart = if let Ok(chart) = serde_json::from_str::<AlignedChartData>(input) {
            chart
        } else {
            let payload: ChartDataJsonContractV1 = serde_json::from_str(input).map_err(|e| {
                AnalysisError::InvalidData(format!("failed to parse chart json payload: {e}"))
            })?;
            if payload.schema_version != CHART_DATA_JSON_SCHEMA_V1 {
                return Err(AnalysisError::InvalidData(format!(
                    "unsupported chart schema version: {}",
                    payload.schema_version
                )));
            }
            payload.chart
        };
        chart.validate()?;
        Ok(chart)
    }
}

impl StatisticsSummary {
    pub fn to_json_pretty(&self) -> AnalysisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AnalysisError::InvalidData(format!("failed to serialize statistics json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> AnalysisResult<String> {
        let payload = StatisticsJsonContractV1 {
            schema_version: STATISTICS_JSON_SCHEMA_V1,
            statistics: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AnalysisError::InvalidData(format!("failed to serialize statistics contract v1: {e}"))
        })
    }
}
