mod config;
mod json_contract;
mod listener_registry;
mod session;
mod source;

pub use config::AnalysisConfig;
pub use json_contract::{
    CHART_DATA_JSON_SCHEMA_V1, ChartDataJsonContractV1, STATISTICS_JSON_SCHEMA_V1,
    StatisticsJsonContractV1, parse_results_payload,
};
pub use session::{AnalysisSession, AnalysisTicket, ViewState};
pub use source::{AthleteRef, ResultSource, fetch_all};
