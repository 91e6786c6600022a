use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no athletes selected for analysis")]
    NoAthletesSelected,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to fetch results for athlete `{athlete_id}`: {reason}")]
    Fetch { athlete_id: String, reason: String },
}
