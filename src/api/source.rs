use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AthleteResults, RawResult, ResultQuery};
use crate::error::AnalysisResult;

/// Athlete picked in the analysis form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteRef {
    pub id: String,
    pub name: String,
}

impl AthleteRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Host-provided access to the results feed.
///
/// Fetches for different athletes are independent and may run concurrently.
pub trait ResultSource: Sync {
    fn fetch_results(
        &self,
        athlete_id: &str,
        query: &ResultQuery,
    ) -> AnalysisResult<Vec<RawResult>>;
}

/// Fetches every athlete and waits for all of them; output order follows
/// `athletes`. The first failure aborts the whole batch.
pub fn fetch_all<S: ResultSource + ?Sized>(
    source: &S,
    athletes: &[AthleteRef],
    query: &ResultQuery,
) -> AnalysisResult<Vec<AthleteResults>> {
    let fetch_one = |athlete: &AthleteRef| -> AnalysisResult<AthleteResults> {
        let results = source.fetch_results(&athlete.id, query).inspect_err(|err| {
            warn!(athlete_id = %athlete.id, error = %err, "result fetch failed");
        })?;
        debug!(
            athlete_id = %athlete.id,
            result_count = results.len(),
            "fetched athlete results"
        );
        Ok(AthleteResults::new(
            athlete.id.clone(),
            athlete.name.clone(),
            results,
        ))
    };

    #[cfg(feature = "parallel-fetch")]
    {
        use rayon::prelude::*;
        athletes.par_iter().map(fetch_one).collect()
    }

    #[cfg(not(feature = "parallel-fetch"))]
    {
        athletes.iter().map(fetch_one).collect()
    }
}
