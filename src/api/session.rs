use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AlignedChartData, AthleteResults, CompetitionCatalog, Metric, RawResult, ResultQuery,
    SeriesAligner, SeriesStyle, StatisticsSummary, Theme, ThemeColors, series_styles,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::extensions::{AnalysisEvent, AnalysisListener};

use super::source::{AthleteRef, ResultSource, fetch_all};
use super::AnalysisConfig;

/// Explicit view state owned by the host for one analysis screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub selected: Vec<AthleteRef>,
    pub query: ResultQuery,
    pub metric: Metric,
    pub theme: Theme,
    pub chart: Option<AlignedChartData>,
    pub styles: Vec<SeriesStyle>,
    pub generation: u64,
}

impl ViewState {
    fn new(theme: Theme) -> Self {
        Self {
            selected: Vec::new(),
            query: ResultQuery::default(),
            metric: Metric::Score,
            theme,
            chart: None,
            styles: Vec::new(),
            generation: 0,
        }
    }
}

/// Parameters captured when an analysis request starts.
///
/// Only the ticket of the most recent request is accepted on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub athletes: Vec<AthleteRef>,
    pub query: ResultQuery,
    pub metric: Metric,
}

/// Analysis screen state: athlete selection, filters, metric toggle, theme and
/// the latest aligned chart.
pub struct AnalysisSession {
    pub(super) config: AnalysisConfig,
    pub(super) catalog: CompetitionCatalog,
    pub(super) aligner: SeriesAligner,
    pub(super) state: ViewState,
    pub(super) listeners: Vec<Box<dyn AnalysisListener>>,
}

impl AnalysisSession {
    pub fn new(config: AnalysisConfig, catalog: CompetitionCatalog) -> AnalysisResult<Self> {
        config.validate()?;
        let aligner = config.aligner();
        let state = ViewState::new(config.initial_theme);
        Ok(Self {
            config,
            catalog,
            aligner,
            state,
            listeners: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CompetitionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn selected(&self) -> &[AthleteRef] {
        &self.state.selected
    }

    #[must_use]
    pub fn chart(&self) -> Option<&AlignedChartData> {
        self.state.chart.as_ref()
    }

    #[must_use]
    pub fn styles(&self) -> &[SeriesStyle] {
        &self.state.styles
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    #[must_use]
    pub fn theme_colors(&self) -> ThemeColors {
        ThemeColors::for_theme(self.state.theme)
    }

    /// Adds an athlete to the comparison. Returns `false` when already selected.
    pub fn select_athlete(&mut self, athlete: AthleteRef) -> AnalysisResult<bool> {
        if athlete.id.trim().is_empty() {
            return Err(AnalysisError::InvalidData(
                "athlete id must not be empty".to_owned(),
            ));
        }
        if self.state.selected.iter().any(|entry| entry.id == athlete.id) {
            return Ok(false);
        }
        self.state.selected.push(athlete);
        self.after_selection_changed();
        Ok(true)
    }

    /// Removes the athlete at `index`, returning it when present.
    pub fn remove_athlete(&mut self, index: usize) -> Option<AthleteRef> {
        if index >= self.state.selected.len() {
            return None;
        }
        let removed = self.state.selected.remove(index);
        self.after_selection_changed();
        Some(removed)
    }

    pub fn clear_selection(&mut self) {
        if self.state.selected.is_empty() {
            return;
        }
        self.state.selected.clear();
        self.after_selection_changed();
    }

    pub fn set_query(&mut self, query: ResultQuery) -> AnalysisResult<()> {
        query.validate()?;
        if query == self.state.query {
            return Ok(());
        }
        self.state.query = query;
        self.invalidate_chart();
        self.emit_event(AnalysisEvent::QueryChanged);
        Ok(())
    }

    pub fn set_use_average(&mut self, use_average: bool) {
        let metric = Metric::from_use_average(use_average);
        if metric == self.state.metric {
            return;
        }
        self.state.metric = metric;
        self.invalidate_chart();
        self.emit_event(AnalysisEvent::MetricChanged { metric });
    }

    /// Switches theme and restyles the current chart without realigning it.
    /// Returns `true` when the theme actually changed.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.state.theme {
            return false;
        }
        self.state.theme = theme;
        self.state.styles = self
            .state
            .chart
            .as_ref()
            .map(|chart| series_styles(chart, theme))
            .unwrap_or_default();
        debug!(?theme, styled_series = self.state.styles.len(), "theme changed");
        self.emit_event(AnalysisEvent::ThemeChanged { theme });
        true
    }

    /// Starts an analysis request, superseding any request still in flight.
    pub fn begin_analysis(&mut self) -> AnalysisResult<AnalysisTicket> {
        if self.state.selected.is_empty() {
            return Err(AnalysisError::NoAthletesSelected);
        }
        self.state.generation += 1;
        trace!(generation = self.state.generation, "analysis request started");
        Ok(AnalysisTicket {
            generation: self.state.generation,
            athletes: self.state.selected.clone(),
            query: self.state.query.clone(),
            metric: self.state.metric,
        })
    }

    /// Aligns fetched results for `ticket` and stores the chart.
    ///
    /// Returns `Ok(false)` and keeps the current chart when a newer request
    /// was started after `ticket`.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        sets: Vec<AthleteResults>,
    ) -> AnalysisResult<bool> {
        if ticket.generation != self.state.generation {
            debug!(
                stale_generation = ticket.generation,
                current_generation = self.state.generation,
                "discarding stale analysis result"
            );
            self.emit_event(AnalysisEvent::StaleResultDiscarded {
                generation: ticket.generation,
            });
            return Ok(false);
        }
        if sets.len() != ticket.athletes.len()
            || sets
                .iter()
                .zip(&ticket.athletes)
                .any(|(set, athlete)| set.athlete_id != athlete.id)
        {
            return Err(AnalysisError::InvalidData(
                "result sets do not match the requested athletes".to_owned(),
            ));
        }

        let prepared: Vec<AthleteResults> = sets
            .into_iter()
            .map(|set| AthleteResults {
                results: self.prepare_results(&set.results, &ticket.query, ticket.metric),
                ..set
            })
            .collect();
        let chart = self.aligner.align(&prepared, ticket.metric);
        let labels_len = chart.labels.len();
        let series_len = chart.series.len();

        self.state.styles = series_styles(&chart, self.state.theme);
        self.state.chart = Some(chart);
        self.emit_event(AnalysisEvent::ChartUpdated {
            labels_len,
            series_len,
        });
        Ok(true)
    }

    /// Fetches every selected athlete through `source`, then aligns.
    pub fn analyze<S: ResultSource + ?Sized>(&mut self, source: &S) -> AnalysisResult<bool> {
        let ticket = self.begin_analysis()?;
        let sets = fetch_all(source, &ticket.athletes, &ticket.query)?;
        self.complete_analysis(ticket, sets)
    }

    /// Statistics over the full history of the single selected athlete.
    ///
    /// Returns `None` unless exactly one athlete is selected.
    pub fn single_athlete_statistics<S: ResultSource + ?Sized>(
        &self,
        source: &S,
    ) -> AnalysisResult<Option<StatisticsSummary>> {
        let [athlete] = self.state.selected.as_slice() else {
            return Ok(None);
        };
        let results = source.fetch_results(&athlete.id, &ResultQuery::default())?;
        Ok(Some(self.statistics(&results)))
    }

    #[must_use]
    pub fn statistics(&self, results: &[RawResult]) -> StatisticsSummary {
        StatisticsSummary::compute(results, &self.catalog, self.config.statistics)
    }

    fn prepare_results(
        &self,
        results: &[RawResult],
        query: &ResultQuery,
        metric: Metric,
    ) -> Vec<RawResult> {
        let filtered = query.apply(results, &self.catalog);
        if metric != Metric::AveragePerArrow || !self.config.compute_missing_averages {
            return filtered;
        }
        let computed = self.catalog.with_averages(&filtered);
        filtered
            .into_iter()
            .zip(computed)
            .map(|(original, computed)| {
                if original.average_per_arrow.is_some() {
                    original
                } else {
                    computed
                }
            })
            .collect()
    }

    fn after_selection_changed(&mut self) {
        self.invalidate_chart();
        self.emit_event(AnalysisEvent::SelectionChanged {
            selected_len: self.state.selected.len(),
        });
    }

    /// Drops the current chart and supersedes in-flight requests.
    fn invalidate_chart(&mut self) {
        self.state.chart = None;
        self.state.styles.clear();
        self.state.generation += 1;
    }
}
