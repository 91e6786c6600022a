use serde::{Deserialize, Serialize};

use crate::core::{Metric, Theme};

/// Read-only session snapshot passed to listener hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerContext {
    pub selected_len: usize,
    pub generation: u64,
    pub theme: Theme,
    pub metric: Metric,
    pub labels_len: usize,
    pub series_len: usize,
}

/// Event stream exposed to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisEvent {
    SelectionChanged { selected_len: usize },
    QueryChanged,
    MetricChanged { metric: Metric },
    ChartUpdated { labels_len: usize, series_len: usize },
    ThemeChanged { theme: Theme },
    StaleResultDiscarded { generation: u64 },
}

/// Observer hook for hosts that redraw on session changes.
///
/// Listeners see events and the session context but cannot mutate the
/// session directly.
pub trait AnalysisListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: AnalysisEvent, context: ListenerContext);
}
