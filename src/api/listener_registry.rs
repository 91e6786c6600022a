use tracing::trace;

use crate::error::{AnalysisError, AnalysisResult};
use crate::extensions::{AnalysisEvent, AnalysisListener, ListenerContext};

use super::AnalysisSession;

impl AnalysisSession {
    /// Adds a listener. Ids must be non-blank and unique within the session.
    ///
    /// Listeners are notified in registration order.
    pub fn register_listener(&mut self, listener: Box<dyn AnalysisListener>) -> AnalysisResult<()> {
        let id = listener.id();
        if id.trim().is_empty() {
            return Err(AnalysisError::InvalidData(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.has_listener(id) {
            return Err(AnalysisError::InvalidData(format!(
                "listener `{id}` is already registered on this session"
            )));
        }
        trace!(listener_id = id, "analysis listener registered");
        self.listeners.push(listener);
        Ok(())
    }

    /// Drops the listener with `listener_id`. Returns `true` when one was removed.
    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id() != listener_id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listener_ids().any(|id| id == listener_id)
    }

    /// Registered ids in notification order.
    pub fn listener_ids(&self) -> impl Iterator<Item = &str> {
        self.listeners.iter().map(|listener| listener.id())
    }

    /// Snapshot taken after the state change that triggered the event.
    pub(super) fn listener_context(&self) -> ListenerContext {
        let (labels_len, series_len) = self
            .state
            .chart
            .as_ref()
            .map_or((0, 0), |chart| (chart.labels.len(), chart.series.len()));
        ListenerContext {
            selected_len: self.state.selected.len(),
            generation: self.state.generation,
            theme: self.state.theme,
            metric: self.state.metric,
            labels_len,
            series_len,
        }
    }

    /// Delivers `event` to every listener in registration order, all seeing
    /// the same context.
    pub(super) fn emit_event(&mut self, event: AnalysisEvent) {
        let context = self.listener_context();
        for listener in &mut self.listeners {
            listener.on_event(event, context);
        }
    }
}
