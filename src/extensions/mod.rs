//! Host-facing hooks that sit outside the alignment core.

pub mod listeners;

pub use listeners::{AnalysisEvent, AnalysisListener, ListenerContext};
