//! archery-trends: date-aligned result series for athlete comparison charts.
//!
//! The crate turns per-athlete archery results with loosely formatted dates
//! into one shared chronological axis plus gap-filled value series, and keeps
//! the surrounding analysis state (selection, filters, metric, theme) explicit.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod telemetry;

pub use api::{AnalysisConfig, AnalysisSession};
pub use core::{AlignedChartData, AthleteResults, RawResult, align, palette_for};
pub use error::{AnalysisError, AnalysisResult};
