pub mod aligner;
pub mod catalog;
pub mod date;
pub mod palette;
pub mod primitives;
pub mod query;
pub mod statistics;
pub mod types;

pub use aligner::{
    AlignedChartData, AlignedSeries, AthleteSeries, DEFAULT_AVERAGE_AXIS_LABEL,
    DEFAULT_SCORE_AXIS_LABEL, SeriesAligner, ZeroValuePolicy, align,
};
pub use catalog::{CompetitionCatalog, CompetitionInfo, UNKNOWN_CATEGORY};
pub use date::{NormalizedDate, normalize_optional_date, normalize_result_date};
pub use palette::{Color, SeriesStyle, Theme, ThemeColors, palette_for, series_styles};
pub use query::ResultQuery;
pub use statistics::{
    CategoryBest, CategoryBreakdown, MedalCount, RecentForm, StatisticsOptions,
    StatisticsSummary,
};
pub use types::{AthleteResults, Metric, RawResult};
