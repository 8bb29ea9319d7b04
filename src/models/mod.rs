// Model exports
pub mod domain;
pub mod query;
pub mod responses;

pub use domain::{clamp_score, Deal, Metric, Metrics, ReviewStatus, Stage, MAX_SCORE};
pub use query::{
    match_range_label, FilterConfig, MatchRange, MatchRangePreset, QueryError, SortConfig,
    SortDirection, SortField, HIGH_MATCH_PRESET, MATCH_RANGE_PRESETS,
};
pub use responses::{DealListResponse, FavoriteResponse, UploadResponse};
