// Core algorithm exports
pub mod classifier;
pub mod filters;
pub mod pipeline;
pub mod sorting;
pub mod upload;

pub use classifier::{
    band_of, classify, metric_cards, recommendation_of, upload_match_of, Band, Classification,
    DealAnalysis, MetricCard, ScoreColor, UploadMatch, UploadSummary, Verdict,
};
pub use filters::{filter_deals, matches_filters, matches_search};
pub use pipeline::{DealFilterSort, QueryResult};
pub use sorting::{locale_compare, sort_deals};
pub use upload::{run_upload, validate_pitch_deck, UploadError, UploadPipeline, UploadStage};
