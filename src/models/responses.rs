use serde::{Deserialize, Serialize};
use crate::core::classifier::{DealAnalysis, UploadSummary};
use crate::models::domain::Deal;
use crate::models::query::{FilterConfig, SortConfig};

/// Output of the `list` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealListResponse {
    pub deals: Vec<Deal>,
    pub total_candidates: usize,
    pub matched: usize,
    pub filters: FilterConfig,
    pub sort: SortConfig,
    pub match_range_label: String,
}

/// Output of the `favorite` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub deal_id: String,
    pub favorite: bool,
    pub favorites: Vec<String>,
}

/// Output of the `upload` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_name: String,
    pub steps: Vec<String>,
    pub summary: UploadSummary,
    pub analysis: DealAnalysis,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub listing: Option<DealListResponse>,
}
