use std::collections::BTreeSet;
use crate::models::{Deal, FilterConfig, ReviewStatus, Stage};

/// Check if a deal satisfies every active constraint of the filter
///
/// Range, stage, status and favorites are cheap and run first; the
/// case-insensitive search runs last.
#[inline]
pub fn matches_filters(deal: &Deal, filters: &FilterConfig) -> bool {
    filters.match_range.contains(deal.match_score)
        && matches_stage(&deal.stage, &filters.stages)
        && matches_status(&deal.prelovc_status, &filters.prelovc_status)
        && matches_status(&deal.investor_status, &filters.investor_status)
        && (!filters.only_favorites || deal.favorite)
        && matches_search(deal, &filters.search_query)
}

/// Empty set accepts everything; an unrecognised stage never matches a non-empty set
#[inline]
pub fn matches_stage(stage: &Stage, accepted: &BTreeSet<Stage>) -> bool {
    accepted.is_empty() || (!stage.is_unknown() && accepted.contains(stage))
}

#[inline]
pub fn matches_status(status: &ReviewStatus, accepted: &BTreeSet<ReviewStatus>) -> bool {
    accepted.is_empty() || (!status.is_unknown() && accepted.contains(status))
}

/// Case-insensitive substring search over company, industry and founders
pub fn matches_search(deal: &Deal, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [&deal.company, &deal.industry, &deal.founders]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Keep the deals that pass the filter, in their original order
pub fn filter_deals(deals: &[Deal], filters: &FilterConfig) -> Vec<Deal> {
    deals
        .iter()
        .filter(|deal| matches_filters(deal, filters))
        .cloned()
        .collect()
}
