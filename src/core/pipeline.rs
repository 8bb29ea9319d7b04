use crate::models::{Deal, FilterConfig, SortConfig};
use crate::core::{filters::filter_deals, sorting::sort_in_place};

/// Result of running the filter/sort pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub deals: Vec<Deal>,
    pub total_candidates: usize,
}

impl QueryResult {
    pub fn matched(&self) -> usize {
        self.deals.len()
    }
}

/// Deal table pipeline: filter, then stable sort
///
/// # Pipeline Stages
/// 1. Match range, stage, status and favorite constraints
/// 2. Free-text search
/// 3. Stable sort by the configured field and direction
///
/// The input collection is never mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealFilterSort {
    sort: SortConfig,
}

impl DealFilterSort {
    pub fn new(sort: SortConfig) -> Self {
        Self { sort }
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn with_sort(self, sort: SortConfig) -> Self {
        Self { sort }
    }

    /// Deals to render, in display order
    pub fn apply(&self, deals: &[Deal], filters: &FilterConfig) -> QueryResult {
        let total_candidates = deals.len();

        let mut selected = filter_deals(deals, filters);

        sort_in_place(&mut selected, &self.sort);

        tracing::debug!(
            "Deal query kept {} of {} deals (sort: {} {})",
            selected.len(),
            total_candidates,
            self.sort.field,
            self.sort.direction
        );

        QueryResult {
            deals: selected,
            total_candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchRange, Metrics, ReviewStatus, SortDirection, SortField, Stage};
    use chrono::NaiveDate;

    fn create_candidate(id: &str, match_score: u8, favorite: bool) -> Deal {
        Deal {
            id: id.to_string(),
            match_score,
            metrics: Metrics {
                market: 50,
                team: 50,
                product: 50,
                traction: 50,
                vc_match: match_score,
            },
            uploaded_at: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            company: format!("Company {}", id),
            industry: "SaaS".to_string(),
            stage: Stage::SeriesA,
            founders: String::new(),
            prelovc_status: ReviewStatus::Proceed,
            investor_status: ReviewStatus::NotReviewed,
            favorite,
            raising: String::new(),
            email: String::new(),
            oneliner: String::new(),
        }
    }

    #[test]
    fn test_apply_filters_then_sorts() {
        let deals = vec![
            create_candidate("1", 70, false),
            create_candidate("2", 95, true),
            create_candidate("3", 88, true),
        ];
        let query = DealFilterSort::default();
        let filters = FilterConfig::default().with_only_favorites(true);

        let result = query.apply(&deals, &filters);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.matched(), 2);
        assert_eq!(result.deals[0].id, "2");
        assert_eq!(result.deals[1].id, "3");
    }

    #[test]
    fn test_identity_config_with_stable_sort_keeps_everything() {
        let deals = vec![create_candidate("1", 10, false), create_candidate("2", 20, false)];
        let query = DealFilterSort::new(SortConfig::new(SortField::MatchScore, SortDirection::Asc));

        let result = query.apply(&deals, &FilterConfig::default());
        assert_eq!(result.deals, deals);
    }

    #[test]
    fn test_apply_agrees_with_filter_then_sort() {
        let deals = vec![
            create_candidate("1", 72, true),
            create_candidate("2", 40, true),
            create_candidate("3", 91, false),
            create_candidate("4", 72, true),
        ];
        let filters = FilterConfig::default()
            .with_match_range(MatchRange::new(50, 100))
            .with_only_favorites(true);
        let sort = SortConfig::new(SortField::MatchScore, SortDirection::Desc);

        let expected = crate::core::sorting::sort_deals(&filter_deals(&deals, &filters), &sort);
        let result = DealFilterSort::new(sort).apply(&deals, &filters);

        assert_eq!(result.deals, expected);
        let ids: Vec<_> = result.deals.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_empty_input() {
        let result = DealFilterSort::default().apply(&[], &FilterConfig::default());
        assert!(result.deals.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_degenerate_range_returns_empty() {
        let deals = vec![create_candidate("1", 50, false)];
        let filters = FilterConfig::default().with_match_range(MatchRange::new(60, 40));

        assert!(DealFilterSort::default().apply(&deals, &filters).deals.is_empty());
    }
}
