use std::cmp::Ordering;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use crate::models::{Deal, SortConfig, SortDirection, SortField};

/// Compare two display strings the way a default-locale collator does
///
/// Primary key is the text with accents stripped and case folded, so
/// "apple" < "Banana" and "Émile" < "Zeta". Ties are broken by accents
/// ("resume" < "résumé"), then by case with lowercase first ("acme" < "Acme"),
/// then by code point so the ordering stays total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_tiebreak(a, b))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_tiebreak(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Ascending comparison of two deals on one field
pub fn compare_by_field(a: &Deal, b: &Deal, field: SortField) -> Ordering {
    match field {
        SortField::MatchScore => a.match_score.cmp(&b.match_score),
        SortField::Metric(metric) => a.metrics.get(metric).cmp(&b.metrics.get(metric)),
        SortField::UploadedAt => a.uploaded_at.cmp(&b.uploaded_at),
        SortField::Company => locale_compare(&a.company, &b.company),
        SortField::Industry => locale_compare(&a.industry, &b.industry),
        SortField::Stage => locale_compare(a.stage.label(), b.stage.label()),
        SortField::Founders => locale_compare(&a.founders, &b.founders),
        SortField::Raising => locale_compare(&a.raising, &b.raising),
    }
}

/// Stable sort of a copy of `deals`
///
/// Descending order reverses the comparator, not the output, so ties keep
/// their input order in both directions.
pub fn sort_deals(deals: &[Deal], sort: &SortConfig) -> Vec<Deal> {
    let mut sorted = deals.to_vec();
    sort_in_place(&mut sorted, sort);
    sorted
}

/// Stable in-place variant for callers that already own the collection
pub fn sort_in_place(deals: &mut [Deal], sort: &SortConfig) {
    let field = sort.field;
    match sort.direction {
        SortDirection::Asc => deals.sort_by(|a, b| compare_by_field(a, b, field)),
        SortDirection::Desc => deals.sort_by(|a, b| compare_by_field(b, a, field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metric, Metrics, ReviewStatus, Stage};
    use chrono::NaiveDate;

    fn create_test_deal(id: &str, company: &str, match_score: u8) -> Deal {
        Deal {
            id: id.to_string(),
            match_score,
            metrics: Metrics {
                market: 100 - match_score,
                team: 60,
                product: 60,
                traction: 60,
                vc_match: match_score,
            },
            uploaded_at: NaiveDate::from_ymd_opt(2024, 3, match_score as u32 % 28 + 1).unwrap(),
            company: company.to_string(),
            industry: String::new(),
            stage: Stage::Seed,
            founders: String::new(),
            prelovc_status: ReviewStatus::NotReviewed,
            investor_status: ReviewStatus::NotReviewed,
            favorite: false,
            raising: String::new(),
            email: String::new(),
            oneliner: String::new(),
        }
    }

    fn ids(deals: &[Deal]) -> Vec<&str> {
        deals.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_locale_compare_is_case_insensitive_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zeta", "acme"), Ordering::Greater);
        assert_eq!(locale_compare("acme", "Acme"), Ordering::Less);
        assert_eq!(locale_compare("Acme", "Acme"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_ignores_accents_first() {
        assert_eq!(locale_compare("Émile", "Zeta"), Ordering::Less);
        assert_eq!(locale_compare("éclair", "fig"), Ordering::Less);
        assert_eq!(locale_compare("Zoë", "Zoe Labs"), Ordering::Less);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("Resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("émile", "Émile"), Ordering::Less);
    }

    #[test]
    fn test_accented_company_names_sort_in_place() {
        let deals = vec![
            create_test_deal("1", "Zeta", 80),
            create_test_deal("2", "Élan Robotics", 80),
            create_test_deal("3", "Acme", 80),
            create_test_deal("4", "Öko Energie", 80),
        ];
        let sort = SortConfig::new(SortField::Company, SortDirection::Asc);

        assert_eq!(ids(&sort_deals(&deals, &sort)), vec!["3", "2", "4", "1"]);
    }

    #[test]
    fn test_numeric_sort_both_directions() {
        let deals = vec![
            create_test_deal("1", "A", 78),
            create_test_deal("2", "B", 95),
            create_test_deal("3", "C", 65),
        ];

        let asc = sort_deals(&deals, &SortConfig::new(SortField::MatchScore, SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["3", "1", "2"]);

        let desc = sort_deals(&deals, &SortConfig::new(SortField::MatchScore, SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let deals = vec![
            create_test_deal("acme", "Acme", 92),
            create_test_deal("low", "Low", 50),
            create_test_deal("zeta", "Zeta", 92),
        ];

        let desc = sort_deals(&deals, &SortConfig::new(SortField::MatchScore, SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["acme", "zeta", "low"]);

        let asc = sort_deals(&deals, &SortConfig::new(SortField::MatchScore, SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["low", "acme", "zeta"]);
    }

    #[test]
    fn test_metric_field_sort() {
        let deals = vec![create_test_deal("1", "A", 90), create_test_deal("2", "B", 10)];
        let sort = SortConfig::new(SortField::Metric(Metric::Market), SortDirection::Desc);

        // market = 100 - match_score
        assert_eq!(ids(&sort_deals(&deals, &sort)), vec!["2", "1"]);
    }

    #[test]
    fn test_string_field_sort() {
        let deals = vec![
            create_test_deal("1", "rentFlow", 85),
            create_test_deal("2", "CloudScale AI", 92),
            create_test_deal("3", "edutech Plus", 65),
        ];
        let sort = SortConfig::new(SortField::Company, SortDirection::Asc);

        assert_eq!(ids(&sort_deals(&deals, &sort)), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let deals = vec![
            create_test_deal("1", "A", 70),
            create_test_deal("2", "B", 70),
            create_test_deal("3", "C", 20),
        ];
        let sort = SortConfig::new(SortField::MatchScore, SortDirection::Asc);

        let once = sort_deals(&deals, &sort);
        let twice = sort_deals(&once, &sort);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_leaves_input_untouched() {
        let deals = vec![create_test_deal("1", "A", 10), create_test_deal("2", "B", 90)];
        let before = deals.clone();

        let _ = sort_deals(&deals, &SortConfig::default());
        assert_eq!(deals, before);
    }
}
