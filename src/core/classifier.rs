use serde::{Deserialize, Serialize};
use crate::models::{Deal, Metric, Metrics, MAX_SCORE};

/// Lower bound (inclusive) of each band
const EXCELLENT_MIN: f64 = 90.0;
const GOOD_MIN: f64 = 70.0;
const FAIR_MIN: f64 = 50.0;

/// Lower bound (inclusive) of each verdict
const PROCEED_MIN: f64 = 85.0;
const REQUEST_INFO_MIN: f64 = 75.0;

/// Lower bound (inclusive) of each label on a freshly analysed deck
const STRONG_MATCH_MIN: f64 = 85.0;
const POTENTIAL_MATCH_MIN: f64 = 70.0;

/// Quality band of a single metric, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Band {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Band {
    /// Fixed band to color table
    pub fn color(&self) -> ScoreColor {
        match self {
            Band::Excellent => ScoreColor::Green,
            Band::Good => ScoreColor::Yellow,
            Band::Fair => ScoreColor::Orange,
            Band::Poor => ScoreColor::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Excellent => "Excellent",
            Band::Good => "Good",
            Band::Fair => "Fair",
            Band::Poor => "Poor",
        }
    }
}

/// Semantic display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl ScoreColor {
    /// CSS color token used by the web views
    pub fn rgb(&self) -> &'static str {
        match self {
            ScoreColor::Green => "rgb(34 197 94)",
            ScoreColor::Yellow => "rgb(234 179 8)",
            ScoreColor::Orange => "rgb(249 115 22)",
            ScoreColor::Red => "rgb(239 68 68)",
        }
    }
}

/// Three-way investment recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    NotFundable,
    RequestMoreInfo,
    Proceed,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Proceed => "Proceed with Deal",
            Verdict::RequestMoreInfo => "Request more info",
            Verdict::NotFundable => "Not Fundable",
        }
    }

    pub fn color(&self) -> ScoreColor {
        match self {
            Verdict::Proceed => ScoreColor::Green,
            Verdict::RequestMoreInfo => ScoreColor::Yellow,
            Verdict::NotFundable => ScoreColor::Red,
        }
    }
}

/// Match label shown when a pitch deck finishes processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadMatch {
    NotAMatch,
    PotentialMatch,
    StrongMatch,
}

impl UploadMatch {
    pub fn label(&self) -> &'static str {
        match self {
            UploadMatch::StrongMatch => "Strong Match",
            UploadMatch::PotentialMatch => "Potential Match",
            UploadMatch::NotAMatch => "Not a Match",
        }
    }

    pub fn color(&self) -> ScoreColor {
        match self {
            UploadMatch::StrongMatch => ScoreColor::Green,
            UploadMatch::PotentialMatch => ScoreColor::Yellow,
            UploadMatch::NotAMatch => ScoreColor::Red,
        }
    }
}

#[inline]
fn clamp(value: f64) -> f64 {
    value.clamp(0.0, MAX_SCORE as f64)
}

/// Band of a metric value; out-of-range input saturates, NaN is `Poor`
#[inline]
pub fn band_of(value: f64) -> Band {
    let value = clamp(value);
    if value >= EXCELLENT_MIN {
        Band::Excellent
    } else if value >= GOOD_MIN {
        Band::Good
    } else if value >= FAIR_MIN {
        Band::Fair
    } else {
        Band::Poor
    }
}

/// Recommendation for an aggregate match score; out-of-range input saturates
#[inline]
pub fn recommendation_of(match_score: f64) -> Verdict {
    let score = clamp(match_score);
    if score >= PROCEED_MIN {
        Verdict::Proceed
    } else if score >= REQUEST_INFO_MIN {
        Verdict::RequestMoreInfo
    } else {
        Verdict::NotFundable
    }
}

/// Upload summary label for a deck's `vcMatch`; out-of-range input saturates
#[inline]
pub fn upload_match_of(vc_match: f64) -> UploadMatch {
    let score = clamp(vc_match);
    if score >= STRONG_MATCH_MIN {
        UploadMatch::StrongMatch
    } else if score >= POTENTIAL_MATCH_MIN {
        UploadMatch::PotentialMatch
    } else {
        UploadMatch::NotAMatch
    }
}

/// Band and color for one value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub value: f64,
    pub band: Band,
    pub color: ScoreColor,
}

/// Classify one value for display; NaN is reported as 0 and `Poor`
pub fn classify(value: f64) -> Classification {
    let band = band_of(value);
    Classification {
        value: if value.is_nan() { 0.0 } else { clamp(value) },
        band,
        color: band.color(),
    }
}

/// One metric tile of the analysis panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub metric: Metric,
    pub label: String,
    pub classification: Classification,
}

/// Metric tiles in display order
pub fn metric_cards(metrics: &Metrics) -> Vec<MetricCard> {
    Metric::ALL
        .iter()
        .map(|&metric| MetricCard {
            metric,
            label: metric.label().to_string(),
            classification: classify(metrics.get(metric) as f64),
        })
        .collect()
}

/// Everything the analysis panel shows for a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealAnalysis {
    pub deal_id: String,
    pub company: String,
    pub match_score: Classification,
    pub verdict: Verdict,
    pub verdict_label: String,
    pub metrics: Vec<MetricCard>,
}

impl DealAnalysis {
    /// The verdict follows the `vcMatch` metric, as the analysis panel does
    pub fn of(deal: &Deal) -> Self {
        let verdict = recommendation_of(deal.metrics.vc_match as f64);
        Self {
            deal_id: deal.id.clone(),
            company: deal.company.clone(),
            match_score: classify(deal.match_score as f64),
            verdict,
            verdict_label: verdict.label().to_string(),
            metrics: metric_cards(&deal.metrics),
        }
    }
}

/// Headline shown once an uploaded deck has been scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub deal_id: String,
    pub company: String,
    pub vc_match: u8,
    pub upload_match: UploadMatch,
    pub label: String,
}

impl UploadSummary {
    pub fn of(deal: &Deal) -> Self {
        let upload_match = upload_match_of(deal.metrics.vc_match as f64);
        Self {
            deal_id: deal.id.clone(),
            company: deal.company.clone(),
            vc_match: deal.metrics.vc_match,
            upload_match,
            label: upload_match.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(band_of(100.0), Band::Excellent);
        assert_eq!(band_of(90.0), Band::Excellent);
        assert_eq!(band_of(89.9), Band::Good);
        assert_eq!(band_of(70.0), Band::Good);
        assert_eq!(band_of(69.0), Band::Fair);
        assert_eq!(band_of(50.0), Band::Fair);
        assert_eq!(band_of(49.0), Band::Poor);
        assert_eq!(band_of(0.0), Band::Poor);
    }

    #[test]
    fn test_band_clamps() {
        assert_eq!(band_of(-5.0), band_of(0.0));
        assert_eq!(band_of(150.0), band_of(100.0));
        assert_eq!(band_of(f64::NAN), Band::Poor);
    }

    #[test]
    fn test_band_is_monotonic() {
        let mut previous = band_of(0.0);
        for v in 0..=100 {
            let band = band_of(v as f64);
            assert!(band >= previous, "band dropped at {}", v);
            previous = band;
        }
    }

    #[test]
    fn test_recommendation_boundaries() {
        assert_eq!(recommendation_of(85.0), Verdict::Proceed);
        assert_eq!(recommendation_of(84.0), Verdict::RequestMoreInfo);
        assert_eq!(recommendation_of(75.0), Verdict::RequestMoreInfo);
        assert_eq!(recommendation_of(74.0), Verdict::NotFundable);
        assert_eq!(recommendation_of(-1.0), Verdict::NotFundable);
        assert_eq!(recommendation_of(1000.0), Verdict::Proceed);
    }

    #[test]
    fn test_band_and_verdict_tables_diverge() {
        assert_eq!(band_of(80.0), Band::Good);
        assert_eq!(recommendation_of(80.0), Verdict::RequestMoreInfo);
    }

    #[test]
    fn test_upload_match_boundaries() {
        assert_eq!(upload_match_of(85.0), UploadMatch::StrongMatch);
        assert_eq!(upload_match_of(84.0), UploadMatch::PotentialMatch);
        assert_eq!(upload_match_of(70.0), UploadMatch::PotentialMatch);
        assert_eq!(upload_match_of(69.0), UploadMatch::NotAMatch);
        assert_eq!(upload_match_of(f64::NAN), UploadMatch::NotAMatch);
        assert_eq!(upload_match_of(120.0).label(), "Strong Match");
    }

    #[test]
    fn test_upload_label_and_verdict_tables_diverge() {
        assert_eq!(upload_match_of(72.0), UploadMatch::PotentialMatch);
        assert_eq!(recommendation_of(72.0), Verdict::NotFundable);
    }

    #[test]
    fn test_upload_summary_uses_vc_match() {
        let mut deal = crate::core::upload::analyzed_deal_fixture();
        deal.metrics.vc_match = 72;

        let summary = UploadSummary::of(&deal);
        assert_eq!(summary.upload_match, UploadMatch::PotentialMatch);
        assert_eq!(summary.label, "Potential Match");
        assert_eq!(DealAnalysis::of(&deal).verdict, Verdict::NotFundable);
    }

    #[test]
    fn test_classify_nan_reports_zero() {
        let classification = classify(f64::NAN);
        assert_eq!(classification.value, 0.0);
        assert_eq!(classification.band, Band::Poor);
    }

    #[test]
    fn test_color_table() {
        assert_eq!(classify(95.0).color, ScoreColor::Green);
        assert_eq!(classify(75.0).color, ScoreColor::Yellow);
        assert_eq!(classify(55.0).color, ScoreColor::Orange);
        assert_eq!(classify(5.0).color.rgb(), "rgb(239 68 68)");
    }

    #[test]
    fn test_metric_cards_order() {
        let metrics = Metrics { market: 65, team: 70, product: 70, traction: 20, vc_match: 85 };
        let cards = metric_cards(&metrics);

        let labels: Vec<_> = cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["VC MATCH", "MARKET", "TEAM", "PRODUCT", "TRACTION"]);
        assert_eq!(cards[4].classification.band, Band::Poor);
    }
}
