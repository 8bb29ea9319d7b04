use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of every score field
pub const MAX_SCORE: u8 = 100;

/// Clamp an arbitrary number into the [0, 100] score range
///
/// NaN saturates to 0 so that classification stays total.
#[inline]
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, MAX_SCORE as f64) as u8
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_score(raw))
}

/// Pitch deck under review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    #[serde(rename = "matchScore", alias = "match", deserialize_with = "deserialize_score")]
    pub match_score: u8,
    pub metrics: Metrics,
    #[serde(rename = "uploadedAt", alias = "uploaded")]
    pub uploaded_at: NaiveDate,
    pub company: String,
    #[serde(default)]
    pub industry: String,
    pub stage: Stage,
    /// Founder names, comma separated
    #[serde(default, alias = "foundersText")]
    pub founders: String,
    #[serde(rename = "prelovcStatus", default)]
    pub prelovc_status: ReviewStatus,
    #[serde(rename = "investorStatus", default)]
    pub investor_status: ReviewStatus,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub raising: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub oneliner: String,
}

impl Deal {
    /// Whether any enumerated field carries a value this crate does not recognise
    pub fn has_unknown_tags(&self) -> bool {
        self.stage.is_unknown()
            || self.prelovc_status.is_unknown()
            || self.investor_status.is_unknown()
    }
}

/// Per-dimension fundability metrics, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(deserialize_with = "deserialize_score")]
    pub market: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub team: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub product: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub traction: u8,
    #[serde(rename = "vcMatch", deserialize_with = "deserialize_score")]
    pub vc_match: u8,
}

impl Metrics {
    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::VcMatch => self.vc_match,
            Metric::Market => self.market,
            Metric::Team => self.team,
            Metric::Product => self.product,
            Metric::Traction => self.traction,
        }
    }
}

/// Named metric of a deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    VcMatch,
    Market,
    Team,
    Product,
    Traction,
}

impl Metric {
    /// Display order used by the analysis panel
    pub const ALL: [Metric; 5] = [
        Metric::VcMatch,
        Metric::Market,
        Metric::Team,
        Metric::Product,
        Metric::Traction,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::VcMatch => "VC MATCH",
            Metric::Market => "MARKET",
            Metric::Team => "TEAM",
            Metric::Product => "PRODUCT",
            Metric::Traction => "TRACTION",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Metric::VcMatch => "vcMatch",
            Metric::Market => "market",
            Metric::Team => "team",
            Metric::Product => "product",
            Metric::Traction => "traction",
        }
    }
}

/// Funding stage of a deal
///
/// Labels are matched case-insensitively, so both "Pre-Seed" and "Pre-seed" parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    SeriesD,
    Unknown(String),
}

impl Stage {
    /// Filter options in display order
    pub const OPTIONS: [Stage; 6] = [
        Stage::PreSeed,
        Stage::Seed,
        Stage::SeriesA,
        Stage::SeriesB,
        Stage::SeriesC,
        Stage::SeriesD,
    ];

    pub fn label(&self) -> &str {
        match self {
            Stage::PreSeed => "Pre-Seed",
            Stage::Seed => "Seed",
            Stage::SeriesA => "Series A",
            Stage::SeriesB => "Series B",
            Stage::SeriesC => "Series C",
            Stage::SeriesD => "Series D",
            Stage::Unknown(raw) => raw,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Stage::Unknown(_))
    }
}

impl FromStr for Stage {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Ok(match normalized.as_str() {
            "pre-seed" | "preseed" => Stage::PreSeed,
            "seed" => Stage::Seed,
            "series-a" => Stage::SeriesA,
            "series-b" => Stage::SeriesB,
            "series-c" => Stage::SeriesC,
            "series-d" => Stage::SeriesD,
            _ => Stage::Unknown(s.to_string()),
        })
    }
}

impl From<String> for Stage {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(stage) => stage,
            Err(never) => match never {},
        }
    }
}

impl From<Stage> for String {
    fn from(value: Stage) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Review verdict tag set by the pre-VC screen or by the investor
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReviewStatus {
    Proceed,
    Conviction,
    NotFundable,
    #[default]
    NotReviewed,
    Unknown(String),
}

impl ReviewStatus {
    pub const OPTIONS: [ReviewStatus; 4] = [
        ReviewStatus::Proceed,
        ReviewStatus::Conviction,
        ReviewStatus::NotFundable,
        ReviewStatus::NotReviewed,
    ];

    /// Wire name, e.g. `not-fundable`
    pub fn key(&self) -> &str {
        match self {
            ReviewStatus::Proceed => "proceed",
            ReviewStatus::Conviction => "conviction",
            ReviewStatus::NotFundable => "not-fundable",
            ReviewStatus::NotReviewed => "not-reviewed",
            ReviewStatus::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ReviewStatus::Proceed => "Proceed with Deal",
            ReviewStatus::Conviction => "More Conviction",
            ReviewStatus::NotFundable => "Not Yet Fundable",
            ReviewStatus::NotReviewed => "Not Reviewed",
            ReviewStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ReviewStatus::Unknown(_))
    }
}

impl FromStr for ReviewStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Ok(match normalized.as_str() {
            "proceed" => ReviewStatus::Proceed,
            "conviction" => ReviewStatus::Conviction,
            "not-fundable" => ReviewStatus::NotFundable,
            "not-reviewed" => ReviewStatus::NotReviewed,
            _ => ReviewStatus::Unknown(s.to_string()),
        })
    }
}

impl From<String> for ReviewStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<ReviewStatus> for String {
    fn from(value: ReviewStatus) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
