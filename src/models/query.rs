use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use super::domain::{Metric, ReviewStatus, Stage, MAX_SCORE};

/// Errors raised while building a query from user input
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("Unknown sort direction: {0} (expected asc or desc)")]
    UnknownSortDirection(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] ValidationErrors),
}

/// Inclusive match score bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
#[validate(schema(function = "validate_ordered_range"))]
pub struct MatchRange {
    #[validate(range(max = 100))]
    pub low: u8,
    #[validate(range(max = 100))]
    pub high: u8,
}

impl MatchRange {
    pub const FULL: MatchRange = MatchRange { low: 0, high: MAX_SCORE };

    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    /// Inclusive containment; a range with `low > high` contains nothing
    #[inline]
    pub fn contains(&self, score: u8) -> bool {
        self.low <= score && score <= self.high
    }

    pub fn is_full(&self) -> bool {
        self.low == 0 && self.high >= MAX_SCORE
    }
}

impl Default for MatchRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<(u8, u8)> for MatchRange {
    fn from((low, high): (u8, u8)) -> Self {
        Self { low, high }
    }
}

impl From<MatchRange> for (u8, u8) {
    fn from(range: MatchRange) -> Self {
        (range.low, range.high)
    }
}

fn validate_ordered_range(range: &MatchRange) -> Result<(), ValidationError> {
    if range.low > range.high {
        let mut err = ValidationError::new("match_range_order");
        err.message = Some(format!("low bound {} exceeds high bound {}", range.low, range.high).into());
        return Err(err);
    }
    Ok(())
}

/// Labelled match range shown in the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRangePreset {
    pub label: &'static str,
    pub range: MatchRange,
}

pub const MATCH_RANGE_PRESETS: [MatchRangePreset; 7] = [
    MatchRangePreset { label: "90%+", range: MatchRange::new(90, 100) },
    MatchRangePreset { label: "80% - 90%", range: MatchRange::new(80, 90) },
    MatchRangePreset { label: "70% - 80%", range: MatchRange::new(70, 80) },
    MatchRangePreset { label: "60% - 70%", range: MatchRange::new(60, 70) },
    MatchRangePreset { label: "50% - 60%", range: MatchRange::new(50, 60) },
    MatchRangePreset { label: "25% - 50%", range: MatchRange::new(25, 50) },
    MatchRangePreset { label: "0% - 25%", range: MatchRange::new(0, 25) },
];

/// Quick filter applied by the "High Match (90%+)" button
pub const HIGH_MATCH_PRESET: MatchRangePreset = MatchRangePreset {
    label: "High Match (90%+)",
    range: MatchRange::new(90, 100),
};

/// Label of the preset equal to `range`, or "Match" when none is
pub fn match_range_label(range: &MatchRange) -> &'static str {
    MATCH_RANGE_PRESETS
        .iter()
        .find(|preset| preset.range == *range)
        .map(|preset| preset.label)
        .unwrap_or("Match")
}

/// Filter state owned by the caller
///
/// Sets are OR'd within a dimension; dimensions are AND'd. An empty set places
/// no constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    #[validate(nested)]
    pub match_range: MatchRange,
    pub stages: BTreeSet<Stage>,
    pub prelovc_status: BTreeSet<ReviewStatus>,
    pub investor_status: BTreeSet<ReviewStatus>,
    pub only_favorites: bool,
    pub search_query: String,
}

impl FilterConfig {
    pub fn with_match_range(self, match_range: MatchRange) -> Self {
        Self { match_range, ..self }
    }

    pub fn with_stages<I: IntoIterator<Item = Stage>>(self, stages: I) -> Self {
        Self { stages: stages.into_iter().collect(), ..self }
    }

    pub fn with_prelovc_status<I: IntoIterator<Item = ReviewStatus>>(self, statuses: I) -> Self {
        Self { prelovc_status: statuses.into_iter().collect(), ..self }
    }

    pub fn with_investor_status<I: IntoIterator<Item = ReviewStatus>>(self, statuses: I) -> Self {
        Self { investor_status: statuses.into_iter().collect(), ..self }
    }

    pub fn with_only_favorites(self, only_favorites: bool) -> Self {
        Self { only_favorites, ..self }
    }

    pub fn with_search_query(self, search_query: impl Into<String>) -> Self {
        Self { search_query: search_query.into(), ..self }
    }

    pub fn toggle_stage(self, stage: Stage) -> Self {
        let stages = toggled(&self.stages, stage);
        Self { stages, ..self }
    }

    pub fn toggle_prelovc_status(self, status: ReviewStatus) -> Self {
        let prelovc_status = toggled(&self.prelovc_status, status);
        Self { prelovc_status, ..self }
    }

    pub fn toggle_investor_status(self, status: ReviewStatus) -> Self {
        let investor_status = toggled(&self.investor_status, status);
        Self { investor_status, ..self }
    }

    /// Whether any dimension differs from the identity filter
    ///
    /// The search query is tracked separately by the search box and is ignored here.
    pub fn has_active_filters(&self) -> bool {
        !self.match_range.is_full()
            || !self.stages.is_empty()
            || !self.prelovc_status.is_empty()
            || !self.investor_status.is_empty()
            || self.only_favorites
    }

    /// Identity filter, keeping the current search query
    pub fn cleared(&self) -> Self {
        Self {
            search_query: self.search_query.clone(),
            ..Self::default()
        }
    }

    /// Validate a filter built from untrusted input
    pub fn validated(self) -> Result<Self, QueryError> {
        self.validate()?;
        Ok(self)
    }
}

fn toggled<T: Ord + Clone>(set: &BTreeSet<T>, value: T) -> BTreeSet<T> {
    let mut next = set.clone();
    if !next.remove(&value) {
        next.insert(value);
    }
    next
}

/// Attribute a deal list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortField {
    MatchScore,
    Metric(Metric),
    UploadedAt,
    Company,
    Industry,
    Stage,
    Founders,
    Raising,
}

impl SortField {
    pub fn key(&self) -> &'static str {
        match self {
            SortField::MatchScore => "matchScore",
            SortField::Metric(metric) => metric.key(),
            SortField::UploadedAt => "uploadedAt",
            SortField::Company => "company",
            SortField::Industry => "industry",
            SortField::Stage => "stage",
            SortField::Founders => "founders",
            SortField::Raising => "raising",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SortField::MatchScore | SortField::Metric(_))
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "match" | "matchscore" => SortField::MatchScore,
            "vcmatch" => SortField::Metric(Metric::VcMatch),
            "market" => SortField::Metric(Metric::Market),
            "team" => SortField::Metric(Metric::Team),
            "product" => SortField::Metric(Metric::Product),
            "traction" => SortField::Metric(Metric::Traction),
            "uploaded" | "uploadedat" => SortField::UploadedAt,
            "company" => SortField::Company,
            "industry" => SortField::Industry,
            "stage" => SortField::Stage,
            "founders" | "founderstext" => SortField::Founders,
            "raising" => SortField::Raising,
            _ => return Err(QueryError::UnknownSortField(s.to_string())),
        };
        Ok(field)
    }
}

impl TryFrom<String> for SortField {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortField> for String {
    fn from(field: SortField) -> Self {
        field.key().to_string()
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(QueryError::UnknownSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Sort state owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click behaviour: same field flips direction, a new field starts descending
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self { direction: self.direction.flipped(), ..self }
        } else {
            Self { field, direction: SortDirection::Desc }
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::MatchScore,
            direction: SortDirection::Desc,
        }
    }
}
