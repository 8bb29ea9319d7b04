use std::path::Path;
use chrono::NaiveDate;
use thiserror::Error;
use crate::models::{Deal, Metrics, ReviewStatus, Stage};

/// Errors that can occur while loading or updating the deal book
#[derive(Debug, Error)]
pub enum DealBookError {
    #[error("Failed to read deals file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid deals JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Deal not found: {0}")]
    NotFound(String),

    #[error("Duplicate deal id: {0}")]
    DuplicateId(String),
}

/// In-memory deal collection owned by the session
///
/// Everything here is session state; nothing is written back to disk.
#[derive(Debug, Clone, Default)]
pub struct DealBook {
    deals: Vec<Deal>,
}

impl DealBook {
    pub fn new(deals: Vec<Deal>) -> Result<Self, DealBookError> {
        let mut book = Self::default();
        for deal in deals {
            book.insert(deal)?;
        }
        Ok(book)
    }

    /// The five-deal reference pipeline
    pub fn sample() -> Self {
        Self { deals: sample_deals() }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DealBookError> {
        let deals: Vec<Deal> = serde_json::from_str(json)?;
        Self::new(deals)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DealBookError> {
        let path = path.as_ref();
        tracing::debug!("Loading deals from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Deal, DealBookError> {
        self.deals
            .iter()
            .find(|deal| deal.id == id)
            .ok_or_else(|| DealBookError::NotFound(id.to_string()))
    }

    /// Append a deal; ids must be unique
    pub fn insert(&mut self, deal: Deal) -> Result<(), DealBookError> {
        if self.deals.iter().any(|existing| existing.id == deal.id) {
            return Err(DealBookError::DuplicateId(deal.id));
        }
        if deal.has_unknown_tags() {
            tracing::warn!(
                "Deal {} carries unrecognised tags (stage: {}, pre-VC: {}, investor: {})",
                deal.id,
                deal.stage,
                deal.prelovc_status.key(),
                deal.investor_status.key()
            );
        }
        self.deals.push(deal);
        Ok(())
    }

    /// Flip the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, DealBookError> {
        let deal = self
            .deals
            .iter_mut()
            .find(|deal| deal.id == id)
            .ok_or_else(|| DealBookError::NotFound(id.to_string()))?;
        deal.favorite = !deal.favorite;
        Ok(deal.favorite)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &Deal> {
        self.deals.iter().filter(|deal| deal.favorite)
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_deal(
    id: &str,
    match_score: u8,
    uploaded: (i32, u32, u32),
    company: &str,
    raising: &str,
    stage: Stage,
    founders: &str,
    industry: &str,
    email: &str,
    statuses: (ReviewStatus, ReviewStatus),
    favorite: bool,
    oneliner: &str,
    metrics: Metrics,
) -> Deal {
    let (year, month, day) = uploaded;
    Deal {
        id: id.to_string(),
        match_score,
        metrics,
        uploaded_at: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        company: company.to_string(),
        industry: industry.to_string(),
        stage,
        founders: founders.to_string(),
        prelovc_status: statuses.0,
        investor_status: statuses.1,
        favorite,
        raising: raising.to_string(),
        email: email.to_string(),
        oneliner: oneliner.to_string(),
    }
}

fn sample_deals() -> Vec<Deal> {
    vec![
        sample_deal(
            "1",
            92,
            (2024, 3, 14),
            "CloudScale AI",
            "$5M",
            Stage::Seed,
            "Alex Thompson, Maria Garcia",
            "AI/ML",
            "alex@cloudscale.ai",
            (ReviewStatus::Proceed, ReviewStatus::Proceed),
            true,
            "Enterprise-grade AI infrastructure scaling solution",
            Metrics { market: 88, team: 95, product: 85, traction: 78, vc_match: 92 },
        ),
        sample_deal(
            "2",
            85,
            (2024, 3, 15),
            "RentFlow",
            "$10M",
            Stage::SeriesA,
            "Sarah Chen, Michael Rodriguez",
            "PropTech",
            "sarah@rentflow.com",
            (ReviewStatus::Proceed, ReviewStatus::NotReviewed),
            false,
            "AI-powered property management platform revolutionizing rental markets",
            Metrics { market: 65, team: 70, product: 70, traction: 20, vc_match: 85 },
        ),
        sample_deal(
            "3",
            78,
            (2024, 3, 13),
            "GreenEnergy Solutions",
            "$15M",
            Stage::SeriesA,
            "David Kim, Lisa Chen",
            "CleanTech",
            "david@greenenergy.com",
            (ReviewStatus::Conviction, ReviewStatus::Conviction),
            false,
            "Renewable energy solutions for sustainable future",
            Metrics { market: 85, team: 90, product: 82, traction: 75, vc_match: 78 },
        ),
        sample_deal(
            "4",
            95,
            (2024, 3, 12),
            "HealthTech AI",
            "$8M",
            Stage::Seed,
            "Emma Wilson, James Lee",
            "HealthTech",
            "emma@healthtechai.com",
            (ReviewStatus::Proceed, ReviewStatus::Proceed),
            true,
            "AI-powered diagnostics for early disease detection",
            Metrics { market: 92, team: 88, product: 90, traction: 85, vc_match: 95 },
        ),
        sample_deal(
            "5",
            65,
            (2024, 3, 11),
            "EduTech Plus",
            "$3M",
            Stage::PreSeed,
            "Robert Chang, Anna Smith",
            "EdTech",
            "robert@edutechplus.com",
            (ReviewStatus::NotFundable, ReviewStatus::NotReviewed),
            false,
            "Personalized learning platform for K-12 students",
            Metrics { market: 70, team: 65, product: 60, traction: 45, vc_match: 65 },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_book() {
        let book = DealBook::sample();
        assert_eq!(book.len(), 5);
        assert_eq!(book.get("4").unwrap().company, "HealthTech AI");
        assert_eq!(book.favorites().count(), 2);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut book = DealBook::sample();

        assert!(book.toggle_favorite("2").unwrap());
        assert!(book.get("2").unwrap().favorite);
        assert!(!book.toggle_favorite("2").unwrap());
    }

    #[test]
    fn test_toggle_unknown_deal() {
        let mut book = DealBook::sample();
        assert!(matches!(book.toggle_favorite("nope"), Err(DealBookError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let deal = DealBook::sample().get("1").unwrap().clone();
        let result = DealBook::new(vec![deal.clone(), deal]);
        assert!(matches!(result, Err(DealBookError::DuplicateId(_))));
    }

    #[test]
    fn test_from_json_str_keeps_unknown_tags() {
        let json = r#"[{
            "id": "9",
            "match": 71,
            "metrics": {"market": 1, "team": 2, "product": 3, "traction": 4, "vcMatch": 71},
            "uploaded": "2024-01-02",
            "company": "Odd Co",
            "stage": "Growth",
            "prelovcStatus": "maybe"
        }]"#;

        let book = DealBook::from_json_str(json).unwrap();
        let deal = book.get("9").unwrap();

        assert!(deal.stage.is_unknown());
        assert!(deal.prelovc_status.is_unknown());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(DealBook::from_json_str("{"), Err(DealBookError::Parse(_))));
    }
}
