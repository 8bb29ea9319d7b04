use std::path::Path;
use std::time::Duration;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::{Deal, Metrics, ReviewStatus, Stage};

/// Errors that can occur while processing an uploaded pitch deck
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PDF file (got {0})")]
    NotPdf(String),

    #[error("Upload already complete")]
    AlreadyComplete,
}

/// Progress of a pitch deck upload, in the order the steps run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadStage {
    Idle,
    Uploading,
    Processing,
    Scoring,
    Complete,
}

impl UploadStage {
    /// Steps shown in the progress indicator
    pub const STEPS: [UploadStage; 4] = [
        UploadStage::Uploading,
        UploadStage::Processing,
        UploadStage::Scoring,
        UploadStage::Complete,
    ];

    pub fn next(self) -> Option<UploadStage> {
        match self {
            UploadStage::Idle => Some(UploadStage::Uploading),
            UploadStage::Uploading => Some(UploadStage::Processing),
            UploadStage::Processing => Some(UploadStage::Scoring),
            UploadStage::Scoring => Some(UploadStage::Complete),
            UploadStage::Complete => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UploadStage::Idle => "Waiting",
            UploadStage::Uploading => "Uploading File",
            UploadStage::Processing => "Processing Document",
            UploadStage::Scoring => "Calculating Match",
            UploadStage::Complete => "Completed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UploadStage::Idle => "Select a pitch deck to begin",
            UploadStage::Uploading => "Securely transferring your pitch deck",
            UploadStage::Processing => "Analyzing content and structure",
            UploadStage::Scoring => "Evaluating investment potential",
            UploadStage::Complete => "Ready for review",
        }
    }
}

/// Finite-state upload sequence; each step runs once, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPipeline {
    stage: UploadStage,
}

impl UploadPipeline {
    pub fn new() -> Self {
        Self { stage: UploadStage::Idle }
    }

    pub fn stage(&self) -> UploadStage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.stage == UploadStage::Complete
    }

    /// Number of finished steps out of `UploadStage::STEPS`
    pub fn completed_steps(&self) -> usize {
        UploadStage::STEPS
            .iter()
            .filter(|step| **step <= self.stage)
            .count()
    }

    pub fn progress(&self) -> f64 {
        self.completed_steps() as f64 / UploadStage::STEPS.len() as f64
    }

    pub fn advance(&mut self) -> Result<UploadStage, UploadError> {
        let next = self.stage.next().ok_or(UploadError::AlreadyComplete)?;
        self.stage = next;
        Ok(next)
    }
}

impl Default for UploadPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Only PDF pitch decks are accepted
pub fn validate_pitch_deck(path: &Path) -> Result<(), UploadError> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        Ok(())
    } else {
        Err(UploadError::NotPdf(path.display().to_string()))
    }
}

/// Static analysis fixture returned for every processed deck
pub fn analyzed_deal_fixture() -> Deal {
    Deal {
        id: uuid::Uuid::new_v4().to_string(),
        match_score: 85,
        metrics: Metrics {
            market: 65,
            team: 70,
            product: 70,
            traction: 20,
            vc_match: 85,
        },
        uploaded_at: Utc::now().date_naive(),
        company: "RentFlow".to_string(),
        industry: "PropTech".to_string(),
        stage: Stage::SeriesA,
        founders: "Sarah Chen, Michael Rodriguez".to_string(),
        prelovc_status: ReviewStatus::Proceed,
        investor_status: ReviewStatus::NotReviewed,
        favorite: false,
        raising: "$10M".to_string(),
        email: "sarah@rentflow.com".to_string(),
        oneliner: "AI-powered property management platform revolutionizing the rental market"
            .to_string(),
    }
}

/// Drive a deck through every upload step, waiting `step_delay` on each
///
/// `on_step` is called as each stage is entered. Returns the analysed deal.
pub async fn run_upload<F>(
    path: &Path,
    step_delay: Duration,
    mut on_step: F,
) -> Result<Deal, UploadError>
where
    F: FnMut(UploadStage),
{
    validate_pitch_deck(path)?;

    let mut pipeline = UploadPipeline::new();
    while !pipeline.is_complete() {
        let stage = pipeline.advance()?;
        tracing::debug!("Upload of {} entered stage {:?}", path.display(), stage);
        on_step(stage);
        if !step_delay.is_zero() {
            tokio::time::sleep(step_delay).await;
        }
    }

    Ok(analyzed_deal_fixture())
}
