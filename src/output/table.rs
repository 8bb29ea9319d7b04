use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::config::Theme;
use crate::core::classifier::{band_of, DealAnalysis, ScoreColor, UploadSummary};
use crate::core::upload::UploadStage;
use crate::models::{Deal, ReviewStatus, HIGH_MATCH_PRESET, MATCH_RANGE_PRESETS};
use super::RenderContext;

fn terminal_color(color: ScoreColor) -> Color {
    match color {
        ScoreColor::Green => Color::Rgb { r: 34, g: 197, b: 94 },
        ScoreColor::Yellow => Color::Rgb { r: 234, g: 179, b: 8 },
        ScoreColor::Orange => Color::Rgb { r: 249, g: 115, b: 22 },
        ScoreColor::Red => Color::Rgb { r: 239, g: 68, b: 68 },
    }
}

fn status_color(status: &ReviewStatus) -> Color {
    match status {
        ReviewStatus::Proceed => Color::Green,
        ReviewStatus::Conviction => Color::Yellow,
        ReviewStatus::NotFundable => Color::Red,
        ReviewStatus::NotReviewed | ReviewStatus::Unknown(_) => Color::Grey,
    }
}

fn new_table(ctx: &RenderContext) -> Table {
    let mut table = Table::new();
    let preset = match ctx.theme {
        Theme::Dark => UTF8_FULL,
        Theme::Light => ASCII_FULL,
    };
    table
        .load_preset(preset)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(ctx: &RenderContext, labels: &[&str]) -> Vec<Cell> {
    let fg = match ctx.theme {
        Theme::Dark => Color::White,
        Theme::Light => Color::Black,
    };
    labels
        .iter()
        .map(|label| Cell::new(label).fg(fg).add_attribute(Attribute::Bold))
        .collect()
}

pub fn render_deal_table(deals: &[Deal], ctx: &RenderContext) -> String {
    let mut table = new_table(ctx);
    table.set_header(header(
        ctx,
        &[
            "ID", "Match", "Uploaded", "Company", "Raising", "Stage", "Founders", "Industry",
            "Pre-VC", "Investor", "★",
        ],
    ));

    for deal in deals {
        let color = band_of(deal.match_score as f64).color();
        table.add_row(vec![
            Cell::new(&deal.id),
            Cell::new(format!("{}%", deal.match_score)).fg(terminal_color(color)),
            Cell::new(deal.uploaded_at.format("%Y-%m-%d")),
            Cell::new(&deal.company),
            Cell::new(&deal.raising),
            Cell::new(deal.stage.label()),
            Cell::new(&deal.founders),
            Cell::new(&deal.industry),
            Cell::new(deal.prelovc_status.label()).fg(status_color(&deal.prelovc_status)),
            Cell::new(deal.investor_status.label()).fg(status_color(&deal.investor_status)),
            Cell::new(if deal.favorite { "★" } else { "☆" }),
        ]);
    }
    table.to_string()
}

pub fn render_analysis(analysis: &DealAnalysis, ctx: &RenderContext) -> String {
    let mut table = new_table(ctx);
    table.set_header(header(ctx, &["Metric", "Score", "Band"]));

    for card in &analysis.metrics {
        let color = terminal_color(card.classification.color);
        table.add_row(vec![
            Cell::new(&card.label),
            Cell::new(format!("{:.0}", card.classification.value)).fg(color),
            Cell::new(card.classification.band.label()).fg(color),
        ]);
    }

    format!(
        "{} (match {:.0}%)\nRecommendation: {}\n{}",
        analysis.company,
        analysis.match_score.value,
        analysis.verdict_label,
        table
    )
}

pub fn render_presets(ctx: &RenderContext) -> String {
    let mut table = new_table(ctx);
    table.set_header(header(ctx, &["Preset", "Low", "High"]));

    for preset in std::iter::once(&HIGH_MATCH_PRESET).chain(MATCH_RANGE_PRESETS.iter()) {
        table.add_row(vec![
            preset.label.to_string(),
            preset.range.low.to_string(),
            preset.range.high.to_string(),
        ]);
    }
    table.to_string()
}

/// One progress line, e.g. "[2/4] Processing Document - Analyzing content and structure"
pub fn render_upload_step(stage: UploadStage) -> String {
    let position = UploadStage::STEPS
        .iter()
        .position(|step| *step == stage)
        .map(|idx| idx + 1)
        .unwrap_or(0);
    format!(
        "[{}/{}] {} - {}",
        position,
        UploadStage::STEPS.len(),
        stage.label(),
        stage.description()
    )
}

/// Headline printed after the upload steps, e.g. "RentFlow: Strong Match (85%)"
pub fn render_upload_summary(summary: &UploadSummary) -> String {
    format!("{}: {} ({}%)", summary.company, summary.label, summary.vc_match)
}
