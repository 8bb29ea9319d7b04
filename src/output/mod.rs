// Rendering for the command-line presentation layer
pub mod json;
pub mod table;

use crate::config::Theme;

/// Display state threaded explicitly through every renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub theme: Theme,
}

impl RenderContext {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

pub use json::render_json;
pub use table::{
    render_analysis, render_deal_table, render_presets, render_upload_step, render_upload_summary,
};
