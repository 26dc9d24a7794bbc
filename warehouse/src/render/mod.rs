//! Console renderers for dashboard reports.
//!
//! [`TextDashboardRenderer`] draws the scalar and two horizontal bar charts;
//! [`JsonDashboardRenderer`] writes the report as a JSON document.

mod json;
mod text;

use std::io::{self, Write};

use clap::ValueEnum;
use thiserror::Error;

use crate::domain::DashboardReport;

pub use json::JsonDashboardRenderer;
pub use text::{DEFAULT_BAR_WIDTH, MAX_LABEL_WIDTH, TextDashboardRenderer};

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write dashboard output: {0}")]
    Io(#[from] io::Error),
    /// The report could not be serialized.
    #[error("failed to serialize dashboard report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes a dashboard report to an output stream.
pub trait DashboardRenderer {
    /// Render `report` into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if writing or serialization fails.
    fn render(&self, report: &DashboardReport, out: &mut dyn Write) -> Result<(), RenderError>;
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Scalar line plus text bar charts.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

impl OutputFormat {
    /// Renderer for this format. `bar_width` only affects text output.
    #[must_use]
    pub fn renderer(self, bar_width: usize) -> Box<dyn DashboardRenderer> {
        match self {
            Self::Text => Box::new(TextDashboardRenderer::new(bar_width)),
            Self::Json => Box::new(JsonDashboardRenderer),
        }
    }
}
