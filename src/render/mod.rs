mod html;
mod html_render;
mod layout;
mod metrics;
mod pdf;

use std::str::FromStr;

use derive_more::Display;
use serde::Deserialize;

use crate::input::{
    FilteredRow, InvoiceDetails, InvoiceTotals, Timesheet, COST_COLUMN, HOURS_COLUMN, RATE_COLUMN,
};

pub use html::MarkupRenderer;
pub use html_render::{HtmlRender, RenderingError};
pub use layout::*;
pub use metrics::{text_width, Font};
pub use pdf::DirectLayoutRenderer;

/// Columns that are right aligned in the body of the table.
pub const NUMERIC_COLUMNS: [usize; 3] = [HOURS_COLUMN, RATE_COLUMN, COST_COLUMN];

/// Everything that ends up on the rendered document.
#[derive(Debug, Clone, Copy)]
pub struct Invoice<'a> {
    details: &'a InvoiceDetails,
    timesheet: &'a Timesheet,
}

impl<'a> Invoice<'a> {
    pub fn new(details: &'a InvoiceDetails, timesheet: &'a Timesheet) -> Self {
        Self { details, timesheet }
    }

    #[must_use]
    pub fn details(&self) -> &'a InvoiceDetails {
        self.details
    }

    #[must_use]
    pub fn header(&self) -> &'a FilteredRow {
        self.timesheet.header()
    }

    #[must_use]
    pub fn rows(&self) -> &'a [FilteredRow] {
        self.timesheet.rows()
    }

    #[must_use]
    pub fn totals(&self) -> InvoiceTotals {
        self.timesheet.totals()
    }

    #[must_use]
    pub fn total_hours_text(&self) -> String {
        format!("Total Hours: {}", self.totals().hours())
    }

    #[must_use]
    pub fn total_cost_text(&self) -> String {
        format!("Total Cost: ${}", self.totals().cost())
    }
}

/// Turns an invoice into the bytes of a pdf document.
pub trait Renderer {
    fn render(&self, invoice: &Invoice<'_>) -> anyhow::Result<Vec<u8>>;
}

#[derive(Debug, Copy, Clone, Default, Display, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Lays out the page itself and writes the pdf directly.
    #[default]
    #[display("direct")]
    Direct,
    /// Builds an html document and hands it to an external engine.
    #[display("markup")]
    Markup,
}

impl FromStr for RendererKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "markup" | "html" => Ok(Self::Markup),
            _ => Err(anyhow::anyhow!(
                "unknown renderer `{}`, expected `direct` or `markup`",
                value
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_renderer_kind_from_str() {
        assert_eq!("direct".parse::<RendererKind>().ok(), Some(RendererKind::Direct));
        assert_eq!(" Markup ".parse::<RendererKind>().ok(), Some(RendererKind::Markup));
        assert_eq!("html".parse::<RendererKind>().ok(), Some(RendererKind::Markup));
        assert!("latex".parse::<RendererKind>().is_err());
        assert_eq!(RendererKind::Markup.to_string(), "markup");
    }
}
