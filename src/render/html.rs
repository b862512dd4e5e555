use std::path::PathBuf;

use log::info;

use crate::html_string::HtmlString;
use crate::render::html_render::HtmlRender;
use crate::render::{Invoice, Renderer, NUMERIC_COLUMNS};
use crate::utils::Resources;

const STYLESHEET: &str = "invoice.css";

fn header_cell(label: &str, value: &str, class: &str) -> String {
    format!(
        "<td class=\"{}\"><p><strong>{}</strong><br/>{}</p></td>",
        class,
        HtmlString::from(label),
        HtmlString::from(value)
    )
}

/// Builds the complete html document of an invoice, styled with `stylesheet`.
#[must_use]
pub fn markup(invoice: &Invoice<'_>, stylesheet: &str) -> String {
    let details = invoice.details();

    let header_row: String = invoice
        .header()
        .iter()
        .map(|label| format!("<th>{}</th>", HtmlString::from(label.as_str())))
        .collect();

    let mut body = String::new();
    for row in invoice.rows() {
        body.push_str("<tr>");
        for (column, cell) in row.iter().enumerate() {
            let cell = HtmlString::from(cell.as_str());
            if NUMERIC_COLUMNS.contains(&column) {
                body.push_str(&format!("<td class=\"amount\">{}</td>", cell));
            } else {
                body.push_str(&format!("<td>{}</td>", cell));
            }
        }
        body.push_str("</tr>\n");
    }

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>Invoice {invoice_number}</title>\n",
            "<style>\n{stylesheet}</style>\n",
            "</head>\n",
            "<body>\n",
            "<table class=\"header\">\n",
            "<tr class=\"billing\">{billed_to}{invoice}</tr>\n",
            "<tr>{pay_to}{address}</tr>\n",
            "</table>\n",
            "<table class=\"entries\">\n",
            "<thead><tr>{header_row}</tr></thead>\n",
            "<tbody>\n{body}</tbody>\n",
            "</table>\n",
            "<hr/>\n",
            "<table class=\"totals\"><tr>",
            "<td>{total_hours}</td>",
            "<td class=\"right\">{total_cost}</td>",
            "</tr></table>\n",
            "</body>\n",
            "</html>\n",
        ),
        invoice_number = HtmlString::from(details.invoice_number()),
        stylesheet = stylesheet,
        billed_to = header_cell("BILLED TO:", details.billed_to(), "left"),
        invoice = header_cell("INVOICE", details.invoice_number(), "right"),
        pay_to = header_cell("PAY TO:", details.pay_to(), "left"),
        address = header_cell("Address:", details.pay_address(), "right"),
        header_row = header_row,
        body = body,
        total_hours = HtmlString::from(invoice.total_hours_text().as_str()),
        total_cost = HtmlString::from(invoice.total_cost_text().as_str()),
    )
}

/// Renders the invoice as html and converts it with an external engine.
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    engine_path: Option<PathBuf>,
    preserve_dir: Option<PathBuf>,
}

impl MarkupRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine_path(&mut self, engine_path: impl Into<PathBuf>) -> &mut Self {
        self.engine_path = Some(engine_path.into());
        self
    }

    pub fn preserve_dir(&mut self, preserve_dir: impl Into<PathBuf>) -> &mut Self {
        self.preserve_dir = Some(preserve_dir.into());
        self
    }
}

impl Renderer for MarkupRenderer {
    fn render(&self, invoice: &Invoice<'_>) -> anyhow::Result<Vec<u8>> {
        info!("generating html document");
        let stylesheet = Resources::text(STYLESHEET)?;
        let document = markup(invoice, &stylesheet);

        let mut renderer = HtmlRender::from_markup(document)?;

        if let Some(path) = &self.engine_path {
            renderer.engine_path(path);
        }

        if let Some(dir) = &self.preserve_dir {
            renderer.preserve_dir(dir);
        }

        info!("converting html document to pdf");
        renderer.render()
    }
}
