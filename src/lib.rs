mod error;
mod html_string;
mod utils;

pub mod input;
pub mod render;

use log::{debug, info};

pub use crate::error::InvoiceError;

use crate::input::{read_table, Config, InvoiceTotals, Timesheet};
use crate::render::Invoice;

/// Reads the timesheet, sums up its hours and costs and writes the invoice document.
///
/// The document is rendered completely before anything is written, so a failed run never
/// leaves an output file behind.
pub fn generate_invoice(config: &Config) -> anyhow::Result<InvoiceTotals> {
    info!("reading timesheet from `{}`", config.input().display());
    let table = read_table(config.input())?;
    let timesheet = Timesheet::from_table(&table)?;

    info!("rendering invoice with the {} renderer", config.renderer_kind());
    let invoice = Invoice::new(config.details(), &timesheet);
    let document = config.renderer().render(&invoice)?;

    let output = config.output();
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        utils::create_dir_all(parent).map_err(|source| InvoiceError::OutputWrite {
            path: output.to_path_buf(),
            source,
        })?;
    }

    utils::write(output, &document).map_err(|source| InvoiceError::OutputWrite {
        path: output.to_path_buf(),
        source,
    })?;

    debug!("wrote {} bytes to `{}`", document.len(), output.display());

    Ok(timesheet.totals())
}
