use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::{debug, trace};

use crate::error::InvoiceError;

/// A single line of the input file, exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    line: usize,
    fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// The line in the input file on which the row starts.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|field| field.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<RawRow>,
}

impl Table {
    /// Parses comma separated rows. Rows may have different lengths, checking them is
    /// up to the caller.
    pub fn from_reader<R: Read>(reader: R) -> csv::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map_or(index + 1, |position| position.line() as usize);

            rows.push(RawRow::new(line, record.iter().map(str::to_string).collect()));
        }

        Ok(Self { rows })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn header(&self) -> Option<&RawRow> {
        self.rows.first()
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &RawRow> + '_ {
        self.rows.iter().skip(1)
    }
}

/// Reads the whole file at `path`. The file is closed before this returns.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table, InvoiceError> {
    let path = path.as_ref();
    trace!("reading from: {}", path.display());

    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InvoiceError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => InvoiceError::Read {
            path: path.to_path_buf(),
            source: source.into(),
        },
    })?;

    let table = Table::from_reader(file).map_err(|source| InvoiceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if table.is_empty() {
        return Err(InvoiceError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    debug!("read {} rows from `{}`", table.rows.len(), path.display());

    Ok(table)
}
