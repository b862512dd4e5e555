use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("input file `{}` does not exist", path.display())]
    InputNotFound { path: PathBuf },
    #[error("input file `{}` does not contain any rows", path.display())]
    EmptyInput { path: PathBuf },
    #[error("row on line {line} has {found} fields, but at least {expected} are required")]
    MalformedRow {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write `{}`", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
