use std::ops::AddAssign;

use derive_more::Display;
use log::{debug, info, warn};

use crate::error::InvoiceError;
use crate::input::{RawRow, Table};

/// Number of columns that end up on the invoice.
pub const COLUMN_COUNT: usize = 7;

pub const HOURS_COLUMN: usize = 4;
pub const RATE_COLUMN: usize = 5;
pub const COST_COLUMN: usize = 6;

/// Date, employee/task, description, notes, daily hours, hourly rate and daily cost.
pub type FilteredRow = [String; COLUMN_COUNT];

/// A non-negative decimal, displayed with two decimal places.
#[derive(Debug, Copy, Clone, Default, Display, PartialEq, PartialOrd)]
#[display("{:.2}", _0)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Self = Self(0.0);

    /// Parses a hours or cost field. Every `$` is removed before parsing.
    ///
    /// Anything that does not parse to a finite, non-negative number counts as zero.
    /// Thousands separators are not removed, so `$1,234.56` is zero as well.
    #[must_use]
    pub fn parse_field(field: &str) -> Self {
        let stripped = field.replace('$', "");
        let stripped = stripped.trim();

        if stripped.is_empty() {
            return Self::ZERO;
        }

        match stripped.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Self(value),
            Ok(_) => {
                warn!(
                    "clamped `{}` to 0: negative and non-finite values are not added to the totals",
                    field
                );
                Self::ZERO
            }
            Err(e) => {
                warn!("failed to parse `{}` as a number: {}", field, e);
                Self::ZERO
            }
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct InvoiceTotals {
    hours: Amount,
    cost: Amount,
}

impl InvoiceTotals {
    #[must_use]
    pub fn hours(&self) -> Amount {
        self.hours
    }

    #[must_use]
    pub fn cost(&self) -> Amount {
        self.cost
    }

    fn add_row(&mut self, row: &FilteredRow) {
        self.hours += Amount::parse_field(&row[HOURS_COLUMN]);
        self.cost += Amount::parse_field(&row[COST_COLUMN]);
    }
}

/// The retained rows of a timesheet together with their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Timesheet {
    header: FilteredRow,
    rows: Vec<FilteredRow>,
    totals: InvoiceTotals,
}

fn is_total_row(row: &RawRow) -> bool {
    row.fields()
        .first()
        .map_or(false, |field| field.trim().eq_ignore_ascii_case("total"))
}

fn project(row: &RawRow) -> Result<FilteredRow, InvoiceError> {
    let fields = row.fields();
    if fields.len() < COLUMN_COUNT {
        return Err(InvoiceError::MalformedRow {
            line: row.line(),
            found: fields.len(),
            expected: COLUMN_COUNT,
        });
    }

    Ok(std::array::from_fn(|i| fields[i].clone()))
}

impl Timesheet {
    /// Filters the data rows of `table` and sums up their hours and costs.
    ///
    /// Blank rows and rows starting with `total` are skipped; every other row must have
    /// at least [`COLUMN_COUNT`] fields.
    pub fn from_table(table: &Table) -> Result<Self, InvoiceError> {
        let header = table
            .header()
            .ok_or_else(|| InvoiceError::MalformedRow {
                line: 1,
                found: 0,
                expected: COLUMN_COUNT,
            })
            .and_then(project)?;

        let mut rows = Vec::new();
        let mut totals = InvoiceTotals::default();

        for row in table.data_rows() {
            if row.is_blank() {
                debug!("skipping blank row on line {}", row.line());
                continue;
            }

            if is_total_row(row) {
                debug!("skipping total row on line {}", row.line());
                continue;
            }

            let row = project(row)?;
            totals.add_row(&row);
            rows.push(row);
        }

        info!(
            "retained {} rows: {} hours, ${}",
            rows.len(),
            totals.hours,
            totals.cost
        );

        Ok(Self {
            header,
            rows,
            totals,
        })
    }

    #[must_use]
    pub fn header(&self) -> &FilteredRow {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[FilteredRow] {
        &self.rows
    }

    #[must_use]
    pub fn totals(&self) -> InvoiceTotals {
        self.totals
    }
}
