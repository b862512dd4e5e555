//! Runs the whole pipeline from a timesheet file to an invoice document.

use std::fs;

use invoice_sheet::input::{read_table, InvoiceDetails, Timesheet};
use invoice_sheet::render::{layout_invoice, Invoice, PageGeometry};
use invoice_sheet::{generate_invoice, InvoiceError};

use pretty_assertions::assert_eq;

mod common;

#[test]
fn test_example_invoice() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(dir.path(), "sheet.csv", common::EXAMPLE_SHEET);
    let output = dir.path().join("invoice.pdf");

    let totals = generate_invoice(&common::make_config(&input, &output))
        .expect("invoice should be created");

    assert_eq!(totals.hours().to_string(), "12.00");
    assert_eq!(totals.cost().to_string(), "600.00");

    let bytes = fs::read(&output).expect("invoice should exist");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_missing_output_dirs_are_created() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(dir.path(), "sheet.csv", common::EXAMPLE_SHEET);
    let output = dir.path().join("out").join("2024").join("invoice.pdf");

    generate_invoice(&common::make_config(&input, &output)).expect("invoice should be created");

    assert!(output.is_file());
}

#[test]
fn test_header_only_sheet() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(
        dir.path(),
        "sheet.csv",
        "Date,Employee,Task,Notes,Hours,Rate,Cost\n",
    );
    let output = dir.path().join("invoice.pdf");

    let totals = generate_invoice(&common::make_config(&input, &output))
        .expect("a sheet without entries is still an invoice");

    assert_eq!(totals.hours().to_string(), "0.00");
    assert_eq!(totals.cost().to_string(), "0.00");
    assert!(output.is_file());
}

#[test]
fn test_empty_input() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(dir.path(), "sheet.csv", "");
    let output = dir.path().join("invoice.pdf");

    let error = generate_invoice(&common::make_config(&input, &output))
        .expect_err("empty input is rejected");

    assert!(matches!(
        error.downcast_ref::<InvoiceError>(),
        Some(InvoiceError::EmptyInput { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_malformed_row() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(
        dir.path(),
        "sheet.csv",
        "Date,Employee,Task,Notes,Hours,Rate,Cost\n2024-01-01,A,Dev,,8\n",
    );
    let output = dir.path().join("invoice.pdf");

    let error = generate_invoice(&common::make_config(&input, &output))
        .expect_err("short rows are rejected");

    assert!(matches!(
        error.downcast_ref::<InvoiceError>(),
        Some(InvoiceError::MalformedRow {
            line: 2,
            found: 5,
            expected: 7
        })
    ));
    assert!(!output.exists());
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = dir.path().join("missing.csv");
    let output = dir.path().join("invoice.pdf");

    let error = generate_invoice(&common::make_config(&input, &output))
        .expect_err("missing input is rejected");

    assert!(matches!(
        error.downcast_ref::<InvoiceError>(),
        Some(InvoiceError::InputNotFound { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_output_is_a_directory() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(dir.path(), "sheet.csv", common::EXAMPLE_SHEET);
    let output = dir.path().join("invoice.pdf");
    fs::create_dir(&output).expect("directory should be created");

    let error = generate_invoice(&common::make_config(&input, &output))
        .expect_err("a directory can not be overwritten");

    assert!(matches!(
        error.downcast_ref::<InvoiceError>(),
        Some(InvoiceError::OutputWrite { .. })
    ));
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(dir.path(), "sheet.csv", common::EXAMPLE_SHEET);
    let config = common::make_config(&input, &dir.path().join("invoice.pdf"));

    let first = generate_invoice(&config).expect("first run should succeed");
    let second = generate_invoice(&config).expect("second run should succeed");
    assert_eq!(first, second);

    let details = InvoiceDetails::default();
    let layout = || {
        let sheet = Timesheet::from_table(&read_table(&input).expect("input should be readable"))
            .expect("timesheet should be valid");
        layout_invoice(&Invoice::new(&details, &sheet), PageGeometry::LETTER)
    };

    assert_eq!(layout(), layout());
}

#[test]
fn test_details_appear_on_the_first_page() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let input = common::write_sheet(dir.path(), "sheet.csv", common::EXAMPLE_SHEET);

    let mut details = InvoiceDetails::default();
    details.set_billed_to("ACME Corp").set_invoice_number("#42");

    let sheet = Timesheet::from_table(&read_table(&input).expect("input should be readable"))
        .expect("timesheet should be valid");
    let layout = layout_invoice(&Invoice::new(&details, &sheet), PageGeometry::LETTER);
    let page = &layout.pages()[0];

    assert!(page.find_text("ACME Corp").is_some());
    assert!(page.find_text("#42").is_some());
    assert!(page.find_text("Your Name Here").is_some());
    assert!(page.find_text("Total Hours: 12.00").is_some());
    assert!(page.find_text("Total Cost: $600.00").is_some());
}
