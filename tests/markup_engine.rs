//! Runs the markup renderer against a stand-in for the html to pdf engine.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use invoice_sheet::generate_invoice;
use invoice_sheet::input::Config;
use invoice_sheet::render::RendererKind;

use pretty_assertions::assert_eq;

mod common;

const FAKE_ENGINE: &str = concat!(
    "#!/bin/sh\n",
    "for last; do :; done\n",
    "printf '%%PDF-1.4 fake' > \"$last\"\n",
);

#[test]
fn test_markup_renderer_uses_engine_output() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let engine = dir.path().join("fake-engine");
    fs::write(&engine, FAKE_ENGINE).expect("engine should be written");
    fs::set_permissions(&engine, fs::Permissions::from_mode(0o755))
        .expect("engine should be executable");

    let input = common::write_sheet(dir.path(), "sheet.csv", common::EXAMPLE_SHEET);
    let output = dir.path().join("invoice.pdf");

    let mut builder = Config::builder();
    builder
        .input(&input)
        .output(&output)
        .renderer(RendererKind::Markup)
        .engine_path(&engine);
    let config = builder.build();

    let totals = generate_invoice(&config).expect("invoice should be created");

    assert_eq!(totals.cost().to_string(), "600.00");
    assert_eq!(
        fs::read(&output).expect("invoice should exist"),
        b"%PDF-1.4 fake".to_vec()
    );
}
