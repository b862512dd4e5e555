use std::fs;
use std::path::{Path, PathBuf};

use invoice_sheet::input::Config;

pub const EXAMPLE_SHEET: &str = concat!(
    //
    "Date,Employee,Task,Notes,Hours,Rate,Cost\n",
    "2024-01-01,A,Dev,,8,50,400\n",
    ",,,,,,\n",
    "Total,,,,,,1000\n",
    "2024-01-02,A,Dev,,4,50,\"$200\"\n",
);

#[must_use]
pub fn write_sheet(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("timesheet should be written");
    path
}

#[must_use]
#[allow(dead_code)]
pub fn make_config(input: &Path, output: &Path) -> Config {
    let mut builder = Config::builder();
    builder.input(input).output(output);
    builder.build()
}

#[allow(dead_code)]
pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
