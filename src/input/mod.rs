mod config;
mod details;
mod sheet;
mod table;

pub mod toml_input;

pub use config::*;
pub use details::*;
pub use sheet::*;
pub use table::*;
