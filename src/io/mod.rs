//! Output writers.

pub mod export;

pub use export::{export_csv, export_summary_json, write_csv, write_summary_json};
