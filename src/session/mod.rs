//! Recorded-session persistence

pub mod csv;

pub use csv::{export_csv, import_csv, ImportedTrace};
