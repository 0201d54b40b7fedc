// Workbook ingestion module
//
// Turns one multi-sheet workbook into the two tables of the series model:
// - SeriesMetadata: identity, classification and validity window per series
// - Observation: one dated measurement per series per axis row
//
// Cell-level irregularities degrade to absent values and are resolved by
// the assembly filters; the only fatal error is failing to read the
// workbook resource itself.

pub mod cell;
pub mod layout;
pub mod pipeline;
pub mod scanner;

use thiserror::Error;

/// Fatal ingestion errors, surfaced before any table exists.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Failed to read sheet '{sheet}': {msg}")]
    SheetRead { sheet: String, msg: String },
}

pub use pipeline::{
    assemble_metadata, assemble_model, assemble_observations, build_model, filter_realized,
};
pub use scanner::{load_sheets, scan_sheet, NamedSheet, SheetScan};
