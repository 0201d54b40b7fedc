//! The fixed sheet layout, expressed as data.
//!
//! Every sheet obeys the same convention: five metadata rows per column,
//! then a dated data block whose first column is the shared date axis.
//! Keeping the convention in one table means a future layout revision only
//! touches this file, not the scan logic.

use calamine::Data;

use crate::ingest::cell;
use crate::model::SeriesMetadata;

/// Metadata fields a column header declares about its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    StartDate,
    Kind,
    Category,
    Unit,
    EndDate,
}

/// One slot of the column-header convention: which row carries which field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
    pub row: usize,
    pub field: MetaField,
}

/// The header convention. Row 0 is reserved and never read.
pub const META_LAYOUT: [FieldSlot; 5] = [
    FieldSlot { row: 1, field: MetaField::StartDate },
    FieldSlot { row: 2, field: MetaField::Kind },
    FieldSlot { row: 3, field: MetaField::Category },
    FieldSlot { row: 4, field: MetaField::Unit },
    FieldSlot { row: 5, field: MetaField::EndDate },
];

/// First row of the dated data block.
pub const DATA_START_ROW: usize = 6;

/// Column holding the date axis shared by every series in the sheet.
pub const DATE_AXIS_COLUMN: usize = 0;

/// Marker between sheet name and column index inside a series id.
pub const SERIES_ID_COLUMN_MARKER: &str = "__col";

/// Mint the globally unique id for the series in column `column` of `sheet`.
pub fn series_id(sheet: &str, column: usize) -> String {
    format!("{sheet}{SERIES_ID_COLUMN_MARKER}{column}")
}

/// Apply one header cell to the metadata record under construction,
/// through the coercion the field calls for.
pub fn apply_field(record: &mut SeriesMetadata, field: MetaField, raw: Option<&Data>) {
    match field {
        MetaField::StartDate => record.start_date = cell::coerce_date(raw),
        MetaField::Kind => record.kind = cell::coerce_label(raw),
        MetaField::Category => record.category = cell::coerce_label(raw),
        MetaField::Unit => record.unit = cell::raw_text(raw),
        MetaField::EndDate => record.end_date = cell::coerce_date(raw),
    }
}
