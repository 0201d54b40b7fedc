//! Workbook scanner: workbook file -> in-memory sheet grids -> candidates.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::ingest::layout::{self, DATA_START_ROW, DATE_AXIS_COLUMN, META_LAYOUT};
use crate::ingest::IngestError;
use crate::model::{Observation, SeriesMetadata};

/// One sheet pulled out of the workbook: its name plus the untyped grid.
#[derive(Debug, Clone)]
pub struct NamedSheet {
    pub name: String,
    pub grid: Range<Data>,
}

/// Candidates scanned out of a single sheet, in column-then-row order.
#[derive(Debug, Clone, Default)]
pub struct SheetScan {
    pub series: Vec<SeriesMetadata>,
    pub observations: Vec<Observation>,
}

/// Open the workbook at `path` and drain every sheet grid into memory.
///
/// The file handle is released before this returns; everything after runs
/// on the in-memory grids. A missing or unreadable workbook is the one
/// fatal error of the ingestion.
pub fn load_sheets(path: &Path) -> Result<Vec<NamedSheet>, IngestError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| IngestError::WorkbookOpen(e.to_string()))?;

    let names = workbook.sheet_names().to_owned();
    debug!("Workbook {} has {} sheets", path.display(), names.len());

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let grid = workbook
            .worksheet_range(&name)
            .map_err(|e| IngestError::SheetRead {
                sheet: name.clone(),
                msg: e.to_string(),
            })?;
        sheets.push(NamedSheet { name, grid });
    }

    Ok(sheets)
}

/// Scan one sheet grid into metadata and observation candidates.
///
/// Every column yields a metadata candidate, the date-axis column included;
/// the axis column never yields observations under its own id and falls out
/// of the model at the referential filter. Sheets shorter than the data
/// block yield metadata candidates only.
pub fn scan_sheet(sheet: &NamedSheet) -> SheetScan {
    let (rows, cols) = sheet.grid.get_size();
    let mut scan = SheetScan::default();

    if rows == 0 || cols == 0 {
        debug!("Sheet '{}' is empty, skipping", sheet.name);
        return scan;
    }

    for col in 0..cols {
        let mut record =
            SeriesMetadata::new(layout::series_id(&sheet.name, col), sheet.name.clone());
        for slot in META_LAYOUT {
            layout::apply_field(&mut record, slot.field, sheet.grid.get((slot.row, col)));
        }
        scan.series.push(record);
    }

    if rows <= DATA_START_ROW {
        debug!(
            "Sheet '{}' has {} rows, no data block; metadata candidates only",
            sheet.name, rows
        );
        return scan;
    }

    // The axis column is coerced once and zipped against every series column
    let date_axis: Vec<_> = (DATA_START_ROW..rows)
        .map(|row| crate::ingest::cell::coerce_date(sheet.grid.get((row, DATE_AXIS_COLUMN))))
        .collect();

    for col in 0..cols {
        if col == DATE_AXIS_COLUMN {
            continue;
        }
        let series_id = layout::series_id(&sheet.name, col);
        for (offset, date) in date_axis.iter().enumerate() {
            let value =
                crate::ingest::cell::coerce_number(sheet.grid.get((DATA_START_ROW + offset, col)));
            scan.observations.push(Observation {
                series_id: series_id.clone(),
                date: *date,
                value,
            });
        }
    }

    debug!(
        "Sheet '{}': {} series candidates, {} observation candidates",
        sheet.name,
        scan.series.len(),
        scan.observations.len()
    );

    scan
}
