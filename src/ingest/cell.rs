//! Best-effort coercion of untyped workbook cells.
//!
//! Workbooks authored by hand carry irregular cells; every function here
//! resolves a bad cell to `None` instead of failing, and the assembly
//! filters decide what an absent field means.

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Text formats accepted for date cells typed as plain strings.
const TEXT_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
const TEXT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Convert an Excel date serial to a calendar date.
///
/// Fallback for date cells stored as raw numbers. Excel counts days from
/// its 1899-12-30 epoch (adjusted for the off-by-one leap-year bug).
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::try_days(serial as i64)?)
}

fn parse_text_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in TEXT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in TEXT_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(datetime.date());
        }
    }
    None
}

/// Interpret a cell as a calendar date.
pub fn coerce_date(cell: Option<&Data>) -> Option<NaiveDate> {
    match cell? {
        Data::DateTime(dt) => dt.as_datetime().map(|dt| dt.date()),
        Data::DateTimeIso(s) => parse_text_date(s),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::String(s) => parse_text_date(s),
        _ => None,
    }
}

/// Interpret a cell as a numeric measurement.
///
/// Date-typed cells are not measurements and resolve to `None`.
pub fn coerce_number(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// True for cells the workbook itself typed as dates.
pub fn is_date_cell(cell: &Data) -> bool {
    matches!(cell, Data::DateTime(_) | Data::DateTimeIso(_))
}

/// Interpret a cell as a classification label.
///
/// A date sitting in a label slot is layout noise left over from shifted
/// header rows, not a classification; it resolves to `None` so the series
/// fails the mandatory-field check instead of gaining a bogus label.
pub fn coerce_label(cell: Option<&Data>) -> Option<String> {
    let cell = cell?;
    if is_date_cell(cell) {
        return None;
    }
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        // Numeric codes do occur as labels in hand-built sheets
        other => Some(other.to_string()),
    }
}

/// Raw passthrough for free-text slots like the unit label.
pub fn raw_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty | Data::Error(_) => None,
        Data::DateTime(dt) => dt.as_datetime().map(|dt| dt.date().to_string()),
        other => {
            let text = other.to_string();
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}
