//! Row value types for the two tables the ingestion produces.
//!
//! Both tables are plain owned vectors of these rows. Every filtering step
//! downstream returns a fresh vector, so a caller holding a previous stage's
//! table keeps a valid snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cleaning::{FactRecord, KeyColumn};

/// Descriptive record for one series: identity, classification axes and
/// declared validity window.
///
/// `kind` and `category` stay optional at the type level; the metadata
/// assembler guarantees both are present on every row of the final table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub series_id: String,
    pub sheet: String,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SeriesMetadata {
    /// A blank record for the given series, before any header cells are read.
    pub fn new(series_id: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            sheet: sheet.into(),
            kind: None,
            category: None,
            unit: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// One dated measurement of one series.
///
/// An absent `value` is a hole in the series, kept until a caller prunes it.
/// An absent `date` never survives the fact assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub series_id: String,
    pub date: Option<NaiveDate>,
    pub value: Option<f64>,
}

/// An observation joined with the classification of its series, for
/// consumers that display or export labelled rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedObservation {
    pub series_id: String,
    pub date: Option<NaiveDate>,
    pub value: Option<f64>,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
}

impl FactRecord for Observation {
    const COLUMNS: &'static [KeyColumn] =
        &[KeyColumn::SeriesId, KeyColumn::Date, KeyColumn::Value];

    fn is_present(&self, column: KeyColumn) -> bool {
        match column {
            KeyColumn::SeriesId => !self.series_id.is_empty(),
            KeyColumn::Date => self.date.is_some(),
            KeyColumn::Value => self.value.is_some(),
        }
    }
}

impl FactRecord for EnrichedObservation {
    const COLUMNS: &'static [KeyColumn] =
        &[KeyColumn::SeriesId, KeyColumn::Date, KeyColumn::Value];

    fn is_present(&self, column: KeyColumn) -> bool {
        match column {
            KeyColumn::SeriesId => !self.series_id.is_empty(),
            KeyColumn::Date => self.date.is_some(),
            KeyColumn::Value => self.value.is_some(),
        }
    }
}

// Metadata is fact-shaped only through its id; validity dates are not the
// observation date column and are never pruned on.
impl FactRecord for SeriesMetadata {
    const COLUMNS: &'static [KeyColumn] = &[KeyColumn::SeriesId];

    fn is_present(&self, column: KeyColumn) -> bool {
        match column {
            KeyColumn::SeriesId => !self.series_id.is_empty(),
            _ => false,
        }
    }
}

/// The normalized output of one ingestion run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesModel {
    pub metadata: Vec<SeriesMetadata>,
    pub observations: Vec<Observation>,
}
