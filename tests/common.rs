// Shared helpers for building in-memory workbooks in integration tests.
// Grids are constructed directly as calamine ranges so the tests carry no
// binary fixtures.
#![allow(dead_code)]

use calamine::{Data, Range};
use series_ingest::ingest::NamedSheet;

/// Build a named sheet from dense rows of cells.
pub fn sheet(name: &str, rows: &[Vec<Data>]) -> NamedSheet {
    let height = rows.len() as u32;
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
    assert!(height > 0 && width > 0, "use empty_sheet() for empty grids");

    let mut grid = Range::new((0, 0), (height - 1, width - 1));
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            grid.set_value((row_idx as u32, col_idx as u32), cell.clone());
        }
    }

    NamedSheet {
        name: name.to_string(),
        grid,
    }
}

pub fn empty_sheet(name: &str) -> NamedSheet {
    NamedSheet {
        name: name.to_string(),
        grid: Range::empty(),
    }
}

pub fn s(text: &str) -> Data {
    Data::String(text.to_string())
}

pub fn f(value: f64) -> Data {
    Data::Float(value)
}

pub fn e() -> Data {
    Data::Empty
}

/// A sheet holding a single data series in column 1 under the standard
/// header convention, with the date axis in column 0.
pub fn one_column_sheet(
    name: &str,
    kind: Data,
    category: Data,
    dates: &[Data],
    values: &[Data],
) -> NamedSheet {
    assert_eq!(dates.len(), values.len());

    let mut rows: Vec<Vec<Data>> = vec![
        vec![e(), e()],             // row 0 reserved
        vec![e(), s("2020-01-01")], // start_date
        vec![e(), kind],            // kind
        vec![e(), category],        // category
        vec![e(), s("USD")],        // unit
        vec![e(), s("2023-12-31")], // end_date
    ];
    for (date, value) in dates.iter().zip(values) {
        rows.push(vec![date.clone(), value.clone()]);
    }

    sheet(name, &rows)
}
