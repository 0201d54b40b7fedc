//! Generic null-pruning for fact-shaped tables.
//!
//! Any table whose rows can report presence for the fact key columns can be
//! cleaned with the same pass, before display or export. The pass checks
//! only the key columns a schema actually carries, so it is safe to call on
//! tables that lack some of them.

/// The key columns a fact-shaped record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColumn {
    SeriesId,
    Date,
    Value,
}

/// Every key column a pruning pass looks for.
pub const KEY_COLUMNS: [KeyColumn; 3] = [KeyColumn::SeriesId, KeyColumn::Date, KeyColumn::Value];

/// A record type that knows which key columns its schema carries and
/// whether a given row holds a value in each.
pub trait FactRecord {
    /// Key columns that exist on this schema. Key columns not listed are
    /// skipped by the pruning pass instead of counting as absent.
    const COLUMNS: &'static [KeyColumn];

    fn is_present(&self, column: KeyColumn) -> bool;
}

/// Drop rows holding an absent value in any key column the schema carries.
///
/// Returns a fresh table and leaves the input as-is. Applying it twice
/// changes nothing, and a schema with no key columns passes through whole.
pub fn prune_missing<T: FactRecord + Clone>(rows: &[T]) -> Vec<T> {
    rows.iter()
        .filter(|row| {
            KEY_COLUMNS
                .iter()
                .copied()
                .filter(|column| T::COLUMNS.contains(column))
                .all(|column| row.is_present(column))
        })
        .cloned()
        .collect()
}
