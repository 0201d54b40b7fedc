//! Downstream-facing summaries and CSV artifacts.
//!
//! The dashboard, report generator and export scripts all consume the same
//! three flat shapes: per-group summary rows, and observations enriched
//! with their series classification.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{EnrichedObservation, Observation, SeriesMetadata};

/// File names for the CSV artifacts of one run.
pub const SUMMARY_BY_KIND_FILE: &str = "summary_by_kind.csv";
pub const SUMMARY_BY_CATEGORY_FILE: &str = "summary_by_category.csv";
pub const ENRICHED_OBSERVATIONS_FILE: &str = "observations_enriched.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of a per-group summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub group_label: String,
    pub series_count: usize,
    pub record_count: usize,
}

/// Summarize a partition map into one row per group, in map (sorted) order.
///
/// `series_count` counts distinct series ids inside the subset, not the
/// series declared under the label.
pub fn summarize_partitions(partitions: &BTreeMap<String, Vec<Observation>>) -> Vec<GroupSummary> {
    partitions
        .iter()
        .map(|(label, subset)| {
            let series: HashSet<&str> = subset.iter().map(|obs| obs.series_id.as_str()).collect();
            GroupSummary {
                group_label: label.clone(),
                series_count: series.len(),
                record_count: subset.len(),
            }
        })
        .collect()
}

/// Left-join observations with their series metadata on `series_id`.
///
/// Rows without a metadata match keep absent classification fields; the
/// join never drops a row.
pub fn enrich_observations(
    observations: &[Observation],
    metadata: &[SeriesMetadata],
) -> Vec<EnrichedObservation> {
    let by_id: HashMap<&str, &SeriesMetadata> = metadata
        .iter()
        .map(|m| (m.series_id.as_str(), m))
        .collect();

    observations
        .iter()
        .map(|obs| {
            let meta = by_id.get(obs.series_id.as_str());
            EnrichedObservation {
                series_id: obs.series_id.clone(),
                date: obs.date,
                value: obs.value,
                kind: meta.and_then(|m| m.kind.clone()),
                category: meta.and_then(|m| m.category.clone()),
                unit: meta.and_then(|m| m.unit.clone()),
            }
        })
        .collect()
}

/// Serialize any row table to CSV with a header row.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the CSV artifacts of one run under `dir`, creating it if needed.
///
/// Returns the paths written, for caller-side reporting.
pub fn export_csv_artifacts(
    dir: &Path,
    by_kind: &[GroupSummary],
    by_category: &[GroupSummary],
    enriched: &[EnrichedObservation],
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(3);

    let path = dir.join(SUMMARY_BY_KIND_FILE);
    write_csv(File::create(&path)?, by_kind)?;
    written.push(path);

    let path = dir.join(SUMMARY_BY_CATEGORY_FILE);
    write_csv(File::create(&path)?, by_category)?;
    written.push(path);

    let path = dir.join(ENRICHED_OBSERVATIONS_FILE);
    write_csv(File::create(&path)?, enriched)?;
    written.push(path);

    for path in &written {
        debug!("Wrote {}", path.display());
    }

    Ok(written)
}
