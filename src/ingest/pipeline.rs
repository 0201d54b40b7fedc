//! Assembly of scanned candidates into the final relational tables.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::ingest::scanner::{self, NamedSheet, SheetScan};
use crate::ingest::IngestError;
use crate::model::{Observation, SeriesMetadata, SeriesModel};

/// Concatenate metadata candidates across sheets, keeping only records that
/// carry both classification axes. Series ids are unique by construction,
/// so first-seen order is the only order.
pub fn assemble_metadata(scans: &[SheetScan]) -> Vec<SeriesMetadata> {
    scans
        .iter()
        .flat_map(|scan| scan.series.iter())
        .filter(|record| record.kind.is_some() && record.category.is_some())
        .cloned()
        .collect()
}

/// Concatenate observation candidates across sheets, hard-dropping rows
/// whose date never parsed. Absent values stay: a hole is data, a missing
/// date is not.
pub fn assemble_observations(scans: &[SheetScan]) -> Vec<Observation> {
    scans
        .iter()
        .flat_map(|scan| scan.observations.iter())
        .filter(|obs| obs.date.is_some())
        .cloned()
        .collect()
}

/// Restrict both tables to series that are realized: declared in the
/// metadata table and backed by at least one present value.
///
/// The intersection with the metadata ids matters: a series whose
/// metadata failed the mandatory-field check can still have values, and
/// its observations must not survive as orphans.
pub fn filter_realized(
    metadata: &[SeriesMetadata],
    observations: &[Observation],
) -> (Vec<SeriesMetadata>, Vec<Observation>) {
    let declared: HashSet<&str> = metadata.iter().map(|m| m.series_id.as_str()).collect();

    let realized: HashSet<&str> = observations
        .iter()
        .filter(|obs| obs.value.is_some())
        .map(|obs| obs.series_id.as_str())
        .filter(|id| declared.contains(id))
        .collect();

    let metadata = metadata
        .iter()
        .filter(|m| realized.contains(m.series_id.as_str()))
        .cloned()
        .collect();
    let observations = observations
        .iter()
        .filter(|obs| realized.contains(obs.series_id.as_str()))
        .cloned()
        .collect();

    (metadata, observations)
}

/// Run the full assembly over already-loaded sheet grids.
pub fn assemble_model(sheets: &[NamedSheet]) -> SeriesModel {
    let scans: Vec<SheetScan> = sheets.iter().map(scanner::scan_sheet).collect();

    let metadata = assemble_metadata(&scans);
    let observations = assemble_observations(&scans);
    let (metadata, observations) = filter_realized(&metadata, &observations);

    SeriesModel {
        metadata,
        observations,
    }
}

/// Ingest the workbook at `path` into the series model.
pub fn build_model(path: &Path) -> Result<SeriesModel, IngestError> {
    let sheets = scanner::load_sheets(path)?;
    let model = assemble_model(&sheets);

    info!(
        "Ingested {}: {} series, {} observations",
        path.display(),
        model.metadata.len(),
        model.observations.len()
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta(id: &str, kind: Option<&str>, category: Option<&str>) -> SeriesMetadata {
        SeriesMetadata {
            kind: kind.map(str::to_string),
            category: category.map(str::to_string),
            ..SeriesMetadata::new(id, "Hoja")
        }
    }

    fn obs(id: &str, day: Option<u32>, value: Option<f64>) -> Observation {
        Observation {
            series_id: id.to_string(),
            date: day.and_then(|d| NaiveDate::from_ymd_opt(2023, 1, d)),
            value,
        }
    }

    #[test]
    fn test_assemble_metadata_requires_both_axes() {
        let scans = vec![SheetScan {
            series: vec![
                meta("Hoja__col0", None, None),
                meta("Hoja__col1", Some("Economico"), Some("PIB")),
                meta("Hoja__col2", Some("Economico"), None),
                meta("Hoja__col3", None, Some("Empleo")),
            ],
            observations: vec![],
        }];
        let assembled = assemble_metadata(&scans);
        assert_eq!(assembled.len(), 1);
        assert_eq!(assembled[0].series_id, "Hoja__col1");
    }

    #[test]
    fn test_assemble_observations_drops_dateless_rows() {
        let scans = vec![SheetScan {
            series: vec![],
            observations: vec![
                obs("Hoja__col1", Some(1), Some(1.0)),
                obs("Hoja__col1", None, Some(2.0)),
                obs("Hoja__col1", Some(3), None),
            ],
        }];
        let assembled = assemble_observations(&scans);
        assert_eq!(assembled.len(), 2);
        // the value hole survives, the dateless row does not
        assert!(assembled.iter().all(|o| o.date.is_some()));
        assert!(assembled.iter().any(|o| o.value.is_none()));
    }

    #[test]
    fn test_filter_realized_drops_dead_metadata() {
        let metadata = vec![
            meta("Hoja__col1", Some("Economico"), Some("PIB")),
            meta("Hoja__col2", Some("Social"), Some("Empleo")),
        ];
        // col2 only ever has holes
        let observations = vec![
            obs("Hoja__col1", Some(1), Some(10.0)),
            obs("Hoja__col2", Some(1), None),
            obs("Hoja__col2", Some(2), None),
        ];
        let (metadata, observations) = filter_realized(&metadata, &observations);
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].series_id, "Hoja__col1");
        assert!(observations
            .iter()
            .all(|o| o.series_id == "Hoja__col1"));
    }

    #[test]
    fn test_filter_realized_excludes_orphan_observations() {
        // col9 has values but never passed the metadata invariant
        let metadata = vec![meta("Hoja__col1", Some("Economico"), Some("PIB"))];
        let observations = vec![
            obs("Hoja__col1", Some(1), Some(10.0)),
            obs("Hoja__col9", Some(1), Some(99.0)),
        ];
        let (metadata, observations) = filter_realized(&metadata, &observations);
        assert_eq!(metadata.len(), 1);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].series_id, "Hoja__col1");
    }

    #[test]
    fn test_filter_realized_leaves_inputs_untouched() {
        let metadata = vec![meta("Hoja__col1", Some("Economico"), Some("PIB"))];
        let observations = vec![obs("Hoja__col1", Some(1), None)];
        let before = (metadata.clone(), observations.clone());

        let (filtered_meta, filtered_obs) = filter_realized(&metadata, &observations);
        assert!(filtered_meta.is_empty());
        assert!(filtered_obs.is_empty());
        assert_eq!(before, (metadata, observations));
    }
}
