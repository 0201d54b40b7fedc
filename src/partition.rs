//! Per-classification partitioning of the observation table.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::model::{Observation, SeriesMetadata};

/// Group observations by the kind declared on their series.
///
/// Keys are the distinct non-absent kinds in the metadata table; map order
/// is sorted. Each subset is an independent copy.
pub fn partition_by_kind(
    metadata: &[SeriesMetadata],
    observations: &[Observation],
) -> BTreeMap<String, Vec<Observation>> {
    partition_by(metadata, observations, |m| m.kind.as_deref())
}

/// Group observations by the category declared on their series.
pub fn partition_by_category(
    metadata: &[SeriesMetadata],
    observations: &[Observation],
) -> BTreeMap<String, Vec<Observation>> {
    partition_by(metadata, observations, |m| m.category.as_deref())
}

fn partition_by<'a, F>(
    metadata: &'a [SeriesMetadata],
    observations: &[Observation],
    axis: F,
) -> BTreeMap<String, Vec<Observation>>
where
    F: Fn(&'a SeriesMetadata) -> Option<&'a str>,
{
    let labels: BTreeSet<&str> = metadata.iter().filter_map(&axis).collect();

    let mut partitions = BTreeMap::new();
    for label in labels {
        let ids: HashSet<&str> = metadata
            .iter()
            .filter(|m| axis(m) == Some(label))
            .map(|m| m.series_id.as_str())
            .collect();
        let subset: Vec<Observation> = observations
            .iter()
            .filter(|obs| ids.contains(obs.series_id.as_str()))
            .cloned()
            .collect();
        partitions.insert(label.to_string(), subset);
    }

    partitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta(id: &str, kind: &str, category: &str) -> SeriesMetadata {
        SeriesMetadata {
            kind: Some(kind.to_string()),
            category: Some(category.to_string()),
            ..SeriesMetadata::new(id, "Hoja")
        }
    }

    fn obs(id: &str, day: u32) -> Observation {
        Observation {
            series_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, day),
            value: Some(1.0),
        }
    }

    #[test]
    fn test_partition_keys_are_sorted_distinct_kinds() {
        let metadata = vec![
            meta("a__col1", "Social", "Empleo"),
            meta("a__col2", "Economico", "PIB"),
            meta("a__col3", "Economico", "Inflacion"),
        ];
        let observations = vec![obs("a__col1", 1), obs("a__col2", 1), obs("a__col3", 1)];

        let by_kind = partition_by_kind(&metadata, &observations);
        let keys: Vec<&String> = by_kind.keys().collect();
        assert_eq!(keys, vec!["Economico", "Social"]);
        assert_eq!(by_kind["Economico"].len(), 2);
        assert_eq!(by_kind["Social"].len(), 1);
    }

    #[test]
    fn test_partition_subsets_are_copies() {
        let metadata = vec![meta("a__col1", "Social", "Empleo")];
        let observations = vec![obs("a__col1", 1)];

        let mut by_kind = partition_by_kind(&metadata, &observations);
        by_kind.get_mut("Social").unwrap().clear();
        // the source table is untouched by mutation of a subset
        assert_eq!(observations.len(), 1);
    }

    #[test]
    fn test_partition_ignores_unclassified_series() {
        let metadata = vec![
            meta("a__col1", "Social", "Empleo"),
            SeriesMetadata::new("a__col2", "Hoja"),
        ];
        let observations = vec![obs("a__col1", 1), obs("a__col2", 1)];

        let by_kind = partition_by_kind(&metadata, &observations);
        assert_eq!(by_kind.len(), 1);
        assert!(by_kind["Social"]
            .iter()
            .all(|o| o.series_id == "a__col1"));
    }
}
