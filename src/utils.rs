/// Shared helper functions for the series ingestion crate.
///
/// Split a series id back into its sheet name and column index.
///
/// Ids are minted as `"<sheet>__col<idx>"`. The split uses the last marker
/// occurrence, so a sheet name that itself contains `__col` still
/// round-trips.
///
/// # Examples
///
/// ```
/// use series_ingest::utils::split_series_id;
///
/// assert_eq!(split_series_id("Hoja1__col3"), Some(("Hoja1", 3)));
/// assert_eq!(split_series_id("Datos__2023__col12"), Some(("Datos__2023", 12)));
/// assert_eq!(split_series_id("sin_marcador"), None);
/// ```
pub fn split_series_id(series_id: &str) -> Option<(&str, usize)> {
    use crate::ingest::layout::SERIES_ID_COLUMN_MARKER;

    let marker_at = series_id.rfind(SERIES_ID_COLUMN_MARKER)?;
    let (sheet, rest) = series_id.split_at(marker_at);
    let column = rest[SERIES_ID_COLUMN_MARKER.len()..].parse().ok()?;

    if sheet.is_empty() {
        return None;
    }
    Some((sheet, column))
}
