use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::utils::constants::{DAILY_EXPORT_PREFIX, PROCESSED_SUFFIX};

/// Name of the daily export file for a given date: FR_E2_{YYYY-MM-DD}.csv
pub fn daily_export_filename(date: NaiveDate) -> String {
    format!("{}{}.csv", DAILY_EXPORT_PREFIX, date.format("%Y-%m-%d"))
}

/// Sibling path of an input file with the `_processed` suffix inserted
/// before the extension: `data/FR_E2_2022-09-15.csv` ->
/// `data/FR_E2_2022-09-15_processed.csv`
pub fn processed_sibling(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let extension = input.extension().and_then(|s| s.to_str()).unwrap_or("csv");

    let file_name = format!("{}{}.{}", stem, PROCESSED_SUFFIX, extension);
    input.with_file_name(file_name)
}

/// Whether a file name matches a raw daily export (and not a processed
/// report), i.e. `FR_E2_*.csv` without the `_processed` suffix.
pub fn is_raw_export(file_name: &str) -> bool {
    file_name.starts_with(DAILY_EXPORT_PREFIX)
        && file_name.ends_with(".csv")
        && !file_name.contains(PROCESSED_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_export_filename() {
        let date = NaiveDate::from_ymd_opt(2022, 9, 15).unwrap();
        assert_eq!(daily_export_filename(date), "FR_E2_2022-09-15.csv");
    }

    #[test]
    fn test_processed_sibling() {
        let input = Path::new("data/FR_E2_2022-09-15.csv");
        assert_eq!(
            processed_sibling(input),
            PathBuf::from("data/FR_E2_2022-09-15_processed.csv")
        );
    }

    #[test]
    fn test_processed_sibling_without_directory() {
        let input = Path::new("export.csv");
        assert_eq!(processed_sibling(input), PathBuf::from("export_processed.csv"));
    }

    #[test]
    fn test_is_raw_export() {
        assert!(is_raw_export("FR_E2_2022-09-15.csv"));
        assert!(!is_raw_export("FR_E2_2022-09-15_processed.csv"));
        assert!(!is_raw_export("stations_coords.csv"));
        assert!(!is_raw_export("FR_E2_2022-09-15.txt"));
    }
}
