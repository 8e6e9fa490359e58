use chrono::{Local, NaiveDate};
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{ARCHIVE_BASE_URL, HTTP_TIMEOUT_SECS};
use crate::utils::filename::daily_export_filename;

/// Downloads daily exports from the LCSQA real-time archive, one file per
/// day of the requested range. Files land in the data directory under
/// their archive name; each download goes through a temp file so a failed
/// transfer never leaves a truncated export behind.
pub struct ExportDownloader {
    client: Client,
    base_url: String,
}

impl ExportDownloader {
    pub fn new() -> Self {
        Self::with_base_url(ARCHIVE_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
        }
    }

    /// Download every day of `[begin, end]` (end defaults to begin) and
    /// return the local paths in date order.
    pub async fn fetch_range(
        &self,
        begin: NaiveDate,
        end: Option<NaiveDate>,
        data_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let end = end.unwrap_or(begin);
        Self::check_range(begin, end)?;

        std::fs::create_dir_all(data_dir)?;

        let mut paths = Vec::new();
        let mut current = begin;
        while current <= end {
            paths.push(self.fetch_day(current, data_dir).await?);
            current = current
                .succ_opt()
                .ok_or_else(|| ProcessingError::DateRange(format!("date overflow after {}", current)))?;
        }

        Ok(paths)
    }

    /// Download a single day's export into the data directory.
    pub async fn fetch_day(&self, date: NaiveDate, data_dir: &Path) -> Result<PathBuf> {
        let file_name = daily_export_filename(date);
        let url = self.export_url(date);

        debug!("Downloading export: {}", url);
        let bytes = self.download(&url).await?;

        let target = data_dir.join(&file_name);
        let mut temp_file = NamedTempFile::new_in(data_dir)?;
        temp_file.write_all(&bytes)?;
        temp_file
            .persist(&target)
            .map_err(|e| ProcessingError::Io(e.error))?;

        info!("Downloaded {} ({} bytes)", file_name, bytes.len());
        Ok(target)
    }

    /// Archive URL for one day: `{base}/{year}/FR_E2_{date}.csv`
    fn export_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            date.format("%Y"),
            daily_export_filename(date)
        )
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(ProcessingError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }

    fn check_range(begin: NaiveDate, end: NaiveDate) -> Result<()> {
        if begin > end {
            return Err(ProcessingError::DateRange(format!(
                "begin date {} is after end date {}",
                begin, end
            )));
        }

        let today = Local::now().date_naive();
        if end > today {
            return Err(ProcessingError::DateRange(format!(
                "end date {} is in the future",
                end
            )));
        }

        Ok(())
    }
}

impl Default for ExportDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_export_url() {
        let downloader = ExportDownloader::with_base_url("https://archive.example/exports");
        assert_eq!(
            downloader.export_url(date(2022, 9, 15)),
            "https://archive.example/exports/2022/FR_E2_2022-09-15.csv"
        );
    }

    #[test]
    fn test_range_rejects_inverted_dates() {
        let result = ExportDownloader::check_range(date(2022, 9, 20), date(2022, 9, 15));
        assert!(matches!(result, Err(ProcessingError::DateRange(_))));
    }

    #[test]
    fn test_range_rejects_future_dates() {
        let tomorrow = Local::now().date_naive().succ_opt().unwrap();
        let result = ExportDownloader::check_range(tomorrow, tomorrow);
        assert!(matches!(result, Err(ProcessingError::DateRange(_))));
    }

    #[test]
    fn test_range_accepts_single_past_day() {
        assert!(ExportDownloader::check_range(date(2022, 9, 15), date(2022, 9, 15)).is_ok());
    }
}
