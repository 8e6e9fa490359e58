use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::utils::filename::is_raw_export;

/// Remove the raw daily exports from the data directory once their reports
/// exist. Processed reports and every other file are left alone.
pub fn remove_raw_exports(data_dir: &Path) -> Result<usize> {
    let mut removed = 0;

    for entry in std::fs::read_dir(data_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        if is_raw_export(name) {
            std::fs::remove_file(entry.path())?;
            debug!("Removed raw export {}", name);
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_removes_only_raw_exports() -> Result<()> {
        let dir = TempDir::new()?;
        let raw = dir.path().join("FR_E2_2022-09-15.csv");
        let processed = dir.path().join("FR_E2_2022-09-15_processed.csv");
        let registry = dir.path().join("stations_coords.csv");
        File::create(&raw)?;
        File::create(&processed)?;
        File::create(&registry)?;

        let removed = remove_raw_exports(dir.path())?;

        assert_eq!(removed, 1);
        assert!(!raw.exists());
        assert!(processed.exists());
        assert!(registry.exists());

        Ok(())
    }

    #[test]
    fn test_empty_directory_is_fine() -> Result<()> {
        let dir = TempDir::new()?;
        assert_eq!(remove_raw_exports(dir.path())?, 0);
        Ok(())
    }
}
