//! Native delivery of the export: write-then-rename into the export directory.
//!
//! The CSV is written to `{name}.tmp`, flushed with `sync_all()`, then renamed
//! over the final name, so an earlier export is never left half-overwritten.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use coverage::config::EXPORT_DIR_ENV;

/// Directory exports are written into: `COVERAGE_EXPORT_DIR`, else the
/// working directory.
pub fn export_dir() -> PathBuf {
    std::env::var_os(EXPORT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes `data` to `dir/file_name` atomically and returns the final path.
pub fn write_export(dir: &Path, file_name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let final_path = dir.join(file_name);
    let tmp_path = dir.join(format!("{file_name}.tmp"));

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, &final_path)?;

    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a unique temp directory for each test.
    fn test_dir(name: &str) -> PathBuf {
        let dir = PathBuf::from(format!("/tmp/coverage_map_export_test_{}", name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_write_export_creates_dir_and_file() {
        let dir = test_dir("creates");
        let path = write_export(&dir, "out.csv", b"Area\n").unwrap();

        assert_eq!(path, dir.join("out.csv"));
        assert_eq!(fs::read(&path).unwrap(), b"Area\n");
        assert!(!dir.join("out.csv.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_export_overwrites_previous() {
        let dir = test_dir("overwrites");
        write_export(&dir, "out.csv", b"first").unwrap();
        let path = write_export(&dir, "out.csv", b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");

        let _ = fs::remove_dir_all(&dir);
    }
}
