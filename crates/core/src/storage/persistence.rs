//! Whole-file JSON persistence for record collections.
//!
//! Each collection lives in one pretty-printed JSON array. Every write
//! replaces the entire file: the array is written to `<file>.tmp` and renamed
//! over the target, so a reader never sees a half-written file.

use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read every record from `path`.
///
/// A missing file is an empty collection. Any other I/O failure or malformed
/// JSON is returned as an error.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No collection file at {:?}, starting empty", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let records: Vec<T> =
        serde_json::from_slice(&raw).map_err(|e| StoreError::json(path, e))?;
    tracing::info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Replace the contents of `path` with `records`, creating the parent
/// directory if needed.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    }

    let bytes = serde_json::to_vec_pretty(records).map_err(|e| StoreError::json(path, e))?;
    let tmp_path = tmp_path_for(path);

    fs::write(&tmp_path, &bytes).map_err(|e| StoreError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))?;

    tracing::debug!(
        "Saved {} records to {:?} ({} bytes)",
        records.len(),
        path,
        bytes.len()
    );
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        n: i64,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "a".into(),
                n: 1,
            },
            Item {
                name: "b".into(),
                n: 2,
            },
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded: Vec<Item> = read_records(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        write_records(&path, &items()).unwrap();
        let loaded: Vec<Item> = read_records(&path).unwrap();
        assert_eq!(loaded, items());
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("items.json");
        write_records(&path, &items()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        write_records(&path, &items()).unwrap();
        assert!(!dir.path().join("items.json.tmp").exists());
    }

    #[test]
    fn test_write_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        write_records(&path, &items()).unwrap();
        write_records(&path, &items()[..1]).unwrap();
        let loaded: Vec<Item> = read_records(&path).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_written_file_is_pretty_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        write_records(&path, &items()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, b"{ not json").unwrap();
        let err = read_records::<Item>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn test_directory_in_place_of_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        fs::create_dir(&path).unwrap();
        let err = read_records::<Item>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
