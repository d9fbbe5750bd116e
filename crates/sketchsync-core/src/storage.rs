//! Local sketch snapshots on disk.
//!
//! Clients can save the current mirror as JSON and load it back into a fresh
//! sketch later. The server never persists anything; its store lives and
//! dies with the process.

use crate::sketch::Sketch;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Write a sketch snapshot as pretty-printed JSON.
pub fn save_sketch(path: &Path, sketch: &Sketch) -> StorageResult<()> {
    let json = serde_json::to_string_pretty(sketch)?;
    fs::write(path, json)?;
    log::debug!("saved {} shapes to {}", sketch.len(), path.display());
    Ok(())
}

/// Load a sketch snapshot written by [`save_sketch`].
pub fn load_sketch(path: &Path) -> StorageResult<Sketch> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Command;

    #[test]
    fn test_save_load_roundtrip() {
        let mut sketch = Sketch::new();
        for line in [
            "add 1 1 rectangle 10 10 50 50 -16777216",
            "add 2 2 polyline segment 0 0 5 5 -65536 -65536",
            "delete 1",
        ] {
            line.parse::<Command>().unwrap().apply(&mut sketch);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.json");
        save_sketch(&path, &sketch).unwrap();
        let loaded = load_sketch(&path).unwrap();
        assert_eq!(loaded, sketch);
        assert_eq!(loaded.shape_count(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_sketch(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
