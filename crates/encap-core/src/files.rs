//! File I/O helpers for reading source files and writing results in place.
//!
//! Writes go through a temp-file-and-rename sequence so a crash mid-write
//! never leaves a half-written source file behind.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::EncapError;

// ============================================================================
// Reading
// ============================================================================

/// Read a source file into a string.
///
/// Wraps the underlying I/O error with the offending path so callers can
/// report it without tracking the path themselves.
pub fn read_source(path: &Path) -> Result<String, EncapError> {
    fs::read_to_string(path).map_err(|source| EncapError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Atomic File Operations
// ============================================================================

/// Write content to a file atomically using temp + rename.
///
/// This ensures readers see either old or new content, never partial writes.
/// If the process crashes:
/// - Before rename: temp file is orphaned (harmless)
/// - After rename: write completed successfully
///
/// The temp file name includes PID and timestamp to prevent collisions when
/// multiple processes write to the same file concurrently.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), EncapError> {
    atomic_write_impl(path, content.as_bytes()).map_err(|source| EncapError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn atomic_write_impl(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let pid = std::process::id();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    let temp_path = path.with_file_name(format!(
        ".{}.{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        pid,
        timestamp
    ));
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_source_reports_path() {
        let err = read_source(Path::new("/nonexistent/encap-test-file.go")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/encap-test-file.go"), "got: {msg}");
    }

    #[test]
    fn atomic_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.go");
        atomic_write(&path, "package main\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "package main\n");
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.go");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, "new contents\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents\n");
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.go");
        atomic_write(&path, "contents").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1, "temp file left behind: {entries:?}");
    }

    #[test]
    fn atomic_write_to_missing_dir_fails() {
        let err = atomic_write(Path::new("/nonexistent/dir/out.go"), "x").unwrap_err();
        assert!(matches!(err, EncapError::WriteFailed { .. }));
    }
}
