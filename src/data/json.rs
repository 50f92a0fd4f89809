//! JSON file helpers shared by every pass: read one document, list a subtree.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{AuditError, Result};

pub fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|source| AuditError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| AuditError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON (two-space indent, non-ASCII kept as-is) with a trailing newline.
pub fn write_json_pretty(path: &Path, value: &Value) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(value).map_err(|source| AuditError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    payload.push('\n');
    fs::write(path, payload).map_err(|source| AuditError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// All `*.json` files below `dir`, recursively, sorted by path. A missing directory yields none.
pub fn json_files_under(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| AuditError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && has_json_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Top-level `*.json` files in `dir` (no recursion), sorted by path.
pub fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| AuditError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AuditError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && has_json_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
