//! Backfill `source.original_text` of expert tastings from LinkedIn post screenshots.
//!
//! Layout: `public/sources/linkedin/<author>/**/<slug>/post-text.jpg` maps to
//! `data/tastings/experts/<author>/<slug>.json`. The cleaned text is also kept
//! next to the screenshot as `post-text.ocr.txt` for manual correction.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::AuditConfig;
use crate::data::json::{read_json, write_json_pretty};
use crate::error::{AuditError, Result};
use crate::ocr::OcrEngine;

pub const POST_IMAGE: &str = "post-text.jpg";
pub const POST_TEXT: &str = "post-text.ocr.txt";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    pub updated: usize,
}

/// Normalize raw OCR output: no carriage returns, no trailing blanks on lines,
/// at most one empty line in a row, trimmed.
pub fn clean_text(raw: &str) -> String {
    static TRAILING_BLANKS: OnceLock<Regex> = OnceLock::new();
    static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
    let trailing = TRAILING_BLANKS.get_or_init(|| Regex::new(r"[ \t]+\n").expect("valid regex"));
    let runs = BLANK_RUNS.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"));

    let text = raw.replace('\r', "");
    let text = trailing.replace_all(&text, "\n");
    let text = runs.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Directories below `sources_dir` that hold a post screenshot, sorted by path.
pub fn find_post_dirs(sources_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(sources_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| AuditError::Walk {
            path: sources_dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() && entry.path().join(POST_IMAGE).is_file() {
            dirs.push(entry.into_path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Set `source.original_text`, creating `source` when absent. Other keys keep their order.
pub fn set_original_text(path: &Path, document: &mut Value, text: &str) -> Result<()> {
    let invalid = |reason: &str| AuditError::InvalidTasting {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let object = document
        .as_object_mut()
        .ok_or_else(|| invalid("expected a JSON object"))?;
    let source = object
        .entry("source")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| invalid("source must be an object"))?;
    source.insert("original_text".to_string(), Value::String(text.to_string()));
    Ok(())
}

/// Returns false when there is no tasting document for the post.
pub fn update_tasting(json_path: &Path, text: &str) -> Result<bool> {
    if !json_path.exists() {
        return Ok(false);
    }
    let mut document = read_json(json_path)?;
    set_original_text(json_path, &mut document, text)?;
    write_json_pretty(json_path, &document)?;
    Ok(true)
}

/// OCR every post of `author` and write the text back. Returns the exit code.
pub fn run_backfill(
    config: &AuditConfig,
    author: &str,
    engine: &mut dyn OcrEngine,
    out: &mut dyn Write,
) -> Result<i32> {
    let sources = config.linkedin_sources(author);
    if !sources.is_dir() {
        writeln!(out, "Missing: {}", sources.display())?;
        return Ok(1);
    }

    let tastings = config.expert_tastings(author);
    let mut summary = BackfillSummary::default();

    for dir in find_post_dirs(&sources)? {
        let image = dir.join(POST_IMAGE);
        let Some(slug) = dir.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        let text = match engine.extract_text(&image) {
            Ok(raw) => clean_text(&raw),
            Err(err) => {
                warn!(image = %image.display(), error = %err, "ocr failed");
                writeln!(out, "FAIL OCR: {} :: {err}", image.display())?;
                continue;
            }
        };
        if text.is_empty() {
            writeln!(out, "EMPTY OCR: {}", image.display())?;
            continue;
        }

        let text_path = dir.join(POST_TEXT);
        fs::write(&text_path, format!("{text}\n")).map_err(|source| AuditError::Write {
            path: text_path.clone(),
            source,
        })?;
        writeln!(out, "WROTE TXT:   {}", text_path.display())?;

        let json_path = tastings.join(format!("{slug}.json"));
        match update_tasting(&json_path, &text) {
            Ok(true) => writeln!(out, "UPDATED JSON: {}", json_path.display())?,
            Ok(false) => writeln!(out, "SKIP (no JSON): {}", json_path.display())?,
            Err(err) => {
                warn!(path = %json_path.display(), error = %err, "tasting update failed");
                writeln!(out, "FAIL JSON: {} :: {err}", json_path.display())?;
                continue;
            }
        }
        summary.updated += 1;
    }

    info!(updated = summary.updated, author, "ocr backfill finished");
    writeln!(out)?;
    writeln!(out, "Done. Updated {} post(s).", summary.updated)?;
    Ok(0)
}
