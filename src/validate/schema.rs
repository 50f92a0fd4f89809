//! JSON Schema passes: tasting documents against `schema/tasting.schema.json`,
//! reviewer records against `data/schemas/reviewer.schema.json`.

use std::io::Write;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use tracing::info;

use crate::config::AuditConfig;
use crate::data::json::{json_files_in, json_files_under, read_json};
use crate::error::{AuditError, Result};
use crate::validate::{display_full, Finding, Listing, ScanReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draft {
    /// Whatever `$schema` declares, 2020-12 when it declares nothing.
    Detect,
    Draft202012,
}

pub fn compile_schema(path: &Path, draft: Draft) -> Result<Validator> {
    if !path.exists() {
        return Err(AuditError::MissingSchema {
            path: path.to_path_buf(),
        });
    }
    let schema = read_json(path)?;
    let compiled = match draft {
        Draft::Detect => jsonschema::validator_for(&schema),
        Draft::Draft202012 => jsonschema::draft202012::new(&schema),
    };
    compiled.map_err(|err| AuditError::InvalidSchema {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// All schema errors for one instance, ordered by instance path.
pub fn schema_findings(validator: &Validator, instance: &Value) -> Vec<Finding> {
    let mut findings: Vec<(Vec<PathSegment>, Finding)> = validator
        .iter_errors(instance)
        .map(|err| {
            let pointer = err.instance_path.to_string();
            let finding = Finding::new(dotted_path(&pointer), err.to_string());
            (path_key(&pointer), finding)
        })
        .collect();
    findings.sort_by(|a, b| a.0.cmp(&b.0));
    findings.into_iter().map(|(_, finding)| finding).collect()
}

/// One step of an instance path. Array indices sort numerically and before keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PathSegment {
    Index(u64),
    Key(String),
}

fn path_key(pointer: &str) -> Vec<PathSegment> {
    pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.parse() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Key(segment.replace("~1", "/").replace("~0", "~")),
        })
        .collect()
}

/// `/whisky/abv_percent` → `whisky.abv_percent`; the empty pointer is `(root)`.
fn dotted_path(pointer: &str) -> String {
    let dotted = pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".");
    if dotted.is_empty() {
        "(root)".to_string()
    } else {
        dotted
    }
}

fn validate_files(validator: &Validator, files: Vec<std::path::PathBuf>) -> ScanReport {
    let mut report = ScanReport::default();
    for path in files {
        let findings = match read_json(&path) {
            Ok(instance) => schema_findings(validator, &instance),
            Err(err) => vec![Finding::document(err.to_string())],
        };
        report.checked += 1;
        report.record(path, findings);
    }
    report
}

/// Validate every tasting document. Returns the exit code.
pub fn run_tastings(config: &AuditConfig, out: &mut dyn Write) -> Result<i32> {
    let validator = compile_schema(&config.tasting_schema(), Draft::Draft202012)?;

    let tastings_dir = config.tastings_dir();
    let files = json_files_under(&tastings_dir)?;
    if files.is_empty() {
        writeln!(out, "No JSON files found under {}", tastings_dir.display())?;
        return Ok(0);
    }

    let report = validate_files(&validator, files);
    report.write_documents(out, Listing::Everything, &display_full)?;
    info!(checked = report.checked, "tasting schema validation finished");
    if report.has_failures() {
        return Ok(2);
    }

    writeln!(out)?;
    writeln!(out, "All files passed schema validation.")?;
    Ok(0)
}

/// Validate every reviewer record (top-level files of the reviewers dir, index excluded).
pub fn run_reviewers(config: &AuditConfig, out: &mut dyn Write) -> Result<i32> {
    let validator = compile_schema(&config.reviewer_schema(), Draft::Detect)?;

    let reviewers_dir = config.reviewers_dir();
    if !reviewers_dir.is_dir() {
        return Err(AuditError::MissingDirectory {
            path: reviewers_dir,
        });
    }

    let files: Vec<_> = json_files_in(&reviewers_dir)?
        .into_iter()
        .filter(|path| path.file_name().and_then(|n| n.to_str()) != Some("index.json"))
        .collect();
    if files.is_empty() {
        return Err(AuditError::NoReviewerFiles { dir: reviewers_dir });
    }

    let report = validate_files(&validator, files);
    report.write_documents(out, Listing::Everything, &display_full)?;
    info!(checked = report.checked, "reviewer schema validation finished");
    if report.has_failures() {
        return Ok(2);
    }

    writeln!(out)?;
    writeln!(out, "Reviewer checks: {} file(s)", report.passed())?;
    Ok(0)
}
