//! Tier locks: the folder a tasting lives in fixes its `contributor.tier`.

use std::io::Write;

use tracing::info;

use crate::config::{AuditConfig, CONSUMERS_DIR, EXPERTS_DIR};
use crate::data::json::{json_files_under, read_json};
use crate::data::tasting::contributor_tier;
use crate::error::Result;
use crate::validate::{Finding, ScanReport};

/// Tier required by a root-relative path, if the path is inside a locked folder.
pub fn expected_tier(relative: &str) -> Option<&'static str> {
    let anchored = format!("/{relative}");
    if anchored.contains(&format!("/{EXPERTS_DIR}/")) {
        Some("expert")
    } else if anchored.contains(&format!("/{CONSUMERS_DIR}/")) {
        Some("consumer")
    } else {
        None
    }
}

pub fn scan(config: &AuditConfig) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    for path in json_files_under(&config.tastings_dir())? {
        let relative = config.display_relative(&path);
        let document = match read_json(&path) {
            Ok(document) => document,
            Err(err) => {
                report.record(path, vec![Finding::document(format!("JSON parse error: {err}"))]);
                continue;
            }
        };

        let Some(expected) = expected_tier(&relative) else {
            continue;
        };

        report.checked += 1;
        let tier = contributor_tier(&document).trim().to_lowercase();
        let findings = if tier == expected {
            Vec::new()
        } else {
            vec![Finding::new(
                "contributor.tier",
                format!("contributor.tier = '{tier}' expected '{expected}'"),
            )]
        };
        report.record(path, findings);
    }
    Ok(report)
}

/// `FAIL: <relative path>` plus one indented detail line per finding, for failing files only.
pub fn write_failures(
    config: &AuditConfig,
    report: &ScanReport,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    for doc in report.failures() {
        writeln!(out, "FAIL: {}", config.display_relative(&doc.path))?;
        for finding in doc.findings() {
            writeln!(out, "  {}", finding.message)?;
        }
    }
    Ok(())
}

/// Print failing files relative to the root plus the checked count. Exit 1 on any failure.
pub fn run(config: &AuditConfig, out: &mut dyn Write) -> Result<i32> {
    let report = scan(config)?;
    write_failures(config, &report, out)?;
    writeln!(out, "Tier-lock checks: {} file(s)", report.checked)?;
    info!(checked = report.checked, "tier-lock check finished");
    Ok(if report.has_failures() { 1 } else { 0 })
}
