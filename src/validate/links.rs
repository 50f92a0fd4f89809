//! Tasting → reviewer link check.
//!
//! Every expert tasting that declares `contributor.id` must point at a reviewer
//! in the registry, and its `name`/`tier` must agree with that reviewer's
//! `displayName`/`type` when both sides carry a value.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{AuditConfig, REVIEWERS_INDEX_PATH};
use crate::data::json::{json_files_under, read_json};
use crate::data::reviewer::ReviewerRegistry;
use crate::data::tasting::{contributor_eligibility, non_blank, ContributorClaim, Eligibility};
use crate::error::Result;
use crate::validate::{display_full, Finding, Listing, ScanReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkViolation {
    InvalidId,
    UnknownReviewer {
        id: String,
    },
    NameMismatch {
        claimed: String,
        expected: String,
        id: String,
    },
    TierMismatch {
        claimed: String,
        expected: String,
        id: String,
    },
}

impl LinkViolation {
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId | Self::UnknownReviewer { .. } => "contributor.id",
            Self::NameMismatch { .. } => "contributor.name",
            Self::TierMismatch { .. } => "contributor.tier",
        }
    }
}

impl fmt::Display for LinkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "must be a non-empty string"),
            Self::UnknownReviewer { id } => {
                write!(f, "'{id}' not found in {REVIEWERS_INDEX_PATH}")
            }
            Self::NameMismatch {
                claimed,
                expected,
                id,
            } => write!(
                f,
                "'{claimed}' does not match reviewer.displayName '{expected}' for id '{id}'"
            ),
            Self::TierMismatch {
                claimed,
                expected,
                id,
            } => write!(
                f,
                "'{claimed}' does not match reviewer.type '{expected}' for id '{id}'"
            ),
        }
    }
}

impl From<LinkViolation> for Finding {
    fn from(violation: LinkViolation) -> Self {
        Finding::new(violation.field(), violation.to_string())
    }
}

/// Every rule the claim breaks. Name and tier are judged independently of each other.
pub fn check_claim(claim: &ContributorClaim, registry: &ReviewerRegistry) -> Vec<LinkViolation> {
    let Some(id) = claim.id_str() else {
        return vec![LinkViolation::InvalidId];
    };
    let Some(reviewer) = registry.get(id) else {
        return vec![LinkViolation::UnknownReviewer { id: id.to_string() }];
    };

    let mut violations = Vec::new();
    if let Some((claimed, expected)) =
        mismatch(claim.name.as_deref(), reviewer.display_name.as_deref())
    {
        violations.push(LinkViolation::NameMismatch {
            claimed,
            expected,
            id: id.to_string(),
        });
    }
    if let Some((claimed, expected)) = mismatch(claim.tier.as_deref(), reviewer.kind.as_deref()) {
        violations.push(LinkViolation::TierMismatch {
            claimed,
            expected,
            id: id.to_string(),
        });
    }
    violations
}

/// Both sides present and non-blank, yet different after trimming.
fn mismatch(claimed: Option<&str>, expected: Option<&str>) -> Option<(String, String)> {
    let claimed = non_blank(claimed)?;
    let expected = non_blank(expected)?;
    (claimed.trim() != expected.trim()).then(|| (claimed.to_string(), expected.to_string()))
}

#[derive(Debug, Clone)]
pub enum LinkScan {
    /// The experts subtree holds no JSON files at all.
    NoDocuments { experts_dir: PathBuf },
    Scanned(ScanReport),
}

pub fn scan_experts(experts_dir: &Path, registry: &ReviewerRegistry) -> Result<LinkScan> {
    let files = json_files_under(experts_dir)?;
    if files.is_empty() {
        return Ok(LinkScan::NoDocuments {
            experts_dir: experts_dir.to_path_buf(),
        });
    }

    let mut report = ScanReport::default();
    for path in files {
        let document = match read_json(&path) {
            Ok(document) => document,
            Err(err) => {
                report.record(path, vec![Finding::document(err.to_string())]);
                continue;
            }
        };

        let claim = match contributor_eligibility(&document) {
            Eligibility::NoContributor | Eligibility::NoContributorId => {
                debug!(path = %path.display(), "no contributor id, skipping");
                continue;
            }
            Eligibility::Eligible(claim) => claim,
        };

        report.checked += 1;
        let findings = check_claim(&claim, registry)
            .into_iter()
            .map(Finding::from)
            .collect();
        report.record(path, findings);
    }

    Ok(LinkScan::Scanned(report))
}

/// Load the registry, scan the experts subtree and print the outcome. Returns the exit code.
pub fn run(config: &AuditConfig, out: &mut dyn Write) -> Result<i32> {
    let registry = ReviewerRegistry::load(&config.reviewers_index(), &config.reviewers_dir())?;
    info!(reviewers = registry.len(), "reviewer registry loaded");

    let report = match scan_experts(&config.experts_dir(), &registry)? {
        LinkScan::NoDocuments { experts_dir } => {
            writeln!(
                out,
                "No tasting JSON files found under {}",
                experts_dir.display()
            )?;
            return Ok(0);
        }
        LinkScan::Scanned(report) => report,
    };

    report.write_documents(out, Listing::Everything, &display_full)?;
    if report.has_failures() {
        info!(failed = report.failures().count(), "tasting->reviewer link check failed");
        return Ok(2);
    }

    writeln!(out)?;
    writeln!(
        out,
        "Tasting->reviewer link checks: {} file(s)",
        report.checked
    )?;
    Ok(0)
}
