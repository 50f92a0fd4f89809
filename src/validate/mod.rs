//! Per-document validation passes and the report they share.
//!
//! A pass walks a subtree, records one [`DocumentResult`] per document it is
//! responsible for and keeps going after failures. Structural problems that
//! make the corpus uncheckable are returned as [`crate::error::AuditError`]
//! instead and end the pass.

pub mod consumer_scoring;
pub mod links;
pub mod schema;
pub mod tier_lock;

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One violated rule: the field it concerns and what is wrong with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub field: String,
    pub message: String,
}

impl Finding {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Finding about the document as a whole (unreadable, unparseable).
    pub fn document(message: impl Into<String>) -> Self {
        Self::new("(document)", message)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Passed,
    Failed(Vec<Finding>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub status: DocumentStatus,
}

impl DocumentResult {
    pub fn findings(&self) -> &[Finding] {
        match &self.status {
            DocumentStatus::Passed => &[],
            DocumentStatus::Failed(findings) => findings.as_slice(),
        }
    }
}

/// Whether passing documents get an `OK:` line of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Everything,
    FailuresOnly,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub documents: Vec<DocumentResult>,
    /// Documents the pass actually applied its rules to.
    pub checked: usize,
}

impl ScanReport {
    /// Record a document; no findings means it passed.
    pub fn record(&mut self, path: impl Into<PathBuf>, findings: Vec<Finding>) {
        let status = if findings.is_empty() {
            DocumentStatus::Passed
        } else {
            DocumentStatus::Failed(findings)
        };
        self.documents.push(DocumentResult {
            path: path.into(),
            status,
        });
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents
            .iter()
            .filter(|doc| matches!(doc.status, DocumentStatus::Failed(_)))
    }

    pub fn passed(&self) -> usize {
        self.documents
            .iter()
            .filter(|doc| doc.status == DocumentStatus::Passed)
            .count()
    }

    /// `OK:   <path>` per passing document, a blank line plus `FAIL: <path>` and
    /// one `  - field: message` bullet per finding for failing ones.
    pub fn write_documents(
        &self,
        out: &mut dyn Write,
        listing: Listing,
        display: &dyn Fn(&Path) -> String,
    ) -> io::Result<()> {
        for doc in &self.documents {
            match &doc.status {
                DocumentStatus::Passed => {
                    if listing == Listing::Everything {
                        writeln!(out, "OK:   {}", display(&doc.path))?;
                    }
                }
                DocumentStatus::Failed(findings) => {
                    writeln!(out)?;
                    writeln!(out, "FAIL: {}", display(&doc.path))?;
                    for finding in findings {
                        writeln!(out, "  - {finding}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Full path as given, used by passes that print absolute locations.
pub fn display_full(path: &Path) -> String {
    path.display().to_string()
}
