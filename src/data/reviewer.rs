//! Reviewer registry: `data/reviewers/index.json` plus one `<id>.json` record per reviewer.
//! Loaded once per run and read-only afterwards.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::data::json::read_json;
use crate::error::{AuditError, Result};

/// Trimmed, non-empty reviewer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReviewerId(String);

impl ReviewerId {
    /// Returns None when the trimmed value is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }
}

impl Borrow<str> for ReviewerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of the index `reviewers` array: `"alice"` or `{"id": "alice", "order": 1}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IndexEntry {
    Bare(String),
    Object { id: String },
}

impl IndexEntry {
    /// Decode a raw array element; anything that is neither form is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        IndexEntry::deserialize(value).ok()
    }

    pub fn reviewer_id(&self) -> Option<ReviewerId> {
        match self {
            IndexEntry::Bare(id) | IndexEntry::Object { id } => ReviewerId::parse(id),
        }
    }
}

/// Fields of a reviewer record the checks compare against. Non-string values read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerRecord {
    pub display_name: Option<String>,
    pub kind: Option<String>,
}

impl ReviewerRecord {
    fn from_object(object: &serde_json::Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            display_name: text("displayName"),
            kind: text("type"),
        }
    }
}

/// Identifier → record mapping.
#[derive(Debug, Clone, Default)]
pub struct ReviewerRegistry {
    by_id: HashMap<ReviewerId, ReviewerRecord>,
}

impl ReviewerRegistry {
    /// Load the index and every record it names. Fails on the first structural problem.
    pub fn load(index_path: &Path, reviewers_dir: &Path) -> Result<Self> {
        let entries = load_index_entries(index_path)?;

        let mut registry = ReviewerRegistry::default();
        for raw in &entries {
            let id = IndexEntry::from_value(raw)
                .and_then(|entry| entry.reviewer_id())
                .ok_or_else(|| AuditError::InvalidReviewerId {
                    entry: raw.to_string(),
                })?;
            if registry.by_id.contains_key(&id) {
                return Err(AuditError::DuplicateReviewerId {
                    id: id.to_string(),
                });
            }
            let record = load_reviewer_record(reviewers_dir, &id)?;
            debug!(reviewer = %id, "loaded reviewer record");
            registry.by_id.insert(id, record);
        }

        Ok(registry)
    }

    /// Exact lookup: `raw` must equal a normalized index id, surrounding whitespace included.
    pub fn get(&self, raw: &str) -> Option<&ReviewerRecord> {
        self.by_id.get(raw)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Raw `reviewers` array of the index. An absent field reads as an empty registry.
fn load_index_entries(index_path: &Path) -> Result<Vec<Value>> {
    if !index_path.exists() {
        return Err(AuditError::MissingIndex {
            path: index_path.to_path_buf(),
        });
    }

    let payload = read_json(index_path)?;
    let Some(object) = payload.as_object() else {
        return Err(AuditError::InvalidIndex {
            path: index_path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        });
    };

    match object.get("reviewers") {
        None => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries.clone()),
        Some(_) => Err(AuditError::InvalidIndex {
            path: index_path.to_path_buf(),
            reason: "reviewers must be an array".to_string(),
        }),
    }
}

pub fn reviewer_record_path(reviewers_dir: &Path, id: &ReviewerId) -> PathBuf {
    reviewers_dir.join(format!("{}.json", id))
}

/// Load a single reviewer record from `<reviewers_dir>/<id>.json`.
pub fn load_reviewer_record(reviewers_dir: &Path, id: &ReviewerId) -> Result<ReviewerRecord> {
    let path = reviewer_record_path(reviewers_dir, id);
    if !path.exists() {
        return Err(AuditError::MissingReviewerFile {
            id: id.to_string(),
            path,
        });
    }

    let payload = read_json(&path)?;
    match payload.as_object() {
        Some(object) => Ok(ReviewerRecord::from_object(object)),
        None => Err(AuditError::InvalidReviewerFile {
            id: id.to_string(),
            path,
        }),
    }
}
