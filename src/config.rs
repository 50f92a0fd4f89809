//! Corpus layout: every path a pass touches, derived from one explicit root.

use std::path::{Path, PathBuf};

pub const REVIEWERS_DIR: &str = "data/reviewers";
pub const REVIEWERS_INDEX_PATH: &str = "data/reviewers/index.json";
pub const REVIEWER_SCHEMA_PATH: &str = "data/schemas/reviewer.schema.json";
pub const TASTINGS_DIR: &str = "data/tastings";
pub const EXPERTS_DIR: &str = "data/tastings/experts";
pub const CONSUMERS_DIR: &str = "data/tastings/consumers";
pub const TASTING_SCHEMA_PATH: &str = "schema/tasting.schema.json";
pub const LINKEDIN_SOURCES_DIR: &str = "public/sources/linkedin";

#[derive(Debug, Clone)]
pub struct AuditConfig {
    root: PathBuf,
}

impl AuditConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn reviewers_dir(&self) -> PathBuf {
        self.root.join(REVIEWERS_DIR)
    }

    pub fn reviewers_index(&self) -> PathBuf {
        self.root.join(REVIEWERS_INDEX_PATH)
    }

    pub fn reviewer_schema(&self) -> PathBuf {
        self.root.join(REVIEWER_SCHEMA_PATH)
    }

    pub fn tastings_dir(&self) -> PathBuf {
        self.root.join(TASTINGS_DIR)
    }

    pub fn experts_dir(&self) -> PathBuf {
        self.root.join(EXPERTS_DIR)
    }

    pub fn consumers_dir(&self) -> PathBuf {
        self.root.join(CONSUMERS_DIR)
    }

    pub fn tasting_schema(&self) -> PathBuf {
        self.root.join(TASTING_SCHEMA_PATH)
    }

    /// Screenshot folders for one LinkedIn author, e.g. `public/sources/linkedin/david-reid`.
    pub fn linkedin_sources(&self, author: &str) -> PathBuf {
        self.root.join(LINKEDIN_SOURCES_DIR).join(author)
    }

    /// Expert tasting documents for one author, e.g. `data/tastings/experts/david-reid`.
    pub fn expert_tastings(&self, author: &str) -> PathBuf {
        self.experts_dir().join(author)
    }

    /// Path relative to the root with `/` separators, for stable output across platforms.
    pub fn display_relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_hang_off_root() {
        let config = AuditConfig::new("/corpus");
        assert_eq!(
            config.reviewers_index(),
            PathBuf::from("/corpus/data/reviewers/index.json")
        );
        assert_eq!(
            config.expert_tastings("david-reid"),
            PathBuf::from("/corpus/data/tastings/experts/david-reid")
        );
    }

    #[test]
    fn display_relative_uses_forward_slashes() {
        let config = AuditConfig::new("/corpus");
        let path = config.experts_dir().join("alice").join("one.json");
        assert_eq!(
            config.display_relative(&path),
            "data/tastings/experts/alice/one.json"
        );
    }
}
