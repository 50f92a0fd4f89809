//! Tasting documents as the checks see them: loosely shaped JSON, read field by field.

use serde_json::Value;

/// Contributor identity declared by a tasting document.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorClaim {
    /// Raw `contributor.id`; may be a non-string, which the link check reports.
    pub id: Value,
    pub name: Option<String>,
    pub tier: Option<String>,
}

impl ContributorClaim {
    /// The id when it is a string with visible content.
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_str().filter(|id| !id.trim().is_empty())
    }
}

/// Whether a document takes part in the reviewer link check at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Eligibility {
    /// No `contributor` object.
    NoContributor,
    /// `contributor` without an `id` (absent or null).
    NoContributorId,
    Eligible(ContributorClaim),
}

pub fn contributor_eligibility(document: &Value) -> Eligibility {
    let Some(contributor) = document.get("contributor").and_then(Value::as_object) else {
        return Eligibility::NoContributor;
    };

    let id = match contributor.get("id") {
        None | Some(Value::Null) => return Eligibility::NoContributorId,
        Some(id) => id.clone(),
    };

    let text = |key: &str| contributor.get(key).and_then(Value::as_str).map(str::to_string);
    Eligibility::Eligible(ContributorClaim {
        id,
        name: text("name"),
        tier: text("tier"),
    })
}

/// `contributor.tier` as a string, or empty when absent or not a string.
pub fn contributor_tier(document: &Value) -> &str {
    document
        .get("contributor")
        .and_then(|c| c.get("tier"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// The `tasting` section, when it is an object.
pub fn tasting_section(document: &Value) -> Option<&serde_json::Map<String, Value>> {
    document.get("tasting").and_then(Value::as_object)
}

/// Non-empty after trimming.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn documents_without_contributor_are_not_applicable() {
        assert_eq!(
            contributor_eligibility(&json!({"tasting": {}})),
            Eligibility::NoContributor
        );
        assert_eq!(
            contributor_eligibility(&json!({"contributor": "alice"})),
            Eligibility::NoContributor
        );
    }

    #[test]
    fn contributor_without_id_is_not_applicable() {
        assert_eq!(
            contributor_eligibility(&json!({"contributor": {"name": "Alice"}})),
            Eligibility::NoContributorId
        );
        assert_eq!(
            contributor_eligibility(&json!({"contributor": {"id": null}})),
            Eligibility::NoContributorId
        );
    }

    #[test]
    fn eligible_claim_keeps_raw_id_and_string_fields() {
        let doc = json!({"contributor": {"id": 12, "name": "Alice", "tier": 3}});
        let Eligibility::Eligible(claim) = contributor_eligibility(&doc) else {
            panic!("expected eligible document");
        };
        assert_eq!(claim.id, json!(12));
        assert_eq!(claim.id_str(), None);
        assert_eq!(claim.name.as_deref(), Some("Alice"));
        assert_eq!(claim.tier, None);
    }

    #[test]
    fn blank_string_id_has_no_usable_id() {
        let doc = json!({"contributor": {"id": "   "}});
        let Eligibility::Eligible(claim) = contributor_eligibility(&doc) else {
            panic!("expected eligible document");
        };
        assert_eq!(claim.id_str(), None);
    }
}
