//! Consumer scoring rules.
//!
//! Consumer tastings carry a 1..=10 overall score under
//! `tasting.consumer_scoring`; expert tastings must never carry one.

use std::io::Write;

use serde_json::Value;
use tracing::info;

use crate::config::AuditConfig;
use crate::data::json::{json_files_under, read_json};
use crate::data::tasting::{contributor_tier, tasting_section};
use crate::error::Result;
use crate::validate::{display_full, Finding, Listing, ScanReport};

pub fn check_consumer(document: &Value) -> Vec<Finding> {
    let mut findings = Vec::new();

    let tier = contributor_tier(document);
    if tier != "consumer" {
        findings.push(Finding::new(
            "contributor.tier",
            format!("consumer folder requires contributor.tier='consumer' (got '{tier}')"),
        ));
    }

    let scoring = tasting_section(document)
        .and_then(|tasting| tasting.get("consumer_scoring"))
        .and_then(Value::as_object);
    let Some(scoring) = scoring else {
        findings.push(Finding::new(
            "tasting.consumer_scoring",
            "consumer folder requires tasting.consumer_scoring object",
        ));
        return findings;
    };

    // as_i64 rejects booleans and floats
    let overall = scoring.get("overall_1_10").and_then(Value::as_i64);
    if !matches!(overall, Some(1..=10)) {
        findings.push(Finding::new(
            "tasting.consumer_scoring.overall_1_10",
            "must be an integer 1..10",
        ));
    }

    findings
}

pub fn check_expert(document: &Value) -> Vec<Finding> {
    let mut findings = Vec::new();

    if contributor_tier(document) == "consumer" {
        findings.push(Finding::new(
            "contributor.tier",
            "experts folder must not contain contributor.tier='consumer'",
        ));
    }
    if tasting_section(document).is_some_and(|tasting| tasting.contains_key("consumer_scoring")) {
        findings.push(Finding::new(
            "tasting.consumer_scoring",
            "experts folder must not contain tasting.consumer_scoring",
        ));
    }

    findings
}

pub fn scan(config: &AuditConfig) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    let passes: [(_, fn(&Value) -> Vec<Finding>); 2] = [
        (config.consumers_dir(), check_consumer),
        (config.experts_dir(), check_expert),
    ];

    for (dir, check) in passes {
        for path in json_files_under(&dir)? {
            report.checked += 1;
            let findings = match read_json(&path) {
                Ok(document) => check(&document),
                Err(err) => vec![Finding::document(err.to_string())],
            };
            report.record(path, findings);
        }
    }
    Ok(report)
}

pub fn run(config: &AuditConfig, out: &mut dyn Write) -> Result<i32> {
    let report = scan(config)?;
    report.write_documents(out, Listing::FailuresOnly, &display_full)?;
    info!(checked = report.checked, "consumer scoring check finished");
    if report.has_failures() {
        return Ok(1);
    }
    writeln!(out, "Consumer scoring checks: OK")?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn consumer_doc(overall: Value) -> Value {
        json!({
            "contributor": {"tier": "consumer"},
            "tasting": {"consumer_scoring": {"overall_1_10": overall}}
        })
    }

    #[test]
    fn integer_scores_in_range_pass() {
        assert!(check_consumer(&consumer_doc(json!(1))).is_empty());
        assert!(check_consumer(&consumer_doc(json!(7))).is_empty());
        assert!(check_consumer(&consumer_doc(json!(10))).is_empty());
    }

    #[test]
    fn non_integer_or_out_of_range_scores_fail() {
        for bad in [json!(0), json!(11), json!(7.5), json!(true), json!("7"), json!(null)] {
            let findings = check_consumer(&consumer_doc(bad.clone()));
            assert_eq!(findings.len(), 1, "score {bad} should fail");
            assert_eq!(findings[0].field, "tasting.consumer_scoring.overall_1_10");
        }
    }

    #[test]
    fn consumer_needs_tier_and_scoring_object() {
        let findings = check_consumer(&json!({"contributor": {"tier": "expert"}}));
        let fields: Vec<_> = findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["contributor.tier", "tasting.consumer_scoring"]);
    }

    #[test]
    fn experts_must_not_look_like_consumers() {
        assert!(check_expert(&json!({"contributor": {"tier": "expert"}, "tasting": {}})).is_empty());
        let findings = check_expert(&consumer_doc(json!(5)));
        assert_eq!(findings.len(), 2);
    }
}
