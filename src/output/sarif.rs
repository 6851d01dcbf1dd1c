use crate::error::Result;
use crate::AuditReport;

use serde_json::{json, Value};

/// Render failed results as SARIF 2.1.0.
///
/// Every executed check becomes a rule descriptor; only FAIL results become
/// SARIF results. Instances have no source location, so each result carries a
/// logical location naming the DB instance.
pub fn render(report: &AuditReport) -> Result<String> {
    let rules: Vec<Value> = report
        .checks
        .iter()
        .map(|check| {
            json!({
                "id": check.id,
                "name": check.name,
                "shortDescription": { "text": check.name },
                "fullDescription": { "text": check.description },
                "defaultConfiguration": { "level": "error" },
            })
        })
        .collect();

    let results: Vec<Value> = report
        .checks
        .iter()
        .enumerate()
        .flat_map(|(rule_index, check)| {
            check.failed_results().map(move |r| {
                json!({
                    "ruleId": check.id,
                    "ruleIndex": rule_index,
                    "level": "error",
                    "message": { "text": r.message },
                    "locations": [{
                        "logicalLocations": [{
                            "name": r.resource_id,
                            "kind": "resource",
                        }],
                    }],
                })
            })
        })
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "rdsguard",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "results": results,
            "automationDetails": {
                "id": format!("rdsguard/{}", report.run_id),
            },
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}
