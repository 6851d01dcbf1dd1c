use crate::error::Result;
use crate::AuditReport;

/// Render the full report as pretty-printed JSON.
pub fn render(report: &AuditReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::mixed_report;
    use serde_json::Value;

    #[test]
    fn checks_serialize_with_uppercase_status() {
        let value: Value = serde_json::from_str(&render(&mixed_report()).unwrap()).unwrap();
        let checks = value["checks"].as_array().unwrap();
        assert_eq!(checks.len(), 4);
        assert_eq!(checks[0]["id"], "AWS_RDS_001");
        assert_eq!(checks[0]["status"], "FAIL");
        assert_eq!(checks[0]["results"][0]["status"], "OK");
        assert_eq!(value["summary"]["pass"], false);
    }
}
