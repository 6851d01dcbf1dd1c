use crate::rules::Status;
use crate::AuditReport;

/// Render checks as plain console output, one block per check in run order.
pub fn render(report: &AuditReport) -> String {
    let mut output = String::new();

    if report.checks.is_empty() {
        output.push_str("\n  No checks were run (all rules disabled).\n\n");
        return output;
    }

    output.push_str(&format!(
        "\n  {} check(s) against {} instance(s):\n\n",
        report.checks.len(),
        report.resource_count
    ));

    for check in &report.checks {
        output.push_str(&format!(
            "  {} {} {}\n",
            status_tag(check.status),
            check.id,
            check.name
        ));
        for result in &check.results {
            output.push_str(&format!(
                "           {} {}\n",
                status_tag(result.status),
                result.message
            ));
        }
        output.push('\n');
    }

    let summary = &report.summary;
    let status = if summary.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  Result: {} ({} of {} checks failed, {} of {} results failed)\n\n",
        status,
        summary.failed_checks,
        summary.total_checks,
        summary.failed_results,
        summary.total_results,
    ));

    output
}

fn status_tag(status: Status) -> &'static str {
    match status {
        Status::Ok => "[OK]  ",
        Status::Fail => "[FAIL]",
    }
}
