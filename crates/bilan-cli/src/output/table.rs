use bilan_core::audit::heuristics::Severity;
use bilan_core::audit::AuditReport;

pub fn print(report: &AuditReport, verbose: bool) {
    println!("=== Audit & alertes de cohérence ===\n");

    if verbose {
        if report.observations.is_empty() {
            println!("  No labeled figures found.\n");
        } else {
            let max_label = report
                .observations
                .keys()
                .map(|l| l.as_str().len())
                .max()
                .unwrap_or(10);

            for (label, observations) in &report.observations {
                for obs in observations {
                    println!(
                        "  {:<width$}  {:>12}  (page {})",
                        label.as_str(),
                        obs.raw,
                        obs.page,
                        width = max_label
                    );
                }
            }
            println!();
        }
    }

    if report.findings.is_empty() {
        println!("  {}", report.summary_text());
    } else {
        for finding in &report.findings {
            let marker = match finding.severity {
                Severity::Info => "info",
                Severity::Warning => "WARN",
            };
            println!("  [{marker}] {}", finding.message);
        }
    }

    println!("\n  Overall: {}", report.verdict);
}
