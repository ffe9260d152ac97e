pub mod extract;
pub mod heuristics;

use crate::document::Document;
use extract::{extract_observations, Observations};
use heuristics::{evaluate, Finding, Severity, Verdict, NO_ISSUE_MESSAGE};
use serde::{Deserialize, Serialize};

/// Result of one audit pass over a document. Derived fresh on every
/// invocation; nothing is cached or incrementally updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub observations: Observations,
    pub findings: Vec<Finding>,
    pub verdict: Verdict,
}

/// Scan a document for labeled figures and apply the consistency
/// heuristics.
pub fn audit_document(document: &Document) -> AuditReport {
    let observations = extract_observations(document);
    let (findings, verdict) = evaluate(&observations);

    tracing::info!(
        findings = findings.len(),
        verdict = %verdict,
        "audit complete"
    );

    AuditReport {
        observations,
        findings,
        verdict,
    }
}

impl AuditReport {
    /// The findings concatenated into one report string, or the single
    /// "no issues" message when there is nothing to report.
    pub fn summary_text(&self) -> String {
        if self.findings.is_empty() {
            return NO_ISSUE_MESSAGE.to_string();
        }
        self.findings
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markdown rendering of the audit section.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## 🔎 Audit & Alertes de cohérence\n\n");

        if self.findings.is_empty() {
            out.push_str(NO_ISSUE_MESSAGE);
            out.push('\n');
        } else {
            for finding in &self.findings {
                let marker = match finding.severity {
                    Severity::Info => "ℹ️",
                    Severity::Warning => "⚠️",
                };
                out.push_str(&format!("- {} {}\n", marker, finding.message));
            }
        }

        out.push_str(&format!("\nCohérence globale : **{}**\n", self.verdict));
        out
    }
}
