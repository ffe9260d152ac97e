use crate::audit::AuditReport;
use crate::error::BilanError;
use std::path::Path;

/// Assemble the full analysis report: the generated summary followed by
/// the audit section.
pub fn render_analysis(summary: &str, audit: &AuditReport) -> String {
    format!(
        "# 📊 Résumé Financier\n\n{}\n\n{}",
        summary.trim(),
        audit.to_markdown()
    )
}

/// Default artifact name for a report generated from `source_name`
/// (e.g., "rapport.pdf" -> "resume_rapport.md").
pub fn report_file_name(source_name: &str) -> String {
    let stem = source_name.strip_suffix(".pdf").unwrap_or(source_name);
    format!("resume_{}.md", stem)
}

/// Write the report artifact. What is written is byte-identical to the
/// rendered content.
pub fn write_report(path: &Path, content: &str) -> Result<(), BilanError> {
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}
