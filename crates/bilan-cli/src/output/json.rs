use bilan_core::audit::AuditReport;
use bilan_core::error::BilanError;

pub fn print(report: &AuditReport) -> Result<(), BilanError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
