use crate::output;
use bilan_core::audit_pdf;
use bilan_core::error::BilanError;
use bilan_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

pub fn run(pdf_file: PathBuf, output_format: &str, verbose: bool) -> Result<(), BilanError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();

    let report = audit_pdf(&pdf_bytes, &extractor)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report, verbose),
    }

    Ok(())
}
