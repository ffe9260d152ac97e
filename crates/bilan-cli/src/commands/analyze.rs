use crate::commands::resolve_config;
use crate::ProviderArgs;
use bilan_core::error::BilanError;
use bilan_core::extraction::pdftotext::PdftotextExtractor;
use bilan_core::providers::build_generator;
use bilan_core::report::{render_analysis, write_report};
use bilan_core::Session;
use std::path::PathBuf;

pub fn run(
    pdf_file: PathBuf,
    args: &ProviderArgs,
    out: Option<PathBuf>,
) -> Result<(), BilanError> {
    let config = resolve_config(args)?;
    // Credential check happens before the PDF is even read.
    let generator = build_generator(&config)?;

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();

    let mut session = Session::from_pdf(&pdf_bytes, &extractor, config.max_text_length)?;
    let summary = session.summarize(generator.as_ref())?;
    let rendered = render_analysis(&summary, &session.audit());

    println!("{rendered}");

    if let Some(path) = out {
        write_report(&path, &rendered)?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}
