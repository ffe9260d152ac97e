use crate::commands::resolve_config;
use crate::ProviderArgs;
use bilan_core::error::BilanError;
use bilan_core::extraction::pdftotext::PdftotextExtractor;
use bilan_core::providers::build_generator;
use bilan_core::Session;
use std::path::PathBuf;

pub fn run(pdf_file: PathBuf, question: &str, args: &ProviderArgs) -> Result<(), BilanError> {
    let config = resolve_config(args)?;
    let generator = build_generator(&config)?;

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();

    let session = Session::from_pdf(&pdf_bytes, &extractor, config.max_text_length)?;
    let answer = session.ask(generator.as_ref(), question)?;

    println!("**Question :** {question}\n");
    println!("{answer}");

    Ok(())
}
