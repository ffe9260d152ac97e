use bilan_core::config::{clamp_text_length, DEFAULT_TEXT_LENGTH};
use bilan_core::document::Document;
use bilan_core::error::BilanError;
use bilan_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

pub fn run(
    pdf_file: PathBuf,
    max_length: Option<usize>,
    out: Option<PathBuf>,
) -> Result<(), BilanError> {
    let max_length = max_length.map(clamp_text_length).unwrap_or(DEFAULT_TEXT_LENGTH);

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let document = Document::from_pdf(&pdf_bytes, &extractor)?;
    let prepared = document.prepared_text(max_length);

    if prepared.truncated {
        eprintln!(
            "Note: text truncated to {} characters (document had {})",
            max_length,
            document.char_count()
        );
    }

    match out {
        Some(path) => {
            std::fs::write(&path, &prepared.text)?;
            println!(
                "Extracted {} characters from {} pages -> {}",
                prepared.text.chars().count(),
                document.pages.len(),
                path.display()
            );
        }
        None => println!("{}", prepared.text),
    }

    Ok(())
}
