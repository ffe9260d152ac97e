pub mod analysis;
pub mod audit;
pub mod config;
pub mod document;
pub mod error;
pub mod extraction;
pub mod providers;
pub mod report;

pub use analysis::Session;
pub use audit::AuditReport;
pub use config::Config;
pub use document::Document;
pub use error::BilanError;
pub use providers::{build_generator, ProviderKind, TextGenerator};

use extraction::PdfExtractor;

/// Extract a PDF and run the numeric audit, without any network call.
pub fn audit_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<AuditReport, BilanError> {
    let document = Document::from_pdf(pdf_bytes, extractor)?;
    Ok(audit::audit_document(&document))
}

/// Extract a PDF, generate the structured summary and append the audit
/// section: the full analysis report.
pub fn analyze_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    generator: &dyn TextGenerator,
    max_text_length: usize,
) -> Result<String, BilanError> {
    let mut session = Session::from_pdf(pdf_bytes, extractor, max_text_length)?;
    let summary = session.summarize(generator)?;
    Ok(report::render_analysis(&summary, &session.audit()))
}

/// Extract a PDF and answer a free-text question about it.
pub fn ask_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    generator: &dyn TextGenerator,
    max_text_length: usize,
    question: &str,
) -> Result<String, BilanError> {
    let session = Session::from_pdf(pdf_bytes, extractor, max_text_length)?;
    session.ask(generator, question)
}
