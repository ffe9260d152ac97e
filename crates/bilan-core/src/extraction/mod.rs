pub mod pdftotext;

use crate::error::BilanError;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageText {
    /// 1-based page index in document order.
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageText per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, BilanError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
