use crate::error::BilanError;
use crate::extraction::{PageText, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, BilanError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| BilanError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| BilanError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BilanError::PdftotextNotFound
                } else {
                    BilanError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(BilanError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);

        // Split into pages (pdftotext uses form feed \x0c as page separator)
        let pages: Vec<PageText> = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| PageText {
                page_number: i + 1,
                text: page_text.to_string(),
            })
            .filter(|p| !p.text.trim().is_empty() || p.page_number == 1)
            .collect();

        tracing::debug!(pages = pages.len(), "extracted text with pdftotext");

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}
