use crate::error::BilanError;
use crate::extraction::{PageText, PdfExtractor};
use serde::{Deserialize, Serialize};

/// An extracted financial document, held in memory for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<DocumentPage>,
}

/// One page of extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPage {
    /// 1-based page index in document order.
    pub page_number: usize,
    pub text: String,
}

/// Text prepared for downstream consumption, bounded in length.
#[derive(Debug, Clone)]
pub struct PreparedText {
    pub text: String,
    pub truncated: bool,
}

impl Document {
    /// Extract a document from PDF bytes using the given backend.
    pub fn from_pdf(pdf_bytes: &[u8], extractor: &dyn PdfExtractor) -> Result<Self, BilanError> {
        let pages = extractor.extract_pages(pdf_bytes)?;
        let doc = Document::from_pages(pages);
        if doc.pages.iter().all(|p| p.text.trim().is_empty()) {
            return Err(BilanError::EmptyDocument);
        }
        Ok(doc)
    }

    pub fn from_pages(pages: Vec<PageText>) -> Self {
        Document {
            pages: pages
                .into_iter()
                .map(|p| DocumentPage {
                    page_number: p.page_number,
                    text: p.text,
                })
                .collect(),
        }
    }

    /// Render the page-tagged form: each page prefixed by its marker,
    /// every line stripped of leading/trailing whitespace.
    ///
    /// The marker is the literal `=== [PAGE n] ===` downstream consumers
    /// (audit citations, AI prompts) rely on for page references.
    pub fn tagged_text(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            out.push_str(&format!("\n\n=== [PAGE {}] ===\n", page.page_number));
            out.push_str(page.text.trim());
        }
        out.lines()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Page-tagged text truncated to at most `max_length` characters.
    ///
    /// Returns the text unchanged when it already fits the bound.
    pub fn prepared_text(&self, max_length: usize) -> PreparedText {
        let text = self.tagged_text();
        let char_count = text.chars().count();
        if char_count <= max_length {
            return PreparedText {
                text,
                truncated: false,
            };
        }
        tracing::warn!(
            original = char_count,
            max_length,
            "document text truncated to stay within the API limit"
        );
        PreparedText {
            text: text.chars().take(max_length).collect(),
            truncated: true,
        }
    }

    pub fn char_count(&self) -> usize {
        self.tagged_text().chars().count()
    }
}
