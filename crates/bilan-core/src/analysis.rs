use crate::audit::{audit_document, AuditReport};
use crate::document::Document;
use crate::error::BilanError;
use crate::extraction::PdfExtractor;
use crate::providers::TextGenerator;

/// Instruction prompt for the structured summary.
pub const SUMMARY_INSTRUCTIONS: &str = "Tu es un assistant IA hybride : analyste financier, \
consultant business, expert stratégique et auditeur financier. \
Ton rôle est de transformer un document financier en résumé précis et chiffré. \
Si l'information est absente, indique 'non précisé'. \
Fournis : résumé exécutif, tableau de chiffres clés, analyse des performances, \
structure financière, risques et guidance. \
Reste neutre, factuel et professionnel, cite les pages si possible \
(=== [PAGE X] ===) et n'invente jamais rien.";

/// Instruction prompt for free-text questions.
pub const QUESTION_INSTRUCTIONS: &str = "Tu es un assistant IA hybride : analyste financier, \
consultant business et expert stratégique. \
Lis le texte fourni, extrais les chiffres clés (CA, marge, bénéfice net, dettes, cashflow), \
identifie risques, objectifs et stratégie. Ne jamais inventer de données ; \
si l'information n'existe pas : 'non précisé'. \
Cite les pages si possible (=== [PAGE X] ===). \
Réponds toujours clairement, professionnellement, de manière concise et structurée, \
en distinguant ce qui provient du document et ce qui relève de ton expertise.";

/// Questions containing any of these keywords get the audit report
/// appended to the answer.
pub const AUDIT_KEYWORDS: &[&str] = &[
    "performance",
    "rentabilité",
    "évolution",
    "risques",
    "solidité",
];

/// Case-insensitive keyword check on a free-text question.
pub fn question_triggers_audit(question: &str) -> bool {
    let lowered = question.to_lowercase();
    AUDIT_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// One user session: the extracted document and the state derived from
/// it. Created per uploaded document, discarded when the session ends;
/// nothing is persisted.
pub struct Session {
    pub document: Document,
    /// Last successfully generated summary, if any. A failed attempt
    /// leaves this untouched.
    pub summary: Option<String>,
    max_text_length: usize,
}

impl Session {
    pub fn new(document: Document, max_text_length: usize) -> Self {
        Session {
            document,
            summary: None,
            max_text_length,
        }
    }

    /// Extract a PDF and open a session over it.
    pub fn from_pdf(
        pdf_bytes: &[u8],
        extractor: &dyn PdfExtractor,
        max_text_length: usize,
    ) -> Result<Self, BilanError> {
        let document = Document::from_pdf(pdf_bytes, extractor)?;
        tracing::info!(
            pages = document.pages.len(),
            chars = document.char_count(),
            backend = extractor.backend_name(),
            "session opened"
        );
        Ok(Session::new(document, max_text_length))
    }

    /// Run the numeric audit over the session document. Derived fresh
    /// on every call.
    pub fn audit(&self) -> AuditReport {
        audit_document(&self.document)
    }

    /// Generate the structured summary and store it on the session.
    pub fn summarize(&mut self, generator: &dyn TextGenerator) -> Result<String, BilanError> {
        let prepared = self.document.prepared_text(self.max_text_length);
        tracing::info!(provider = generator.name(), "generating summary");

        let summary = generator.generate(SUMMARY_INSTRUCTIONS, &prepared.text)?;
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Answer a free-text question about the document. When the
    /// question carries an audit keyword, the audit report is appended
    /// to the answer; plain questions never get it.
    pub fn ask(
        &self,
        generator: &dyn TextGenerator,
        question: &str,
    ) -> Result<String, BilanError> {
        let prepared = self.document.prepared_text(self.max_text_length);
        let body = format!("Question : {}\n\nTexte PDF :\n{}", question, prepared.text);
        tracing::info!(provider = generator.name(), "answering question");

        let answer = generator.generate(QUESTION_INSTRUCTIONS, &body)?;

        if question_triggers_audit(question) {
            let audit = self.audit();
            Ok(format!("{}\n\n{}", answer, audit.to_markdown()))
        } else {
            Ok(answer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_triggers_case_insensitive() {
        assert!(question_triggers_audit("Quelle est la RENTABILITÉ ?"));
        assert!(question_triggers_audit("quels risques ?"));
        assert!(question_triggers_audit("Évolution du CA ?"));
    }

    #[test]
    fn test_plain_question_does_not_trigger() {
        assert!(!question_triggers_audit("Quel est le chiffre d'affaires ?"));
        assert!(!question_triggers_audit("Qui est le PDG ?"));
    }
}
