use crate::document::Document;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// The closed set of financial labels searched for in report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Ca,
    ResultatNet,
    Marge,
    Dette,
    Tresorerie,
}

impl Label {
    pub const ALL: [Label; 5] = [
        Label::Ca,
        Label::ResultatNet,
        Label::Marge,
        Label::Dette,
        Label::Tresorerie,
    ];

    /// The label as it appears in French report text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ca => "CA",
            Label::ResultatNet => "Résultat net",
            Label::Marge => "Marge",
            Label::Dette => "Dette",
            Label::Tresorerie => "Trésorerie",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A numeric value found after a label, with its originating page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Normalized raw match (whitespace stripped, comma separators
    /// converted to periods). Not validated as a number.
    pub raw: String,
    pub page: usize,
}

/// Ordered observations per label, in encounter order.
pub type Observations = BTreeMap<Label, Vec<Observation>>;

/// Label followed by optional punctuation/whitespace, then a run of
/// digits, spaces, commas and periods, with an optional magnitude
/// suffix (M/k/K).
static LABEL_PATTERNS: LazyLock<Vec<(Label, Regex)>> = LazyLock::new(|| {
    Label::ALL
        .iter()
        .map(|&label| {
            let pattern = format!(
                r"(?i)\b{}\s*[:;,.\-–]?\s*(\d[\d \u{{00A0}},.]*[MkK]?)",
                regex::escape(label.as_str())
            );
            let re = Regex::new(&pattern).expect("valid label pattern");
            (label, re)
        })
        .collect()
});

/// Scan a document for labeled numeric values.
///
/// Every non-overlapping match within a page is captured; a label with
/// no following digits yields no observation. Output order per label
/// is encounter order: pages scanned first to last, matches in text
/// order within a page.
pub fn extract_observations(document: &Document) -> Observations {
    let mut observations = Observations::new();

    for page in &document.pages {
        for (label, re) in LABEL_PATTERNS.iter() {
            for caps in re.captures_iter(&page.text) {
                if let Some(m) = caps.get(1) {
                    let raw = normalize_raw(m.as_str());
                    if raw.is_empty() {
                        continue;
                    }
                    observations.entry(*label).or_default().push(Observation {
                        raw,
                        page: page.page_number,
                    });
                }
            }
        }
    }

    let total: usize = observations.values().map(Vec::len).sum();
    tracing::debug!(total, labels = observations.len(), "extracted observations");

    observations
}

/// Strip internal whitespace (including NBSP) and convert comma decimal
/// separators to periods. No locale-aware parsing; the result may still
/// be non-numeric garbage for irregular input, which is accepted.
fn normalize_raw(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Lossy numeric parse used for comparisons: keep only ASCII digits and
/// periods, then parse as f64. Unparseable values are excluded silently.
pub fn comparable_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PageText;

    fn doc(pages: &[(usize, &str)]) -> Document {
        Document::from_pages(
            pages
                .iter()
                .map(|(n, t)| PageText {
                    page_number: *n,
                    text: t.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_simple_label_match() {
        let d = doc(&[(3, "CA: 1000")]);
        let obs = extract_observations(&d);
        assert_eq!(
            obs[&Label::Ca],
            vec![Observation {
                raw: "1000".into(),
                page: 3
            }]
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        let d = doc(&[(1, "résultat NET : 250")]);
        let obs = extract_observations(&d);
        assert_eq!(obs[&Label::ResultatNet][0].raw, "250");
    }

    #[test]
    fn test_comma_decimal_normalized() {
        let d = doc(&[(1, "Marge : 7,5")]);
        let obs = extract_observations(&d);
        assert_eq!(obs[&Label::Marge][0].raw, "7.5");
    }

    #[test]
    fn test_internal_whitespace_stripped() {
        let d = doc(&[(1, "CA 1 200 000")]);
        let obs = extract_observations(&d);
        assert_eq!(obs[&Label::Ca][0].raw, "1200000");
    }

    #[test]
    fn test_magnitude_suffix_kept_in_raw() {
        let d = doc(&[(2, "Dette: 20M")]);
        let obs = extract_observations(&d);
        assert_eq!(obs[&Label::Dette][0].raw, "20M");
    }

    #[test]
    fn test_label_without_digits_skipped() {
        let d = doc(&[(1, "CA en forte hausse cette année")]);
        let obs = extract_observations(&d);
        assert!(obs.get(&Label::Ca).is_none());
    }

    #[test]
    fn test_multiple_matches_encounter_order() {
        let d = doc(&[(1, "CA: 100 puis CA: 200"), (5, "CA: 300")]);
        let obs = extract_observations(&d);
        let raws: Vec<&str> = obs[&Label::Ca].iter().map(|o| o.raw.as_str()).collect();
        assert_eq!(raws, vec!["100", "200", "300"]);
        assert_eq!(obs[&Label::Ca][2].page, 5);
    }

    #[test]
    fn test_label_inside_word_not_matched() {
        let d = doc(&[(1, "DELTACA 100")]);
        let obs = extract_observations(&d);
        assert!(obs.get(&Label::Ca).is_none());
    }

    #[test]
    fn test_comparable_value_plain() {
        assert_eq!(comparable_value("1000"), Some(1000.0));
        assert_eq!(comparable_value("7.5"), Some(7.5));
    }

    #[test]
    fn test_comparable_value_strips_suffix() {
        assert_eq!(comparable_value("20M"), Some(20.0));
    }

    #[test]
    fn test_comparable_value_garbage_excluded() {
        // Two periods survive the stripping and the f64 parse fails
        assert_eq!(comparable_value("1.2.3"), None);
        assert_eq!(comparable_value("M"), None);
    }
}
