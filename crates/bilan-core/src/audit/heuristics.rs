use crate::audit::extract::{comparable_value, Label, Observation, Observations};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Low-margin threshold (percent) below which a warning is raised.
const LOW_MARGIN_THRESHOLD: f64 = 5.0;

pub const NO_ISSUE_MESSAGE: &str =
    "Aucune incohérence détectée : cohérence globale satisfaisante.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// One heuristic-derived observation about the extracted figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

/// Overall qualitative verdict on the document's consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Satisfaisante,
    Moyenne,
    Fragile,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Satisfaisante => write!(f, "satisfaisante"),
            Verdict::Moyenne => write!(f, "moyenne"),
            Verdict::Fragile => write!(f, "fragile"),
        }
    }
}

/// Apply the audit heuristics to the extracted observations.
///
/// Verdict rule: `Satisfaisante` when no finding is raised, `Moyenne`
/// otherwise. `Fragile` is a legal verdict value that this rule never
/// produces.
pub fn evaluate(observations: &Observations) -> (Vec<Finding>, Verdict) {
    let mut findings = Vec::new();

    check_revenue_vs_profit(observations, &mut findings);
    check_margin(observations, &mut findings);
    check_debt_vs_cash(observations, &mut findings);

    let verdict = if findings.is_empty() {
        Verdict::Satisfaisante
    } else {
        Verdict::Moyenne
    };

    (findings, verdict)
}

fn first_last(observations: &Observations, label: Label) -> Option<(&Observation, &Observation)> {
    let list = observations.get(&label)?;
    Some((list.first()?, list.last()?))
}

fn last(observations: &Observations, label: Label) -> Option<&Observation> {
    observations.get(&label)?.last()
}

/// Revenue up while net income down.
///
/// "First" and "last" are pure encounter order (page scan order, match
/// order within a page), used as a proxy for earliest vs latest stated
/// period. A comparative table can break that assumption; this is an
/// acknowledged heuristic, not a temporal model.
fn check_revenue_vs_profit(observations: &Observations, findings: &mut Vec<Finding>) {
    let Some((ca_first, ca_last)) = first_last(observations, Label::Ca) else {
        return;
    };
    let Some((rn_first, rn_last)) = first_last(observations, Label::ResultatNet) else {
        return;
    };

    // A value that fails to parse is treated as absent, not as an error.
    let values = (
        comparable_value(&ca_first.raw),
        comparable_value(&ca_last.raw),
        comparable_value(&rn_first.raw),
        comparable_value(&rn_last.raw),
    );
    let (Some(ca_a), Some(ca_b), Some(rn_a), Some(rn_b)) = values else {
        return;
    };

    if ca_b > ca_a && rn_b < rn_a {
        findings.push(Finding {
            severity: Severity::Warning,
            message: format!(
                "Incohérence potentielle : le CA passe de {} (page {}) à {} (page {}) \
                 tandis que le Résultat net passe de {} (page {}) à {} (page {}).",
                ca_first.raw,
                ca_first.page,
                ca_last.raw,
                ca_last.page,
                rn_first.raw,
                rn_first.page,
                rn_last.raw,
                rn_last.page
            ),
        });
    }
}

/// Surface the most recent margin value; warn when it parses below 5.
fn check_margin(observations: &Observations, findings: &mut Vec<Finding>) {
    let Some(marge) = last(observations, Label::Marge) else {
        return;
    };

    findings.push(Finding {
        severity: Severity::Info,
        message: format!(
            "Marge la plus récente : {} (page {}).",
            marge.raw, marge.page
        ),
    });

    if let Some(value) = comparable_value(&marge.raw) {
        if value < LOW_MARGIN_THRESHOLD {
            findings.push(Finding {
                severity: Severity::Warning,
                message: format!(
                    "Marge faible : {} est sous le seuil de {} (page {}).",
                    marge.raw, LOW_MARGIN_THRESHOLD, marge.page
                ),
            });
        }
    }
}

/// Surface the most recent debt and cash values side by side. Framed as
/// a point to watch, no ratio is computed.
fn check_debt_vs_cash(observations: &Observations, findings: &mut Vec<Finding>) {
    let Some(dette) = last(observations, Label::Dette) else {
        return;
    };
    let Some(treso) = last(observations, Label::Tresorerie) else {
        return;
    };

    findings.push(Finding {
        severity: Severity::Info,
        message: format!(
            "À surveiller : Dette {} (page {}) face à une Trésorerie de {} (page {}).",
            dette.raw, dette.page, treso.raw, treso.page
        ),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(entries: &[(Label, &[(&str, usize)])]) -> Observations {
        let mut map = Observations::new();
        for (label, values) in entries {
            map.insert(
                *label,
                values
                    .iter()
                    .map(|(raw, page)| Observation {
                        raw: raw.to_string(),
                        page: *page,
                    })
                    .collect(),
            );
        }
        map
    }

    #[test]
    fn test_revenue_up_profit_down_raises_warning() {
        let observations = obs(&[
            (Label::Ca, &[("100", 1), ("200", 5)]),
            (Label::ResultatNet, &[("50", 1), ("20", 5)]),
        ]);
        let (findings, verdict) = evaluate(&observations);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("page 1"));
        assert!(findings[0].message.contains("page 5"));
        assert_eq!(verdict, Verdict::Moyenne);
    }

    #[test]
    fn test_revenue_down_no_warning() {
        let observations = obs(&[
            (Label::Ca, &[("100", 1), ("50", 5)]),
            (Label::ResultatNet, &[("50", 1), ("20", 5)]),
        ]);
        let (findings, _) = evaluate(&observations);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_revenue_check_needs_both_labels() {
        let observations = obs(&[(Label::Ca, &[("100", 1), ("200", 5)])]);
        let (findings, verdict) = evaluate(&observations);
        assert!(findings.is_empty());
        assert_eq!(verdict, Verdict::Satisfaisante);
    }

    #[test]
    fn test_unparseable_value_excluded_silently() {
        // "1.2.3" fails the comparison parse, so the check is skipped
        let observations = obs(&[
            (Label::Ca, &[("1.2.3", 1), ("200", 5)]),
            (Label::ResultatNet, &[("50", 1), ("20", 5)]),
        ]);
        let (findings, _) = evaluate(&observations);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_margin_surfaced_as_info() {
        let observations = obs(&[(Label::Marge, &[("8.2", 2), ("12.5", 7)])]);
        let (findings, verdict) = evaluate(&observations);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        // most recently encountered value, verbatim
        assert!(findings[0].message.contains("12.5"));
        assert!(findings[0].message.contains("page 7"));
        assert_eq!(verdict, Verdict::Moyenne);
    }

    #[test]
    fn test_low_margin_raises_warning() {
        let observations = obs(&[(Label::Marge, &[("3.1", 4)])]);
        let (findings, _) = evaluate(&observations);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].severity, Severity::Warning);
        assert!(findings[1].message.contains("3.1"));
    }

    #[test]
    fn test_debt_and_cash_surfaced_together() {
        let observations = obs(&[
            (Label::Dette, &[("500", 3)]),
            (Label::Tresorerie, &[("120", 6)]),
        ]);
        let (findings, _) = evaluate(&observations);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("500"));
        assert!(findings[0].message.contains("120"));
    }

    #[test]
    fn test_debt_alone_not_surfaced() {
        let observations = obs(&[(Label::Dette, &[("500", 3)])]);
        let (findings, _) = evaluate(&observations);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_no_observations_satisfaisante() {
        let (findings, verdict) = evaluate(&Observations::new());
        assert!(findings.is_empty());
        assert_eq!(verdict, Verdict::Satisfaisante);
    }
}
