use std::fmt;

use serde::{Deserialize, Serialize};

const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Points deducted from the compliance score per violation.
    pub fn penalty(self) -> u8 {
        match self {
            Self::Error => 20,
            Self::Warning => 10,
            Self::Info => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    HardcodedColor,
    ForbiddenFunction,
    MissingThemeUsage,
    DisallowedPropCombination,
    NonMonotonicBreakpoints,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HardcodedColor => "hardcoded-color",
            Self::ForbiddenFunction => "forbidden-function",
            Self::MissingThemeUsage => "missing-theme-usage",
            Self::DisallowedPropCombination => "disallowed-prop-combination",
            Self::NonMonotonicBreakpoints => "non-monotonic-breakpoints",
        }
    }

    fn recommendation(self) -> &'static str {
        match self {
            Self::HardcodedColor => {
                "Reference color tokens such as var(--color-primary-500) instead of literals"
            }
            Self::ForbiddenFunction => {
                "Let the configuration providers write styles instead of touching the DOM"
            }
            Self::MissingThemeUsage => {
                "Read values through useDesignTokens or the generated CSS variables"
            }
            Self::DisallowedPropCombination => "Pick one of the conflicting props",
            Self::NonMonotonicBreakpoints => "Order breakpoints so each is wider than the last",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub message: String,
    pub suggestion: String,
    pub severity: Severity,
}

impl ConstraintViolation {
    pub(crate) fn new(
        kind: ViolationKind,
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: suggestion.into(),
            severity,
        }
    }
}

/// 100 minus the penalty of every violation, floored at 0.
pub fn compliance_score(violations: &[ConstraintViolation]) -> u8 {
    violations.iter().fold(MAX_SCORE, |score, violation| {
        score.saturating_sub(violation.severity.penalty())
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConstraintReport {
    pub component: String,
    pub violations: Vec<ConstraintViolation>,
    pub recommendations: Vec<String>,
    pub score: u8,
    /// No error-severity violation was found. Warnings still lower the score.
    pub compliant: bool,
}

impl ComponentConstraintReport {
    pub fn new(component: impl Into<String>, violations: Vec<ConstraintViolation>) -> Self {
        let mut recommendations: Vec<String> = Vec::new();
        for violation in &violations {
            let text = violation.kind.recommendation();
            if !recommendations.iter().any(|existing| existing == text) {
                recommendations.push(text.to_string());
            }
        }

        Self {
            component: component.into(),
            score: compliance_score(&violations),
            compliant: !violations
                .iter()
                .any(|violation| violation.severity == Severity::Error),
            violations,
            recommendations,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: Severity) -> ConstraintViolation {
        ConstraintViolation::new(ViolationKind::HardcodedColor, severity, "m", "s")
    }

    #[test]
    fn score_deducts_per_severity_and_floors_at_zero() {
        assert_eq!(compliance_score(&[]), 100);
        assert_eq!(
            compliance_score(&[
                violation(Severity::Error),
                violation(Severity::Warning),
                violation(Severity::Info),
            ]),
            65
        );
        assert_eq!(compliance_score(&vec![violation(Severity::Error); 6]), 0);
    }

    #[test]
    fn report_deduplicates_recommendations() {
        let report = ComponentConstraintReport::new(
            "Card",
            vec![violation(Severity::Warning), violation(Severity::Warning)],
        );
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.score, 80);
        assert!(report.compliant);
        assert_eq!(report.count(Severity::Warning), 2);
    }

    #[test]
    fn violations_serialise_with_kebab_case_type() {
        let json = serde_json::to_value(violation(Severity::Error)).unwrap();
        assert_eq!(json["type"], "hardcoded-color");
        assert_eq!(json["severity"], "error");
    }
}
