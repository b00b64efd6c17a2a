//! Best-effort design lint. Every check here is string or shape matching
//! over serialised props and source text; false positives are expected.

mod model;
mod policy;

pub use model::{
    compliance_score, ComponentConstraintReport, ConstraintViolation, Severity, ViolationKind,
};
pub use policy::{ConstraintPolicy, PropCombination};

use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::theme::LayoutConfig;

const COLOR_PATTERN: &str =
    r"(?i)#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{3,4})\b|rgba?\([^)]*\)|hsla?\([^)]*\)";

#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("invalid constraint pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("failed to serialise props: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type ConstraintResult<T> = std::result::Result<T, ConstraintError>;

#[derive(Debug, Clone)]
pub struct ConstraintChecker {
    policy: ConstraintPolicy,
    color_pattern: Regex,
    forbidden_pattern: Option<Regex>,
}

impl ConstraintChecker {
    pub fn new(policy: ConstraintPolicy) -> ConstraintResult<Self> {
        let color_pattern = Regex::new(COLOR_PATTERN)?;
        let forbidden_pattern = if policy.forbidden_functions.is_empty() {
            None
        } else {
            let names: Vec<String> = policy
                .forbidden_functions
                .iter()
                .map(|name| regex::escape(name))
                .collect();
            Some(Regex::new(&format!(r"\b({})\s*\(", names.join("|")))?)
        };

        Ok(Self {
            policy,
            color_pattern,
            forbidden_pattern,
        })
    }

    pub fn policy(&self) -> &ConstraintPolicy {
        &self.policy
    }

    /// Flags color literals anywhere in the JSON form of `props`.
    pub fn check_hardcoded_colors<T>(&self, props: &T) -> ConstraintResult<Vec<ConstraintViolation>>
    where
        T: Serialize + ?Sized,
    {
        let blob = serde_json::to_string(props)?;
        Ok(self
            .distinct_colors(&blob)
            .into_iter()
            .map(|literal| {
                ConstraintViolation::new(
                    ViolationKind::HardcodedColor,
                    Severity::Error,
                    format!("hard-coded color `{literal}` in props"),
                    "use a color token or a className bound to the theme",
                )
            })
            .collect())
    }

    pub fn check_source_colors(&self, source: &str) -> Vec<ConstraintViolation> {
        self.distinct_colors(source)
            .into_iter()
            .map(|literal| {
                ConstraintViolation::new(
                    ViolationKind::HardcodedColor,
                    Severity::Error,
                    format!("hard-coded color `{literal}` in source"),
                    "replace the literal with a var(--color-*) reference",
                )
            })
            .collect()
    }

    pub fn check_forbidden_functions(&self, source: &str) -> Vec<ConstraintViolation> {
        let Some(pattern) = &self.forbidden_pattern else {
            return Vec::new();
        };

        let found: BTreeSet<&str> = pattern
            .captures_iter(source)
            .filter_map(|captures| captures.get(1))
            .map(|name| name.as_str())
            .collect();
        found
            .into_iter()
            .map(|name| {
                ConstraintViolation::new(
                    ViolationKind::ForbiddenFunction,
                    Severity::Error,
                    format!("call to forbidden function `{name}`"),
                    "change the configuration through a provider instead",
                )
            })
            .collect()
    }

    pub fn check_theme_usage(&self, source: &str) -> Vec<ConstraintViolation> {
        let markers = &self.policy.theme_markers;
        if markers.is_empty() || markers.iter().any(|marker| source.contains(marker.as_str())) {
            return Vec::new();
        }

        vec![ConstraintViolation::new(
            ViolationKind::MissingThemeUsage,
            Severity::Warning,
            "no theme hook or CSS variable reference found",
            format!("use one of: {}", markers.join(", ")),
        )]
    }

    /// Only top-level props count; `null` and `false` are treated as unset.
    pub fn check_prop_combinations(&self, props: &Value) -> Vec<ConstraintViolation> {
        let Some(props) = props.as_object() else {
            return Vec::new();
        };
        let is_set = |name: &String| {
            props
                .get(name)
                .is_some_and(|value| !value.is_null() && value != &Value::Bool(false))
        };

        self.policy
            .disallowed_combinations
            .iter()
            .filter(|combination| {
                !combination.props.is_empty() && combination.props.iter().all(&is_set)
            })
            .map(|combination| {
                ConstraintViolation::new(
                    ViolationKind::DisallowedPropCombination,
                    Severity::Warning,
                    format!("props {} are set together", combination.props.join(" + ")),
                    combination.reason.clone(),
                )
            })
            .collect()
    }

    pub fn check_layout(&self, layout: &LayoutConfig) -> Vec<ConstraintViolation> {
        let breakpoints = &layout.grid_system.breakpoints;
        if breakpoints.is_monotonic() {
            return Vec::new();
        }

        breakpoints
            .named()
            .windows(2)
            .filter(|pair| pair[0].1 >= pair[1].1)
            .map(|pair| {
                let ((low, low_px), (high, high_px)) = (pair[0], pair[1]);
                ConstraintViolation::new(
                    ViolationKind::NonMonotonicBreakpoints,
                    Severity::Error,
                    format!("breakpoint {high} ({high_px}px) is not wider than {low} ({low_px}px)"),
                    format!("set {high} above {low_px}px"),
                )
            })
            .collect()
    }

    pub fn check_component<T>(
        &self,
        component: &str,
        props: &T,
    ) -> ConstraintResult<ComponentConstraintReport>
    where
        T: Serialize + ?Sized,
    {
        let props = serde_json::to_value(props)?;
        let mut violations = self.check_hardcoded_colors(&props)?;
        violations.extend(self.check_prop_combinations(&props));
        Ok(self.report(component, violations))
    }

    pub fn check_source(&self, component: &str, source: &str) -> ComponentConstraintReport {
        let mut violations = self.check_source_colors(source);
        violations.extend(self.check_forbidden_functions(source));
        violations.extend(self.check_theme_usage(source));
        self.report(component, violations)
    }

    fn report(
        &self,
        component: &str,
        violations: Vec<ConstraintViolation>,
    ) -> ComponentConstraintReport {
        let report = ComponentConstraintReport::new(component, violations);
        tracing::debug!(
            component,
            violations = report.violations.len(),
            score = report.score,
            "constraint check finished"
        );
        report
    }

    fn distinct_colors<'s>(&self, text: &'s str) -> Vec<&'s str> {
        let mut seen = BTreeSet::new();
        self.color_pattern
            .find_iter(text)
            .map(|found| found.as_str())
            .filter(|literal| seen.insert(literal.to_ascii_lowercase()))
            .collect()
    }
}
