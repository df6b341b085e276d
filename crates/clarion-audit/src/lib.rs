//! Accessibility auditing of rendered HTML.
//!
//! The [`Auditor`] parses an HTML string and runs independent checks in a
//! fixed order, concatenating their issues:
//!
//! 1. WCAG rule engine ([`RuleEngine`], default [`BuiltinRuleEngine`])
//! 2. Heading hierarchy
//! 3. Color contrast
//! 4. HTML validity ([`MarkupValidator`], default [`BuiltinValidator`])
//! 5. ARIA roles and required attributes
//! 6. Keyboard accessibility
//! 7. Screen-reader hazards
//!
//! Auditing never fails. When the rule engine or the validator errors, the
//! failure becomes a single issue and the remaining checks still run.
//!
//! # Example
//!
//! ```
//! use clarion_audit::{AuditChecks, Auditor, IssueKind};
//!
//! let auditor = Auditor::new(AuditChecks::default());
//! let issues = auditor.audit(r#"<main><h1>Doc</h1><img src="a.png"></main>"#);
//!
//! assert!(issues
//!     .iter()
//!     .any(|i| i.kind == IssueKind::ScreenReader && i.message == "Image missing alt attribute"));
//! ```

mod checks;
mod engine;
mod error;
mod issue;
mod level;
mod validator;

use scraper::Html;

pub use engine::{BuiltinRuleEngine, RuleEngine};
pub use error::AuditError;
pub use issue::{Impact, Issue, IssueKind};
pub use level::WcagLevel;
pub use validator::{BuiltinValidator, MarkupValidator, NuValidator, Severity, ValidatorMessage};

/// Switches for the individual audit checks. All enabled by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct AuditChecks {
    pub wcag: bool,
    pub heading_hierarchy: bool,
    pub color_contrast: bool,
    pub html_validation: bool,
    pub aria: bool,
    pub keyboard: bool,
    pub screen_reader: bool,
}

impl Default for AuditChecks {
    fn default() -> Self {
        Self {
            wcag: true,
            heading_hierarchy: true,
            color_contrast: true,
            html_validation: true,
            aria: true,
            keyboard: true,
            screen_reader: true,
        }
    }
}

impl AuditChecks {
    /// All checks disabled.
    #[must_use]
    pub fn none() -> Self {
        Self {
            wcag: false,
            heading_hierarchy: false,
            color_contrast: false,
            html_validation: false,
            aria: false,
            keyboard: false,
            screen_reader: false,
        }
    }

    /// Whether at least one check is enabled.
    #[must_use]
    pub fn any(&self) -> bool {
        self.wcag
            || self.heading_hierarchy
            || self.color_contrast
            || self.html_validation
            || self.aria
            || self.keyboard
            || self.screen_reader
    }
}

/// Read-only accessibility audit over HTML strings.
///
/// Holds no per-document state, so one auditor can be shared across threads.
pub struct Auditor {
    checks: AuditChecks,
    wcag_level: WcagLevel,
    engine: Box<dyn RuleEngine>,
    validator: Box<dyn MarkupValidator>,
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(AuditChecks::default())
    }
}

impl Auditor {
    /// Create an auditor using the built-in rule engine and validator.
    #[must_use]
    pub fn new(checks: AuditChecks) -> Self {
        Self {
            checks,
            wcag_level: WcagLevel::default(),
            engine: Box::new(BuiltinRuleEngine),
            validator: Box::new(BuiltinValidator),
        }
    }

    #[must_use]
    pub fn with_wcag_level(mut self, level: WcagLevel) -> Self {
        self.wcag_level = level;
        self
    }

    /// Replace the WCAG rule engine.
    #[must_use]
    pub fn with_engine(mut self, engine: impl RuleEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Replace the markup validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl MarkupValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn checks(&self) -> &AuditChecks {
        &self.checks
    }

    pub fn wcag_level(&self) -> WcagLevel {
        self.wcag_level
    }

    /// Audit a full document or fragment.
    pub fn audit(&self, html: &str) -> Vec<Issue> {
        let document = Html::parse_document(html);
        let mut issues = Vec::new();

        if self.checks.wcag {
            match self.engine.evaluate(&document) {
                Ok(found) => issues.extend(found),
                Err(e) => {
                    tracing::warn!(engine = self.engine.name(), error = %e, "Rule engine failed");
                    issues.push(Issue::new(IssueKind::Error, e.to_string()));
                }
            }
        }

        if self.checks.heading_hierarchy {
            issues.extend(checks::headings::check_headings(&document));
        }

        if self.checks.color_contrast {
            issues.extend(checks::contrast::check_contrast(&document));
        }

        if self.checks.html_validation {
            match self.validator.validate(html) {
                Ok(messages) => issues.extend(
                    messages
                        .into_iter()
                        .filter(|m| m.severity != Severity::Info)
                        .map(ValidatorMessage::into_issue),
                ),
                Err(e) => {
                    tracing::warn!(error = %e, "HTML validation failed");
                    issues.push(Issue::new(
                        IssueKind::Html,
                        format!("HTML validation failed: {e}"),
                    ));
                }
            }
        }

        if self.checks.aria {
            issues.extend(checks::aria::check_aria(&document));
        }

        if self.checks.keyboard {
            issues.extend(checks::keyboard::check_keyboard(&document));
        }

        if self.checks.screen_reader {
            issues.extend(checks::screen_reader::check_screen_reader(&document));
        }

        tracing::debug!(issues = issues.len(), level = %self.wcag_level, "Audit complete");
        issues
    }
}
