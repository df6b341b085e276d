//! Audit issue model.

use std::fmt;

use serde::Serialize;

/// Category of an accessibility issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    Wcag,
    Heading,
    Contrast,
    Html,
    Aria,
    Keyboard,
    ScreenReader,
    Error,
}

impl IssueKind {
    /// Kebab-case name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wcag => "wcag",
            Self::Heading => "heading",
            Self::Contrast => "contrast",
            Self::Html => "html",
            Self::Aria => "aria",
            Self::Keyboard => "keyboard",
            Self::ScreenReader => "screen-reader",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity reported by the rule engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Serious => "serious",
            Self::Critical => "critical",
        })
    }
}

/// One reported accessibility defect.
///
/// Issues are advisory. Rule-specific fields are only set by the checks
/// that produce them and are omitted from JSON output when empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    /// Outer HTML of the offending element, truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u64>,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            element: None,
            rule_id: None,
            impact: None,
            nodes: Vec::new(),
            help: None,
            ratio: None,
            required_ratio: None,
            line: None,
            column: None,
        }
    }

    #[must_use]
    pub fn with_element(mut self, snippet: impl Into<String>) -> Self {
        self.element = Some(snippet.into());
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule_id: impl Into<String>, impact: Impact) -> Self {
        self.rule_id = Some(rule_id.into());
        self.impact = Some(impact);
        self
    }

    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attach a measured contrast ratio (formatted to two decimals) and the minimum it missed.
    #[must_use]
    pub fn with_ratio(mut self, ratio: f64, required: f64) -> Self {
        self.ratio = Some(format!("{ratio:.2}"));
        self.required_ratio = Some(required);
        self
    }

    #[must_use]
    pub fn with_position(mut self, line: Option<u64>, column: Option<u64>) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {line}")?;
            if let Some(column) = self.column {
                write!(f, ", column {column}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
