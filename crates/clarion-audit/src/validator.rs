//! HTML validity checking.
//!
//! [`BuiltinValidator`] works offline from html5ever's parse errors plus a
//! few source-level checks. [`NuValidator`] sends the document to a
//! [Nu HTML Checker](https://validator.github.io/validator/) instance.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use scraper::Html;
use serde::Deserialize;
use ureq::Agent;

use crate::{AuditError, Issue, IssueKind};

/// Severity of a validator message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One message reported by a [`MarkupValidator`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatorMessage {
    pub severity: Severity,
    pub message: String,
    pub line: Option<u64>,
    pub column: Option<u64>,
}

impl ValidatorMessage {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    #[must_use]
    pub fn at(mut self, line: u64, column: u64) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Convert to an `html` issue, keeping message and position.
    pub fn into_issue(self) -> Issue {
        Issue::new(IssueKind::Html, self.message).with_position(self.line, self.column)
    }
}

/// Checks an HTML string for markup errors.
pub trait MarkupValidator: Send + Sync {
    fn validate(&self, html: &str) -> Result<Vec<ValidatorMessage>, AuditError>;
}

static OBSOLETE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<(acronym|applet|basefont|big|blink|center|dir|font|frame|frameset|isindex|marquee|noframes|strike|tt)\b",
    )
    .unwrap()
});

static SELF_CLOSING_VOID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(area|base|br|col|embed|hr|img|input|link|meta|source|track|wbr)\b[^>]*/>")
        .unwrap()
});

/// Offline validator.
///
/// Reports html5ever parse errors, obsolete elements (with source position)
/// and informational notes about trailing slashes on void elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinValidator;

impl MarkupValidator for BuiltinValidator {
    fn validate(&self, html: &str) -> Result<Vec<ValidatorMessage>, AuditError> {
        let document = Html::parse_document(html);
        let mut messages: Vec<ValidatorMessage> = document
            .errors
            .iter()
            .map(|e| ValidatorMessage::new(Severity::Error, e.clone()))
            .collect();

        for caps in OBSOLETE_RE.captures_iter(html) {
            let whole = caps.get(0).map_or(0, |m| m.start());
            let (line, column) = position(html, whole);
            messages.push(
                ValidatorMessage::new(
                    Severity::Warning,
                    format!("The <{}> element is obsolete", caps[1].to_ascii_lowercase()),
                )
                .at(line, column),
            );
        }

        for caps in SELF_CLOSING_VOID_RE.captures_iter(html) {
            let whole = caps.get(0).map_or(0, |m| m.start());
            let (line, column) = position(html, whole);
            messages.push(
                ValidatorMessage::new(
                    Severity::Info,
                    format!(
                        "Trailing slash on void element <{}> has no effect",
                        caps[1].to_ascii_lowercase()
                    ),
                )
                .at(line, column),
            );
        }

        Ok(messages)
    }
}

/// 1-based line and column of a byte offset.
fn position(source: &str, offset: usize) -> (u64, u64) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit_once('\n')
        .map_or(before, |(_, tail)| tail)
        .chars()
        .count()
        + 1;
    (line as u64, column as u64)
}

/// Validator backed by a Nu HTML Checker endpoint.
pub struct NuValidator {
    agent: Agent,
    url: String,
}

impl NuValidator {
    /// Create a validator posting to `url` (e.g. `http://localhost:8888/`).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            url: url.into(),
        }
    }
}

impl MarkupValidator for NuValidator {
    fn validate(&self, html: &str) -> Result<Vec<ValidatorMessage>, AuditError> {
        let url = format!("{}?out=json", self.url.trim_end_matches('?'));
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/html; charset=utf-8")
            .send(html.as_bytes())
            .map_err(|e| AuditError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(AuditError::Http(format!("HTTP {status}: {error_body}")));
        }

        let text = body
            .read_to_string()
            .map_err(|e| AuditError::Response(e.to_string()))?;
        parse_nu_response(&text)
    }
}

#[derive(Deserialize)]
struct NuResponse {
    #[serde(default)]
    messages: Vec<NuMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NuMessage {
    #[serde(rename = "type")]
    kind: String,
    sub_type: Option<String>,
    #[serde(default)]
    message: String,
    last_line: Option<u64>,
    last_column: Option<u64>,
}

/// Map a Nu checker JSON response to validator messages.
fn parse_nu_response(json: &str) -> Result<Vec<ValidatorMessage>, AuditError> {
    let response: NuResponse =
        serde_json::from_str(json).map_err(|e| AuditError::Response(e.to_string()))?;

    response
        .messages
        .into_iter()
        .map(|m| {
            let severity = match (m.kind.as_str(), m.sub_type.as_deref()) {
                ("error", _) => Severity::Error,
                ("info", Some("warning")) => Severity::Warning,
                ("info", _) => Severity::Info,
                ("non-document-error", _) => return Err(AuditError::Rejected(m.message)),
                (other, _) => {
                    tracing::debug!(kind = other, "Unknown validator message type");
                    Severity::Info
                }
            };
            Ok(ValidatorMessage {
                severity,
                message: m.message,
                line: m.last_line,
                column: m.last_column,
            })
        })
        .collect()
}
