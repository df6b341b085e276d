//! Frontmatter extraction for Clarion documents.
//!
//! A document may start with a YAML block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: Getting Started
//! language: en
//! ---
//!
//! # Getting Started
//! ```
//!
//! All keys are optional. Known keys are mapped onto [`Frontmatter`] fields,
//! anything else is kept in [`Frontmatter::extra`].

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// Document metadata from the frontmatter block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description (rendered as `<meta name="description">`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// BCP 47 language code for the `lang` attribute.
    #[serde(default, alias = "lang", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Theme name used by the page template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Any other keys.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Error type for frontmatter operations.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// YAML parsing error.
    #[error("Invalid frontmatter: {0}")]
    Parse(String),
}

impl Frontmatter {
    /// Parse frontmatter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or not a mapping.
    pub fn from_yaml(content: &str) -> Result<Self, MetaError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(|e| MetaError::Parse(e.to_string()))
    }

    /// Non-empty title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Non-empty language code, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        non_empty(self.language.as_deref())
    }

    /// Non-empty description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Non-empty theme name, if any.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        non_empty(self.theme.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Split a leading frontmatter block from a document.
///
/// Returns the YAML text (without delimiters) and the remaining body. The
/// block must start on the first line with `---` and end with a `---` or
/// `...` line; otherwise the whole input is returned as the body.
///
/// # Examples
///
/// ```
/// use clarion_meta::split_frontmatter;
///
/// let (yaml, body) = split_frontmatter("---\ntitle: A\n---\n# A\n");
/// assert_eq!(yaml, Some("title: A\n"));
/// assert_eq!(body, "# A\n");
///
/// assert_eq!(split_frontmatter("# No frontmatter"), (None, "# No frontmatter"));
/// ```
#[must_use]
pub fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    let source_no_bom = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = strip_delimiter_line(source_no_bom, "---") else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, source)
}

/// Strip a delimiter line (`---\n` or `---\r\n`) from the start of `s`.
fn strip_delimiter_line<'a>(s: &'a str, delimiter: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(delimiter)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Extract frontmatter and body from a document.
///
/// # Errors
///
/// Returns an error if a frontmatter block is present but malformed.
pub fn extract(source: &str) -> Result<(Frontmatter, &str), MetaError> {
    match split_frontmatter(source) {
        (Some(yaml), body) => Ok((Frontmatter::from_yaml(yaml)?, body)),
        (None, body) => Ok((Frontmatter::default(), body)),
    }
}

/// Plain text of the first level-1 heading in a markdown document.
#[must_use]
pub fn title_from_markdown(markdown: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut title = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let title = title.trim();
                return (!title.is_empty()).then(|| title.to_owned());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(&text),
            _ => {}
        }
    }

    None
}
