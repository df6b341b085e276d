//! General WCAG rule engine.
//!
//! The [`Auditor`](crate::Auditor) talks to the engine through the
//! [`RuleEngine`] trait so another implementation can be plugged in.
//! [`BuiltinRuleEngine`] evaluates a fixed ruleset modelled on the common
//! axe rule ids.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::checks::{contrast, has_aria_name, non_empty_attr, snippet, text};
use crate::{AuditError, Impact, Issue, IssueKind};

/// Evaluates a ruleset against a parsed document.
pub trait RuleEngine: Send + Sync {
    /// Engine name for logs.
    fn name(&self) -> &str;

    /// Return one issue per violated rule.
    fn evaluate(&self, document: &Html) -> Result<Vec<Issue>, AuditError>;
}

struct Rule {
    id: &'static str,
    impact: Impact,
    description: &'static str,
    help: &'static str,
    /// Returns snippets of the offending nodes; empty means the rule passed.
    check: fn(&Html) -> Vec<String>,
}

const RULES: &[Rule] = &[
    Rule {
        id: "color-contrast",
        impact: Impact::Serious,
        description: "Elements must meet minimum color contrast ratio thresholds",
        help: "Increase the contrast between foreground and background colors",
        check: color_contrast,
    },
    Rule {
        id: "landmark-one-main",
        impact: Impact::Moderate,
        description: "Document should have one main landmark",
        help: "Wrap the primary content in a single <main> element",
        check: landmark_one_main,
    },
    Rule {
        id: "page-has-heading-one",
        impact: Impact::Moderate,
        description: "Page should contain a level-one heading",
        help: "Add an <h1> describing the page",
        check: page_has_heading_one,
    },
    Rule {
        id: "region",
        impact: Impact::Moderate,
        description: "All page content should be contained by landmarks",
        help: "Move content into main, header, footer, nav or aside",
        check: region,
    },
    Rule {
        id: "document-title",
        impact: Impact::Serious,
        description: "Documents must have a <title> element",
        help: "Add a non-empty <title> to the document head",
        check: document_title,
    },
    Rule {
        id: "html-has-lang",
        impact: Impact::Serious,
        description: "<html> element must have a lang attribute",
        help: "Set the page language, e.g. <html lang=\"en\">",
        check: html_has_lang,
    },
    Rule {
        id: "image-alt",
        impact: Impact::Critical,
        description: "Images must have alternate text",
        help: "Add an alt attribute, or role=\"presentation\" for decorative images",
        check: image_alt,
    },
    Rule {
        id: "button-name",
        impact: Impact::Critical,
        description: "Buttons must have discernible text",
        help: "Give the button text content or an aria-label",
        check: button_name,
    },
    Rule {
        id: "input-button-name",
        impact: Impact::Critical,
        description: "Input buttons must have discernible text",
        help: "Set a non-empty value or aria-label on the input",
        check: input_button_name,
    },
    Rule {
        id: "label",
        impact: Impact::Critical,
        description: "Form elements must have labels",
        help: "Associate a <label> with the control or add an aria-label",
        check: label,
    },
    Rule {
        id: "link-name",
        impact: Impact::Serious,
        description: "Links must have discernible text",
        help: "Give the link text content, an aria-label or an image with alt text",
        check: link_name,
    },
    Rule {
        id: "list",
        impact: Impact::Serious,
        description: "<ul> and <ol> must only directly contain <li>, <script> or <template> elements",
        help: "Wrap list content in <li> elements",
        check: list,
    },
    Rule {
        id: "listitem",
        impact: Impact::Serious,
        description: "<li> elements must be contained in a <ul> or <ol>",
        help: "Place list items inside a list",
        check: listitem,
    },
    Rule {
        id: "meta-viewport",
        impact: Impact::Critical,
        description: "Zooming and scaling must not be disabled",
        help: "Remove user-scalable=no and maximum-scale below 2 from the viewport meta tag",
        check: meta_viewport,
    },
];

/// Built-in implementation of the canonical WCAG ruleset.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinRuleEngine;

impl RuleEngine for BuiltinRuleEngine {
    fn name(&self) -> &str {
        "builtin"
    }

    fn evaluate(&self, document: &Html) -> Result<Vec<Issue>, AuditError> {
        Ok(RULES
            .iter()
            .filter_map(|rule| {
                let nodes = (rule.check)(document);
                let first = nodes.first()?.clone();
                Some(
                    Issue::new(IssueKind::Wcag, rule.description)
                        .with_rule(rule.id, rule.impact)
                        .with_help(rule.help)
                        .with_element(first)
                        .with_nodes(nodes),
                )
            })
            .collect())
    }
}

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

selector!(HTML, "html");
selector!(BODY, "body");
selector!(MAIN, r#"main, [role="main"]"#);
selector!(H1, r#"h1, [role="heading"][aria-level="1"]"#);
selector!(TITLE, "head title");
selector!(IMG, "img");
selector!(BUTTON, "button");
selector!(INPUT_BUTTON, r#"input[type="button"], input[type="submit"], input[type="reset"]"#);
selector!(CONTROL, "input, select, textarea");
selector!(LABEL, "label");
selector!(LINK, "a[href]");
selector!(LIST, "ul, ol");
selector!(LIST_ITEM, "li");
selector!(VIEWPORT, r#"meta[name="viewport"]"#);

const LANDMARK_TAGS: [&str; 5] = ["header", "nav", "main", "footer", "aside"];
const LANDMARK_ROLES: [&str; 8] = [
    "banner",
    "navigation",
    "main",
    "contentinfo",
    "complementary",
    "region",
    "search",
    "form",
];

/// Snippet of the `html` element for document-level violations.
fn root_snippet(document: &Html) -> Vec<String> {
    document.select(&HTML).next().map(snippet).into_iter().collect()
}

fn color_contrast(document: &Html) -> Vec<String> {
    contrast::low_contrast_elements(document)
        .into_iter()
        .map(|found| snippet(found.element))
        .collect()
}

fn landmark_one_main(document: &Html) -> Vec<String> {
    let mains: Vec<_> = document.select(&MAIN).collect();
    match mains.len() {
        0 => root_snippet(document),
        1 => Vec::new(),
        _ => mains.into_iter().map(snippet).collect(),
    }
}

fn page_has_heading_one(document: &Html) -> Vec<String> {
    if document.select(&H1).next().is_some() {
        Vec::new()
    } else {
        root_snippet(document)
    }
}

/// Top-level body content outside any landmark. Skip links are allowed.
fn region(document: &Html) -> Vec<String> {
    let Some(body) = document.select(&BODY).next() else {
        return Vec::new();
    };
    body.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| {
            let name = el.value().name();
            let is_landmark = LANDMARK_TAGS.contains(&name)
                || el
                    .value()
                    .attr("role")
                    .is_some_and(|r| LANDMARK_ROLES.contains(&r));
            let is_skip_link =
                name == "a" && el.value().attr("href").is_some_and(|h| h.starts_with('#'));
            let is_hidden = matches!(name, "script" | "style" | "template" | "noscript");
            !(is_landmark || is_skip_link || is_hidden)
        })
        .map(snippet)
        .collect()
}

fn document_title(document: &Html) -> Vec<String> {
    if document.select(&TITLE).any(|t| !text(t).is_empty()) {
        Vec::new()
    } else {
        root_snippet(document)
    }
}

fn html_has_lang(document: &Html) -> Vec<String> {
    document
        .select(&HTML)
        .filter(|html| non_empty_attr(*html, "lang").is_none())
        .map(snippet)
        .collect()
}

fn image_alt(document: &Html) -> Vec<String> {
    document
        .select(&IMG)
        .filter(|img| {
            let role = img.value().attr("role");
            img.value().attr("alt").is_none()
                && !matches!(role, Some("presentation" | "none"))
                && !has_aria_name(*img)
        })
        .map(snippet)
        .collect()
}

fn button_name(document: &Html) -> Vec<String> {
    document
        .select(&BUTTON)
        .filter(|button| text(*button).is_empty() && !has_aria_name(*button))
        .map(snippet)
        .collect()
}

fn input_button_name(document: &Html) -> Vec<String> {
    document
        .select(&INPUT_BUTTON)
        .filter(|input| {
            // Submit and reset buttons fall back to a browser-provided label.
            let value = input.value().attr("value");
            let named = match input.value().attr("type") {
                Some("button") => value.is_some_and(|v| !v.trim().is_empty()),
                _ => value.is_none_or(|v| !v.trim().is_empty()),
            };
            !named && !has_aria_name(*input)
        })
        .map(snippet)
        .collect()
}

fn label(document: &Html) -> Vec<String> {
    let label_targets: Vec<&str> = document
        .select(&LABEL)
        .filter_map(|l| l.value().attr("for"))
        .collect();

    document
        .select(&CONTROL)
        .filter(|control| {
            let kind = control.value().attr("type").unwrap_or("text");
            if control.value().name() == "input"
                && matches!(kind, "hidden" | "submit" | "button" | "reset" | "image")
            {
                return false;
            }
            let by_for = control
                .value()
                .attr("id")
                .is_some_and(|id| label_targets.contains(&id));
            let wrapped = control
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| a.value().name() == "label");
            !(by_for || wrapped || has_aria_name(*control))
        })
        .map(snippet)
        .collect()
}

fn link_name(document: &Html) -> Vec<String> {
    document
        .select(&LINK)
        .filter(|link| {
            let has_image_alt = link
                .select(&IMG)
                .any(|img| non_empty_attr(img, "alt").is_some());
            text(*link).is_empty() && !has_aria_name(*link) && !has_image_alt
        })
        .map(snippet)
        .collect()
}

fn list(document: &Html) -> Vec<String> {
    document
        .select(&LIST)
        .filter(|list| {
            list.children()
                .filter_map(ElementRef::wrap)
                .any(|child| !matches!(child.value().name(), "li" | "script" | "template"))
        })
        .map(snippet)
        .collect()
}

fn listitem(document: &Html) -> Vec<String> {
    document
        .select(&LIST_ITEM)
        .filter(|li| {
            li.parent().and_then(ElementRef::wrap).is_none_or(|parent| {
                !matches!(parent.value().name(), "ul" | "ol" | "menu")
                    && parent.value().attr("role") != Some("list")
            })
        })
        .map(snippet)
        .collect()
}

fn meta_viewport(document: &Html) -> Vec<String> {
    document
        .select(&VIEWPORT)
        .filter(|meta| {
            let content = meta.value().attr("content").unwrap_or_default().to_ascii_lowercase();
            content.split(',').any(|pair| {
                let Some((key, value)) = pair.split_once('=') else {
                    return false;
                };
                let value = value.trim();
                match key.trim() {
                    "user-scalable" => value == "no" || value == "0",
                    "maximum-scale" => value.parse::<f64>().is_ok_and(|scale| scale < 2.0),
                    _ => false,
                }
            })
        })
        .map(snippet)
        .collect()
}
