//! Link relationships, accessible names and fragment targets.

use clarion_dom::{Document, NodeId};

use crate::{has_aria_name, mark_warning};

const EXTERNAL_REL: &str = "noopener noreferrer";

pub(crate) fn enhance_links(doc: &mut Document, indicate_external: bool) {
    for link in doc.elements_named(&["a"]) {
        let Some(href) = doc
            .attr(link, "href")
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(ToOwned::to_owned)
        else {
            continue;
        };
        if doc.has_class(link, "skip-link") {
            continue;
        }

        let text = doc.text_content(link).trim().to_owned();

        if is_external(&href) {
            doc.set_attr_if_absent(link, "rel", EXTERNAL_REL);
            if indicate_external
                && !text.is_empty()
                && !hints_external(doc, link, &text)
                && !has_aria_name(doc, link)
            {
                doc.set_attr(link, "aria-label", format!("{text} (external link)"));
            }
        } else if let Some(fragment) = href.strip_prefix('#').filter(|f| !f.is_empty())
            && let Some(target) = doc.element_by_id(fragment)
        {
            if !is_focusable(doc, target) {
                doc.set_attr(target, "tabindex", "-1");
            }
            if !text.is_empty() && !has_aria_name(doc, link) {
                doc.set_attr(link, "aria-label", format!("Jump to {text}"));
            }
        }

        if text.is_empty() && !has_aria_name(doc, link) {
            label_from_image(doc, link);
        }
    }
}

/// Fall back to an enclosed image's alt text, or flag the link.
fn label_from_image(doc: &mut Document, link: NodeId) {
    let alt = doc
        .descendants_named(link, &["img"])
        .into_iter()
        .find_map(|img| doc.element(img).and_then(|el| el.non_empty_attr("alt")))
        .map(|alt| alt.trim().to_owned());

    match alt {
        Some(alt) => doc.set_attr(link, "aria-label", alt),
        None => mark_warning(doc, link, "Link has no accessible text"),
    }
}

/// Whether `id` already takes focus, natively or through `tabindex`.
fn is_focusable(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.element(id) else {
        return false;
    };
    if el.has_attr("tabindex") {
        return true;
    }
    match el.name() {
        "button" | "select" | "textarea" => true,
        "input" => !el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
        "a" | "area" => el.has_attr("href"),
        _ => false,
    }
}

fn is_external(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whether the link already tells the user it leads off-site.
fn hints_external(doc: &Document, link: NodeId, text: &str) -> bool {
    text.to_lowercase().contains("external")
        || doc.descendants(link).any(|n| {
            doc.element(n)
                .is_some_and(|el| el.classes().any(|c| c.to_lowercase().contains("external")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WARNING_ATTR, WARNING_CLASS};

    fn first_link(doc: &Document) -> NodeId {
        doc.elements_named(&["a"])[0]
    }

    #[test]
    fn test_external_link() {
        let mut doc = Document::parse(r#"<a href="https://example.com">Example</a>"#);
        enhance_links(&mut doc, true);
        let a = first_link(&doc);
        assert_eq!(doc.attr(a, "rel"), Some("noopener noreferrer"));
        assert_eq!(doc.attr(a, "aria-label"), Some("Example (external link)"));
    }

    #[test]
    fn test_external_link_keeps_rel_and_label() {
        let mut doc = Document::parse(
            r#"<a href="http://example.com" rel="nofollow" aria-label="Ex">Example</a>"#,
        );
        enhance_links(&mut doc, true);
        let a = first_link(&doc);
        assert_eq!(doc.attr(a, "rel"), Some("nofollow"));
        assert_eq!(doc.attr(a, "aria-label"), Some("Ex"));
    }

    #[test]
    fn test_external_hint_in_text() {
        let mut doc = Document::parse(r#"<a href="https://x.io">Docs (external)</a>"#);
        enhance_links(&mut doc, true);
        assert!(!doc.has_attr(first_link(&doc), "aria-label"));
    }

    #[test]
    fn test_external_hint_icon_class() {
        let mut doc = Document::parse(
            r#"<a href="https://x.io">Docs <span class="icon-external-link"></span></a>"#,
        );
        enhance_links(&mut doc, true);
        assert!(!doc.has_attr(first_link(&doc), "aria-label"));
    }

    #[test]
    fn test_external_annotation_disabled() {
        let mut doc = Document::parse(r#"<a href="https://x.io">Docs</a>"#);
        enhance_links(&mut doc, false);
        let a = first_link(&doc);
        assert_eq!(doc.attr(a, "rel"), Some("noopener noreferrer"));
        assert!(!doc.has_attr(a, "aria-label"));
    }

    #[test]
    fn test_fragment_link() {
        let mut doc = Document::parse(r##"<a href="#usage">Usage</a><section id="usage"></section>"##);
        enhance_links(&mut doc, true);
        let a = first_link(&doc);
        let target = doc.element_by_id("usage").unwrap();
        assert_eq!(doc.attr(target, "tabindex"), Some("-1"));
        assert_eq!(doc.attr(a, "aria-label"), Some("Jump to Usage"));
    }

    #[test]
    fn test_fragment_link_missing_target() {
        let mut doc = Document::parse(r##"<a href="#nowhere">Usage</a>"##);
        enhance_links(&mut doc, true);
        assert!(!doc.has_attr(first_link(&doc), "aria-label"));
    }

    #[test]
    fn test_fragment_target_tabindex_kept() {
        let mut doc = Document::parse(r##"<a href="#t">T</a><div id="t" tabindex="0"></div>"##);
        enhance_links(&mut doc, true);
        let target = doc.element_by_id("t").unwrap();
        assert_eq!(doc.attr(target, "tabindex"), Some("0"));
    }

    #[test]
    fn test_focusable_fragment_targets_untouched() {
        let mut doc = Document::parse(
            r##"<a href="#b">B</a><a href="#l">L</a><a href="#i">I</a>
            <button id="b">Go</button><a id="l" href="/x">x</a><input id="i">"##,
        );
        enhance_links(&mut doc, true);
        for id in ["b", "l", "i"] {
            let target = doc.element_by_id(id).unwrap();
            assert!(!doc.has_attr(target, "tabindex"), "{id} got a tabindex");
        }
    }

    #[test]
    fn test_hidden_input_target_gets_tabindex() {
        let mut doc = Document::parse(r##"<a href="#h">H</a><input id="h" type="hidden">"##);
        enhance_links(&mut doc, true);
        let target = doc.element_by_id("h").unwrap();
        assert_eq!(doc.attr(target, "tabindex"), Some("-1"));
    }

    #[test]
    fn test_image_link_uses_alt() {
        let mut doc = Document::parse(r#"<a href="/home"><img src="logo.png" alt="Home"></a>"#);
        enhance_links(&mut doc, true);
        assert_eq!(doc.attr(first_link(&doc), "aria-label"), Some("Home"));
    }

    #[test]
    fn test_empty_link_flagged() {
        let mut doc = Document::parse(r#"<a href="/x"><img src="i.png"></a>"#);
        enhance_links(&mut doc, true);
        let a = first_link(&doc);
        assert!(doc.has_class(a, WARNING_CLASS));
        assert!(doc.has_attr(a, WARNING_ATTR));
    }

    #[test]
    fn test_link_without_href_ignored() {
        let mut doc = Document::parse(r#"<a name="anchor"></a><a href="">x</a>"#);
        enhance_links(&mut doc, true);
        for a in doc.elements_named(&["a"]) {
            assert!(!doc.has_class(a, WARNING_CLASS));
        }
    }

    #[test]
    fn test_skip_link_ignored() {
        let mut doc = Document::parse(
            r##"<a class="skip-link" href="#main-content">Skip to main content</a><main id="main-content"></main>"##,
        );
        enhance_links(&mut doc, true);
        let main = doc.element_by_id("main-content").unwrap();
        assert!(!doc.has_attr(first_link(&doc), "aria-label"));
        assert!(!doc.has_attr(main, "tabindex"));
    }
}
