//! Semantic and ARIA enhancement of rendered HTML.
//!
//! The [`Enhancer`] mutates a parsed [`Document`] in place so that it meets
//! baseline accessibility expectations before it is written out. Sub-passes
//! run in a fixed order because later passes rely on ids and attributes set
//! by earlier ones (the skip link targets the id given to the main landmark,
//! forms link to ids given to headings):
//!
//! 1. `lang` on the root element
//! 2. `<title>` from frontmatter
//! 3. Landmarks (`main`, `banner`, `contentinfo`, navigation and complementary labels)
//! 4. Heading ids and focusability
//! 5. Link `rel`/labels and fragment targets
//! 6. Table roles, header scopes and labels
//! 7. Form labels, control ids and `aria-required`
//! 8. Code block regions
//! 9. Skip navigation link
//!
//! Every pass is a no-op when the structure it needs is missing, so the
//! enhancer accepts fragments as well as full documents and never fails.
//! Running it twice yields the same tree as running it once.

mod code_blocks;
mod document;
mod forms;
mod headings;
mod ids;
mod landmarks;
mod links;
mod skip_link;
mod tables;

use clarion_dom::{Document, NodeId};
use clarion_meta::Frontmatter;

pub use ids::slugify;
pub use landmarks::DEFAULT_MAIN_ID;

/// Class added to elements that could not be fixed automatically.
pub const WARNING_CLASS: &str = "a11y-warning";

/// Attribute carrying the reason for a [`WARNING_CLASS`] marker.
pub const WARNING_ATTR: &str = "data-a11y-warning";

/// Options for [`Enhancer`].
#[derive(Clone, Debug)]
pub struct EnhanceOptions {
    /// Annotate external links with an `(external link)` accessible name.
    pub indicate_external_links: bool,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            indicate_external_links: true,
        }
    }
}

/// Mutating accessibility pass over a document tree.
///
/// # Example
///
/// ```
/// use clarion_dom::Document;
/// use clarion_enhance::{EnhanceOptions, Enhancer};
/// use clarion_meta::Frontmatter;
///
/// let mut doc = Document::parse("<h1>Hello, World!</h1>");
/// let frontmatter = Frontmatter {
///     language: Some("en".to_owned()),
///     ..Frontmatter::default()
/// };
///
/// Enhancer::new(EnhanceOptions::default()).enhance(&mut doc, &frontmatter);
///
/// let html = doc.to_html();
/// assert!(html.contains(r#"<html lang="en">"#));
/// assert!(html.contains(r#"id="hello-world""#));
/// assert!(html.contains(r#"class="skip-link""#));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Enhancer {
    options: EnhanceOptions,
}

impl Enhancer {
    #[must_use]
    pub fn new(options: EnhanceOptions) -> Self {
        Self { options }
    }

    /// Apply all sub-passes in order and return the same document.
    pub fn enhance<'d>(&self, doc: &'d mut Document, frontmatter: &Frontmatter) -> &'d mut Document {
        document::apply_language(doc, frontmatter);
        document::normalize_title(doc, frontmatter);
        let main = landmarks::assign_landmarks(doc);
        headings::enhance_headings(doc);
        links::enhance_links(doc, self.options.indicate_external_links);
        tables::enhance_tables(doc);
        forms::enhance_forms(doc);
        code_blocks::enhance_code_blocks(doc);
        skip_link::inject_skip_link(doc, main);

        tracing::debug!(
            main = main.and_then(|m| doc.attr(m, "id")).unwrap_or_default(),
            warnings = doc.elements().filter(|&n| doc.has_class(n, WARNING_CLASS)).count(),
            "Document enhanced"
        );
        doc
    }

    /// Parse, enhance and serialize an HTML document.
    #[must_use]
    pub fn enhance_html(&self, html: &str, frontmatter: &Frontmatter) -> String {
        let mut doc = Document::parse(html);
        self.enhance(&mut doc, frontmatter);
        doc.to_html()
    }
}

/// Flag an element that needs a human fix.
pub(crate) fn mark_warning(doc: &mut Document, id: NodeId, reason: &str) {
    doc.add_class(id, WARNING_CLASS);
    doc.set_attr(id, WARNING_ATTR, reason);
}

/// Whether the element has a non-empty `aria-label` or `aria-labelledby`.
pub(crate) fn has_aria_name(doc: &Document, id: NodeId) -> bool {
    doc.element(id).is_some_and(|el| {
        el.non_empty_attr("aria-label").is_some() || el.non_empty_attr("aria-labelledby").is_some()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn frontmatter(title: &str, language: &str) -> Frontmatter {
        Frontmatter {
            title: Some(title.to_owned()),
            language: Some(language.to_owned()),
            ..Frontmatter::default()
        }
    }

    const PAGE: &str = r##"<header><nav><a href="/">Home</a></nav></header>
<h1>Guide</h1>
<p>See <a href="https://example.com">Example</a> and <a href="#setup">setup</a>.</p>
<h2>Setup</h2>
<table><tr><th>A</th></tr><tr><td>1</td></tr></table>
<form><label>Name <input type="text" required></label><input type="email"></form>
<pre><code class="language-rust">fn main() {}</code></pre>
<aside>Note</aside>
<footer>Footer</footer>"##;

    #[test]
    fn test_enhance_is_idempotent() {
        let enhancer = Enhancer::default();
        let fm = frontmatter("Guide", "en");

        let mut doc = Document::parse(PAGE);
        enhancer.enhance(&mut doc, &fm);
        let once = doc.to_html();

        enhancer.enhance(&mut doc, &fm);
        let twice = doc.to_html();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_enhance_reparsed_output_is_stable() {
        let enhancer = Enhancer::default();
        let fm = frontmatter("Guide", "en");

        let once = enhancer.enhance_html(PAGE, &fm);
        let twice = enhancer.enhance_html(&once, &fm);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_enhance_fragment_without_root_is_untouched_structurally() {
        let mut doc = Document::parse_fragment("<p>Hello</p>");
        Enhancer::default().enhance(&mut doc, &frontmatter("T", "en"));

        assert!(doc.document_element().is_none());
        assert!(doc.elements_named(&["main", "title", "a"]).is_empty());
        assert_eq!(doc.to_html(), "<p>Hello</p>");
    }

    #[test]
    fn test_enhance_with_empty_frontmatter() {
        let mut doc = Document::parse("<p>Hi</p>");
        Enhancer::default().enhance(&mut doc, &Frontmatter::default());

        let html = doc.document_element().unwrap();
        assert!(!doc.has_attr(html, "lang"));
        assert!(doc.elements_named(&["title"]).is_empty());
        assert_eq!(doc.elements_named(&["main"]).len(), 1);
    }

    #[test]
    fn test_end_to_end_image_fragment() {
        let mut doc = Document::parse(r#"<img src="a.png">"#);
        Enhancer::default().enhance(&mut doc, &frontmatter("T", "en"));

        let html = doc.document_element().unwrap();
        assert_eq!(doc.attr(html, "lang"), Some("en"));

        let title = doc.elements_named(&["title"])[0];
        assert_eq!(doc.text_content(title), "T");

        let main = doc.elements_named(&["main"])[0];
        assert_eq!(doc.attr(main, "role"), Some("main"));
        assert_eq!(doc.attr(main, "id"), Some("main-content"));
        let img = doc.elements_named(&["img"])[0];
        assert_eq!(doc.parent(img), Some(main));

        let body = doc.body().unwrap();
        let first = doc.element_children(body).next().unwrap();
        assert!(doc.has_class(first, "skip-link"));
        assert_eq!(doc.attr(first, "href"), Some("#main-content"));
    }

    #[test]
    fn test_warning_marker() {
        let mut doc = Document::parse_fragment("<a>x</a>");
        let a = doc.elements_named(&["a"])[0];
        mark_warning(&mut doc, a, "reason");
        assert!(doc.has_class(a, WARNING_CLASS));
        assert_eq!(doc.attr(a, WARNING_ATTR), Some("reason"));
    }
}
