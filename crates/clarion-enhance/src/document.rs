//! Document-level metadata: `lang` and `<title>`.

use clarion_dom::Document;
use clarion_meta::Frontmatter;

/// Set `lang` on the root `html` element from the frontmatter language.
pub(crate) fn apply_language(doc: &mut Document, frontmatter: &Frontmatter) {
    let (Some(language), Some(html)) = (frontmatter.language(), doc.document_element()) else {
        return;
    };
    let language = language.to_owned();
    doc.set_attr(html, "lang", language);
}

/// Make sure `head > title` carries the frontmatter title.
///
/// An existing non-empty title is never overwritten.
pub(crate) fn normalize_title(doc: &mut Document, frontmatter: &Frontmatter) {
    let (Some(title), Some(html)) = (frontmatter.title(), doc.document_element()) else {
        return;
    };
    let title = title.to_owned();

    let head = doc.head().unwrap_or_else(|| {
        let head = doc.create_element("head");
        doc.prepend_child(html, head);
        head
    });

    let title_el = doc
        .descendants_named(head, &["title"])
        .first()
        .copied()
        .unwrap_or_else(|| {
            let el = doc.create_element("title");
            doc.append_child(head, el);
            el
        });

    if !doc.text_content(title_el).trim().is_empty() {
        return;
    }

    for child in doc.children(title_el).to_vec() {
        doc.detach(child);
    }
    let text = doc.create_text(&title);
    doc.append_child(title_el, text);
}
