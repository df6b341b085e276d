//! Focusable, labelled regions for code blocks.

use clarion_dom::Document;

const LANGUAGE_PREFIX: &str = "language-";

pub(crate) fn enhance_code_blocks(doc: &mut Document) {
    for code in doc.elements_named(&["code"]) {
        let Some(pre) = doc
            .parent(code)
            .filter(|&p| doc.is_element(p, &["pre"]))
        else {
            continue;
        };

        let language = doc
            .element(code)
            .and_then(|el| el.classes().find_map(|c| c.strip_prefix(LANGUAGE_PREFIX)))
            .filter(|lang| !lang.is_empty())
            .unwrap_or("code")
            .to_owned();

        doc.set_attr(pre, "tabindex", "0");
        doc.set_attr(pre, "role", "region");
        doc.set_attr(pre, "aria-label", format!("Code example in {language}"));
    }
}
