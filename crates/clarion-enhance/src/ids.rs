//! Slugs and generated element ids.

use clarion_dom::{Document, NodeId};
use uuid::Uuid;

/// Convert heading text to an id-safe slug.
///
/// Lowercases, drops everything except word characters, whitespace and
/// hyphens, then turns each run of whitespace/hyphens into one hyphen.
///
/// # Examples
///
/// ```
/// use clarion_enhance::slugify;
///
/// assert_eq!(slugify("Hello, World!  Foo"), "hello-world-foo");
/// assert_eq!(slugify("a - b"), "a-b");
/// assert_eq!(slugify("snake_case 2"), "snake_case-2");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_owned()
}

/// Generate an id with the given prefix that no element in `doc` uses yet.
pub(crate) fn unique_id(doc: &Document, prefix: &str) -> String {
    loop {
        let token = Uuid::new_v4().simple().to_string();
        let candidate = format!("{prefix}-{}", &token[..8]);
        if doc.element_by_id(&candidate).is_none() {
            return candidate;
        }
    }
}

/// Return `slug` or the first `slug-N` (N >= 2) not used by another element.
pub(crate) fn unique_slug(doc: &Document, slug: &str, owner: NodeId) -> String {
    let taken = |candidate: &str| doc.element_by_id(candidate).is_some_and(|n| n != owner);
    if !taken(slug) {
        return slug.to_owned();
    }
    (2..)
        .map(|n| format!("{slug}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| unique_id(doc, slug))
}

/// Return the element's id, assigning a generated one if it has none.
pub(crate) fn ensure_id(doc: &mut Document, id: NodeId, prefix: &str) -> String {
    if let Some(existing) = doc.element(id).and_then(|el| el.non_empty_attr("id")) {
        return existing.to_owned();
    }
    let generated = unique_id(doc, prefix);
    doc.set_attr(id, "id", generated.clone());
    generated
}
