//! Form labels, control ids and `aria-required`.

use clarion_dom::{Document, HEADING_TAGS, NodeId};

use crate::ids::ensure_id;
use crate::{has_aria_name, mark_warning};

const CONTROL_TAGS: [&str; 3] = ["input", "select", "textarea"];

/// Input types that never need a visible label.
const UNLABELED_INPUT_TYPES: [&str; 3] = ["hidden", "submit", "button"];

pub(crate) fn enhance_forms(doc: &mut Document) {
    for form in doc.elements_named(&["form"]) {
        label_form(doc, form);
    }

    for control in doc.elements_named(&CONTROL_TAGS) {
        if needs_label(doc, control) {
            label_control(doc, control);
        }
    }

    for required in doc
        .elements()
        .filter(|&n| doc.has_attr(n, "required"))
        .collect::<Vec<_>>()
    {
        doc.set_attr(required, "aria-required", "true");
    }
}

fn label_form(doc: &mut Document, form: NodeId) {
    if has_aria_name(doc, form) {
        return;
    }
    match doc.descendants_named(form, &HEADING_TAGS).first() {
        Some(&heading) => {
            let id = ensure_id(doc, heading, "form-heading");
            doc.set_attr(form, "aria-labelledby", id);
        }
        None => doc.set_attr(form, "aria-label", "Form"),
    }
}

fn needs_label(doc: &Document, control: NodeId) -> bool {
    if doc.tag_name(control) != Some("input") {
        return true;
    }
    let kind = doc
        .attr(control, "type")
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    !UNLABELED_INPUT_TYPES.contains(&kind.as_str())
}

fn label_control(doc: &mut Document, control: NodeId) {
    let prefix = doc.tag_name(control).unwrap_or("control").to_owned();
    let id = ensure_id(doc, control, &prefix);

    let labelled = has_aria_name(doc, control)
        || doc
            .ancestors(control)
            .any(|n| doc.tag_name(n) == Some("label"))
        || doc
            .elements_named(&["label"])
            .into_iter()
            .any(|label| doc.attr(label, "for") == Some(id.as_str()));

    if !labelled {
        mark_warning(doc, control, "Form control has no label");
    }
}
