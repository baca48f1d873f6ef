//! Attribute stripping passes.

use crate::dom::{ArenaDom, NodeId};

/// Structural tags whose look comes from a hand-written site stylesheet
/// rather than the per-document export.
pub const BASIC_TAGS: &[&str] = &[
    "title", "subtitle", "h1", "h2", "h3", "h4", "h5", "h6", "a", "p",
];

/// Remove `class` from every structural tag under `root`.
pub fn strip_basic_classes(dom: &mut ArenaDom, root: NodeId) -> usize {
    strip_classes(dom, root, BASIC_TAGS)
}

/// Remove `class` from every element under `root` whose tag is in `tags`.
///
/// Returns the number of attributes removed.
pub fn strip_classes<S: AsRef<str>>(dom: &mut ArenaDom, root: NodeId, tags: &[S]) -> usize {
    tags.iter()
        .map(|tag| strip_attr(dom, root, tag.as_ref(), "class"))
        .sum()
}

/// Remove one attribute from every `tag` element under `root`.
pub fn strip_attr(dom: &mut ArenaDom, root: NodeId, tag: &str, attr: &str) -> usize {
    let mut removed = 0;
    for id in dom.find_all(root, tag) {
        if dom.remove_attr(id, attr).is_some() {
            removed += 1;
        }
    }
    removed
}

/// Remove all attributes from every `tag` element under `root`.
pub fn clear_attrs(dom: &mut ArenaDom, root: NodeId, tag: &str) -> usize {
    let targets = dom.find_all(root, tag);
    for &id in &targets {
        dom.clear_attrs(id);
    }
    targets.len()
}
