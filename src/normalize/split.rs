//! Page splitting at horizontal rules.
//!
//! Google Docs marks a page break with an `<hr>` (usually
//! `style="page-break-before:always;display:none"`). Each page becomes its
//! own root: page 0 is the original `<body>` truncated at the first rule, and
//! every following page is a copy of `<body>` holding the content between
//! one rule and the next.

use crate::dom::{ArenaDom, NodeId};

/// Split `root` into pages at every `<hr>` descendant.
///
/// Returns page roots in order, `root` first. A document with `k` rules
/// always yields `k + 1` pages, some of which may be empty.
pub fn split_pages(dom: &mut ArenaDom, root: NodeId) -> Vec<NodeId> {
    let mut pages = vec![root];
    let mut current = root;

    while let Some(hr) = dom.find_descendant(current, "hr") {
        let Some(page) = split_at(dom, current, hr) else {
            break;
        };
        pages.push(page);
        current = page;
    }

    pages
}

/// Move everything after `hr` (in document order) under `root` into a new
/// page root, then remove `hr`. Children of `hr` open the new page.
///
/// Ancestors of `hr` below `root` are recreated as shallow copies in the new
/// page so content keeps its nesting; copies that would stay empty are not
/// created, and originals emptied by removing `hr` are removed.
fn split_at(dom: &mut ArenaDom, root: NodeId, hr: NodeId) -> Option<NodeId> {
    let page = dom.shallow_clone(root)?;

    let mut carried: Option<NodeId> = None;
    let mut node = hr;
    while let Some(parent) = dom.parent(node) {
        let target = if parent == root {
            page
        } else {
            dom.shallow_clone(parent)?
        };

        if let Some(inner) = carried {
            dom.append(target, inner);
        }
        if node == hr {
            dom.reparent_children(hr, target);
        }
        let following: Vec<_> = dom.following_siblings(node).collect();
        for sibling in following {
            dom.append(target, sibling);
        }

        if parent == root {
            break;
        }
        carried = dom.has_children(target).then_some(target);
        node = parent;
    }

    let mut emptied = dom.parent(hr);
    dom.detach(hr);
    while let Some(id) = emptied {
        if id == root || dom.has_children(id) {
            break;
        }
        emptied = dom.parent(id);
        dom.detach(id);
    }

    Some(page)
}
