//! Merge headings that Google Docs split at every line break.
//!
//! Docs styles a paragraph as a heading, but a soft line break inside it is
//! exported as a new element of the same tag rather than `<br>`. Any border
//! or padding on that tag then repeats on every line:
//!
//! ```html
//! <h6>Herp</h6><h6>Derp</h6>
//! ```
//!
//! becomes
//!
//! ```html
//! <h6>Herp<br/>Derp</h6>
//! ```

use crate::dom::{ArenaDom, NodeId};

/// Default merge target: the lowest heading level.
pub const DEFAULT_MERGE_TAG: &str = "h6";

/// Merge runs of adjacent `tag` elements among the children of `parent`.
///
/// `<hr>` children break a run and are merged into independently. Afterwards
/// every `tag` element under `parent` left without children is removed.
/// Returns the number of elements merged away.
pub fn merge_adjacent(dom: &mut ArenaDom, parent: NodeId, tag: &str) -> usize {
    let merged = merge_children(dom, parent, tag);

    // Reverse document order so nested shells empty out before their parents
    for id in dom.find_all(parent, tag).into_iter().rev() {
        if !dom.has_children(id) {
            dom.detach(id);
        }
    }

    merged
}

fn merge_children(dom: &mut ArenaDom, parent: NodeId, tag: &str) -> usize {
    let mut merged = 0;
    let mut run_head: Option<NodeId> = None;
    let mut cursor = dom.first_child(parent);

    while let Some(child) = cursor {
        let next = dom.next_sibling(child);

        if dom.is_element_named(child, "hr") {
            merged += merge_children(dom, child, tag);
            run_head = None;
        } else if dom.is_element_named(child, tag) {
            match run_head {
                Some(head) => {
                    let br = dom.create_html_element("br");
                    dom.append(head, br);
                    dom.reparent_children(child, head);
                    dom.detach(child);
                    merged += 1;
                }
                None => run_head = Some(child),
            }
        } else {
            run_head = None;
        }

        cursor = next;
    }

    merged
}
