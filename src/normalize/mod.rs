//! Tree normalization passes.
//!
//! Every pass takes the DOM mutably for its whole run and rewrites it in
//! place. The pipeline applies them in this order:
//!
//! 1. **Strip** - drop export classes from structural tags
//! 2. **Clear** - optionally drop every attribute from configured tags
//! 3. **Inline** - flatten span classes into `style` attributes
//! 4. **Merge** - rejoin headings split at line breaks
//! 5. **Split** - cut the body into pages at `<hr>`

mod inline;
mod merge;
mod split;
mod strip;

pub use inline::{inline_classes, inline_span_styles};
pub use merge::{DEFAULT_MERGE_TAG, merge_adjacent};
pub use split::split_pages;
pub use strip::{BASIC_TAGS, clear_attrs, strip_attr, strip_basic_classes, strip_classes};

use crate::UnpackConfig;
use crate::css::Stylesheet;
use crate::dom::{ArenaDom, NodeId};
use crate::error::Result;

/// Run every pass on `body` and return the page roots, page 0 first.
pub fn normalize(
    dom: &mut ArenaDom,
    body: NodeId,
    sheet: &Stylesheet,
    config: &UnpackConfig,
) -> Result<Vec<NodeId>> {
    let stripped = strip_classes(dom, body, &config.basic_tags);
    log::debug!("stripped {stripped} classes from structural tags");

    for tag in &config.clear_attrs {
        let cleared = clear_attrs(dom, body, tag);
        log::debug!("cleared attributes from {cleared} <{tag}> elements");
    }

    for tag in &config.inline_tags {
        let inlined = inline_classes(dom, body, tag, sheet)?;
        log::debug!("inlined styles on {inlined} <{tag}> elements");
    }

    for tag in &config.merge_tags {
        let merged = merge_adjacent(dom, body, tag);
        log::debug!("merged {merged} split <{tag}> elements");
    }

    let pages = split_pages(dom, body);
    log::debug!("split body into {} pages", pages.len());

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::output::to_html;

    const DOC: &str = r#"<html><head><style>.c1{font-weight:700}.c2{color:#666666}</style></head>
<body class="doc"><p class="c2"><span class="c1">Intro</span></p><h6 class="c1">Herp</h6><h6 class="c1">Derp</h6><hr style="page-break-before:always;display:none;"><p class="c2"><span class="c2">Next</span></p></body></html>"#;

    #[test]
    fn test_full_pipeline() {
        let mut dom = parse_html(DOC.as_bytes());
        let body = dom.find_by_tag("body").unwrap();
        let sheet = Stylesheet::from_document(&dom).unwrap();

        let pages = normalize(&mut dom, body, &sheet, &UnpackConfig::default()).unwrap();

        assert_eq!(pages.len(), 2);
        let page0: String = dom.children(pages[0]).map(|c| to_html(&dom, c)).collect();
        assert_eq!(
            page0,
            r#"<p><span style="font-weight:700">Intro</span></p><h6>Herp<br/>Derp</h6>"#
        );
        let page1: String = dom.children(pages[1]).map(|c| to_html(&dom, c)).collect();
        assert_eq!(page1, r#"<p><span style="color:#666666">Next</span></p>"#);
    }

    #[test]
    fn test_merge_without_strip_keeps_class() {
        let mut dom = parse_html(br#"<h6 class="c1">Herp</h6><h6 class="c1">Derp</h6>"#);
        let body = dom.find_by_tag("body").unwrap();
        let config = UnpackConfig::default().with_basic_tags(Vec::<String>::new());

        normalize(&mut dom, body, &Stylesheet::default(), &config).unwrap();

        let h6 = dom.find_by_tag("h6").unwrap();
        assert_eq!(to_html(&dom, h6), r#"<h6 class="c1">Herp<br/>Derp</h6>"#);
    }

    #[test]
    fn test_missing_class_aborts() {
        let mut dom = parse_html(br#"<span class="c7">x</span>"#);
        let body = dom.find_by_tag("body").unwrap();

        let result = normalize(&mut dom, body, &Stylesheet::default(), &UnpackConfig::default());
        assert!(result.is_err());
    }
}
