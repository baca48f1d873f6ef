//! Class-to-inline-style conversion for text runs.
//!
//! Mid-paragraph formatting (a bold word, a colour change) is specific to one
//! document, so it is baked into `style` instead of referencing export
//! classes that the site stylesheet knows nothing about.

use crate::css::Stylesheet;
use crate::dom::{ArenaDom, NodeId};
use crate::error::Result;

/// Replace `class` with the resolved inline `style` on every classed span.
pub fn inline_span_styles(dom: &mut ArenaDom, root: NodeId, sheet: &Stylesheet) -> Result<usize> {
    inline_classes(dom, root, "span", sheet)
}

/// Replace `class` with the resolved inline `style` on every classed `tag`.
///
/// Each class `c` is looked up as selector `.c` and the results are joined
/// with `;` in class order. Any existing `style` is dropped. Elements without
/// a class are untouched. A class missing from the stylesheet aborts the pass.
pub fn inline_classes(
    dom: &mut ArenaDom,
    root: NodeId,
    tag: &str,
    sheet: &Stylesheet,
) -> Result<usize> {
    let mut converted = 0;

    for id in dom.find_all(root, tag) {
        let classes = dom.element_classes(id);
        if classes.is_empty() {
            continue;
        }

        let styles = classes
            .iter()
            .map(|class| sheet.class_style(class))
            .collect::<Result<Vec<_>>>()?;

        dom.remove_attr(id, "style");
        dom.remove_attr(id, "class");
        dom.set_attr(id, "style", styles.join(";"));
        converted += 1;
    }

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::error::Error;

    fn sheet() -> Stylesheet {
        Stylesheet::parse(".c1{font-weight:700}.c2{color:#ff0000;font-style:italic}").unwrap()
    }

    #[test]
    fn test_single_class() {
        let mut dom = parse_html(br#"<p><span class="c1">bold</span></p>"#);
        let body = dom.find_by_tag("body").unwrap();

        assert_eq!(inline_span_styles(&mut dom, body, &sheet()).unwrap(), 1);

        let span = dom.find_by_tag("span").unwrap();
        assert_eq!(dom.get_attr(span, "class"), None);
        assert_eq!(dom.get_attr(span, "style"), Some("font-weight:700"));
    }

    #[test]
    fn test_multiple_classes_joined_in_order() {
        let mut dom = parse_html(br#"<span class="c2 c1" style="color:blue">x</span>"#);
        let body = dom.find_by_tag("body").unwrap();

        inline_span_styles(&mut dom, body, &sheet()).unwrap();

        let span = dom.find_by_tag("span").unwrap();
        assert_eq!(
            dom.get_attr(span, "style"),
            Some("color:#ff0000;font-style:italic;font-weight:700")
        );
        assert_eq!(dom.attrs(span).len(), 1);
    }

    #[test]
    fn test_classless_span_untouched() {
        let mut dom = parse_html(br#"<span style="color:blue" id="k">x</span><span>y</span>"#);
        let body = dom.find_by_tag("body").unwrap();

        assert_eq!(inline_span_styles(&mut dom, body, &sheet()).unwrap(), 0);

        let span = dom.find_by_tag("span").unwrap();
        assert_eq!(dom.get_attr(span, "style"), Some("color:blue"));
        assert_eq!(dom.get_attr(span, "id"), Some("k"));
    }

    #[test]
    fn test_other_tags_keep_classes() {
        let mut dom = parse_html(br#"<p class="c1"><span class="c1">x</span></p>"#);
        let body = dom.find_by_tag("body").unwrap();

        inline_span_styles(&mut dom, body, &sheet()).unwrap();

        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(dom.get_attr(p, "class"), Some("c1"));
    }

    #[test]
    fn test_missing_class_is_fatal() {
        let mut dom = parse_html(br#"<span class="c1 c404">x</span>"#);
        let body = dom.find_by_tag("body").unwrap();

        let err = inline_span_styles(&mut dom, body, &sheet()).unwrap_err();
        assert!(matches!(err, Error::StyleLookup(sel) if sel == ".c404"));

        // Nothing is half-applied on the failing element
        let span = dom.find_by_tag("span").unwrap();
        assert_eq!(dom.get_attr(span, "class"), Some("c1 c404"));
    }

    #[test]
    fn test_inline_custom_tag() {
        let mut dom = parse_html(br#"<ul><li class="c2">item</li></ul>"#);
        let root = dom.document();

        assert_eq!(inline_classes(&mut dom, root, "li", &sheet()).unwrap(), 1);
        let li = dom.find_by_tag("li").unwrap();
        assert_eq!(dom.get_attr(li, "style"), Some("color:#ff0000;font-style:italic"));
    }
}
