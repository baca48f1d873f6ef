//! HTML serialization of arena subtrees.
//!
//! Two flavours: [`to_html`] writes a subtree back verbatim on one line, and
//! [`prettify`] writes one node per line with single-space indentation per
//! nesting level, trimming text and dropping whitespace-only text nodes.

use std::fmt::Write;

use crate::dom::{ArenaDom, NodeData, NodeId};

/// Elements that never have content; written self-closed (`<br/>`).
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize a subtree compactly, preserving text exactly.
pub fn to_html(dom: &ArenaDom, id: NodeId) -> String {
    let mut ctx = SerializeContext {
        out: String::new(),
        dom,
        pretty: false,
        indent_level: 0,
    };
    walk_node(id, false, &mut ctx);
    ctx.out
}

/// Serialize a subtree as indented HTML, one node per line.
pub fn prettify(dom: &ArenaDom, id: NodeId) -> String {
    prettify_at(dom, id, 0)
}

/// Like [`prettify`], starting at the given indentation depth.
pub(crate) fn prettify_at(dom: &ArenaDom, id: NodeId, depth: usize) -> String {
    let mut ctx = SerializeContext {
        out: String::new(),
        dom,
        pretty: true,
        indent_level: depth,
    };
    walk_node(id, false, &mut ctx);
    ctx.out
}

struct SerializeContext<'a> {
    out: String,
    dom: &'a ArenaDom,
    pretty: bool,
    indent_level: usize,
}

impl SerializeContext<'_> {
    fn indent(&mut self) {
        if self.pretty {
            for _ in 0..self.indent_level {
                self.out.push(' ');
            }
        }
    }

    fn newline(&mut self) {
        if self.pretty {
            self.out.push('\n');
        }
    }
}

fn walk_node(id: NodeId, raw_text: bool, ctx: &mut SerializeContext) {
    let dom = ctx.dom;
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                walk_node(child, false, ctx);
            }
        }
        NodeData::Doctype { name, .. } => {
            ctx.indent();
            write!(ctx.out, "<!DOCTYPE {name}>").unwrap();
            ctx.newline();
        }
        NodeData::Comment(text) => {
            ctx.indent();
            write!(ctx.out, "<!--{text}-->").unwrap();
            ctx.newline();
        }
        NodeData::Text(text) => {
            let text = if ctx.pretty { text.trim() } else { text.as_str() };
            if text.is_empty() {
                return;
            }
            ctx.indent();
            if raw_text {
                ctx.out.push_str(text);
            } else {
                ctx.out.push_str(&escape_text(text));
            }
            ctx.newline();
        }
        NodeData::Element { name, attrs } => {
            let tag = name.local.as_ref();

            ctx.indent();
            write!(ctx.out, "<{tag}").unwrap();
            for attr in attrs {
                write!(
                    ctx.out,
                    " {}=\"{}\"",
                    attr.name.local.as_ref(),
                    escape_attr(&attr.value)
                )
                .unwrap();
            }

            let has_children = dom.has_children(id);
            if !has_children && VOID_ELEMENTS.contains(&tag) {
                ctx.out.push_str("/>");
                ctx.newline();
                return;
            }
            ctx.out.push('>');
            ctx.newline();

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            ctx.indent_level += 1;
            for child in dom.children(id) {
                walk_node(child, raw, ctx);
            }
            ctx.indent_level -= 1;

            ctx.indent();
            write!(ctx.out, "</{tag}>").unwrap();
            ctx.newline();
        }
    }
}

/// Entity names for U+00A0..=U+00FF, indexed by `c - 0xA0`.
const LATIN1_ENTITIES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave",
    "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve",
    "Oacute", "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml",
    "Yacute", "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig",
    "ccedil", "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth",
    "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave",
    "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

/// Named entity for a non-ASCII character, if it has a common one.
fn named_entity(c: char) -> Option<&'static str> {
    let name = match c {
        '\u{a0}'..='\u{ff}' => LATIN1_ENTITIES[c as usize - 0xa0],
        '\u{152}' => "OElig",
        '\u{153}' => "oelig",
        '\u{160}' => "Scaron",
        '\u{161}' => "scaron",
        '\u{178}' => "Yuml",
        '\u{192}' => "fnof",
        '\u{2c6}' => "circ",
        '\u{2dc}' => "tilde",
        '\u{2002}' => "ensp",
        '\u{2003}' => "emsp",
        '\u{2009}' => "thinsp",
        '\u{200c}' => "zwnj",
        '\u{200d}' => "zwj",
        '\u{200e}' => "lrm",
        '\u{200f}' => "rlm",
        '\u{2013}' => "ndash",
        '\u{2014}' => "mdash",
        '\u{2018}' => "lsquo",
        '\u{2019}' => "rsquo",
        '\u{201a}' => "sbquo",
        '\u{201c}' => "ldquo",
        '\u{201d}' => "rdquo",
        '\u{201e}' => "bdquo",
        '\u{2020}' => "dagger",
        '\u{2021}' => "Dagger",
        '\u{2022}' => "bull",
        '\u{2026}' => "hellip",
        '\u{2030}' => "permil",
        '\u{2032}' => "prime",
        '\u{2033}' => "Prime",
        '\u{2039}' => "lsaquo",
        '\u{203a}' => "rsaquo",
        '\u{20ac}' => "euro",
        '\u{2122}' => "trade",
        '\u{2190}' => "larr",
        '\u{2191}' => "uarr",
        '\u{2192}' => "rarr",
        '\u{2193}' => "darr",
        '\u{2212}' => "minus",
        '\u{2260}' => "ne",
        '\u{2264}' => "le",
        '\u{2265}' => "ge",
        _ => return None,
    };
    Some(name)
}

fn push_char(out: &mut String, c: char) {
    match named_entity(c) {
        Some(name) => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
        None => out.push(c),
    }
}

/// Escape text content.
///
/// Besides `& < >`, characters with a common HTML entity name (Latin-1,
/// typographic quotes and dashes) are written as named entities, so
/// `é` becomes `&eacute;` and a non-breaking space `&nbsp;`.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => push_char(&mut result, c),
        }
    }
    result
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => push_char(&mut result, c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn body_of(html: &str) -> (ArenaDom, NodeId) {
        let dom = parse_html(html.as_bytes());
        let body = dom.find_by_tag("body").unwrap();
        (dom, body)
    }

    #[test]
    fn test_to_html_roundtrips_simple_markup() {
        let (dom, body) = body_of(r#"<p class="c1">a <b>b</b> c<br>d</p>"#);
        let p = dom.first_child(body).unwrap();
        assert_eq!(to_html(&dom, p), r#"<p class="c1">a <b>b</b> c<br/>d</p>"#);
    }

    #[test]
    fn test_prettify_layout() {
        let (dom, body) = body_of(r#"<h6>Herp<br>Derp</h6><p><span style="x:y">t</span></p>"#);

        let expected = "<body>\n <h6>\n  Herp\n  <br/>\n  Derp\n </h6>\n <p>\n  <span style=\"x:y\">\n   t\n  </span>\n </p>\n</body>\n";
        assert_eq!(prettify(&dom, body), expected);
    }

    #[test]
    fn test_prettify_drops_whitespace_text() {
        let (dom, body) = body_of("<p>  a  </p>\n\n<p>b</p>");
        assert_eq!(
            prettify(&dom, body),
            "<body>\n <p>\n  a\n </p>\n <p>\n  b\n </p>\n</body>\n"
        );
    }

    #[test]
    fn test_escaping() {
        let (dom, body) = body_of("<p title='say \"hi\" &amp; go'>1 &lt; 2&nbsp;&amp; 3</p>");
        let p = dom.first_child(body).unwrap();
        assert_eq!(
            to_html(&dom, p),
            "<p title=\"say &quot;hi&quot; &amp; go\">1 &lt; 2&nbsp;&amp; 3</p>"
        );
    }

    #[test]
    fn test_named_entities() {
        let (dom, body) = body_of("<p title=\"caf\u{e9}\">Caf\u{e9} \u{2014} \u{201c}na\u{ef}ve\u{201d} \u{2026} \u{4e2d}</p>");
        let p = dom.first_child(body).unwrap();
        assert_eq!(
            to_html(&dom, p),
            "<p title=\"caf&eacute;\">Caf&eacute; &mdash; &ldquo;na&iuml;ve&rdquo; &hellip; \u{4e2d}</p>"
        );
    }

    #[test]
    fn test_latin1_entity_table_edges() {
        assert_eq!(escape_text("\u{a0}\u{d7}\u{ff}"), "&nbsp;&times;&yuml;");
        assert_eq!(escape_text("\u{9f}\u{100}"), "\u{9f}\u{100}");
    }

    #[test]
    fn test_style_text_is_raw() {
        let dom = parse_html(b"<html><head><style>a > b{color:red}</style></head></html>");
        let style = dom.find_by_tag("style").unwrap();
        assert_eq!(to_html(&dom, style), "<style>a > b{color:red}</style>");
    }

    #[test]
    fn test_comment_and_empty_element() {
        let (dom, body) = body_of("<div><!-- note --></div><div></div>");
        assert_eq!(
            to_html(&dom, body),
            "<body><div><!-- note --></div><div></div></body>"
        );
    }

    #[test]
    fn test_prettify_at_depth() {
        let (dom, body) = body_of("<p>x</p>");
        let p = dom.first_child(body).unwrap();
        assert_eq!(prettify_at(&dom, p, 2), "  <p>\n   x\n  </p>\n");
    }
}
