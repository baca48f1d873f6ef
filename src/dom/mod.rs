//! Arena DOM and HTML parsing.
//!
//! html5ever drives an [`ArenaSink`](tree_sink::ArenaSink) that builds an
//! [`ArenaDom`]. Everything downstream (style lookup, normalization passes,
//! serialization) works on node IDs into that arena.

mod arena;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, Attribute, ChildrenIter, Descendants, NodeData, NodeId};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse an HTML document into an arena DOM.
///
/// Parsing never fails: malformed markup is recovered the way a browser
/// would, and invalid UTF-8 is replaced.
pub fn parse_html(html: &[u8]) -> ArenaDom {
    let sink = ArenaSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html);
    result.into_dom()
}
