//! Tree builder glue: html5ever drives [`ArenaSink`] to fill an [`ArenaDom`].
//!
//! Node handles are plain [`NodeId`]s. The sink only ever appends and relinks;
//! it never frees nodes, so a handle stays valid for the whole parse.

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as ParsedAttribute, QualName, local_name, ns};

use super::arena::{ArenaDom, Attribute, NodeData, NodeId};

/// Returned by `elem_name` for handles that are not elements.
static NO_NAME: QualName = QualName {
    prefix: None,
    ns: ns!(),
    local: local_name!(""),
};

/// Collects tree-builder callbacks into an arena.
///
/// `TreeSink` methods take `&self`, so the arena sits behind a `RefCell`.
pub struct ArenaSink {
    dom: RefCell<ArenaDom>,
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
        }
    }

    pub fn into_dom(self) -> ArenaDom {
        self.dom.into_inner()
    }

    fn text_or_node(dom: &mut ArenaDom, child: NodeOrText<NodeId>) -> NodeId {
        match child {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(text) => dom.create_text(text.to_string()),
        }
    }
}

fn convert_attrs(attrs: Vec<ParsedAttribute>) -> Vec<Attribute> {
    attrs
        .into_iter()
        .map(|a| Attribute {
            name: a.name,
            value: a.value.to_string(),
        })
        .collect()
}

impl TreeSink for ArenaSink {
    type Handle = NodeId;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        log::trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> NodeId {
        self.dom.borrow().document()
    }

    fn elem_name<'a>(&'a self, target: &'a NodeId) -> &'a QualName {
        let dom = self.dom.borrow();
        let Some(NodeData::Element { name, .. }) = dom.get(*target).map(|n| &n.data) else {
            return &NO_NAME;
        };
        // SAFETY: nodes are never removed from the arena during parsing, and
        // html5ever drops the returned name before it next mutates the sink.
        unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<ParsedAttribute>,
        _flags: ElementFlags,
    ) -> NodeId {
        self.dom
            .borrow_mut()
            .create_element(name, convert_attrs(attrs))
    }

    fn create_comment(&self, text: StrTendril) -> NodeId {
        self.dom.borrow_mut().create_comment(text.to_string())
    }

    /// Processing instructions do not occur in HTML; keep an empty comment.
    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> NodeId {
        self.dom.borrow_mut().create_comment(String::new())
    }

    fn append(&self, parent: &NodeId, child: NodeOrText<NodeId>) {
        let mut dom = self.dom.borrow_mut();
        if let NodeOrText::AppendText(text) = &child {
            dom.append_text(*parent, text);
            return;
        }
        let node = Self::text_or_node(&mut dom, child);
        dom.append(*parent, node);
    }

    fn append_based_on_parent_node(
        &self,
        element: &NodeId,
        prev_element: &NodeId,
        child: NodeOrText<NodeId>,
    ) {
        let parent = self.dom.borrow().parent(*element);
        self.append(parent.as_ref().unwrap_or(prev_element), child);
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doctype =
            dom.create_doctype(name.to_string(), public_id.to_string(), system_id.to_string());
        let document = dom.document();
        dom.append(document, doctype);
    }

    fn get_template_contents(&self, target: &NodeId) -> NodeId {
        *target
    }

    fn same_node(&self, x: &NodeId, y: &NodeId) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        log::trace!("quirks mode: {mode:?}");
    }

    fn append_before_sibling(&self, sibling: &NodeId, new_node: NodeOrText<NodeId>) {
        let mut dom = self.dom.borrow_mut();
        let node = Self::text_or_node(&mut dom, new_node);
        dom.insert_before(*sibling, node);
    }

    fn add_attrs_if_missing(&self, target: &NodeId, attrs: Vec<ParsedAttribute>) {
        let mut dom = self.dom.borrow_mut();
        for attr in convert_attrs(attrs) {
            let name = attr.name.local.to_string();
            if dom.get_attr(*target, &name).is_none() {
                dom.set_attr(*target, &name, attr.value);
            }
        }
    }

    fn remove_from_parent(&self, target: &NodeId) {
        self.dom.borrow_mut().detach(*target);
    }

    fn reparent_children(&self, node: &NodeId, new_parent: &NodeId) {
        self.dom.borrow_mut().reparent_children(*node, *new_parent);
    }
}
