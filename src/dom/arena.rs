//! Arena-based DOM for HTML parsing and in-place rewriting.
//!
//! All nodes live in one contiguous vector and refer to each other by index.
//! Normalization passes take `&mut ArenaDom` and relink nodes instead of
//! juggling reference-counted parent pointers. Detached nodes stay in the
//! arena; they are simply unreachable from the document root.

use html5ever::{LocalName, QualName, ns};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    fn to_option(self) -> Option<NodeId> {
        if self.is_some() { Some(self) } else { None }
    }
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes in source order.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    /// Text content.
    Text(String),
    Comment(String),
    /// Document type declaration.
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    /// Build a plain (namespace-less) attribute, as the HTML parser produces.
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        }
    }
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl ArenaNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document: NodeId,
}

impl ArenaDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        dom.document = dom.alloc(ArenaNode::new(NodeData::Document));
        dom
    }

    fn alloc(&mut self, node: ArenaNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(ArenaNode::new(NodeData::Element { name, attrs }))
    }

    /// Create a new element in the HTML namespace.
    pub fn create_html_element(&mut self, local: &str) -> NodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(local));
        self.create_element(name, Vec::new())
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(ArenaNode::new(NodeData::Text(text.into())))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(ArenaNode::new(NodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, name: String, public_id: String, system_id: String) -> NodeId {
        self.alloc(ArenaNode::new(NodeData::Doctype {
            name,
            public_id,
            system_id,
        }))
    }

    /// Copy a node without its children. The copy is detached.
    pub fn shallow_clone(&mut self, id: NodeId) -> Option<NodeId> {
        let data = self.get(id)?.data.clone();
        Some(self.alloc(ArenaNode::new(data)))
    }

    /// Append a child to a parent node, detaching it from any previous parent.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling, detaching it from any previous parent.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        self.detach(new_node);

        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        // Update prev's next (or parent's first_child)
        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Unlink a node from its parent and siblings. Its own subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let children: Vec<_> = self.children(from).collect();
        for child in children {
            self.append(to, child);
        }
    }

    /// Append text to an existing text node, or create new if last child isn't text.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text);
        self.append(parent, text_node);
    }

    /// Get the number of nodes, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.to_option())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child.to_option())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling.to_option())
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.first_child(id).is_some()
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Iterate over the siblings following a node.
    pub fn following_siblings(&self, id: NodeId) -> ChildrenIter<'_> {
        let next = self.get(id).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        ChildrenIter {
            dom: self,
            current: next,
        }
    }

    /// Iterate over all descendants of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            dom: self,
            root,
            next: self.first_child(root),
        }
    }

    /// First descendant element of `root` with the given tag (document order).
    pub fn find_descendant(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(root).find(|&id| self.is_element_named(id, tag))
    }

    /// All descendant elements of `root` with the given tag, in document order.
    pub fn find_all(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| self.is_element_named(id, tag))
            .collect()
    }

    /// Find element by tag name anywhere in the document (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find_descendant(self.document, tag)
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a run of sibling nodes.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: NodeId,
}

impl<'a> Iterator for ChildrenIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self.dom.get(id).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over a subtree, following first_child/next_sibling links.
pub struct Descendants<'a> {
    dom: &'a ArenaDom,
    root: NodeId,
    next: Option<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let (dom, root) = (self.dom, self.root);

        self.next = dom.first_child(current).or_else(|| {
            // Climb until a node with a next sibling, stopping at the root
            let mut node = current;
            loop {
                if node == root {
                    return None;
                }
                if let Some(sibling) = dom.next_sibling(node) {
                    return Some(sibling);
                }
                node = dom.parent(node)?;
            }
        });

        Some(current)
    }
}

/// Convenience methods for element nodes.
impl ArenaDom {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Check whether the node is an element with the given local name.
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|n| n.as_ref() == tag)
    }

    /// Get an element's attributes in source order.
    pub fn attrs(&self, id: NodeId) -> &[Attribute] {
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.as_str())
    }

    fn attrs_mut(&mut self, id: NodeId) -> Option<&mut Vec<Attribute>> {
        self.get_mut(id).and_then(|n| match &mut n.data {
            NodeData::Element { attrs, .. } => Some(attrs),
            _ => None,
        })
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, id: NodeId, attr_name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(attrs) = self.attrs_mut(id) {
            match attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
                Some(existing) => existing.value = value,
                None => attrs.push(Attribute::new(attr_name, value)),
            }
        }
    }

    /// Remove an attribute, returning its old value.
    pub fn remove_attr(&mut self, id: NodeId, attr_name: &str) -> Option<String> {
        let attrs = self.attrs_mut(id)?;
        let pos = attrs.iter().position(|a| a.name.local.as_ref() == attr_name)?;
        Some(attrs.remove(pos).value)
    }

    /// Remove every attribute of an element.
    pub fn clear_attrs(&mut self, id: NodeId) {
        if let Some(attrs) = self.attrs_mut(id) {
            attrs.clear();
        }
    }

    /// Get element's classes, split on whitespace.
    pub fn element_classes(&self, id: NodeId) -> Vec<&str> {
        self.get_attr(id, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn collect_text(&self, root: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text_content(root) {
            out.push_str(text);
        }
        for id in self.descendants(root) {
            if let Some(text) = self.text_content(id) {
                out.push_str(text);
            }
        }
        out
    }
}
