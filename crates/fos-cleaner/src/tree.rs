//! Tag Tree (arena-based allocation)
//!
//! The arena owns every node. A tag owns its children through the ordered
//! handle list; the parent handle is a plain back-reference. Detached nodes
//! keep their slot, so a stale handle never points at a different node.

use crate::{AttributeStore, DocType, Node, NodeData, NodeId, TagData};

/// Transparent wrapper the balancer uses when handing a node over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proxy(NodeId);

impl Proxy {
    pub fn new(node: NodeId) -> Self {
        Self(node)
    }

    /// The wrapped node
    pub fn node(self) -> NodeId {
        self.0
    }
}

/// Anything that can be appended to a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// Nothing to append
    Absent,
    Node(NodeId),
    Proxy(Proxy),
    /// Appended element by element, in order
    Sequence(Vec<Child>),
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Child::Node(id)
    }
}

impl From<Proxy> for Child {
    fn from(proxy: Proxy) -> Self {
        Child::Proxy(proxy)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(child: Option<T>) -> Self {
        child.map_or(Child::Absent, Into::into)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Child::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<&[NodeId]> for Child {
    fn from(items: &[NodeId]) -> Self {
        Child::Sequence(items.iter().copied().map(Child::Node).collect())
    }
}

/// Arena-based tag tree
#[derive(Debug, Default, Clone)]
pub struct TagTree {
    nodes: Vec<Node>,
}

#[allow(clippy::len_without_is_empty)]
impl TagTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached tag node
    pub fn create_tag(&mut self, name: Option<&str>) -> NodeId {
        self.push(Node::tag(name))
    }

    /// Create a tag synthesized while recovering from unbalanced markup.
    ///
    /// This is the only way to obtain an auto-generated tag: the flag is
    /// never set on organically parsed nodes. Tag data is only handed out
    /// by shared reference, so it cannot be overwritten afterwards:
    ///
    /// ```compile_fail
    /// let mut tree = fos_cleaner::TagTree::new();
    /// let organic = tree.create_tag(Some("i"));
    /// let filler = tree.create_auto_generated_tag(Some("i"));
    /// let data = tree.tag(filler).cloned();
    /// *tree.tag_mut(organic).unwrap() = data.unwrap();
    /// ```
    ///
    /// ```compile_fail
    /// use fos_cleaner::{NodeData, TagTree, TextRun};
    /// let mut tree = TagTree::new();
    /// let tag = tree.create_tag(Some("p"));
    /// tree.get_mut(tag).unwrap().data = NodeData::Text(TextRun::new("x"));
    /// ```
    pub fn create_auto_generated_tag(&mut self, name: Option<&str>) -> NodeId {
        let mut node = Node::tag(name);
        if let Some(tag) = node.as_tag_mut() {
            tag.auto_generated = true;
        }
        self.push(node)
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> NodeId {
        self.push(Node::processing_instruction(target, data))
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Tag data, if `id` is a tag
    pub fn tag(&self, id: NodeId) -> Option<&TagData> {
        self.get(id).and_then(Node::as_tag)
    }

    pub(crate) fn tag_mut(&mut self, id: NodeId) -> Option<&mut TagData> {
        self.get_mut(id).and_then(Node::as_tag_mut)
    }

    /// Lowercased tag name
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.tag(id).and_then(TagData::name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Ordered children (empty for leaves and unknown handles)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Tag children only, in order
    pub fn child_tags(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.get(c).is_some_and(Node::is_tag))
            .collect()
    }

    // === Attributes ===

    pub fn attributes(&self, id: NodeId) -> Option<&AttributeStore> {
        self.tag(id).map(|t| &t.attributes)
    }

    pub fn attributes_mut(&mut self, id: NodeId) -> Option<&mut AttributeStore> {
        self.tag_mut(id).map(|t| &mut t.attributes)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id).and_then(|a| a.get(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attributes(id).is_some_and(|a| a.has(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(attrs) = self.attributes_mut(id) {
            attrs.set(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.attributes_mut(id).and_then(|a| a.remove(name))
    }

    // === Flags ===

    pub fn is_auto_generated(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(TagData::is_auto_generated)
    }

    pub fn is_pruned(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(|t| t.pruned)
    }

    pub fn set_pruned(&mut self, id: NodeId, pruned: bool) {
        if let Some(tag) = self.tag_mut(id) {
            tag.pruned = pruned;
        }
    }

    pub fn is_formed(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(|t| t.formed)
    }

    pub fn set_formed(&mut self, id: NodeId, formed: bool) {
        if let Some(tag) = self.tag_mut(id) {
            tag.formed = formed;
        }
    }

    pub fn doctype(&self, id: NodeId) -> Option<&DocType> {
        self.tag(id).and_then(|t| t.doctype.as_ref())
    }

    pub fn set_doctype(&mut self, id: NodeId, doctype: Option<DocType>) {
        if let Some(tag) = self.tag_mut(id) {
            tag.doctype = doctype;
        }
    }

    // === Deferred relocation ===

    /// Stage `item` to be moved next to `id` later in the repair
    pub fn queue_for_move(&mut self, id: NodeId, item: NodeId) {
        if let Some(tag) = self.tag_mut(id) {
            tag.queue_for_move(item);
        }
    }

    pub fn items_to_move(&self, id: NodeId) -> Option<&[NodeId]> {
        self.tag(id).and_then(TagData::items_to_move)
    }

    pub fn take_items_to_move(&mut self, id: NodeId) -> Vec<NodeId> {
        self.tag_mut(id)
            .map(TagData::take_items_to_move)
            .unwrap_or_default()
    }

    /// Move the items staged on `id` into its parent, directly before it.
    ///
    /// Each item is detached from wherever it currently sits. Returns the
    /// number of items moved; a root keeps its queue and moves nothing.
    pub fn relocate_queued_items(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.parent(id) else {
            return 0;
        };
        let items = self.take_items_to_move(id);
        let mut moved = 0;
        for item in items {
            if item == id || self.get(item).is_none() {
                continue;
            }
            if self.is_ancestor_or_self(item, parent) {
                tracing::warn!("Not relocating {}: it encloses {}", item, id);
                continue;
            }
            self.remove_from_tree(item);
            let Some(pos) = self.children(parent).iter().position(|&c| c == id) else {
                break;
            };
            self.insert_child(parent, pos, item);
            moved += 1;
        }
        if moved > 0 {
            tracing::trace!("Relocated {} items before {}", moved, id);
        }
        moved
    }

    // === Structure ===

    /// Append a child, a proxied node or a whole sequence.
    ///
    /// The child's parent is overwritten unconditionally: a node still
    /// listed under another tag is not detached from it first.
    pub fn add_child(&mut self, parent: NodeId, child: impl Into<Child>) {
        match child.into() {
            Child::Absent => {}
            Child::Sequence(items) => self.add_children(parent, items),
            Child::Node(id) => self.append_node(parent, id),
            Child::Proxy(proxy) => self.append_node(parent, proxy.node()),
        }
    }

    /// Append each element in order
    pub fn add_children<I>(&mut self, parent: NodeId, children: I)
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        for child in children {
            self.add_child(parent, child);
        }
    }

    fn append_node(&mut self, parent: NodeId, child: NodeId) {
        if !self.accepts_child(parent, child) {
            return;
        }
        if let Some(old) = self.parent(child).filter(|&old| old != parent) {
            tracing::trace!("Re-parenting {} from {} to {}", child, old, parent);
        }
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
    }

    /// Insert `child` at `index` (clamped) among `parent`'s children
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if !self.accepts_child(parent, child) {
            return;
        }
        let children = &mut self.nodes[parent.index()].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.index()].parent = Some(parent);
    }

    fn accepts_child(&self, parent: NodeId, child: NodeId) -> bool {
        if self.get(child).is_none() {
            tracing::warn!("Ignoring unknown child {}", child);
            return false;
        }
        if parent == child {
            tracing::warn!("Ignoring attempt to append {} to itself", child);
            return false;
        }
        if !self.get(parent).is_some_and(Node::is_tag) {
            tracing::warn!("Ignoring child {} appended to non-tag {}", child, parent);
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            tracing::warn!("Ignoring {} appended below its descendant {}", child, parent);
            return false;
        }
        true
    }

    /// Whether `ancestor` is `node` or encloses it through parent handles.
    ///
    /// A parent handle always names a tag that lists the node, so a
    /// childless `ancestor` encloses nothing and the walk is skipped.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == node {
            return true;
        }
        if self.children(ancestor).is_empty() {
            return false;
        }
        let mut current = self.parent(node);
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            current = self.parent(id);
        }
        false
    }

    /// Remove the first occurrence of `child` from `parent`'s children.
    ///
    /// The departed child's parent handle is cleared when it still names
    /// `parent`. Returns whether anything was removed.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(parent.index()) else {
            return false;
        };
        let Some(pos) = node.children.iter().position(|&c| c == child) else {
            return false;
        };
        node.children.remove(pos);

        if let Some(removed) = self.nodes.get_mut(child.index()) {
            if removed.parent == Some(parent) {
                removed.parent = None;
            }
        }
        tracing::trace!("Removed {} from {}", child, parent);
        true
    }

    /// Detach a node from its parent; false for roots
    pub fn remove_from_tree(&mut self, id: NodeId) -> bool {
        match self.parent(id) {
            Some(parent) => self.remove_child(parent, id),
            None => false,
        }
    }

    /// New detached tag with the same name and a copy of the attributes
    pub fn make_copy(&mut self, id: NodeId) -> Option<NodeId> {
        let copy = self.tag(id)?.shallow_copy();
        Some(self.push(Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Tag(copy),
        }))
    }

    // === Content ===

    /// All nested text in document order
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            if let Some(content) = node.as_text() {
                out.push_str(content);
            } else if node.is_tag() {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Structurally empty tag.
    ///
    /// A pruned tag is always empty. Otherwise the first child that is a
    /// non-pruned tag, non-blank text, a comment or any other leaf makes it
    /// non-empty. Leaves and unknown handles are never empty.
    pub fn is_empty(&self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let Some(tag) = node.as_tag() else {
            return false;
        };
        if tag.pruned {
            return true;
        }
        for &child in &node.children {
            let Some(child) = self.get(child) else {
                continue;
            };
            let keeps = match &child.data {
                NodeData::Tag(t) => !t.pruned,
                NodeData::Text(run) => !run.is_blank(),
                NodeData::Comment(_) => true,
                NodeData::ProcessingInstruction { .. } => true,
            };
            if keeps {
                return false;
            }
        }
        true
    }
}
