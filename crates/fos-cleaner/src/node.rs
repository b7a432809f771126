//! Tag tree node
//!
//! A node is an arena slot: a parent handle, an ordered list of child
//! handles and the kind-specific payload. Only tag nodes carry children.

use crate::{AttributeStore, NodeId};

/// Tree node - core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Owning tag (None for roots and detached nodes)
    pub(crate) parent: Option<NodeId>,
    /// Ordered children
    pub(crate) children: Vec<NodeId>,
    /// Node-specific data
    pub(crate) data: NodeData,
}

impl Node {
    /// Create a new tag node; the name is stored lowercased
    pub fn tag(name: Option<&str>) -> Self {
        Self::with_data(NodeData::Tag(TagData::new(name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(TextRun::new(content)))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a processing instruction node
    pub fn processing_instruction(target: impl Into<String>, data: impl Into<String>) -> Self {
        Self::with_data(NodeData::ProcessingInstruction {
            target: target.into(),
            data: data.into(),
        })
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Parent handle, None for a root
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child handles
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    #[inline]
    pub fn is_tag(&self) -> bool {
        matches!(self.data, NodeData::Tag(_))
    }

    /// Get tag data if this is a tag
    #[inline]
    pub fn as_tag(&self) -> Option<&TagData> {
        match &self.data {
            NodeData::Tag(t) => Some(t),
            _ => None,
        }
    }

    /// Get mutable tag data
    #[inline]
    pub(crate) fn as_tag_mut(&mut self) -> Option<&mut TagData> {
        match &mut self.data {
            NodeData::Tag(t) => Some(t),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Element produced by the parser or synthesized by the balancer
    Tag(TagData),
    /// Character content
    Text(TextRun),
    /// Comment; kept because browsers read conditional comments
    Comment(String),
    /// Any other leaf the tokenizer hands over
    ProcessingInstruction { target: String, data: String },
}

/// Tag-specific data
#[derive(Debug, Clone, Default)]
pub struct TagData {
    /// Lowercased tag name
    pub(crate) name: Option<String>,
    pub attributes: AttributeStore,
    pub doctype: Option<DocType>,
    /// Synthesized while recovering from unbalanced tags, e.g. the second
    /// `<i>` in `<b><i>foo</b>bar` becoming `<b><i>foo</i></b><i>bar</i>`
    pub(crate) auto_generated: bool,
    /// Logically removed, possibly still linked
    pub pruned: bool,
    /// End tag seen during construction
    pub formed: bool,
    /// Content staged for relocation next to this tag
    pub(crate) items_to_move: Option<Vec<NodeId>>,
}

impl TagData {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_lowercase),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_auto_generated(&self) -> bool {
        self.auto_generated
    }

    /// Items queued for relocation, if any were ever queued
    pub fn items_to_move(&self) -> Option<&[NodeId]> {
        self.items_to_move.as_deref()
    }

    /// Queue an item, allocating the list on first use
    pub fn queue_for_move(&mut self, item: NodeId) {
        self.items_to_move.get_or_insert_with(Vec::new).push(item);
    }

    /// Take the queued items, leaving the slot unallocated
    pub fn take_items_to_move(&mut self) -> Vec<NodeId> {
        self.items_to_move.take().unwrap_or_default()
    }

    /// Disconnected shallow copy: name and attributes only
    pub fn shallow_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            ..Self::default()
        }
    }
}

/// Text node data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
}

impl TextRun {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }

    /// Only markup whitespace and control characters (or empty).
    ///
    /// Characters above U+0020, such as a decoded `&nbsp;`, are content.
    pub fn is_blank(&self) -> bool {
        self.content.chars().all(|c| c <= ' ')
    }
}

/// DOCTYPE declaration kept on the root tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocType {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

impl DocType {
    pub fn new(
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        }
    }

    /// `<!DOCTYPE html>` with no identifiers
    pub fn html5() -> Self {
        Self::new("html", "", "")
    }
}
