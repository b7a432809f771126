//! Tag conditions
//!
//! Pure predicates over a single tag. They never walk the tree; recursion
//! is decided by the traversal that applies them.

use regex::Regex;

use crate::{NodeId, Result, TagTree, TreeError};

/// Predicate over one node of a tree
pub trait TagCondition {
    /// Whether `node` satisfies the condition
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool;

    /// An absent condition matches nothing and lets searches bail out early
    fn is_absent(&self) -> bool {
        false
    }
}

impl<C: TagCondition> TagCondition for Option<C> {
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        self.as_ref().is_some_and(|c| c.satisfy(tree, node))
    }

    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(TagCondition::is_absent)
    }
}

impl<F> TagCondition for F
where
    F: Fn(&TagTree, NodeId) -> bool,
{
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        self(tree, node)
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Every tag
#[derive(Debug, Clone, Copy, Default)]
pub struct AllNodes;

impl TagCondition for AllNodes {
    fn satisfy(&self, _tree: &TagTree, _node: NodeId) -> bool {
        true
    }
}

/// Tag name equals, ignoring case
#[derive(Debug, Clone)]
pub struct NameEquals {
    pub name: String,
}

impl NameEquals {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TagCondition for NameEquals {
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        tree.name(node).is_some_and(|n| eq_ignore_case(n, &self.name))
    }
}

/// Tag carries the attribute
#[derive(Debug, Clone)]
pub struct AttributeExists {
    pub name: String,
}

impl AttributeExists {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TagCondition for AttributeExists {
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        tree.has_attribute(node, &self.name)
    }
}

/// Attribute value equals, optionally ignoring case
#[derive(Debug, Clone)]
pub struct AttributeValueEquals {
    pub name: String,
    pub value: String,
    pub case_sensitive: bool,
}

impl AttributeValueEquals {
    pub fn new(name: impl Into<String>, value: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            case_sensitive,
        }
    }
}

impl TagCondition for AttributeValueEquals {
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        match tree.attribute(node, &self.name) {
            Some(found) if self.case_sensitive => found == self.value,
            Some(found) => eq_ignore_case(found, &self.value),
            None => false,
        }
    }
}

/// Some attribute whose name and value both contain a match.
///
/// A missing pattern accepts anything. Matching is unanchored search, not
/// a full match.
#[derive(Debug, Clone, Default)]
pub struct AttributePattern {
    pub name: Option<Regex>,
    pub value: Option<Regex>,
}

impl AttributePattern {
    pub fn new(name: Option<Regex>, value: Option<Regex>) -> Self {
        Self { name, value }
    }

    /// Compile both halves from source text
    pub fn parse(name: Option<&str>, value: Option<&str>) -> Result<Self> {
        let compile = |which, src: Option<&str>| {
            src.map(Regex::new)
                .transpose()
                .map_err(|source| TreeError::InvalidPattern { which, source })
        };
        Ok(Self {
            name: compile("name", name)?,
            value: compile("value", value)?,
        })
    }
}

impl TagCondition for AttributePattern {
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        let Some(attrs) = tree.attributes(node) else {
            return false;
        };
        attrs.iter().any(|attr| {
            self.name.as_ref().is_none_or(|re| re.is_match(&attr.name))
                && self.value.as_ref().is_none_or(|re| re.is_match(&attr.value))
        })
    }
}

/// Synthesized tag that ended up with nothing in it
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoGeneratedAndEmpty;

impl TagCondition for AutoGeneratedAndEmpty {
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        tree.is_auto_generated(node) && tree.is_empty(node)
    }
}

/// Tag marked as pruned
#[derive(Debug, Clone, Copy, Default)]
pub struct Pruned;

impl TagCondition for Pruned {
    fn satisfy(&self, tree: &TagTree, node: NodeId) -> bool {
        tree.is_pruned(node)
    }
}
