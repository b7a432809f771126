//! fOS Cleaner - Tag tree and structural repair
//!
//! Arena-backed tag tree used while turning malformed HTML into a
//! well-formed tree. The balancer builds nodes into a [`TagTree`], flags
//! synthesized recovery tags as auto-generated, and the [`RepairPass`]
//! later removes the ones that ended up empty.

mod attributes;
mod condition;
mod error;
mod node;
mod query;
mod repair;
mod traverse;
mod tree;

pub use attributes::{Attribute, AttributeStore};
pub use condition::{
    AllNodes, AttributeExists, AttributePattern, AttributeValueEquals, AutoGeneratedAndEmpty,
    NameEquals, Pruned, TagCondition,
};
pub use error::{Result, TreeError};
pub use node::{DocType, Node, NodeData, TagData, TextRun};
pub use repair::{
    RepairConfig, RepairPass, RepairReport, compact_pruned, mark_pruned_by_name,
    remove_auto_generated_empty,
};
pub use tree::{Child, Proxy, TagTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena slot backing this handle
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
