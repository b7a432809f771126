//! Condition-driven search over a tag subtree
//!
//! Depth-first, document order, tags only. The starting node itself is
//! never tested. An explicit stack keeps deeply nested junk markup from
//! exhausting the call stack.

use crate::{Node, NodeId, TagCondition, TagTree};

impl TagTree {
    /// Tag children of `id`, pushed so that the first child pops first
    fn push_tag_children(&self, id: NodeId, stack: &mut Vec<NodeId>) {
        stack.extend(
            self.children(id)
                .iter()
                .rev()
                .copied()
                .filter(|&c| self.get(c).is_some_and(Node::is_tag)),
        );
    }

    /// First tag below `root` satisfying `condition`.
    ///
    /// When `recursive`, a non-matching child is searched before its next
    /// sibling; a matching child is returned without looking inside it.
    pub fn find_first<C>(&self, root: NodeId, condition: &C, recursive: bool) -> Option<NodeId>
    where
        C: TagCondition + ?Sized,
    {
        if condition.is_absent() {
            return None;
        }
        let mut stack = Vec::new();
        self.push_tag_children(root, &mut stack);
        while let Some(current) = stack.pop() {
            if condition.satisfy(self, current) {
                return Some(current);
            }
            if recursive {
                self.push_tag_children(current, &mut stack);
            }
        }
        None
    }

    /// Every tag below `root` satisfying `condition`, in pre-order.
    ///
    /// Recursion continues beneath matches, so nested matches are all
    /// reported.
    pub fn find_all<C>(&self, root: NodeId, condition: &C, recursive: bool) -> Vec<NodeId>
    where
        C: TagCondition + ?Sized,
    {
        let mut found = Vec::new();
        if condition.is_absent() {
            return found;
        }
        let mut stack = Vec::new();
        self.push_tag_children(root, &mut stack);
        while let Some(current) = stack.pop() {
            if condition.satisfy(self, current) {
                found.push(current);
            }
            if recursive {
                self.push_tag_children(current, &mut stack);
            }
        }
        found
    }
}
