//! Query shortcuts used by cleanup rules
//!
//! Each one builds a condition and hands it to the traversal.

use crate::{
    AllNodes, AttributeExists, AttributePattern, AttributeValueEquals, NameEquals, NodeId,
    TagTree,
};

impl TagTree {
    pub fn all_elements(&self, root: NodeId, recursive: bool) -> Vec<NodeId> {
        self.find_all(root, &AllNodes, recursive)
    }

    pub fn find_element_by_name(&self, root: NodeId, name: &str, recursive: bool) -> Option<NodeId> {
        self.find_first(root, &NameEquals::new(name), recursive)
    }

    pub fn elements_by_name(&self, root: NodeId, name: &str, recursive: bool) -> Vec<NodeId> {
        self.find_all(root, &NameEquals::new(name), recursive)
    }

    pub fn find_element_having_attribute(
        &self,
        root: NodeId,
        att_name: &str,
        recursive: bool,
    ) -> Option<NodeId> {
        self.find_first(root, &AttributeExists::new(att_name), recursive)
    }

    pub fn elements_having_attribute(
        &self,
        root: NodeId,
        att_name: &str,
        recursive: bool,
    ) -> Vec<NodeId> {
        self.find_all(root, &AttributeExists::new(att_name), recursive)
    }

    pub fn find_element_by_att_value(
        &self,
        root: NodeId,
        att_name: &str,
        att_value: &str,
        recursive: bool,
        case_sensitive: bool,
    ) -> Option<NodeId> {
        let condition = AttributeValueEquals::new(att_name, att_value, case_sensitive);
        self.find_first(root, &condition, recursive)
    }

    pub fn elements_by_att_value(
        &self,
        root: NodeId,
        att_name: &str,
        att_value: &str,
        recursive: bool,
        case_sensitive: bool,
    ) -> Vec<NodeId> {
        let condition = AttributeValueEquals::new(att_name, att_value, case_sensitive);
        self.find_all(root, &condition, recursive)
    }

    pub fn find_element_by_att_pattern(
        &self,
        root: NodeId,
        pattern: &AttributePattern,
        recursive: bool,
    ) -> Option<NodeId> {
        self.find_first(root, pattern, recursive)
    }

    pub fn elements_by_att_pattern(
        &self,
        root: NodeId,
        pattern: &AttributePattern,
        recursive: bool,
    ) -> Vec<NodeId> {
        self.find_all(root, pattern, recursive)
    }
}
