//! Structural repair
//!
//! Runs after balancing: moves staged content out of the containers that
//! could not hold it, drops synthesized tags that ended up empty and
//! excises pruned tags.

use crate::condition::eq_ignore_case;
use crate::{AllNodes, AutoGeneratedAndEmpty, NodeId, Pruned, TagCondition, TagTree};

/// Repair pass configuration
#[derive(Debug, Clone)]
pub struct RepairConfig {
    /// Tag names to mark as pruned before anything else runs
    pub prune_tags: Vec<String>,
    /// Move content queued on tags into their parents
    pub relocate_queued: bool,
    /// Remove auto-generated tags that are empty
    pub remove_auto_generated: bool,
    /// Unlink pruned tags instead of leaving them for the serializer to skip
    pub compact_pruned: bool,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            prune_tags: Vec::new(),
            relocate_queued: true,
            remove_auto_generated: true,
            compact_pruned: false,
        }
    }
}

/// What a repair pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub pruned: usize,
    pub relocated: usize,
    pub removed: usize,
    pub compacted: usize,
}

/// Mark every tag below `root` whose name is listed as pruned.
///
/// Returns how many tags were newly marked.
pub fn mark_pruned_by_name<S: AsRef<str>>(tree: &mut TagTree, root: NodeId, names: &[S]) -> usize {
    if names.is_empty() {
        return 0;
    }
    let listed = |t: &TagTree, n: NodeId| {
        !t.is_pruned(n)
            && t.name(n)
                .is_some_and(|name| names.iter().any(|p| eq_ignore_case(name, p.as_ref())))
    };
    let targets = tree.find_all(root, &listed, true);
    for &id in &targets {
        tree.set_pruned(id, true);
    }
    targets.len()
}

/// Remove every auto-generated tag below `root` that is empty.
///
/// Tags are visited children-first (reverse pre-order), so a synthesized
/// parent emptied by removing its synthesized children goes in the same
/// sweep. Organically empty tags are left alone.
pub fn remove_auto_generated_empty(tree: &mut TagTree, root: NodeId) -> usize {
    let order = tree.find_all(root, &AllNodes, true);
    let mut removed = 0;
    for &id in order.iter().rev() {
        if AutoGeneratedAndEmpty.satisfy(tree, id) && tree.remove_from_tree(id) {
            removed += 1;
        }
    }
    removed
}

/// Unlink every pruned tag below `root`
pub fn compact_pruned(tree: &mut TagTree, root: NodeId) -> usize {
    let targets = tree.find_all(root, &Pruned, true);
    targets
        .into_iter()
        .filter(|&id| tree.remove_from_tree(id))
        .count()
}

fn relocate_queued(tree: &mut TagTree, root: NodeId) -> usize {
    let staged = |t: &TagTree, n: NodeId| t.items_to_move(n).is_some();
    let holders = tree.find_all(root, &staged, true);
    holders
        .into_iter()
        .map(|id| tree.relocate_queued_items(id))
        .sum()
}

/// Configurable repair over one tree
#[derive(Debug, Clone, Default)]
pub struct RepairPass {
    config: RepairConfig,
}

impl RepairPass {
    pub fn new(config: RepairConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RepairConfig {
        &self.config
    }

    /// Repair the subtree below `root`
    pub fn run(&self, tree: &mut TagTree, root: NodeId) -> RepairReport {
        let mut report = RepairReport::default();

        report.pruned = mark_pruned_by_name(tree, root, &self.config.prune_tags);
        if self.config.relocate_queued {
            report.relocated = relocate_queued(tree, root);
        }
        if self.config.remove_auto_generated {
            report.removed = remove_auto_generated_empty(tree, root);
        }
        if self.config.compact_pruned {
            report.compacted = compact_pruned(tree, root);
        }

        tracing::debug!(
            "Repair of {}: {} pruned, {} relocated, {} removed, {} compacted",
            root,
            report.pruned,
            report.relocated,
            report.removed,
            report.compacted
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_single_sweep() {
        let mut tree = TagTree::new();
        let parent = tree.create_tag(Some("div"));
        let outer = tree.create_auto_generated_tag(Some("b"));
        let middle = tree.create_auto_generated_tag(Some("i"));
        let inner = tree.create_auto_generated_tag(Some("u"));
        tree.add_child(parent, outer);
        tree.add_child(outer, middle);
        tree.add_child(middle, inner);

        assert_eq!(remove_auto_generated_empty(&mut tree, parent), 3);
        assert!(tree.children(parent).is_empty());
    }

    #[test]
    fn test_organic_empty_kept() {
        let mut tree = TagTree::new();
        let parent = tree.create_tag(Some("div"));
        let organic = tree.create_tag(Some("p"));
        let filler = tree.create_auto_generated_tag(Some("p"));
        tree.add_children(parent, [organic, filler]);

        assert_eq!(remove_auto_generated_empty(&mut tree, parent), 1);
        assert_eq!(tree.children(parent), &[organic]);
    }

    #[test]
    fn test_filler_with_content_kept() {
        let mut tree = TagTree::new();
        let parent = tree.create_tag(Some("div"));
        let filler = tree.create_auto_generated_tag(Some("i"));
        let text = tree.create_text("bar");
        tree.add_child(parent, filler);
        tree.add_child(filler, text);

        assert_eq!(remove_auto_generated_empty(&mut tree, parent), 0);
        assert_eq!(tree.children(parent), &[filler]);
    }

    #[test]
    fn test_mark_pruned_by_name() {
        let mut tree = TagTree::new();
        let body = tree.create_tag(Some("body"));
        let script = tree.create_tag(Some("script"));
        let style = tree.create_tag(Some("style"));
        let p = tree.create_tag(Some("p"));
        tree.add_children(body, [script, style, p]);

        assert_eq!(mark_pruned_by_name(&mut tree, body, &["SCRIPT", "style"]), 2);
        assert!(tree.is_pruned(script));
        assert!(tree.is_pruned(style));
        assert!(!tree.is_pruned(p));
        // Already pruned tags are not counted twice
        assert_eq!(mark_pruned_by_name(&mut tree, body, &["script"]), 0);
    }

    #[test]
    fn test_pruned_child_lets_filler_go() {
        let mut tree = TagTree::new();
        let body = tree.create_tag(Some("body"));
        let filler = tree.create_auto_generated_tag(Some("span"));
        let script = tree.create_tag(Some("script"));
        tree.add_child(body, filler);
        tree.add_child(filler, script);

        let pass = RepairPass::new(RepairConfig {
            prune_tags: vec!["script".into()],
            ..RepairConfig::default()
        });
        let report = pass.run(&mut tree, body);

        assert_eq!(report.pruned, 1);
        assert_eq!(report.removed, 1);
        assert!(tree.children(body).is_empty());
    }

    #[test]
    fn test_compact_pruned() {
        let mut tree = TagTree::new();
        let body = tree.create_tag(Some("body"));
        let ad = tree.create_tag(Some("aside"));
        let p = tree.create_tag(Some("p"));
        tree.add_children(body, [ad, p]);
        tree.set_pruned(ad, true);

        let pass = RepairPass::new(RepairConfig {
            compact_pruned: true,
            ..RepairConfig::default()
        });
        let report = pass.run(&mut tree, body);

        assert_eq!(report.compacted, 1);
        assert_eq!(tree.children(body), &[p]);
    }

    #[test]
    fn test_run_relocates_before_removing() {
        let mut tree = TagTree::new();
        let body = tree.create_tag(Some("body"));
        let table = tree.create_tag(Some("table"));
        let filler = tree.create_auto_generated_tag(Some("tbody"));
        let stray = tree.create_text("stray text");
        tree.add_child(body, table);
        tree.add_child(table, filler);
        tree.add_child(filler, stray);
        tree.queue_for_move(table, stray);

        let report = RepairPass::default().run(&mut tree, body);

        assert_eq!(report.relocated, 1);
        assert_eq!(report.removed, 1);
        assert_eq!(tree.children(body), &[stray, table]);
        assert!(tree.children(table).is_empty());
    }
}
