//! Tree assembly.
//!
//! Picks a root and walks the adjacency map from it. Children are laid out
//! top to bottom by their vertical center. A visited set guards the walk, so
//! the output is a proper tree even when the linkage is not: a node reached
//! a second time (through a second parent or a cycle) is skipped.

use std::collections::{HashMap, HashSet};

use crate::extractors::{Linkage, NodeCandidate};
use crate::pipeline::config::AssemblyConfig;
use crate::pipeline::ReconstructionStats;
use crate::structure::ResultTree;
use crate::utils::safe_float_cmp;

/// Assembles the final tree from candidates and their linkage.
#[derive(Debug, Clone)]
pub struct TreeAssembler<'a> {
    config: &'a AssemblyConfig,
}

impl<'a> TreeAssembler<'a> {
    /// Create an assembler with the given limits.
    pub fn new(config: &'a AssemblyConfig) -> Self {
        Self { config }
    }

    /// Choose the root candidate.
    ///
    /// The leftmost candidate without a parent. If every candidate has a
    /// parent, the leftmost candidate overall. `ordered` must be sorted by
    /// ascending center x.
    pub fn select_root(ordered: &[&NodeCandidate], linkage: &Linkage) -> Option<usize> {
        ordered
            .iter()
            .find(|c| !linkage.has_parent(c.id))
            .or_else(|| ordered.first())
            .map(|c| c.id)
    }

    /// Build the tree, or `None` when there are no candidates.
    ///
    /// `ordered` is the same set as `candidates` sorted by ascending center
    /// x. Candidates are looked up by id; edges naming an id that is not in
    /// `candidates` are ignored.
    pub fn assemble(
        &self,
        candidates: &[NodeCandidate],
        ordered: &[&NodeCandidate],
        linkage: &Linkage,
        stats: &mut ReconstructionStats,
    ) -> Option<ResultTree> {
        stats.candidates = candidates.len();
        stats.roots = ordered.iter().filter(|c| !linkage.has_parent(c.id)).count();

        let by_id: HashMap<usize, &NodeCandidate> =
            candidates.iter().map(|c| (c.id, c)).collect();

        let root = Self::select_root(ordered, linkage)?;
        if linkage.has_parent(root) {
            log::warn!("Every candidate has a parent; using leftmost candidate {} as root", root);
        }
        let Some(root) = by_id.get(&root).copied() else {
            log::warn!("Root candidate {} is not among the candidates", root);
            return None;
        };

        let mut visited = HashSet::new();
        let tree = self.build(root, 1, &by_id, linkage, &mut visited, stats);
        stats.tree_nodes = visited.len();
        Some(tree)
    }

    fn build(
        &self,
        candidate: &NodeCandidate,
        depth: usize,
        by_id: &HashMap<usize, &NodeCandidate>,
        linkage: &Linkage,
        visited: &mut HashSet<usize>,
        stats: &mut ReconstructionStats,
    ) -> ResultTree {
        visited.insert(candidate.id);
        let mut node = ResultTree::leaf(candidate.text.clone());

        let Some(child_ids) = linkage.children(candidate.id) else {
            return node;
        };

        if depth >= self.config.max_depth {
            log::warn!(
                "Depth limit {} reached at {:?}; dropping {} children",
                self.config.max_depth,
                candidate.text,
                child_ids.len()
            );
            stats.depth_truncations += 1;
            return node;
        }

        let mut children: Vec<&NodeCandidate> = child_ids
            .iter()
            .filter_map(|child| {
                let found = by_id.get(child).copied();
                if found.is_none() {
                    log::debug!("Edge {} -> {} names an unknown candidate", candidate.id, child);
                }
                found
            })
            .collect();
        children.sort_by(|a, b| safe_float_cmp(a.center().y, b.center().y));

        for child in children {
            // Checked per child rather than up front: an earlier sibling's
            // subtree may already have claimed this node.
            if visited.contains(&child.id) {
                log::warn!(
                    "Candidate {} ({:?}) already placed; skipping edge from {}",
                    child.id,
                    child.text,
                    candidate.id
                );
                stats.cycle_guard_hits += 1;
                continue;
            }
            node.children
                .push(self.build(child, depth + 1, by_id, linkage, visited, stats));
        }

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::sort_by_center_x;
    use crate::geometry::Rect;

    fn node(id: usize, text: &str, x: f32, y: f32) -> NodeCandidate {
        NodeCandidate {
            id,
            text: text.to_string(),
            bbox: Rect::new(x, y, 40.0, 20.0),
        }
    }

    fn assemble(
        candidates: &[NodeCandidate],
        linkage: &Linkage,
        config: &AssemblyConfig,
    ) -> (Option<ResultTree>, ReconstructionStats) {
        let ordered = sort_by_center_x(candidates);
        let mut stats = ReconstructionStats::new();
        let tree = TreeAssembler::new(config).assemble(candidates, &ordered, linkage, &mut stats);
        (tree, stats)
    }

    #[test]
    fn test_empty_is_none() {
        let (tree, _) = assemble(&[], &Linkage::new(), &AssemblyConfig::default());
        assert!(tree.is_none());
    }

    #[test]
    fn test_single_node() {
        let candidates = vec![node(0, "only", 10.0, 10.0)];
        let (tree, stats) = assemble(&candidates, &Linkage::new(), &AssemblyConfig::default());
        assert_eq!(tree, Some(ResultTree::leaf("only")));
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.tree_nodes, 1);
    }

    #[test]
    fn test_children_sorted_top_to_bottom() {
        let candidates = vec![
            node(0, "root", 0.0, 100.0),
            node(1, "bottom", 100.0, 200.0),
            node(2, "top", 100.0, 0.0),
            node(3, "middle", 100.0, 100.0),
        ];
        let mut linkage = Linkage::new();
        linkage.add_edge(0, 1);
        linkage.add_edge(0, 2);
        linkage.add_edge(0, 3);

        let (tree, _) = assemble(&candidates, &linkage, &AssemblyConfig::default());
        assert_eq!(tree.unwrap().names(), vec!["root", "top", "middle", "bottom"]);
    }

    #[test]
    fn test_leftmost_parentless_is_root() {
        let candidates = vec![
            node(0, "child", 0.0, 0.0),
            node(1, "parent", 100.0, 0.0),
            node(2, "loner", 300.0, 0.0),
        ];
        let mut linkage = Linkage::new();
        linkage.add_edge(1, 0);

        let (tree, stats) = assemble(&candidates, &linkage, &AssemblyConfig::default());
        let tree = tree.unwrap();
        assert_eq!(tree.name, "parent");
        assert_eq!(tree.names(), vec!["parent", "child"]);
        assert_eq!(stats.roots, 2);
        assert_eq!(stats.unreachable(), 1);
    }

    #[test]
    fn test_sparse_ids() {
        let candidates = vec![
            node(9, "root", 0.0, 50.0),
            node(4, "lower", 100.0, 100.0),
            node(21, "upper", 100.0, 0.0),
        ];
        let mut linkage = Linkage::new();
        linkage.add_edge(9, 4);
        linkage.add_edge(9, 21);
        // Edge to an id outside the candidate set
        linkage.add_edge(21, 50);

        let (tree, stats) = assemble(&candidates, &linkage, &AssemblyConfig::default());
        assert_eq!(tree.unwrap().names(), vec!["root", "upper", "lower"]);
        assert_eq!(stats.tree_nodes, 3);
        assert_eq!(stats.unreachable(), 0);
    }

    #[test]
    fn test_cycle_guard() {
        let candidates =
            vec![node(0, "a", 0.0, 0.0), node(1, "b", 100.0, 0.0), node(2, "c", 200.0, 0.0)];
        let mut linkage = Linkage::new();
        linkage.add_edge(0, 1);
        linkage.add_edge(1, 2);
        linkage.add_edge(2, 0);

        let (tree, stats) = assemble(&candidates, &linkage, &AssemblyConfig::default());
        let tree = tree.unwrap();
        // No parentless candidate: leftmost overall becomes root
        assert_eq!(tree.names(), vec!["a", "b", "c"]);
        assert_eq!(stats.roots, 0);
        assert_eq!(stats.cycle_guard_hits, 1);
    }

    #[test]
    fn test_node_with_two_parents_appears_once() {
        let candidates = vec![
            node(0, "root", 0.0, 50.0),
            node(1, "upper", 100.0, 0.0),
            node(2, "lower", 100.0, 100.0),
            node(3, "shared", 200.0, 50.0),
        ];
        let mut linkage = Linkage::new();
        linkage.add_edge(0, 1);
        linkage.add_edge(0, 2);
        linkage.add_edge(2, 3);
        linkage.add_edge(1, 3);

        let (tree, stats) = assemble(&candidates, &linkage, &AssemblyConfig::default());
        let tree = tree.unwrap();
        assert_eq!(tree.node_count(), 4);
        // "upper" is built first (smaller y) and claims "shared"
        assert_eq!(tree.find("upper").unwrap().children.len(), 1);
        assert!(tree.find("lower").unwrap().is_leaf());
        assert_eq!(stats.cycle_guard_hits, 1);
    }

    #[test]
    fn test_depth_limit() {
        let candidates: Vec<NodeCandidate> = (0..5)
            .map(|i| node(i, &format!("n{}", i), i as f32 * 100.0, 0.0))
            .collect();
        let mut linkage = Linkage::new();
        for i in 0..4 {
            linkage.add_edge(i, i + 1);
        }

        let config = AssemblyConfig { max_depth: 3 };
        let (tree, stats) = assemble(&candidates, &linkage, &config);
        let tree = tree.unwrap();
        assert_eq!(tree.depth(), 3);
        assert_eq!(stats.depth_truncations, 1);
    }
}
