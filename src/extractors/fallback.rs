//! Spatial fallback linking.
//!
//! Not every relationship in a diagram is drawn as a stroke we can resolve.
//! Any candidate left without a parent after edge inference is attached to
//! the closest candidate on its left, measured with a metric that prefers
//! small vertical offsets so branches stay visually coherent.

use crate::extractors::candidates::NodeCandidate;
use crate::extractors::linkage::Linkage;
use crate::geometry::euclidean_distance;
use crate::pipeline::config::FallbackConfig;
use crate::pipeline::ReconstructionStats;

/// Cost of attaching `child` under `parent`.
///
/// Straight-line distance between centers plus `vertical_weight` times the
/// absolute vertical offset.
pub fn link_cost(parent: &NodeCandidate, child: &NodeCandidate, vertical_weight: f32) -> f32 {
    let (p, c) = (parent.center(), child.center());
    euclidean_distance(&p, &c) + vertical_weight * (p.y - c.y).abs()
}

/// Attaches orphans to a plausible parent on their left.
#[derive(Debug, Clone)]
pub struct FallbackLinker<'a> {
    config: &'a FallbackConfig,
}

impl<'a> FallbackLinker<'a> {
    /// Create a linker with the given weights.
    pub fn new(config: &'a FallbackConfig) -> Self {
        Self { config }
    }

    /// Link every orphan in `ordered` that has a candidate strictly to its
    /// left.
    ///
    /// `ordered` must be sorted by ascending center x. The first entry is
    /// never linked. Existing parents are never replaced; a candidate with
    /// nothing to its left stays parentless.
    pub fn link(
        &self,
        ordered: &[&NodeCandidate],
        linkage: &mut Linkage,
        stats: &mut ReconstructionStats,
    ) {
        if !self.config.enabled {
            return;
        }

        for (index, orphan) in ordered.iter().enumerate().skip(1) {
            if linkage.has_parent(orphan.id) {
                continue;
            }

            let orphan_x = orphan.center().x;
            let mut best: Option<(usize, f32)> = None;
            for candidate in &ordered[..index] {
                if candidate.center().x >= orphan_x {
                    continue;
                }
                let cost = link_cost(candidate, orphan, self.config.vertical_weight);
                if best.map_or(cost.is_finite(), |(_, best_cost)| cost < best_cost) {
                    best = Some((candidate.id, cost));
                }
            }

            if let Some((parent, cost)) = best {
                if linkage.add_edge(parent, orphan.id) {
                    stats.fallback_edges += 1;
                    log::trace!("Fallback linked {} -> {} (cost {:.1})", parent, orphan.id, cost);
                }
            }
        }

        log::debug!("Fallback linker added {} edges", stats.fallback_edges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::candidates::sort_by_center_x;
    use crate::geometry::Rect;

    fn node(id: usize, x: f32, y: f32) -> NodeCandidate {
        NodeCandidate {
            id,
            text: format!("n{}", id),
            bbox: Rect::new(x, y, 40.0, 20.0),
        }
    }

    fn run(candidates: &[NodeCandidate], linkage: &mut Linkage) -> ReconstructionStats {
        let config = FallbackConfig::default();
        let mut stats = ReconstructionStats::new();
        let ordered = sort_by_center_x(candidates);
        FallbackLinker::new(&config).link(&ordered, linkage, &mut stats);
        stats
    }

    #[test]
    fn test_links_to_nearest_left_neighbor() {
        let candidates = vec![node(0, 0.0, 0.0), node(1, 100.0, 0.0), node(2, 200.0, 0.0)];
        let mut linkage = Linkage::new();
        linkage.add_edge(0, 1);

        let stats = run(&candidates, &mut linkage);

        assert_eq!(stats.fallback_edges, 1);
        assert!(linkage.children(1).unwrap().contains(&2));
    }

    #[test]
    fn test_leftmost_is_never_linked() {
        let candidates = vec![node(0, 0.0, 0.0), node(1, 100.0, 0.0)];
        let mut linkage = Linkage::new();
        run(&candidates, &mut linkage);
        assert!(!linkage.has_parent(0));
        assert!(linkage.has_parent(1));
    }

    #[test]
    fn test_same_x_is_not_a_parent() {
        // Stacked vertically: neither lies strictly left of the other
        let candidates = vec![node(0, 0.0, 0.0), node(1, 0.0, 50.0)];
        let mut linkage = Linkage::new();
        let stats = run(&candidates, &mut linkage);
        assert_eq!(stats.fallback_edges, 0);
        assert!(!linkage.has_parent(1));
    }

    #[test]
    fn test_vertical_penalty_prefers_same_row() {
        // Diagonal neighbour is slightly closer in straight-line distance
        // but far off vertically.
        let candidates = vec![
            node(0, 0.0, 0.0),     // same row as orphan, 150px away
            node(1, 100.0, 100.0), // diagonal, ~112px away
            node(2, 150.0, 0.0),   // orphan
        ];
        let mut linkage = Linkage::new();
        linkage.add_edge(0, 1);

        run(&candidates, &mut linkage);

        assert!(linkage.children(0).unwrap().contains(&2));
        assert!(linkage.children(1).is_none());
    }

    #[test]
    fn test_existing_parent_kept() {
        let candidates = vec![node(0, 0.0, 0.0), node(1, 100.0, 0.0), node(2, 200.0, 0.0)];
        let mut linkage = Linkage::new();
        linkage.add_edge(0, 2);
        linkage.add_edge(0, 1);

        let stats = run(&candidates, &mut linkage);

        assert_eq!(stats.fallback_edges, 0);
        assert!(linkage.children(1).is_none());
    }

    #[test]
    fn test_disabled() {
        let candidates = vec![node(0, 0.0, 0.0), node(1, 100.0, 0.0)];
        let mut linkage = Linkage::new();
        let config = FallbackConfig {
            enabled: false,
            ..Default::default()
        };
        let mut stats = ReconstructionStats::new();
        let ordered = sort_by_center_x(&candidates);
        FallbackLinker::new(&config).link(&ordered, &mut linkage, &mut stats);
        assert!(linkage.edges().is_empty());
    }
}
