//! Per-run reconstruction statistics.
//!
//! Counters are filled in by each stage as it runs and returned alongside
//! the tree. They are diagnostic only: nothing in the pipeline reads them
//! back.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::extractors::{Classification, StrokeSkip};

/// Counters collected during one reconstruction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructionStats {
    /// Text elements classified, per outcome
    pub classifications: BTreeMap<Classification, usize>,
    /// Accepted fragments dropped as duplicates of an earlier candidate
    pub duplicates: usize,
    /// Candidates produced by collection
    pub candidates: usize,
    /// Strokes examined by edge inference
    pub strokes_examined: usize,
    /// Strokes dropped, per reason
    pub strokes_skipped: BTreeMap<StrokeSkip, usize>,
    /// Edges inferred from strokes
    pub stroke_edges: usize,
    /// Edges added by the fallback linker
    pub fallback_edges: usize,
    /// Candidates still parentless after fallback linking
    pub roots: usize,
    /// Nodes emitted into the final tree
    pub tree_nodes: usize,
    /// Children skipped because they were already placed in the tree
    pub cycle_guard_hits: usize,
    /// Subtrees cut off by the depth limit
    pub depth_truncations: usize,
}

impl ReconstructionStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classification outcome.
    pub fn record_classification(&mut self, outcome: Classification) {
        *self.classifications.entry(outcome).or_insert(0) += 1;
    }

    /// Record one dropped stroke.
    pub fn record_stroke_skip(&mut self, reason: StrokeSkip) {
        *self.strokes_skipped.entry(reason).or_insert(0) += 1;
    }

    /// Number of elements with the given outcome.
    pub fn classified(&self, outcome: Classification) -> usize {
        self.classifications.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of strokes dropped for the given reason.
    pub fn skipped(&self, reason: StrokeSkip) -> usize {
        self.strokes_skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Candidates not reachable from the chosen root.
    pub fn unreachable(&self) -> usize {
        self.candidates.saturating_sub(self.tree_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = ReconstructionStats::new();
        stats.record_classification(Classification::Accepted);
        stats.record_classification(Classification::Accepted);
        stats.record_classification(Classification::RejectedNoise);
        stats.record_stroke_skip(StrokeSkip::Icon);

        assert_eq!(stats.classified(Classification::Accepted), 2);
        assert_eq!(stats.classified(Classification::RejectedNoise), 1);
        assert_eq!(stats.classified(Classification::RejectedEmpty), 0);
        assert_eq!(stats.skipped(StrokeSkip::Icon), 1);
        assert_eq!(stats.skipped(StrokeSkip::SelfLoop), 0);
    }

    #[test]
    fn test_unreachable() {
        let stats = ReconstructionStats {
            candidates: 5,
            tree_nodes: 3,
            ..Default::default()
        };
        assert_eq!(stats.unreachable(), 2);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut stats = ReconstructionStats::new();
        stats.record_stroke_skip(StrokeSkip::GeometryFault);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("GeometryFault"));
    }
}
