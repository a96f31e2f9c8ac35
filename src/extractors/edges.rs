//! Stroke-based edge inference.
//!
//! Each stroke is treated as a hypothesis "these two nodes are connected".
//! Its two drawn endpoints are snapped to the nearest candidates; strokes
//! that snap to nothing, to a single node, or to an already-connected pair
//! are dropped. Direction comes from layout, not from drawing order: the
//! leftmost node is the parent.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::elements::{has_visible_fill, StrokeGeometry};
use crate::error::Result;
use crate::extractors::candidates::NodeCandidate;
use crate::extractors::linkage::Linkage;
use crate::geometry::Point;
use crate::pipeline::config::EdgeInferenceConfig;
use crate::pipeline::ReconstructionStats;
use crate::utils::safe_float_cmp;

/// Why a stroke did not produce an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrokeSkip {
    /// Bounding box too small in both dimensions
    Icon,
    /// Paints a visible fill (only when filled paths are skipped)
    Filled,
    /// Zero or near-zero drawn length
    Degenerate,
    /// Length or point sampling failed
    GeometryFault,
    /// An endpoint is not near any candidate
    Unresolved,
    /// Both endpoints snap to the same candidate
    SelfLoop,
    /// The pair is already connected
    DuplicatePair,
}

impl fmt::Display for StrokeSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            StrokeSkip::Icon => "icon-sized",
            StrokeSkip::Filled => "filled shape",
            StrokeSkip::Degenerate => "degenerate length",
            StrokeSkip::GeometryFault => "geometry fault",
            StrokeSkip::Unresolved => "endpoint not near a candidate",
            StrokeSkip::SelfLoop => "self loop",
            StrokeSkip::DuplicatePair => "duplicate pair",
        };
        f.write_str(reason)
    }
}

/// Resolve a point to the nearest candidate.
///
/// A candidate whose box contains the point wins immediately (first in id
/// order). Otherwise the candidate with the smallest distance to its box
/// edge wins, provided that distance is strictly below `noise_distance`.
///
/// # Examples
///
/// ```
/// use diagram_oxide::extractors::{nearest_candidate, NodeCandidate};
/// use diagram_oxide::geometry::{Point, Rect};
///
/// let candidates = vec![NodeCandidate {
///     id: 0,
///     text: "Root".to_string(),
///     bbox: Rect::new(0.0, 0.0, 40.0, 20.0),
/// }];
///
/// assert_eq!(nearest_candidate(&Point::new(10.0, 10.0), &candidates, 100.0), Some(0));
/// assert_eq!(nearest_candidate(&Point::new(139.0, 10.0), &candidates, 100.0), Some(0));
/// assert_eq!(nearest_candidate(&Point::new(140.0, 10.0), &candidates, 100.0), None);
/// ```
pub fn nearest_candidate(
    point: &Point,
    candidates: &[NodeCandidate],
    noise_distance: f32,
) -> Option<usize> {
    if let Some(hit) = candidates.iter().find(|c| c.bbox.contains_point(point)) {
        return Some(hit.id);
    }

    candidates
        .iter()
        .map(|c| (c.id, c.bbox.distance_to_point(point)))
        .filter(|(_, distance)| *distance < noise_distance)
        .min_by(|a, b| safe_float_cmp(a.1, b.1))
        .map(|(id, _)| id)
}

/// Order a connected pair into (parent, child).
///
/// The candidate with the smaller center x is the parent. Ties fall back to
/// the smaller center y, then the smaller id, so the result never depends
/// on which end of the stroke was drawn first.
pub fn orient_pair(a: &NodeCandidate, b: &NodeCandidate) -> (usize, usize) {
    let (ca, cb) = (a.center(), b.center());
    let a_first = safe_float_cmp(ca.x, cb.x)
        .then_with(|| safe_float_cmp(ca.y, cb.y))
        .then_with(|| a.id.cmp(&b.id))
        .is_le();
    if a_first {
        (a.id, b.id)
    } else {
        (b.id, a.id)
    }
}

/// Infers directed edges from stroke geometry.
#[derive(Debug, Clone)]
pub struct EdgeInference<'a> {
    config: &'a EdgeInferenceConfig,
}

impl<'a> EdgeInference<'a> {
    /// Create an edge inference stage with the given thresholds.
    pub fn new(config: &'a EdgeInferenceConfig) -> Self {
        Self { config }
    }

    /// Infer edges for all strokes.
    ///
    /// Candidates are looked up by id, so any slice of unique ids works.
    /// Faulty strokes are logged and skipped; this never fails as a whole.
    pub fn infer<S: StrokeGeometry>(
        &self,
        candidates: &[NodeCandidate],
        strokes: &[S],
        stats: &mut ReconstructionStats,
    ) -> Linkage {
        let mut linkage = Linkage::new();
        if candidates.len() < 2 {
            return linkage;
        }

        let mut seen_pairs: HashSet<(usize, usize)> = HashSet::new();

        for (index, stroke) in strokes.iter().enumerate() {
            stats.strokes_examined += 1;
            match self.resolve_stroke(stroke, candidates, &mut seen_pairs) {
                Ok(Ok((source, target))) => {
                    if linkage.add_edge(source, target) {
                        stats.stroke_edges += 1;
                        log::trace!("Stroke {} links {} -> {}", index, source, target);
                    }
                },
                Ok(Err(reason)) => {
                    log::trace!("Stroke {} skipped: {}", index, reason);
                    stats.record_stroke_skip(reason);
                },
                Err(e) => {
                    log::debug!("Stroke {} skipped: {}", index, e);
                    stats.record_stroke_skip(StrokeSkip::GeometryFault);
                },
            }
        }

        log::debug!(
            "Inferred {} edges from {} strokes",
            stats.stroke_edges,
            stats.strokes_examined
        );
        linkage
    }

    /// Resolve one stroke to an oriented candidate pair.
    ///
    /// The outer `Result` carries geometry faults; the inner one the
    /// ordinary reasons for dropping a stroke.
    fn resolve_stroke<S: StrokeGeometry>(
        &self,
        stroke: &S,
        candidates: &[NodeCandidate],
        seen_pairs: &mut HashSet<(usize, usize)>,
    ) -> Result<std::result::Result<(usize, usize), StrokeSkip>> {
        let bbox = stroke.bbox();
        if bbox.width < self.config.min_stroke_extent && bbox.height < self.config.min_stroke_extent
        {
            return Ok(Err(StrokeSkip::Icon));
        }

        if self.config.skip_filled_paths && has_visible_fill(stroke.fill()) {
            return Ok(Err(StrokeSkip::Filled));
        }

        let length = stroke.total_length()?;
        if !length.is_finite() || length <= self.config.min_stroke_length {
            return Ok(Err(StrokeSkip::Degenerate));
        }

        let start = stroke.point_at_fraction(0.0)?;
        let end = stroke.point_at_fraction(1.0)?;

        let noise = self.config.noise_distance;
        let (a, b) = match (
            nearest_candidate(&start, candidates, noise),
            nearest_candidate(&end, candidates, noise),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(Err(StrokeSkip::Unresolved)),
        };

        if a == b {
            return Ok(Err(StrokeSkip::SelfLoop));
        }

        if !seen_pairs.insert((a.min(b), a.max(b))) {
            return Ok(Err(StrokeSkip::DuplicatePair));
        }

        match (candidate_by_id(candidates, a), candidate_by_id(candidates, b)) {
            (Some(a), Some(b)) => Ok(Ok(orient_pair(a, b))),
            _ => Ok(Err(StrokeSkip::Unresolved)),
        }
    }
}

fn candidate_by_id(candidates: &[NodeCandidate], id: usize) -> Option<&NodeCandidate> {
    candidates.iter().find(|c| c.id == id)
}
