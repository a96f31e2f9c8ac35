//! Visual tree reconstruction pipeline.
//!
//! ```text
//! Surface
//!     ↓
//! [CandidateCollector] (text elements → NodeCandidate[])
//!     ↓
//! [EdgeInference] (strokes → directed edges)
//!     ↓
//! [FallbackLinker] (orphans → spatial edges)
//!     ↓
//! [TreeAssembler] (root + ordered children)
//!     ↓
//! Option<ResultTree>
//! ```
//!
//! # Key Design Principles
//!
//! 1. **Stateless passes**: every call rebuilds candidates, edges and
//!    indexes from scratch. Candidate ids mean nothing outside one pass.
//!
//! 2. **Narrow failure scope**: a bad stroke is dropped on its own; the only
//!    outcomes a caller sees are "a tree" or "no tree".
//!
//! 3. **Strict stage order**: no stage reads anything produced later.

pub mod config;
pub mod producer;
pub mod stats;

pub use config::{
    AssemblyConfig, CollectorConfig, EdgeInferenceConfig, FallbackConfig, ReconstructionConfig,
};
pub use producer::{ProducerChain, TreeProducer};
pub use stats::ReconstructionStats;

use crate::elements::StrokeGeometry;
use crate::extractors::{sort_by_center_x, CandidateCollector, EdgeInference, FallbackLinker};
use crate::structure::{ResultTree, TreeAssembler};
use crate::surface::Surface;

/// Output of one reconstruction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    /// The tree, or `None` when the surface had no usable text
    pub tree: Option<ResultTree>,
    /// Counters collected along the way
    pub stats: ReconstructionStats,
}

/// Reconstructs a tree from a diagram surface.
///
/// Holds only configuration, so one instance can serve any number of
/// (sequential or concurrent) passes.
///
/// # Examples
///
/// ```
/// use diagram_oxide::elements::{StrokePath, TextElement};
/// use diagram_oxide::geometry::Rect;
/// use diagram_oxide::pipeline::VisualTreeReconstructor;
/// use diagram_oxide::surface::Surface;
///
/// let mut surface = Surface::new();
/// surface
///     .push_text(TextElement::new("Root", Rect::new(0.0, 0.0, 40.0, 20.0)))
///     .push_text(TextElement::new("Child", Rect::new(100.0, 0.0, 40.0, 20.0)))
///     .push_stroke(StrokePath::line(40.0, 10.0, 100.0, 10.0));
///
/// let tree = VisualTreeReconstructor::new().reconstruct(&surface).unwrap();
/// assert_eq!(tree.name, "Root");
/// assert_eq!(tree.children[0].name, "Child");
/// ```
#[derive(Debug, Clone, Default)]
pub struct VisualTreeReconstructor {
    config: ReconstructionConfig,
}

impl VisualTreeReconstructor {
    /// Create a reconstructor with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReconstructionConfig::default())
    }

    /// Create a reconstructor with custom configuration.
    pub fn with_config(config: ReconstructionConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// Reconstruct the tree for a surface.
    pub fn reconstruct(&self, surface: &Surface) -> Option<ResultTree> {
        self.reconstruct_with_stats(surface).tree
    }

    /// Reconstruct the tree for a surface and report what happened.
    pub fn reconstruct_with_stats(&self, surface: &Surface) -> Reconstruction {
        self.run(surface, &surface.strokes)
    }

    /// Reconstruct using the surface's text but externally measured strokes.
    ///
    /// Hosts that sample live elements implement [`StrokeGeometry`] for
    /// their own stroke handles and pass them here instead of converting
    /// them to [`StrokePath`](crate::elements::StrokePath)s first.
    pub fn reconstruct_with_strokes<S: StrokeGeometry>(
        &self,
        surface: &Surface,
        strokes: &[S],
    ) -> Reconstruction {
        self.run(surface, strokes)
    }

    fn run<S: StrokeGeometry>(&self, surface: &Surface, strokes: &[S]) -> Reconstruction {
        let mut stats = ReconstructionStats::new();

        let candidates =
            CandidateCollector::new(&self.config.collector).collect(surface, &mut stats);
        if candidates.is_empty() {
            log::info!("No node candidates found; nothing to reconstruct");
            return Reconstruction { tree: None, stats };
        }

        let mut linkage =
            EdgeInference::new(&self.config.edges).infer(&candidates, strokes, &mut stats);

        let ordered = sort_by_center_x(&candidates);
        FallbackLinker::new(&self.config.fallback).link(&ordered, &mut linkage, &mut stats);

        let tree = TreeAssembler::new(&self.config.assembly).assemble(
            &candidates,
            &ordered,
            &linkage,
            &mut stats,
        );

        log::info!(
            "Reconstructed tree: {} of {} candidates placed, {} stroke edges, {} fallback edges",
            stats.tree_nodes,
            stats.candidates,
            stats.stroke_edges,
            stats.fallback_edges
        );
        Reconstruction { tree, stats }
    }
}

impl TreeProducer for VisualTreeReconstructor {
    fn produce(&self, surface: &Surface) -> Option<ResultTree> {
        self.reconstruct(surface)
    }

    fn name(&self) -> &'static str {
        "visual"
    }
}
