//! Graph inference from surface content.
//!
//! The three inference stages run in a fixed order, each handing its output
//! to the next:
//!
//! ```text
//! Surface
//!     ↓
//! [CandidateCollector] (text elements → NodeCandidate[])
//!     ↓
//! [EdgeInference] (strokes → Linkage)
//!     ↓
//! [FallbackLinker] (orphans → extra edges in Linkage)
//!     ↓
//! structure::TreeAssembler
//! ```

pub mod candidates;
pub mod edges;
pub mod fallback;
pub mod linkage;

pub use candidates::{
    classify_text_element, is_noise_text, sort_by_center_x, CandidateCollector, Classification,
    NodeCandidate,
};
pub use edges::{nearest_candidate, orient_pair, EdgeInference, StrokeSkip};
pub use fallback::{link_cost, FallbackLinker};
pub use linkage::{AdjacencyMap, DirectedEdge, Linkage};
