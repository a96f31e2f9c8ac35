//! Parent/child bookkeeping shared by the two linking stages.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

/// An inferred parent→child relation between two candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectedEdge {
    /// Parent candidate id
    pub source: usize,
    /// Child candidate id
    pub target: usize,
}

/// Candidate id → children ids, in the order the edges were added.
pub type AdjacencyMap = IndexMap<usize, IndexSet<usize>>;

/// Edges plus the two indexes built from them.
///
/// Edge inference creates a `Linkage`, the fallback linker extends it, and
/// tree assembly only reads it. Adding is the only mutation; nothing is
/// ever removed or reassigned.
#[derive(Debug, Clone, Default)]
pub struct Linkage {
    edges: Vec<DirectedEdge>,
    adjacency: AdjacencyMap,
    has_parent: HashSet<usize>,
}

impl Linkage {
    /// Create an empty linkage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source → target`.
    ///
    /// Returns `false` (and records nothing) for a self-loop or an edge that
    /// is already present.
    pub fn add_edge(&mut self, source: usize, target: usize) -> bool {
        if source == target {
            return false;
        }
        if !self.adjacency.entry(source).or_default().insert(target) {
            return false;
        }
        self.edges.push(DirectedEdge { source, target });
        self.has_parent.insert(target);
        true
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    /// The adjacency map.
    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    /// Children of `id` in insertion order, if it has any.
    pub fn children(&self, id: usize) -> Option<&IndexSet<usize>> {
        self.adjacency.get(&id)
    }

    /// Whether `id` is the target of at least one edge.
    pub fn has_parent(&self, id: usize) -> bool {
        self.has_parent.contains(&id)
    }

    /// Number of candidates with at least one parent.
    pub fn parented_count(&self) -> usize {
        self.has_parent.len()
    }
}
