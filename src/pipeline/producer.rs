//! Tree producers and their priority chain.
//!
//! Visual reconstruction is the last resort. Hosts that can parse an
//! explicit outline (an indented text selection, or a document's heading
//! hierarchy) register those parsers ahead of it; the first producer that
//! returns a tree wins.

use crate::structure::ResultTree;
use crate::surface::Surface;

/// Anything that can turn a surface into a tree.
///
/// Every producer must honour the same output contract: a single rooted
/// tree with no shared sub-nodes, or `None` when it has nothing to offer.
pub trait TreeProducer: Send + Sync {
    /// Produce a tree, or `None` when this producer does not apply.
    fn produce(&self, surface: &Surface) -> Option<ResultTree>;

    /// Return the name of this producer for debugging.
    fn name(&self) -> &'static str;
}

/// Producers tried in priority order.
#[derive(Default)]
pub struct ProducerChain {
    producers: Vec<Box<dyn TreeProducer>>,
}

impl ProducerChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a producer with lower priority than those already present.
    pub fn with_producer(mut self, producer: impl TreeProducer + 'static) -> Self {
        self.producers.push(Box::new(producer));
        self
    }

    /// Number of registered producers.
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Whether no producer is registered.
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Run producers in order and return the first tree.
    pub fn produce(&self, surface: &Surface) -> Option<ResultTree> {
        self.produce_named(surface).map(|(_, tree)| tree)
    }

    /// Like [`produce`](Self::produce), also naming the producer that won.
    pub fn produce_named(&self, surface: &Surface) -> Option<(&'static str, ResultTree)> {
        for producer in &self.producers {
            if let Some(tree) = producer.produce(surface) {
                log::debug!("Tree produced by {}", producer.name());
                return Some((producer.name(), tree));
            }
            log::trace!("{} produced nothing", producer.name());
        }
        None
    }
}

impl std::fmt::Debug for ProducerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.producers.iter().map(|p| p.name()).collect();
        f.debug_struct("ProducerChain").field("producers", &names).finish()
    }
}
