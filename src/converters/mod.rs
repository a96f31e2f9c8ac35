//! Format converters for reconstructed trees.
//!
//! This module renders a [`ResultTree`] for consumers outside the library:
//! - **Outline**: nested markdown bullet list
//! - **JSON**: the `{name, children}` shape diagram renderers read
//!
//! # Examples
//!
//! ```
//! use diagram_oxide::converters::{JsonConverter, OutlineConverter, TreeConverter};
//! use diagram_oxide::structure::ResultTree;
//!
//! let tree = ResultTree::new("Root", vec![ResultTree::leaf("Leaf")]);
//!
//! let converters: Vec<Box<dyn TreeConverter>> =
//!     vec![Box::new(OutlineConverter::new()), Box::new(JsonConverter::new())];
//! for converter in &converters {
//!     let rendered = converter.convert(&tree).unwrap();
//!     assert!(rendered.contains("Leaf"), "{} output", converter.name());
//! }
//! ```

pub mod outline;

pub use outline::{JsonConverter, OutlineConverter};

use crate::error::Result;
use crate::structure::ResultTree;

/// Trait for rendering a tree to text.
pub trait TreeConverter: Send + Sync {
    /// Render the tree.
    fn convert(&self, tree: &ResultTree) -> Result<String>;

    /// Return the name of this converter for debugging.
    fn name(&self) -> &'static str;
}
