//! Surface elements: the raw material reconstruction works from.
//!
//! A captured diagram surface is made of two kinds of things:
//!
//! - text-bearing elements ([`TextElement`]), either standalone vector text
//!   or nested inside a diagram-node group ([`NodeContainer`]);
//! - vector strokes ([`StrokePath`]) that may or may not be connectors.
//!
//! Neither carries any graph semantics. Edge inference only ever talks to
//! strokes through the [`StrokeGeometry`] trait.

mod path;
mod text;

pub use path::{has_visible_fill, PathOperation, StrokeGeometry, StrokePath};
pub use text::{ComputedStyle, NodeContainer, TextElement, Visibility};
