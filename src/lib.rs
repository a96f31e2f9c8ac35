// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Diagram Oxide
//!
//! Reconstruct a rooted tree from the visual rendering of a diagram.
//!
//! The input is what a rendered page actually offers: text fragments with
//! bounding boxes and vector strokes, with no graph model behind them. The
//! output is a single `{name, children}` tree.
//!
//! ## Pipeline
//!
//! - **Candidate collection**: filter invisible, icon-sized and noise text,
//!   deduplicate overlapping render layers
//! - **Edge inference**: snap stroke endpoints to the nearest candidates,
//!   orient edges left to right
//! - **Fallback linking**: attach unconnected nodes to the nearest node on
//!   their left
//! - **Tree assembly**: leftmost parentless node as root, children top to
//!   bottom, cycle-guarded
//!
//! ## Quick Start
//!
//! ```no_run
//! use diagram_oxide::converters::{OutlineConverter, TreeConverter};
//! use diagram_oxide::pipeline::VisualTreeReconstructor;
//! use diagram_oxide::surface::Surface;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let surface = Surface::from_path("surface.json")?;
//!
//! match VisualTreeReconstructor::new().reconstruct(&surface) {
//!     Some(tree) => println!("{}", OutlineConverter::new().convert(&tree)?),
//!     None => println!("no diagram found"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0
//!   (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Surface model
pub mod elements;
pub mod geometry;
pub mod surface;

// Inference stages
pub mod extractors;
pub mod structure;

// Orchestration
pub mod pipeline;

// Format converters
pub mod converters;

// Re-exports
pub use error::{Error, Result};
pub use pipeline::{ReconstructionConfig, VisualTreeReconstructor};
pub use structure::ResultTree;
pub use surface::Surface;

pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f32::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f32::NAN), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "diagram_oxide");
    }
}
