//! Reconstructed tree structure.
//!
//! This module owns the output side of reconstruction:
//! - [`ResultTree`]: the `{name, children}` hierarchy handed to renderers
//! - [`TreeAssembler`]: root selection and ordered, cycle-guarded assembly

pub mod builder;
pub mod tree;

pub use builder::TreeAssembler;
pub use tree::ResultTree;
