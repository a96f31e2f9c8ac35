//! Error types for the diagram reconstruction library.
//!
//! Reconstruction itself never surfaces an error to the caller: per-stroke
//! faults are absorbed where they happen. Errors only escape from the
//! boundaries that touch the outside world (loading a surface snapshot or a
//! configuration file) and from the low-level stroke geometry trait.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading input or sampling geometry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stroke geometry could not be measured or sampled
    #[error("Geometry fault: {0}")]
    GeometryFault(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding/encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
