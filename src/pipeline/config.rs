//! Unified configuration for the reconstruction pipeline.
//!
//! Every threshold the four stages use lives here, grouped per stage. The
//! defaults are the tuned values; a JSON file only needs to name the fields
//! it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds for the candidate collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Elements below this opacity count as invisible
    pub min_opacity: f32,
    /// Icon glyph filter: rendered height below this...
    pub min_glyph_height: f32,
    /// ...and font size below this marks an icon glyph
    pub min_font_size: f32,
    /// Texts with this many characters or more are body text, not labels
    pub max_text_chars: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            min_opacity: 0.1,
            min_glyph_height: 10.0,
            min_font_size: 10.0,
            max_text_chars: 300,
        }
    }
}

/// Thresholds for stroke-based edge inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInferenceConfig {
    /// Strokes whose bbox is below this in both dimensions are icons
    pub min_stroke_extent: f32,
    /// Strokes this long or shorter carry no direction
    pub min_stroke_length: f32,
    /// Endpoints this far or farther from every candidate resolve to nothing
    pub noise_distance: f32,
    /// Drop strokes that paint a visible fill (shapes rather than connectors)
    pub skip_filled_paths: bool,
}

impl Default for EdgeInferenceConfig {
    fn default() -> Self {
        Self {
            min_stroke_extent: 10.0,
            min_stroke_length: 5.0,
            noise_distance: 100.0,
            skip_filled_paths: false,
        }
    }
}

/// Weights for the spatial fallback linker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Disable to keep only stroke-inferred edges
    pub enabled: bool,
    /// Extra penalty per pixel of vertical offset
    pub vertical_weight: f32,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            vertical_weight: 0.5,
        }
    }
}

/// Limits for tree assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Deeper nodes are cut off
    pub max_depth: usize,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Complete reconstruction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Candidate collection settings
    pub collector: CollectorConfig,
    /// Edge inference settings
    pub edges: EdgeInferenceConfig,
    /// Fallback linking settings
    pub fallback: FallbackConfig,
    /// Tree assembly settings
    pub assembly: AssemblyConfig,
}

impl ReconstructionConfig {
    /// Create configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint noise distance.
    pub fn with_noise_distance(mut self, distance: f32) -> Self {
        self.edges.noise_distance = distance;
        self
    }

    /// Enable or disable skipping of filled paths.
    pub fn with_skip_filled_paths(mut self, enable: bool) -> Self {
        self.edges.skip_filled_paths = enable;
        self
    }

    /// Enable or disable fallback linking.
    pub fn with_fallback(mut self, enable: bool) -> Self {
        self.fallback.enabled = enable;
        self
    }

    /// Set the vertical penalty weight used by fallback linking.
    pub fn with_vertical_weight(mut self, weight: f32) -> Self {
        self.fallback.vertical_weight = weight;
        self
    }

    /// Set the maximum tree depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.assembly.max_depth = depth;
        self
    }

    /// Parse configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Reject thresholds that would make the stages misbehave.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("collector.min_opacity", self.collector.min_opacity),
            ("collector.min_glyph_height", self.collector.min_glyph_height),
            ("collector.min_font_size", self.collector.min_font_size),
            ("edges.min_stroke_extent", self.edges.min_stroke_extent),
            ("edges.min_stroke_length", self.edges.min_stroke_length),
            ("fallback.vertical_weight", self.fallback.vertical_weight),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !self.edges.noise_distance.is_finite() || self.edges.noise_distance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "edges.noise_distance must be positive, got {}",
                self.edges.noise_distance
            )));
        }
        if self.collector.max_text_chars == 0 {
            return Err(Error::InvalidConfig(
                "collector.max_text_chars must be at least 1".to_string(),
            ));
        }
        if self.assembly.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "assembly.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconstructionConfig::default();
        assert_eq!(config.collector.min_opacity, 0.1);
        assert_eq!(config.collector.max_text_chars, 300);
        assert_eq!(config.edges.noise_distance, 100.0);
        assert_eq!(config.edges.min_stroke_length, 5.0);
        assert_eq!(config.fallback.vertical_weight, 0.5);
        assert!(config.fallback.enabled);
        assert!(!config.edges.skip_filled_paths);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ReconstructionConfig::new()
            .with_noise_distance(50.0)
            .with_fallback(false)
            .with_vertical_weight(1.0)
            .with_skip_filled_paths(true)
            .with_max_depth(8);
        assert_eq!(config.edges.noise_distance, 50.0);
        assert!(!config.fallback.enabled);
        assert_eq!(config.fallback.vertical_weight, 1.0);
        assert!(config.edges.skip_filled_paths);
        assert_eq!(config.assembly.max_depth, 8);
    }

    #[test]
    fn test_partial_json() {
        let config =
            ReconstructionConfig::from_json(r#"{"edges": {"noise_distance": 42.0}}"#).unwrap();
        assert_eq!(config.edges.noise_distance, 42.0);
        assert_eq!(config.edges.min_stroke_length, 5.0);
        assert_eq!(config.collector, CollectorConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ReconstructionConfig::new().with_noise_distance(0.0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = ReconstructionConfig::new().with_vertical_weight(f32::NAN);
        assert!(config.validate().is_err());

        let config = ReconstructionConfig::new().with_max_depth(0);
        assert!(config.validate().is_err());

        let negative = r#"{"fallback": {"vertical_weight": -1}}"#;
        assert!(ReconstructionConfig::from_json(negative).is_err());
    }
}
