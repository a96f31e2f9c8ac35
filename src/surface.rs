//! Surface snapshots.
//!
//! A [`Surface`] is an immutable capture of everything reconstruction needs
//! from the host: vector text, node containers and strokes. The host is
//! responsible for taking a consistent snapshot; reconstruction assumes the
//! surface does not change while a pass runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::{NodeContainer, StrokePath, TextElement};
use crate::error::Result;

/// A captured diagram surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Surface {
    /// Vector-text elements, in document order
    pub text_elements: Vec<TextElement>,
    /// Generic diagram-node containers, in document order
    pub node_containers: Vec<NodeContainer>,
    /// Stroke paths, in document order
    pub strokes: Vec<StrokePath>,
}

impl Surface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a surface snapshot from JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::surface::Surface;
    ///
    /// let surface = Surface::from_json(r#"{
    ///     "textElements": [
    ///         {"text": "Root", "bbox": {"left": 0, "top": 0, "width": 40, "height": 20}}
    ///     ]
    /// }"#).unwrap();
    /// assert_eq!(surface.text_elements.len(), 1);
    /// assert!(surface.strokes.is_empty());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a surface snapshot from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Add a vector-text element.
    pub fn push_text(&mut self, element: TextElement) -> &mut Self {
        self.text_elements.push(element);
        self
    }

    /// Add a node container.
    pub fn push_container(&mut self, container: NodeContainer) -> &mut Self {
        self.node_containers.push(container);
        self
    }

    /// Add a stroke.
    pub fn push_stroke(&mut self, stroke: StrokePath) -> &mut Self {
        self.strokes.push(stroke);
        self
    }

    /// True when the surface holds no text at all.
    pub fn is_blank(&self) -> bool {
        self.text_elements.is_empty()
            && self.node_containers.iter().all(|c| c.descendants.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_builder_methods() {
        let mut surface = Surface::new();
        assert!(surface.is_blank());

        surface
            .push_text(TextElement::new("A", Rect::new(0.0, 0.0, 10.0, 10.0)))
            .push_stroke(StrokePath::line(0.0, 0.0, 20.0, 0.0));

        assert!(!surface.is_blank());
        assert_eq!(surface.strokes.len(), 1);
    }

    #[test]
    fn test_empty_container_is_blank() {
        let mut surface = Surface::new();
        surface.push_container(NodeContainer::default());
        assert!(surface.is_blank());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Surface::from_json("not json").is_err());
    }
}
