//! Text element types.
//!
//! This module provides the `TextElement` type and the computed style
//! attributes that decide whether a fragment is actually visible.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// A text-bearing leaf element as reported by the host surface.
///
/// `text` is the raw text content; trimming happens during classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// The text string
    pub text: String,
    /// Bounding box in screen space
    #[serde(alias = "boundingBox")]
    pub bbox: Rect,
    /// Computed style at the time the surface was captured
    #[serde(default)]
    pub style: ComputedStyle,
}

impl TextElement {
    /// Create a new text element with default (fully visible) style.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::elements::TextElement;
    /// use diagram_oxide::geometry::Rect;
    ///
    /// let label = TextElement::new("Root topic", Rect::new(0.0, 0.0, 80.0, 20.0));
    /// assert!(label.style.is_rendered());
    /// ```
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
            style: ComputedStyle::default(),
        }
    }

    /// Replace the computed style.
    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the computed font size in pixels.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.style.font_size = font_size;
        self
    }

    /// Set the computed opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.style.opacity = opacity;
        self
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// CSS `visibility` values relevant to rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Element is painted
    #[default]
    Visible,
    /// Element occupies space but is not painted
    Hidden,
    /// Table-row style collapse; treated like hidden
    Collapse,
}

/// The subset of computed style that decides visibility and glyph size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComputedStyle {
    /// Computed `visibility`
    pub visibility: Visibility,
    /// Computed `display` keyword (e.g. `inline`, `block`, `none`)
    pub display: String,
    /// Computed `opacity`, 0.0 to 1.0
    pub opacity: f32,
    /// Computed `font-size` in pixels
    pub font_size: f32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Visible,
            display: "inline".to_string(),
            opacity: 1.0,
            font_size: 16.0,
        }
    }
}

impl ComputedStyle {
    /// A style with `visibility: hidden`.
    pub fn hidden() -> Self {
        Self {
            visibility: Visibility::Hidden,
            ..Self::default()
        }
    }

    /// A style with `display: none`.
    pub fn display_none() -> Self {
        Self {
            display: "none".to_string(),
            ..Self::default()
        }
    }

    /// Whether the element is painted at all (ignores opacity).
    pub fn is_rendered(&self) -> bool {
        self.visibility == Visibility::Visible && !self.display.trim().eq_ignore_ascii_case("none")
    }
}

/// A generic diagram-node container.
///
/// Diagram renderers often nest the visible label several levels deep inside
/// a node group, sometimes with more than one text layer. The container lists
/// its text-bearing descendants in document order; at most one of them
/// becomes a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeContainer {
    /// Text-bearing descendants in document order
    pub descendants: Vec<TextElement>,
}

impl NodeContainer {
    /// Create a container from its descendants.
    pub fn new(descendants: Vec<TextElement>) -> Self {
        Self { descendants }
    }
}
