//! Outline converters for reconstructed trees.
//!
//! - [`OutlineConverter`]: nested markdown bullet list
//! - [`JsonConverter`]: the `{name, children}` JSON shape renderers consume

use crate::converters::TreeConverter;
use crate::error::Result;
use crate::structure::ResultTree;

/// Converter for a tree to a nested markdown list.
///
/// # Examples
///
/// ```
/// use diagram_oxide::converters::{OutlineConverter, TreeConverter};
/// use diagram_oxide::structure::ResultTree;
///
/// let tree = ResultTree::new("Plan", vec![
///     ResultTree::new("Design", vec![ResultTree::leaf("Sketch")]),
///     ResultTree::leaf("Build"),
/// ]);
///
/// let outline = OutlineConverter::new().convert(&tree).unwrap();
/// assert_eq!(outline, "- Plan\n  - Design\n    - Sketch\n  - Build\n");
/// ```
#[derive(Debug, Clone)]
pub struct OutlineConverter {
    indent_width: usize,
    bullet: char,
}

impl Default for OutlineConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineConverter {
    /// Create a converter with two-space indentation and `-` bullets.
    pub fn new() -> Self {
        Self {
            indent_width: 2,
            bullet: '-',
        }
    }

    /// Set the number of spaces per nesting level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the bullet character (`-`, `*` or `+` for markdown).
    pub fn with_bullet(mut self, bullet: char) -> Self {
        self.bullet = bullet;
        self
    }

    fn write_node(&self, node: &ResultTree, level: usize, out: &mut String) {
        out.push_str(&" ".repeat(level * self.indent_width));
        out.push(self.bullet);
        out.push(' ');
        // Labels may span lines in the source diagram
        out.push_str(&node.name.split_whitespace().collect::<Vec<_>>().join(" "));
        out.push('\n');
        for child in &node.children {
            self.write_node(child, level + 1, out);
        }
    }
}

impl TreeConverter for OutlineConverter {
    fn convert(&self, tree: &ResultTree) -> Result<String> {
        let mut out = String::new();
        self.write_node(tree, 0, &mut out);
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "outline"
    }
}

/// Converter for a tree to JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonConverter {
    pretty: bool,
}

impl JsonConverter {
    /// Create a compact JSON converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit indented JSON.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl TreeConverter for JsonConverter {
    fn convert(&self, tree: &ResultTree) -> Result<String> {
        if self.pretty {
            tree.to_json_pretty()
        } else {
            tree.to_json()
        }
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
