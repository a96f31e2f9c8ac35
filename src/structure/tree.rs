//! The reconstructed tree.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A node of the reconstructed hierarchy.
///
/// Every child is owned by exactly one parent, so a `ResultTree` can never
/// contain a cycle or a shared sub-node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTree {
    /// Node label
    pub name: String,
    /// Children, top to bottom
    #[serde(default)]
    pub children: Vec<ResultTree>,
}

impl ResultTree {
    /// Create a childless node.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn new(name: impl Into<String>, children: Vec<ResultTree>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Total number of nodes, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ResultTree::node_count).sum::<usize>()
    }

    /// Number of levels; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ResultTree::depth).max().unwrap_or(0)
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Node names in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::structure::ResultTree;
    ///
    /// let tree = ResultTree::new("a", vec![
    ///     ResultTree::new("b", vec![ResultTree::leaf("c")]),
    ///     ResultTree::leaf("d"),
    /// ]);
    /// assert_eq!(tree.names(), vec!["a", "b", "c", "d"]);
    /// ```
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.node_count());
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.name);
        for child in &self.children {
            child.collect_names(out);
        }
    }

    /// Find the first node (pre-order) with the given name.
    pub fn find(&self, name: &str) -> Option<&ResultTree> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Serialize as `{"name": ..., "children": [...]}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
