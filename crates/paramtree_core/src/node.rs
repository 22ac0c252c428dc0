//! The parameter tree.

use crate::value::ParamValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Separator of the colon-path addressing used by older flat parameter
/// files. The typed tree nests structurally, so a name containing it is only
/// worth a warning.
pub const LEGACY_PATH_SEPARATOR: char = ':';

/// Either a leaf value or an ordered list of child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    /// Leaf holding a single typed value
    Leaf(ParamValue),
    /// Interior node
    Children(Vec<Node>),
}

/// A named, described and tagged unit of the parameter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Name, unique among siblings by convention
    pub name: String,
    /// Human readable description, may span several lines
    #[serde(default)]
    pub description: String,
    /// Free-form tags; membership drives export policy
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// Payload
    pub value: NodeValue,
}

impl Node {
    /// Create a leaf node
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        Self::build(name.into(), description.into(), NodeValue::Leaf(value.into()))
    }

    /// Create an interior node
    #[must_use]
    pub fn group(
        name: impl Into<String>,
        description: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        Self::build(name.into(), description.into(), NodeValue::Children(children))
    }

    fn build(name: String, description: String, value: NodeValue) -> Self {
        Self {
            name,
            description,
            tags: BTreeSet::new(),
            value,
        }
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add several tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether the node carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether the node holds a value rather than children
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.value, NodeValue::Leaf(_))
    }

    /// The leaf value, if any
    #[must_use]
    pub fn leaf(&self) -> Option<&ParamValue> {
        match &self.value {
            NodeValue::Leaf(v) => Some(v),
            NodeValue::Children(_) => None,
        }
    }

    /// The children, empty for leaves
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match &self.value {
            NodeValue::Leaf(_) => &[],
            NodeValue::Children(c) => c,
        }
    }

    /// Depth-first pre-order iterator over this node and its descendants
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order traversal, see [`Node::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Walk<'a> {
    pub(crate) fn over(nodes: &'a [Node]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::group(
            "algo",
            "Algorithm section",
            vec![
                Node::new("kmer", "k-mer size", ParamValue::int_in(20, 1, 32)),
                Node::group(
                    "filter",
                    "",
                    vec![Node::new("min_len", "", 10_i64)],
                ),
                Node::new("verbose", "", false),
            ],
        )
    }

    #[test]
    fn test_tags() {
        let node = Node::new("in", "input", "")
            .with_tag("required")
            .with_tags(["file", "input"]);
        assert!(node.has_tag("required"));
        assert!(node.has_tag("file"));
        assert!(!node.has_tag("advanced"));
        assert_eq!(node.tags.len(), 3);
    }

    #[test]
    fn test_leaf_and_children() {
        let node = sample();
        assert!(!node.is_leaf());
        assert!(node.leaf().is_none());
        assert_eq!(node.children().len(), 3);
        assert!(node.children()[0].is_leaf());
        assert!(node.children()[0].children().is_empty());
    }

    #[test]
    fn test_walk_preorder() {
        let node = sample();
        let names: Vec<&str> = node.walk().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["algo", "kmer", "filter", "min_len", "verbose"]);
    }

    #[test]
    fn test_serde_children_vs_leaf() {
        let node = sample();
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);

        let leaf: Node =
            serde_json::from_str(r#"{"name":"x","value":{"bool":true}}"#).unwrap();
        assert_eq!(leaf.leaf(), Some(&ParamValue::Bool(true)));
        assert!(leaf.description.is_empty());

        let group: Node = serde_json::from_str(r#"{"name":"g","value":[]}"#).unwrap();
        assert_eq!(group.value, NodeValue::Children(Vec::new()));
    }
}
