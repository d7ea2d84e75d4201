use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index of a node inside its [`MarkupTree`] arena. Ids are assigned in
/// document (preorder) position, so ordering two ids orders the nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed markup tree. Parent links are plain indices into the arena,
/// so upward traversal carries no ownership and cannot form a cycle.
///
/// Nodes are stored in preorder: every child id is greater than its parent's.
/// Bottom-up passes can therefore just walk the arena in reverse.
#[derive(Debug, Clone)]
pub struct MarkupTree {
    nodes: Vec<NodeData>,
}

impl MarkupTree {
    /// Build a tree from its nested interchange form.
    pub fn from_spec(spec: &NodeSpec) -> MarkupTree {
        let mut tree = MarkupTree { nodes: Vec::new() };
        tree.push_spec(spec, None);
        tree
    }

    fn push_spec(&mut self, spec: &NodeSpec, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: spec.tag.to_lowercase(),
            attrs: spec.attrs.clone(),
            text: spec.text.clone(),
            parent,
            children: Vec::with_capacity(spec.children.len()),
        });
        for child in &spec.children {
            let child_id = self.push_spec(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn id_attr(&self, id: NodeId) -> Option<&str> {
        self.attr(id, "id")
    }

    /// Class tokens of the node, split on whitespace. Empty when absent.
    pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> {
        self.attr(id, "class").unwrap_or("").split_whitespace()
    }

    /// Text held directly on this node, not including descendants.
    pub fn own_text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    /// Concatenated text of the node and its whole subtree, whitespace
    /// collapsed to single spaces.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, &mut parts);
        collapse_ws(&parts.join(" "))
    }

    fn collect_text(&self, id: NodeId, out: &mut Vec<String>) {
        let own = self.own_text(id).trim();
        if !own.is_empty() {
            out.push(own.to_string());
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Ancestors of `id`, nearest first, root last. Bounded by construction.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            cur: self.parent(id),
        }
    }

    /// Preorder walk of the subtree below `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }
}

pub struct Ancestors<'a> {
    tree: &'a MarkupTree,
    cur: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cur?;
        self.cur = self.tree.parent(id);
        Some(id)
    }
}

pub struct Descendants<'a> {
    tree: &'a MarkupTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// Nested interchange form of a markup node. This is the contract with the
/// injected HTML parser: anything that can emit this shape (or its JSON
/// encoding) can feed the pipeline. Also doubles as a builder for tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> NodeSpec {
        NodeSpec {
            tag: tag.to_string(),
            ..NodeSpec::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> NodeSpec {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn class(self, value: &str) -> NodeSpec {
        self.attr("class", value)
    }

    pub fn id(self, value: &str) -> NodeSpec {
        self.attr("id", value)
    }

    pub fn text(mut self, value: &str) -> NodeSpec {
        self.text = value.to_string();
        self
    }

    pub fn child(mut self, child: NodeSpec) -> NodeSpec {
        self.children.push(child);
        self
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub(crate) fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MarkupTree {
        MarkupTree::from_spec(
            &NodeSpec::new("div").class("outer").child(
                NodeSpec::new("section").id("hero").child(
                    NodeSpec::new("h1").text("  Fix your   watch  "),
                ),
            ),
        )
    }

    #[test]
    fn preorder_ids() {
        let tree = sample();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.tag(NodeId(0)), "div");
        assert_eq!(tree.tag(NodeId(1)), "section");
        assert_eq!(tree.tag(NodeId(2)), "h1");
        assert!(NodeId(1) > NodeId(0));
    }

    #[test]
    fn ancestors_nearest_first() {
        let tree = sample();
        let chain: Vec<_> = tree.ancestors(NodeId(2)).collect();
        assert_eq!(chain, vec![NodeId(1), NodeId(0)]);
        assert!(tree.is_ancestor_of(NodeId(0), NodeId(2)));
        assert!(!tree.is_ancestor_of(NodeId(2), NodeId(0)));
    }

    #[test]
    fn descendants_exclude_self() {
        let tree = sample();
        let ids: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn text_content_collapses_whitespace() {
        let tree = sample();
        assert_eq!(tree.text_content(tree.root()), "Fix your watch");
    }

    #[test]
    fn tags_lowercased() {
        let tree = MarkupTree::from_spec(&NodeSpec::new("DIV"));
        assert_eq!(tree.tag(tree.root()), "div");
    }

    #[test]
    fn spec_roundtrips_through_json() {
        let spec = NodeSpec::new("a").attr("href", "/x").text("go");
        let json = serde_json::to_string(&spec).unwrap();
        let back: NodeSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn classes_split() {
        let tree = MarkupTree::from_spec(&NodeSpec::new("div").class("hero  big"));
        let classes: Vec<_> = tree.classes(tree.root()).collect();
        assert_eq!(classes, vec!["hero", "big"]);
    }
}
