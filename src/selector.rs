//! Minimal node-selector engine for the `content_selector` dimension
//! strategy: tag / `.class` / `#id` simples, compounds, descendant chains,
//! and comma-separated alternatives. Matching returns nodes in document
//! order.

use std::collections::BTreeSet;

use crate::tree::{MarkupTree, NodeId};

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty()
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    // Each alternative is a descendant chain, outermost compound first.
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    /// Parse a selector list. Returns `None` when nothing parseable remains.
    pub fn parse(input: &str) -> Option<Selector> {
        let mut alternatives = Vec::new();
        for alt in input.split(',') {
            let chain: Option<Vec<Compound>> = alt
                .split_whitespace()
                .map(parse_compound)
                .collect();
            match chain {
                Some(chain) if !chain.is_empty() => alternatives.push(chain),
                _ => {}
            }
        }
        if alternatives.is_empty() {
            None
        } else {
            Some(Selector { alternatives })
        }
    }

    /// All matching nodes, in document order, de-duplicated.
    pub fn select(&self, tree: &MarkupTree) -> Vec<NodeId> {
        let mut hits = BTreeSet::new();
        let root = tree.root();
        for id in std::iter::once(root).chain(tree.descendants(root)) {
            if self
                .alternatives
                .iter()
                .any(|chain| chain_matches(tree, id, chain))
            {
                hits.insert(id);
            }
        }
        hits.into_iter().collect()
    }
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;

    let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
    if tag_end > 0 {
        let tag = &rest[..tag_end];
        if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return None;
        }
        compound.tag = Some(tag.to_lowercase());
        rest = &rest[tag_end..];
    }

    while !rest.is_empty() {
        let marker = rest.chars().next().unwrap_or_default();
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() {
            return None;
        }
        match marker {
            '.' => compound.classes.push(name.to_string()),
            '#' => compound.id = Some(name.to_string()),
            _ => return None,
        }
        rest = &body[end..];
    }

    if compound.is_empty() {
        None
    } else {
        Some(compound)
    }
}

fn compound_matches(tree: &MarkupTree, id: NodeId, c: &Compound) -> bool {
    if let Some(tag) = &c.tag {
        if tree.tag(id) != tag {
            return false;
        }
    }
    if let Some(want) = &c.id {
        if tree.id_attr(id) != Some(want.as_str()) {
            return false;
        }
    }
    c.classes
        .iter()
        .all(|want| tree.classes(id).any(|have| have == want))
}

/// The node must match the innermost compound, and each remaining compound
/// must match some strictly higher ancestor, in order.
fn chain_matches(tree: &MarkupTree, id: NodeId, chain: &[Compound]) -> bool {
    let (last, outer) = match chain.split_last() {
        Some(split) => split,
        None => return false,
    };
    if !compound_matches(tree, id, last) {
        return false;
    }
    let mut remaining = outer.iter().rev();
    let mut want = match remaining.next() {
        Some(c) => c,
        None => return true,
    };
    for ancestor in tree.ancestors(id) {
        if compound_matches(tree, ancestor, want) {
            want = match remaining.next() {
                Some(c) => c,
                None => return true,
            };
        }
    }
    false
}
