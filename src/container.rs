//! Hero-container location: bounded ancestor ascent from the primary
//! heading, semantic keyword matches winning outright, structural scoring
//! as the fallback, and a parent fallback when nothing qualifies.

use tracing::debug;

use crate::config::ExtractOptions;
use crate::extract::{buttons, content, images};
use crate::tree::{MarkupTree, NodeId};

/// Keywords that mark a container as the hero section by naming alone.
/// Checked against class list, id, `data-section`, and `role`.
pub const SEMANTIC_KEYWORDS: &[&str] = &[
    "hero",
    "jumbotron",
    "banner",
    "header-content",
    "page-header",
    "intro",
    "landing",
    "above-fold",
    "masthead",
    "showcase",
    "feature",
    "splash",
];

/// Ascent never crosses these; they are whole-document wrappers.
const BOUNDARY_TAGS: &[&str] = &["body", "html"];

/// A structural score at or above this qualifies an ancestor (heading alone
/// contributes 2, so at least one more signal is required).
const QUALIFYING_SCORE: f64 = 3.0;

/// The ancestor chosen to bound element extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateContainer {
    pub node: NodeId,
    /// Ancestor distance from the heading (1 = immediate parent).
    pub depth: usize,
    pub score: f64,
    pub matched_keyword: Option<&'static str>,
}

/// Per-node structural signals, computed in one bottom-up arena pass so the
/// ancestor ascent never rescans a subtree.
pub struct StructuralIndex {
    descendant_count: Vec<usize>,
    has_heading: Vec<bool>,
    has_button: Vec<bool>,
    has_paragraph: Vec<bool>,
    has_image: Vec<bool>,
}

impl StructuralIndex {
    pub fn build(tree: &MarkupTree) -> StructuralIndex {
        let n = tree.len();
        let mut idx = StructuralIndex {
            descendant_count: vec![0; n],
            has_heading: vec![false; n],
            has_button: vec![false; n],
            has_paragraph: vec![false; n],
            has_image: vec![false; n],
        };
        // Children always sit after their parent in the arena, so a reverse
        // walk sees every child before its parent.
        for i in (0..n).rev() {
            let id = NodeId(i);
            let tag = tree.tag(id);
            let mut own_heading = tag == "h1" || tag == "h2";
            let mut own_button = buttons::is_button_like(tree, id);
            let mut own_paragraph = content::is_description_like(tree, id);
            let mut own_image = tag == "img"
                && tree.attr(id, "src").is_some_and(|s| !s.trim().is_empty())
                && !images::is_icon(tree, id);
            let mut count = 0;
            for &child in tree.children(id) {
                count += 1 + idx.descendant_count[child.0];
                own_heading |= idx.has_heading[child.0];
                own_button |= idx.has_button[child.0];
                own_paragraph |= idx.has_paragraph[child.0];
                own_image |= idx.has_image[child.0];
            }
            idx.descendant_count[i] = count;
            idx.has_heading[i] = own_heading;
            idx.has_button[i] = own_button;
            idx.has_paragraph[i] = own_paragraph;
            idx.has_image[i] = own_image;
        }
        idx
    }

    pub fn descendant_count(&self, id: NodeId) -> usize {
        self.descendant_count[id.0]
    }
}

/// Locate the hero container around `heading`.
///
/// Semantic matches return immediately (closest ancestor wins); otherwise the
/// first ancestor whose structural score reaches the qualifying threshold is
/// taken. Hitting a document boundary or exhausting `max_depth` falls back to
/// the heading's immediate parent, never the boundary node.
pub fn locate(
    tree: &MarkupTree,
    index: &StructuralIndex,
    heading: NodeId,
    opts: &ExtractOptions,
) -> CandidateContainer {
    // A heading hanging directly under a boundary node has no non-boundary
    // parent; that parent is still the fallback of last resort.
    let fallback = tree.parent(heading).unwrap_or(heading);

    let mut depth = 0;
    for ancestor in tree.ancestors(heading) {
        if depth >= opts.max_depth || BOUNDARY_TAGS.contains(&tree.tag(ancestor)) {
            break;
        }
        depth += 1;

        if let Some(keyword) = semantic_match(tree, ancestor) {
            debug!(depth, keyword, "container: semantic match");
            return CandidateContainer {
                node: ancestor,
                depth,
                score: structural_score(index, ancestor),
                matched_keyword: Some(keyword),
            };
        }

        let score = structural_score(index, ancestor);
        debug!(depth, score, tag = tree.tag(ancestor), "container: scored ancestor");
        if score >= QUALIFYING_SCORE {
            return CandidateContainer {
                node: ancestor,
                depth,
                score,
                matched_keyword: None,
            };
        }
    }

    debug!("container: no qualifying ancestor, falling back to heading parent");
    CandidateContainer {
        node: fallback,
        depth: usize::from(fallback != heading),
        score: structural_score(index, fallback),
        matched_keyword: None,
    }
}

fn semantic_match(tree: &MarkupTree, id: NodeId) -> Option<&'static str> {
    let mut haystack = tree.classes(id).collect::<Vec<_>>().join(" ");
    for attr in ["id", "data-section", "role"] {
        if let Some(v) = tree.attr(id, attr) {
            haystack.push(' ');
            haystack.push_str(v);
        }
    }
    let haystack = haystack.to_lowercase();
    SEMANTIC_KEYWORDS
        .iter()
        .find(|kw| haystack.contains(**kw))
        .copied()
}

fn structural_score(index: &StructuralIndex, id: NodeId) -> f64 {
    let mut score = 0.0;
    if index.has_heading[id.0] {
        score += 2.0;
    }
    if index.has_button[id.0] {
        score += 1.0;
    }
    if index.has_paragraph[id.0] {
        score += 1.0;
    }
    if index.has_image[id.0] {
        score += 0.5;
    }
    // Size penalty keeps whole-page wrappers from qualifying just because
    // the signals exist somewhere far below.
    let descendants = index.descendant_count[id.0];
    if descendants > 100 {
        score -= 2.0;
    }
    if descendants > 200 {
        score -= 1.0;
    }
    score
}
