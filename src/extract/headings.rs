//! Heading extraction: primary-heading location with level fallback, and
//! per-level collection inside the chosen container.

use tracing::debug;

use crate::config::{ExtractOptions, HeadingLevel};
use crate::tree::{collapse_ws, MarkupTree, NodeId};
use crate::visibility::is_visible;

/// Sub-label classes stripped out of heading text unless `include_subtext`.
const SUBTEXT_CLASSES: &[&str] = &[
    "subtext",
    "subtitle",
    "sub-label",
    "small",
    "caption",
    "eyebrow",
];

/// First visible heading in document order, trying the preferred level
/// first and then the remaining levels in fixed h1 → h2 → h3 order.
/// `None` means the document has no usable heading at all.
pub fn find_primary(tree: &MarkupTree, opts: &ExtractOptions) -> Option<NodeId> {
    let preferred = opts.preferred_heading_level;
    let order = std::iter::once(preferred)
        .chain(HeadingLevel::ORDER.into_iter().filter(move |l| *l != preferred));
    for level in order {
        let hit = std::iter::once(tree.root())
            .chain(tree.descendants(tree.root()))
            .find(|&id| tree.tag(id) == level.tag() && is_visible(tree, id));
        if let Some(id) = hit {
            debug!(level = level.tag(), "primary heading located");
            return Some(id);
        }
    }
    None
}

/// Visible headings of `level` inside `container`, subtext-stripped and
/// length-filtered, capped at `max_headings`. `exclude` drops the already
/// chosen primary heading so it is never reported twice.
pub fn extract_level(
    tree: &MarkupTree,
    container: NodeId,
    level: HeadingLevel,
    exclude: Option<NodeId>,
    opts: &ExtractOptions,
) -> Vec<String> {
    let mut out = Vec::new();
    for id in tree.descendants(container) {
        if out.len() >= opts.max_headings {
            break;
        }
        if tree.tag(id) != level.tag() || Some(id) == exclude || !is_visible(tree, id) {
            continue;
        }
        let text = heading_text(tree, id, opts.include_subtext);
        if text.chars().count() >= opts.min_heading_length {
            out.push(text);
        }
    }
    out
}

/// Measured text of a heading. With `include_subtext` off, descendants
/// carrying a sub-label class are left out of the measurement.
pub fn heading_text(tree: &MarkupTree, id: NodeId, include_subtext: bool) -> String {
    if include_subtext {
        return tree.text_content(id);
    }
    let mut parts = Vec::new();
    collect_without_subtext(tree, id, &mut parts);
    collapse_ws(&parts.join(" "))
}

fn collect_without_subtext(tree: &MarkupTree, id: NodeId, out: &mut Vec<String>) {
    let own = tree.own_text(id).trim();
    if !own.is_empty() {
        out.push(own.to_string());
    }
    for &child in tree.children(id) {
        if !is_subtext(tree, child) {
            collect_without_subtext(tree, child, out);
        }
    }
}

fn is_subtext(tree: &MarkupTree, id: NodeId) -> bool {
    tree.classes(id).any(|c| {
        let c = c.to_lowercase();
        SUBTEXT_CLASSES.iter().any(|kw| c.contains(kw))
    })
}
