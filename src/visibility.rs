use crate::tree::{MarkupTree, NodeId};

/// Class names that hide an element without inline styles. Covers the common
/// utility frameworks plus screen-reader-only helpers.
const HIDING_CLASSES: &[&str] = &[
    "hidden",
    "hide",
    "d-none",
    "invisible",
    "sr-only",
    "visually-hidden",
];

/// Structural visibility check: `hidden` attribute, inline `display:none` /
/// `visibility:hidden`, or a hiding class. This is a markup proxy, not a
/// layout computation.
pub fn is_visible(tree: &MarkupTree, id: NodeId) -> bool {
    if tree.attr(id, "hidden").is_some() {
        return false;
    }
    if let Some(style) = tree.attr(id, "style") {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if compact.contains("display:none") || compact.contains("visibility:hidden") {
            return false;
        }
    }
    !tree
        .classes(id)
        .any(|c| HIDING_CLASSES.contains(&c.to_lowercase().as_str()))
}
