//! Auxiliary-link extraction: anchors with text that are not already
//! classified as call-to-action buttons.

use crate::config::ExtractOptions;
use crate::extract::{buttons, Link};
use crate::tree::{MarkupTree, NodeId};

/// Extract non-button anchors from the container, in document order.
pub fn extract(tree: &MarkupTree, container: NodeId, opts: &ExtractOptions) -> Vec<Link> {
    let mut out = Vec::new();
    for id in tree.descendants(container) {
        if out.len() >= opts.max_links {
            break;
        }
        if tree.tag(id) != "a" {
            continue;
        }
        if buttons::has_button_class(tree, id) || buttons::has_button_role(tree, id) {
            continue;
        }
        let text = tree.text_content(id);
        if text.is_empty() {
            continue;
        }
        out.push(Link {
            text,
            href: tree.attr(id, "href").unwrap_or("").to_string(),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeSpec;

    fn extract_from(spec: NodeSpec) -> Vec<Link> {
        let tree = MarkupTree::from_spec(&spec);
        extract(&tree, tree.root(), &ExtractOptions::default())
    }

    #[test]
    fn plain_anchors_collected() {
        let out = extract_from(
            NodeSpec::new("div")
                .child(NodeSpec::new("a").attr("href", "/services").text("Our services"))
                .child(NodeSpec::new("a").attr("href", "/pricing").text("Pricing")),
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].href, "/services");
    }

    #[test]
    fn button_anchors_excluded() {
        let out = extract_from(
            NodeSpec::new("div")
                .child(NodeSpec::new("a").class("btn-primary").text("Book now"))
                .child(NodeSpec::new("a").attr("role", "button").text("Call us"))
                .child(NodeSpec::new("a").attr("href", "/faq").text("FAQ")),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "FAQ");
    }

    #[test]
    fn empty_text_excluded() {
        let out = extract_from(NodeSpec::new("div").child(NodeSpec::new("a").attr("href", "/x")));
        assert!(out.is_empty());
    }

    #[test]
    fn cap_respected() {
        let mut div = NodeSpec::new("div");
        for i in 0..15 {
            div = div.child(NodeSpec::new("a").attr("href", "/p").text(&format!("Link {i}")));
        }
        assert_eq!(extract_from(div).len(), ExtractOptions::default().max_links);
    }
}
