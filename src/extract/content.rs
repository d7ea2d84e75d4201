//! Supporting-copy extraction: paragraphs plus text-dense simple containers,
//! with boilerplate (legal lines, business hours, date stamps) filtered out.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::config::ExtractOptions;
use crate::extract::Paragraph;
use crate::tree::{MarkupTree, NodeId};

/// Upper bound of the acceptable text window; matches the standalone
/// content validator.
pub(crate) const MAX_CONTENT_LENGTH: usize = 1000;

/// Paragraphs reported per call.
const MAX_PARAGRAPHS: usize = 10;

/// Container tags that can carry copy when they are simple enough.
const TEXT_CONTAINER_TAGS: &[&str] = &["div", "span", "section", "article"];

/// A container with more element children than this is layout, not copy.
const MAX_TEXT_CONTAINER_CHILDREN: usize = 2;

/// Descendant tags that disqualify a container from being pure copy.
const NON_COPY_TAGS: &[&str] = &["p", "a", "button", "input", "img", "h1", "h2", "h3", "h4", "h5", "h6"];

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}(:\d{2})?\s*(am|pm)\s*[-–]\s*\d{1,2}(:\d{2})?\s*(am|pm)\b|\b(mon|tue|wed|thu|fri|sat|sun)[a-z]*\s*[-–]\s*(mon|tue|wed|thu|fri|sat|sun)[a-z]*\b",
    )
    .unwrap()
});
static LEADING_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}\b").unwrap());

/// Description-like signal for the container scorer: a paragraph tag, or an
/// element whose class names it as descriptive copy.
pub(crate) fn is_description_like(tree: &MarkupTree, id: NodeId) -> bool {
    if tree.tag(id) == "p" {
        return true;
    }
    tree.classes(id).any(|c| {
        let c = c.to_lowercase();
        ["description", "tagline", "lead", "subtitle"]
            .iter()
            .any(|kw| c.contains(kw))
    })
}

pub(crate) fn is_boilerplate(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.contains('©')
        || lower.contains("all rights reserved")
        || HOURS_RE.is_match(text)
        || LEADING_YEAR_RE.is_match(text.trim_start())
}

/// Extract body copy from the container, in document order.
pub fn extract(tree: &MarkupTree, container: NodeId, opts: &ExtractOptions) -> Vec<Paragraph> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for id in tree.descendants(container) {
        if out.len() >= MAX_PARAGRAPHS {
            break;
        }
        let tag = tree.tag(id);
        let candidate = if tag == "p" {
            true
        } else {
            // Low-child text containers holding nothing but copy. Anything
            // interactive below (or a paragraph that would report the same
            // text) disqualifies the wrapper.
            TEXT_CONTAINER_TAGS.contains(&tag)
                && tree.children(id).len() <= MAX_TEXT_CONTAINER_CHILDREN
                && tree.descendants(id).all(|d| !NON_COPY_TAGS.contains(&tree.tag(d)))
        };
        if !candidate {
            continue;
        }
        let text = tree.text_content(id);
        let len = text.chars().count();
        if len < opts.min_content_length || len > MAX_CONTENT_LENGTH {
            continue;
        }
        if is_boilerplate(&text) {
            trace!(%text, "content: dropped boilerplate");
            continue;
        }
        if seen.insert(text.clone()) {
            out.push(Paragraph { text });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeSpec;

    fn extract_from(spec: NodeSpec) -> Vec<Paragraph> {
        let tree = MarkupTree::from_spec(&spec);
        extract(&tree, tree.root(), &ExtractOptions::default())
    }

    #[test]
    fn paragraph_collected() {
        let out = extract_from(
            NodeSpec::new("div").child(NodeSpec::new("p").text("We repair mechanical watches with care.")),
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn min_length_boundary() {
        // Exactly 20 chars in, 19 out.
        let at = "a".repeat(20);
        let under = "a".repeat(19);
        assert_eq!(
            extract_from(NodeSpec::new("div").child(NodeSpec::new("p").text(&at))).len(),
            1
        );
        assert!(extract_from(NodeSpec::new("div").child(NodeSpec::new("p").text(&under))).is_empty());
    }

    #[test]
    fn overlong_text_dropped() {
        let long = "word ".repeat(300);
        assert!(extract_from(NodeSpec::new("div").child(NodeSpec::new("p").text(&long))).is_empty());
    }

    #[test]
    fn boilerplate_rejected() {
        for text in [
            "© 2024 Example Watch Co. and partners",
            "All Rights Reserved by the company.",
            "Open Mon - Fri for walk-in repairs",
            "We are open 9am - 5pm every day",
            "2023 was our best year yet, thanks to you",
        ] {
            assert!(is_boilerplate(text), "should reject: {text}");
            assert!(
                extract_from(NodeSpec::new("div").child(NodeSpec::new("p").text(text))).is_empty()
            );
        }
        assert!(!is_boilerplate("Since 1984 we have repaired watches."));
    }

    #[test]
    fn text_dense_container_without_paragraphs() {
        let out = extract_from(
            NodeSpec::new("section").child(
                NodeSpec::new("div")
                    .class("tagline")
                    .text("Precision servicing for vintage and modern timepieces."),
            ),
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn container_holding_paragraph_not_double_counted() {
        let out = extract_from(
            NodeSpec::new("section").child(
                NodeSpec::new("div")
                    .child(NodeSpec::new("p").text("We repair mechanical watches with care.")),
            ),
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn duplicate_text_reported_once() {
        let out = extract_from(
            NodeSpec::new("div")
                .child(NodeSpec::new("p").text("We repair mechanical watches with care."))
                .child(NodeSpec::new("p").text("We repair mechanical watches with care.")),
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn busy_container_skipped() {
        let out = extract_from(
            NodeSpec::new("div").child(
                NodeSpec::new("div")
                    .child(NodeSpec::new("span").text("one"))
                    .child(NodeSpec::new("span").text("two"))
                    .child(NodeSpec::new("span").text("three")),
            ),
        );
        // The inner div has 3 element children; the spans alone are below
        // the minimum length.
        assert!(out.is_empty());
    }
}
