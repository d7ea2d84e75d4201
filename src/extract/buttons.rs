//! Call-to-action extraction: overlapping candidate classes gathered
//! separately, de-duplicated by node identity, navigation text dropped,
//! then priority-sorted and capped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::config::ExtractOptions;
use crate::extract::{Button, ControlType};
use crate::tree::{MarkupTree, NodeId};

/// Class tokens that make an anchor button-like.
pub(crate) const BUTTON_CLASS_KEYWORDS: &[&str] =
    &["btn", "button", "cta", "action", "primary", "hero-link"];

/// Texts that are navigation chrome, never CTAs. Compared case-insensitively
/// against the whole trimmed text.
const NAV_TERMS: &[&str] = &[
    "home", "about", "contact", "blog", "news", "login", "sign in", "menu", "search",
];

/// Verbs that mark conversion-oriented copy.
const ACTION_VERBS: &[&str] = &["get", "start", "try", "buy", "call", "book", "schedule"];

static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-size\s*:\s*(\d+(?:\.\d+)?)px").unwrap());

/// True for any control the container scorer should count as a button:
/// native buttons, button-classed anchors, and `role=button`.
pub(crate) fn is_button_like(tree: &MarkupTree, id: NodeId) -> bool {
    match tree.tag(id) {
        "button" => true,
        "a" => has_button_class(tree, id) || has_button_role(tree, id),
        _ => has_button_role(tree, id),
    }
}

pub(crate) fn has_button_class(tree: &MarkupTree, id: NodeId) -> bool {
    tree.classes(id).any(|c| {
        let c = c.to_lowercase();
        BUTTON_CLASS_KEYWORDS.iter().any(|kw| c.contains(kw))
    })
}

pub(crate) fn has_button_role(tree: &MarkupTree, id: NodeId) -> bool {
    tree.attr(id, "role")
        .is_some_and(|r| r.eq_ignore_ascii_case("button"))
}

/// Extract CTA buttons from the container, best first.
pub fn extract(tree: &MarkupTree, container: NodeId, opts: &ExtractOptions) -> Vec<Button> {
    // The candidate classes overlap (a button-classed anchor may also carry
    // role=button), so gather per class and de-dup on node identity rather
    // than on rendered markup.
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut candidates: Vec<(NodeId, ControlType)> = Vec::new();

    let mut push = |id: NodeId, control: ControlType, seen: &mut HashSet<NodeId>| {
        if seen.insert(id) {
            candidates.push((id, control));
        }
    };

    for id in tree.descendants(container) {
        if tree.tag(id) == "button" {
            push(id, ControlType::Button, &mut seen);
        }
    }
    for id in tree.descendants(container) {
        if tree.tag(id) == "a" && has_button_class(tree, id) {
            push(id, ControlType::Link, &mut seen);
        }
    }
    for id in tree.descendants(container) {
        if has_button_role(tree, id) {
            push(id, ControlType::Role, &mut seen);
        }
    }
    if opts.include_submit_inputs {
        for id in tree.descendants(container) {
            if tree.tag(id) == "input"
                && tree.attr(id, "type").is_some_and(|t| t.eq_ignore_ascii_case("submit"))
            {
                push(id, ControlType::Submit, &mut seen);
            }
        }
    }

    // Back to document order before the stable priority sort, so ties keep
    // their DOM position.
    candidates.sort_by_key(|(id, _)| *id);

    let mut out = Vec::new();
    for (id, control) in candidates {
        let text = button_text(tree, id);
        if text.is_empty() {
            continue;
        }
        if NAV_TERMS.contains(&text.to_lowercase().as_str()) {
            trace!(%text, "button: dropped navigation term");
            continue;
        }
        out.push(Button {
            priority: priority(tree, id, &text),
            text,
            control_type: control,
            href: tree.attr(id, "href").map(str::to_string),
            classes: tree.classes(id).map(str::to_string).collect(),
        });
    }

    out.sort_by(|a, b| b.priority.cmp(&a.priority));
    out.truncate(opts.max_buttons);
    out
}

fn button_text(tree: &MarkupTree, id: NodeId) -> String {
    if tree.tag(id) == "input" {
        return tree.attr(id, "value").unwrap_or("").trim().to_string();
    }
    tree.text_content(id)
}

fn priority(tree: &MarkupTree, id: NodeId, text: &str) -> i32 {
    let classes = tree
        .classes(id)
        .map(str::to_lowercase)
        .collect::<Vec<_>>();
    let has = |kw: &str| classes.iter().any(|c| c.contains(kw));

    let mut p = 0;
    if has("primary") || has("cta") {
        p += 3;
    }
    if has("hero") {
        p += 2;
    }
    if has("large") || has("lg") {
        p += 1;
    }

    let lower = text.to_lowercase();
    if ACTION_VERBS
        .iter()
        .any(|v| lower.split_whitespace().any(|w| w == *v))
    {
        p += 2;
    }

    if let Some(style) = tree.attr(id, "style") {
        if let Some(caps) = FONT_SIZE_RE.captures(style) {
            if caps[1].parse::<f32>().unwrap_or(0.0) > 16.0 {
                p += 1;
            }
        }
    }
    p
}
