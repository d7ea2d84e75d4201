//! Image extraction: icon and logo filtering, dimension gating when explicit
//! sizes exist, hero-likelihood classification, and one optional inferred
//! background image.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::config::ExtractOptions;
use crate::extract::Image;
use crate::tree::{MarkupTree, NodeId};

const ICON_KEYWORDS: &[&str] = &["icon", "ico", "glyph", "symbol", "fa-", "fi-", "material-"];
const LOGO_KEYWORDS: &[&str] = &["logo", "brand", "wordmark"];
const HERO_KEYWORDS: &[&str] =
    &["hero", "banner", "feature", "splash", "background", "cover", "main"];

/// Explicit dimensions under this are icon-sized.
const ICON_DIMENSION: u32 = 64;

static ICON_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:icons?|sprites?)/").unwrap());
static BACKGROUND_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"background-image\s*:\s*url\(\s*['"]?([^'")]+)['"]?\s*\)"#).unwrap()
});

/// Icon classification: keyword match on class/id/src, explicitly small
/// dimensions, an icon/sprite path segment, or an unsized SVG.
pub(crate) fn is_icon(tree: &MarkupTree, id: NodeId) -> bool {
    let haystack = keyword_haystack(tree, id);
    if ICON_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
        return true;
    }
    let (width, height) = dimensions(tree, id);
    if width.is_some_and(|w| w < ICON_DIMENSION) || height.is_some_and(|h| h < ICON_DIMENSION) {
        return true;
    }
    let src = tree.attr(id, "src").unwrap_or("").to_lowercase();
    if ICON_PATH_RE.is_match(&src) {
        return true;
    }
    // SVGs with no declared size are nearly always inline glyphs.
    src.ends_with(".svg") && width.is_none() && height.is_none()
}

fn is_logo(tree: &MarkupTree, id: NodeId) -> bool {
    let haystack = keyword_haystack(tree, id);
    LOGO_KEYWORDS.iter().any(|kw| haystack.contains(kw))
}

fn is_hero_likely(tree: &MarkupTree, id: NodeId) -> bool {
    let mut haystack = class_and_id(tree, id);
    if let Some(parent) = tree.parent(id) {
        haystack.push(' ');
        haystack.push_str(&class_and_id(tree, parent));
    }
    let haystack = haystack.to_lowercase();
    HERO_KEYWORDS.iter().any(|kw| haystack.contains(kw))
}

fn class_and_id(tree: &MarkupTree, id: NodeId) -> String {
    let mut s = tree.classes(id).collect::<Vec<_>>().join(" ");
    if let Some(v) = tree.id_attr(id) {
        s.push(' ');
        s.push_str(v);
    }
    s
}

fn keyword_haystack(tree: &MarkupTree, id: NodeId) -> String {
    let mut s = class_and_id(tree, id);
    if let Some(src) = tree.attr(id, "src") {
        s.push(' ');
        s.push_str(src);
    }
    s.to_lowercase()
}

/// Parse explicit `width`/`height` attributes; tolerates a `px` suffix.
fn dimensions(tree: &MarkupTree, id: NodeId) -> (Option<u32>, Option<u32>) {
    let parse = |name: &str| {
        tree.attr(id, name)
            .and_then(|v| v.trim().trim_end_matches("px").parse::<u32>().ok())
    };
    (parse("width"), parse("height"))
}

/// Extract hero-candidate images from the container, in document order.
pub fn extract(tree: &MarkupTree, container: NodeId, opts: &ExtractOptions) -> Vec<Image> {
    let mut out = Vec::new();

    for id in tree.descendants(container) {
        if out.len() >= opts.max_images {
            break;
        }
        if tree.tag(id) != "img" {
            continue;
        }
        let src = match tree.attr(id, "src") {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => continue,
        };
        if opts.exclude_icons && is_icon(tree, id) {
            trace!(%src, "image: dropped icon");
            continue;
        }
        if opts.exclude_logos && is_logo(tree, id) {
            trace!(%src, "image: dropped logo");
            continue;
        }
        let (width, height) = dimensions(tree, id);
        // Bounds apply only when the markup declares a size; unsized images
        // pass through for the consumer to measure.
        if width.is_some_and(|w| w < opts.min_width)
            || height.is_some_and(|h| h < opts.min_height)
        {
            continue;
        }
        out.push(Image {
            src,
            alt: tree.attr(id, "alt").unwrap_or("").to_string(),
            width,
            height,
            is_hero: is_hero_likely(tree, id),
            is_background: false,
        });
    }

    if out.len() < opts.max_images {
        if let Some(bg) = background_image(tree, container) {
            out.push(bg);
        }
    }

    out
}

/// First `background-image: url(...)` declared on the container or a
/// descendant, reported as a background block with unknown dimensions.
fn background_image(tree: &MarkupTree, container: NodeId) -> Option<Image> {
    for id in std::iter::once(container).chain(tree.descendants(container)) {
        let style = match tree.attr(id, "style") {
            Some(s) => s,
            None => continue,
        };
        if let Some(caps) = BACKGROUND_URL_RE.captures(style) {
            return Some(Image {
                src: caps[1].trim().to_string(),
                alt: String::new(),
                width: None,
                height: None,
                is_hero: is_hero_likely(tree, id),
                is_background: true,
            });
        }
    }
    None
}
