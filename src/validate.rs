//! Completeness scoring over the extracted collections: a fixed weight
//! table, a validity threshold, a quality tier, and ordered feedback, plus
//! standalone per-item validators usable as pre-filters.

use serde::Serialize;

use crate::extract::Extracted;

pub const MAX_SCORE: f64 = 4.5;
pub const VALIDITY_THRESHOLD: f64 = 2.5;

const WEIGHT_H1: f64 = 1.0;
const WEIGHT_BUTTONS: f64 = 1.0;
const WEIGHT_CONTENT: f64 = 1.0;
const WEIGHT_IMAGES: f64 = 0.5;
const WEIGHT_SUBHEADINGS: f64 = 0.5;
const WEIGHT_CONTAINER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Excellent,
    Good,
    Fair,
    Poor,
    Insufficient,
}

impl Quality {
    fn from_percentage(pct: f64) -> Quality {
        if pct >= 90.0 {
            Quality::Excellent
        } else if pct >= 75.0 {
            Quality::Good
        } else if pct >= 60.0 {
            Quality::Fair
        } else if pct >= 40.0 {
            Quality::Poor
        } else {
            Quality::Insufficient
        }
    }
}

/// Deterministic pure function of the extracted collections and the weight
/// table; `total` is always within `[0, 4.5]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub has_h1: bool,
    pub has_buttons: bool,
    pub has_content: bool,
    pub has_images: bool,
    pub has_subheadings: bool,
    pub container_found: bool,
    pub total: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub quality: Quality,
    pub is_valid: bool,
    pub feedback: Vec<String>,
}

/// Score the extraction. `semantic_container` is whether the container was
/// identified by a semantic keyword; structural fallbacks still bound the
/// extraction but earn no container credit.
pub fn score(extracted: &Extracted, semantic_container: bool) -> ValidationResult {
    let has_h1 = !extracted.h1.is_empty();
    let has_buttons = !extracted.buttons.is_empty();
    let has_content = !extracted.content.is_empty();
    let has_images = !extracted.images.is_empty();
    let has_subheadings = !extracted.h2.is_empty() || !extracted.h3.is_empty();

    let mut total = 0.0;
    if has_h1 {
        total += WEIGHT_H1;
    }
    if has_buttons {
        total += WEIGHT_BUTTONS;
    }
    if has_content {
        total += WEIGHT_CONTENT;
    }
    if has_images {
        total += WEIGHT_IMAGES;
    }
    if has_subheadings {
        total += WEIGHT_SUBHEADINGS;
    }
    if semantic_container {
        total += WEIGHT_CONTAINER;
    }

    let percentage = total / MAX_SCORE * 100.0;

    let mut feedback = Vec::new();
    if !has_h1 {
        feedback.push("missing h1 heading".to_string());
    }
    match extracted.buttons.len() {
        0 => feedback.push("no call-to-action buttons found".to_string()),
        1 => feedback.push("only one call-to-action; consider a secondary action".to_string()),
        _ => {}
    }
    match extracted.content.len() {
        0 => feedback.push("no supporting copy found".to_string()),
        1 => feedback.push("only one paragraph of supporting copy".to_string()),
        _ => {}
    }
    if !has_images {
        feedback.push("no images found".to_string());
    }
    if !semantic_container {
        feedback.push("hero container not identified semantically".to_string());
    }
    if has_h1 && has_buttons && has_content {
        feedback.push(
            "hero section has a heading, call to action, and supporting copy".to_string(),
        );
    }

    ValidationResult {
        has_h1,
        has_buttons,
        has_content,
        has_images,
        has_subheadings,
        container_found: semantic_container,
        total,
        max_score: MAX_SCORE,
        percentage,
        quality: Quality::from_percentage(percentage),
        is_valid: total >= VALIDITY_THRESHOLD,
        feedback,
    }
}

// ── Per-item validators ──

/// CTA text between 2 and 50 characters.
pub fn valid_button_text(text: &str) -> bool {
    let len = text.trim().chars().count();
    (2..=50).contains(&len)
}

/// Body copy between 20 and 1000 characters, not filler.
pub fn valid_content_text(text: &str) -> bool {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    (20..=1000).contains(&len) && !trimmed.to_lowercase().contains("lorem ipsum")
}

/// Image source free of placeholder filename keywords.
pub fn valid_image_src(src: &str) -> bool {
    let lower = src.to_lowercase();
    !["placeholder", "dummy", "sample", "temp"]
        .iter()
        .any(|kw| lower.contains(kw))
}

/// Heading between 3 and 200 characters; shouting beyond 10 characters is
/// rejected.
pub fn valid_heading_text(text: &str) -> bool {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if !(3..=200).contains(&len) {
        return false;
    }
    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    let all_caps = !letters.is_empty() && letters.iter().all(|c| c.is_uppercase());
    !(all_caps && len > 10)
}
