//! Typed content blocks, the element extractors, and the content-map
//! assembler that composes heading location, container search, extraction,
//! and validation into one result value.

pub mod buttons;
pub mod content;
pub mod headings;
pub mod images;
pub mod links;

use serde::Serialize;
use tracing::debug;

use crate::config::{ExtractOptions, HeadingLevel};
use crate::container::{self, StructuralIndex};
use crate::error::ExtractError;
use crate::tree::{MarkupTree, NodeId};
use crate::validate::{self, ValidationResult};

/// How a call-to-action is expressed in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    /// Native `<button>`.
    Button,
    /// Anchor styled as a button.
    Link,
    /// `<input type="submit">`.
    Submit,
    /// Any element carrying `role=button`.
    Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub text: String,
    pub control_type: ControlType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub classes: Vec<String>,
    pub priority: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub is_hero: bool,
    pub is_background: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// One classified unit of extracted material.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    Button(Button),
    Image(Image),
    Paragraph(Paragraph),
    Link(Link),
}

/// Descriptor of the chosen hero container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerInfo {
    pub tag: String,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Everything pulled out of the hero container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extracted {
    pub h1: String,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub buttons: Vec<Button>,
    pub content: Vec<Paragraph>,
    pub images: Vec<Image>,
    pub links: Vec<Link>,
    pub container: ContainerInfo,
}

impl Extracted {
    /// All extracted material as a single block stream, headings first.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        let mut blocks = vec![ContentBlock::Heading {
            level: 1,
            text: self.h1.clone(),
        }];
        blocks.extend(self.h2.iter().map(|t| ContentBlock::Heading {
            level: 2,
            text: t.clone(),
        }));
        blocks.extend(self.h3.iter().map(|t| ContentBlock::Heading {
            level: 3,
            text: t.clone(),
        }));
        blocks.extend(self.buttons.iter().cloned().map(ContentBlock::Button));
        blocks.extend(self.content.iter().cloned().map(ContentBlock::Paragraph));
        blocks.extend(self.images.iter().cloned().map(ContentBlock::Image));
        blocks.extend(self.links.iter().cloned().map(ContentBlock::Link));
        blocks
    }
}

/// Final result value. Serializes to the external output contract; failure
/// is a value (`success: false` plus `error`), never a panic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMap {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted: Option<Extracted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
}

impl ContentMap {
    pub fn failure(err: ExtractError) -> ContentMap {
        ContentMap {
            success: false,
            error: Some(err.to_string()),
            extracted: None,
            validation: None,
            is_valid: None,
        }
    }
}

/// Run the full hero-extraction pipeline over an already-parsed tree.
/// Pure: identical tree + options always produce identical output.
pub fn extract_content_map(tree: &MarkupTree, opts: &ExtractOptions) -> ContentMap {
    let primary = match headings::find_primary(tree, opts) {
        Some(id) => id,
        None => return ContentMap::failure(ExtractError::NoHeadingFound),
    };

    let index = StructuralIndex::build(tree);
    let found = container::locate(tree, &index, primary, opts);
    let node = found.node;
    debug!(
        tag = tree.tag(node),
        depth = found.depth,
        score = found.score,
        semantic = found.matched_keyword.is_some(),
        "hero container chosen"
    );

    let h1 = headings::heading_text(tree, primary, opts.include_subtext);
    let h2 = headings::extract_level(tree, node, HeadingLevel::H2, Some(primary), opts);
    let h3 = headings::extract_level(tree, node, HeadingLevel::H3, Some(primary), opts);
    let buttons = buttons::extract(tree, node, opts);
    let content = content::extract(tree, node, opts);
    let images = images::extract(tree, node, opts);
    let links = if opts.include_links {
        links::extract(tree, node, opts)
    } else {
        Vec::new()
    };

    let extracted = Extracted {
        h1,
        h2,
        h3,
        buttons,
        content,
        images,
        links,
        container: container_info(tree, node),
    };
    let validation = validate::score(&extracted, found.matched_keyword.is_some());

    ContentMap {
        success: true,
        error: None,
        is_valid: Some(validation.is_valid),
        validation: Some(validation),
        extracted: Some(extracted),
    }
}

fn container_info(tree: &MarkupTree, id: NodeId) -> ContainerInfo {
    ContainerInfo {
        tag: tree.tag(id).to_string(),
        classes: tree.classes(id).map(str::to_string).collect(),
        id: tree.id_attr(id).map(str::to_string),
    }
}
