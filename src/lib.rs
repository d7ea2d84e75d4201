//! Heuristic above-the-fold hero extraction over already-parsed markup
//! trees, plus a pluggable dimension-classification engine.
//!
//! Pipeline: primary heading → bounded ancestor search for the hero
//! container → element extractors (headings, buttons, images, copy, links)
//! → completeness validation → one assembled [`ContentMap`].
//!
//! ```
//! use heromap::{extract_content_map, ExtractOptions, MarkupTree, NodeSpec};
//!
//! let tree = MarkupTree::from_spec(
//!     &NodeSpec::new("body").child(
//!         NodeSpec::new("section")
//!             .class("hero")
//!             .child(NodeSpec::new("h1").text("Expert Watch Repair"))
//!             .child(NodeSpec::new("p").text("Certified repairs, free estimates."))
//!             .child(NodeSpec::new("a").class("btn-primary").text("Book now")),
//!     ),
//! );
//! let map = extract_content_map(&tree, &ExtractOptions::default());
//! assert!(map.success);
//! ```

pub mod config;
pub mod container;
pub mod dimensions;
pub mod error;
pub mod extract;
pub mod selector;
pub mod tree;
pub mod validate;
pub mod visibility;

pub use config::{ExtractOptions, HeadingLevel};
pub use container::{CandidateContainer, SEMANTIC_KEYWORDS};
pub use dimensions::{
    resolve_all as resolve_dimensions, DimensionConfig, DimensionReport, DimensionResult,
    ExtractionMethod, PageMetadata,
};
pub use error::{DimensionError, ExtractError};
pub use extract::{
    extract_content_map, Button, ContainerInfo, ContentBlock, ContentMap, ControlType, Extracted,
    Image, Link, Paragraph,
};
pub use tree::{MarkupTree, NodeId, NodeSpec};
pub use validate::{Quality, ValidationResult};

/// The injected HTML-to-tree dependency. Parsing never happens in this
/// crate; embedders supply an implementation or feed trees directly.
pub trait MarkupParser {
    fn parse(&self, html: &str) -> MarkupTree;
}

/// Facade binding a parser and a fixed option set, for callers that start
/// from raw HTML. Tree-first callers can use [`extract_content_map`]
/// directly.
pub struct HeroExtractor {
    parser: Option<Box<dyn MarkupParser>>,
    options: ExtractOptions,
}

impl HeroExtractor {
    pub fn new(options: ExtractOptions) -> HeroExtractor {
        HeroExtractor {
            parser: None,
            options,
        }
    }

    pub fn with_parser(mut self, parser: Box<dyn MarkupParser>) -> HeroExtractor {
        self.parser = Some(parser);
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract from an already-parsed tree.
    pub fn extract(&self, tree: &MarkupTree) -> ContentMap {
        extract_content_map(tree, &self.options)
    }

    /// Parse and extract. Fails fast when no parser was injected.
    pub fn extract_from_html(&self, html: &str) -> Result<ContentMap, ExtractError> {
        let parser = self.parser.as_ref().ok_or(ExtractError::ParserUnavailable)?;
        Ok(self.extract(&parser.parse(html)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SpecParser;

    impl MarkupParser for SpecParser {
        // Stand-in parser: accepts the JSON interchange form.
        fn parse(&self, input: &str) -> MarkupTree {
            let spec: NodeSpec = serde_json::from_str(input).unwrap();
            MarkupTree::from_spec(&spec)
        }
    }

    #[test]
    fn missing_parser_fails_fast() {
        let extractor = HeroExtractor::new(ExtractOptions::default());
        let err = extractor.extract_from_html("<html></html>").unwrap_err();
        assert_eq!(err, ExtractError::ParserUnavailable);
    }

    #[test]
    fn injected_parser_is_used() {
        let extractor =
            HeroExtractor::new(ExtractOptions::default()).with_parser(Box::new(SpecParser));
        let map = extractor
            .extract_from_html(r#"{"tag":"body","children":[{"tag":"h1","text":"Hello there"}]}"#)
            .unwrap();
        assert!(map.success);
        assert_eq!(map.extracted.unwrap().h1, "Hello there");
    }
}
