use serde::{Deserialize, Serialize};

/// Heading levels the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }

    /// Fixed fallback order for primary-heading search.
    pub const ORDER: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];
}

/// Knobs of the hero-extraction pipeline. Deserializes from camelCase JSON
/// with every field optional, so embedders can override a subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractOptions {
    /// Ancestor levels to ascend from the primary heading.
    pub max_depth: usize,
    pub min_content_length: usize,
    pub max_buttons: usize,
    pub max_images: usize,
    pub max_headings: usize,
    pub min_heading_length: usize,
    /// Image bounds, enforced only when explicit dimensions are present.
    pub min_width: u32,
    pub min_height: u32,
    pub exclude_icons: bool,
    pub exclude_logos: bool,
    /// Keep sub-label elements when measuring heading text.
    pub include_subtext: bool,
    pub include_links: bool,
    pub include_submit_inputs: bool,
    pub max_links: usize,
    pub preferred_heading_level: HeadingLevel,
}

impl Default for ExtractOptions {
    fn default() -> ExtractOptions {
        ExtractOptions {
            max_depth: 5,
            min_content_length: 20,
            max_buttons: 5,
            max_images: 3,
            max_headings: 5,
            min_heading_length: 3,
            min_width: 200,
            min_height: 150,
            exclude_icons: true,
            exclude_logos: true,
            include_subtext: false,
            include_links: true,
            include_submit_inputs: true,
            max_links: 10,
            preferred_heading_level: HeadingLevel::H1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let o = ExtractOptions::default();
        assert_eq!(o.max_depth, 5);
        assert_eq!(o.min_content_length, 20);
        assert_eq!(o.max_buttons, 5);
        assert_eq!(o.max_images, 3);
        assert_eq!(o.min_width, 200);
        assert_eq!(o.min_height, 150);
        assert!(o.exclude_icons);
        assert!(!o.include_subtext);
        assert_eq!(o.preferred_heading_level, HeadingLevel::H1);
    }

    #[test]
    fn partial_json_override() {
        let o: ExtractOptions =
            serde_json::from_str(r#"{"maxButtons":2,"preferredHeadingLevel":"h2"}"#).unwrap();
        assert_eq!(o.max_buttons, 2);
        assert_eq!(o.preferred_heading_level, HeadingLevel::H2);
        assert_eq!(o.max_depth, 5);
    }
}
