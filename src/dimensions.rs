//! Dimension classification: named, configuration-driven metadata resolved
//! through one of four pluggable strategies (path regex, node selector,
//! static constant, head-metadata lookup). Strategies are independent;
//! a failure is scoped to its own dimension.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DimensionError;
use crate::selector::Selector;
use crate::tree::{collapse_ws, MarkupTree, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    UrlPattern,
    ContentSelector,
    StaticValue,
    Metadata,
}

/// One dimension's configuration. Every field is optional so that a config
/// map can be deserialized from sparse JSON; an all-default config is
/// treated as empty and skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DimensionConfig {
    pub extraction_method: Option<ExtractionMethod>,
    pub enabled: Option<bool>,
    /// `url_pattern`: regex applied to the path.
    pub pattern: Option<String>,
    /// `url_pattern`: 1-based capture group, defaults to 1.
    pub group: Option<usize>,
    /// `content_selector`: node selector to query.
    pub selector: Option<String>,
    pub extract_all: bool,
    pub separator: Option<String>,
    pub preserve_spacing: bool,
    /// `static_value`: the constant to return.
    pub value: Option<String>,
    /// `metadata`: template variable such as `{og-title}`.
    pub source: Option<String>,
}

impl DimensionConfig {
    fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    fn is_empty(&self) -> bool {
        *self == DimensionConfig::default()
    }
}

/// Outcome for one dimension: either a non-empty normalized value or an
/// explicit error kind, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DimensionError>,
}

impl DimensionResult {
    fn ok(value: String) -> DimensionResult {
        DimensionResult {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    fn err(error: DimensionError) -> DimensionResult {
        DimensionResult {
            success: false,
            value: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionReport {
    pub results: BTreeMap<String, DimensionResult>,
    pub success_count: usize,
    pub total_count: usize,
}

/// Head metadata already pulled out of the document, addressed by the fixed
/// template-variable set of the `metadata` strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PageMetadata {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub canonical_url: Option<String>,
    pub absolute_url: Option<String>,
}

impl PageMetadata {
    /// Convenience extractor for embedders that only hold the tree: walks
    /// the document for `<title>`, description/og/twitter meta tags, and the
    /// canonical link. `absolute_url` stays caller-supplied.
    pub fn from_tree(tree: &MarkupTree) -> PageMetadata {
        let mut meta = PageMetadata::default();
        let root = tree.root();
        for id in std::iter::once(root).chain(tree.descendants(root)) {
            match tree.tag(id) {
                "title" => {
                    let text = tree.text_content(id);
                    if meta.meta_title.is_none() && !text.is_empty() {
                        meta.meta_title = Some(text);
                    }
                }
                "meta" => Self::read_meta_tag(tree, id, &mut meta),
                "link" => {
                    let canonical = tree
                        .attr(id, "rel")
                        .is_some_and(|r| r.eq_ignore_ascii_case("canonical"));
                    if canonical && meta.canonical_url.is_none() {
                        meta.canonical_url =
                            tree.attr(id, "href").map(|h| h.trim().to_string());
                    }
                }
                _ => {}
            }
        }
        meta
    }

    fn read_meta_tag(tree: &MarkupTree, id: NodeId, meta: &mut PageMetadata) {
        let content = match tree.attr(id, "content") {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => return,
        };
        let key = tree
            .attr(id, "property")
            .or_else(|| tree.attr(id, "name"))
            .unwrap_or("")
            .to_lowercase();
        let slot = match key.as_str() {
            "description" => &mut meta.meta_description,
            "og:title" => &mut meta.og_title,
            "og:description" => &mut meta.og_description,
            "twitter:title" => &mut meta.twitter_title,
            "twitter:description" => &mut meta.twitter_description,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(content);
        }
    }

    fn lookup(&self, variable: &str) -> Result<String, DimensionError> {
        let slot = match variable {
            "{meta-title}" => &self.meta_title,
            "{meta-description}" => &self.meta_description,
            "{og-title}" => &self.og_title,
            "{og-description}" => &self.og_description,
            "{twitter-title}" => &self.twitter_title,
            "{twitter-description}" => &self.twitter_description,
            "{canonical-url}" => &self.canonical_url,
            "{absoluteurl}" => &self.absolute_url,
            _ => return Err(DimensionError::InvalidSource),
        };
        match slot {
            Some(v) if !v.trim().is_empty() => Ok(v.clone()),
            _ => Err(DimensionError::NoDataFound),
        }
    }
}

/// Resolve every enabled, non-empty dimension. Partial-failure tolerant:
/// each dimension succeeds or fails on its own.
pub fn resolve_all(
    configs: &BTreeMap<String, DimensionConfig>,
    tree: &MarkupTree,
    path: &str,
    metadata: &PageMetadata,
) -> DimensionReport {
    let mut results = BTreeMap::new();
    let mut success_count = 0;
    let mut total_count = 0;

    for (name, config) in configs {
        if config.is_empty() || !config.is_enabled() {
            debug!(%name, "dimension skipped");
            continue;
        }
        total_count += 1;
        let result = match resolve_one(config, tree, path, metadata) {
            Ok(value) => DimensionResult::ok(value),
            Err(err) => {
                debug!(%name, %err, "dimension failed");
                DimensionResult::err(err)
            }
        };
        if result.success {
            success_count += 1;
        }
        results.insert(name.clone(), result);
    }

    DimensionReport {
        results,
        success_count,
        total_count,
    }
}

fn resolve_one(
    config: &DimensionConfig,
    tree: &MarkupTree,
    path: &str,
    metadata: &PageMetadata,
) -> Result<String, DimensionError> {
    let method = config
        .extraction_method
        .ok_or(DimensionError::MissingConfig)?;
    let raw = match method {
        ExtractionMethod::UrlPattern => resolve_url_pattern(config, path)?,
        ExtractionMethod::ContentSelector => resolve_selector(config, tree)?,
        ExtractionMethod::StaticValue => config
            .value
            .clone()
            .ok_or(DimensionError::MissingConfig)?,
        ExtractionMethod::Metadata => {
            let variable = config.source.as_deref().ok_or(DimensionError::MissingConfig)?;
            metadata.lookup(variable)?
        }
    };
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        // A dimension is never half-computed: an empty resolution is the
        // strategy's not-found outcome.
        return Err(empty_error(method));
    }
    Ok(normalized)
}

fn empty_error(method: ExtractionMethod) -> DimensionError {
    match method {
        ExtractionMethod::UrlPattern => DimensionError::InvalidPattern,
        ExtractionMethod::ContentSelector => DimensionError::SelectorNotFound,
        ExtractionMethod::StaticValue => DimensionError::MissingConfig,
        ExtractionMethod::Metadata => DimensionError::NoDataFound,
    }
}

fn resolve_url_pattern(config: &DimensionConfig, path: &str) -> Result<String, DimensionError> {
    let pattern = config.pattern.as_deref().ok_or(DimensionError::MissingConfig)?;
    let re = Regex::new(pattern).map_err(|_| DimensionError::InvalidPattern)?;
    let caps = re.captures(path).ok_or(DimensionError::InvalidPattern)?;
    let group = config.group.unwrap_or(1);
    caps.get(group)
        .map(|m| m.as_str().to_string())
        .ok_or(DimensionError::InvalidPattern)
}

fn resolve_selector(config: &DimensionConfig, tree: &MarkupTree) -> Result<String, DimensionError> {
    let raw = config.selector.as_deref().ok_or(DimensionError::MissingConfig)?;
    let selector = Selector::parse(raw).ok_or(DimensionError::SelectorNotFound)?;
    let hits = selector.select(tree);
    if hits.is_empty() {
        return Err(DimensionError::SelectorNotFound);
    }
    let text_of = |id: NodeId| {
        if config.preserve_spacing {
            let mut parts = Vec::new();
            collect_raw_text(tree, id, &mut parts);
            parts.join(" ")
        } else {
            tree.text_content(id)
        }
    };
    if config.extract_all {
        let separator = config.separator.as_deref().unwrap_or(", ");
        Ok(hits
            .into_iter()
            .map(text_of)
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join(separator))
    } else {
        Ok(text_of(hits[0]))
    }
}

fn collect_raw_text(tree: &MarkupTree, id: NodeId, out: &mut Vec<String>) {
    let own = tree.own_text(id);
    if !own.is_empty() {
        out.push(own.to_string());
    }
    for &child in tree.children(id) {
        collect_raw_text(tree, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeSpec;

    fn config_map(json: &str) -> BTreeMap<String, DimensionConfig> {
        serde_json::from_str(json).unwrap()
    }

    fn empty_tree() -> MarkupTree {
        MarkupTree::from_spec(&NodeSpec::new("body"))
    }

    #[test]
    fn static_value_lowercased() {
        let configs = config_map(
            r#"{"category":{"extraction_method":"static_value","value":"Watch Repair"}}"#,
        );
        let report = resolve_all(&configs, &empty_tree(), "/", &PageMetadata::default());
        let r = &report.results["category"];
        assert!(r.success);
        assert_eq!(r.value.as_deref(), Some("watch repair"));
        assert_eq!(report.success_count, 1);
        assert_eq!(report.total_count, 1);
    }

    #[test]
    fn disabled_and_empty_configs_skipped() {
        let configs = config_map(
            r#"{
                "off":{"extraction_method":"static_value","value":"x","enabled":false},
                "blank":{},
                "on":{"extraction_method":"static_value","value":"Chicago"}
            }"#,
        );
        let report = resolve_all(&configs, &empty_tree(), "/", &PageMetadata::default());
        assert_eq!(report.total_count, 1);
        assert_eq!(report.success_count, 1);
        assert!(!report.results.contains_key("off"));
        assert!(!report.results.contains_key("blank"));
    }

    #[test]
    fn url_pattern_capture_groups() {
        let configs = config_map(
            r#"{
                "locale":{"extraction_method":"url_pattern","pattern":"^/([a-z]{2})/"},
                "city":{"extraction_method":"url_pattern","pattern":"^/[a-z]{2}/([a-z-]+)/","group":1},
                "missing":{"extraction_method":"url_pattern","pattern":"^/shop/"}
            }"#,
        );
        let report = resolve_all(&configs, &empty_tree(), "/en/new-york/repair", &PageMetadata::default());
        assert_eq!(report.results["locale"].value.as_deref(), Some("en"));
        assert_eq!(report.results["city"].value.as_deref(), Some("new-york"));
        assert_eq!(
            report.results["missing"].error,
            Some(DimensionError::InvalidPattern)
        );
        assert_eq!(report.success_count, 2);
        assert_eq!(report.total_count, 3);
    }

    #[test]
    fn invalid_regex_is_invalid_pattern() {
        let configs = config_map(
            r#"{"bad":{"extraction_method":"url_pattern","pattern":"(unclosed"}}"#,
        );
        let report = resolve_all(&configs, &empty_tree(), "/x", &PageMetadata::default());
        assert_eq!(report.results["bad"].error, Some(DimensionError::InvalidPattern));
    }

    #[test]
    fn content_selector_first_and_all() {
        let tree = MarkupTree::from_spec(
            &NodeSpec::new("body")
                .child(NodeSpec::new("span").class("service").text("Cleaning"))
                .child(NodeSpec::new("span").class("service").text("Restoration")),
        );
        let configs = config_map(
            r#"{
                "first":{"extraction_method":"content_selector","selector":".service"},
                "all":{"extraction_method":"content_selector","selector":".service","extract_all":true,"separator":" | "},
                "none":{"extraction_method":"content_selector","selector":".absent"}
            }"#,
        );
        let report = resolve_all(&configs, &tree, "/", &PageMetadata::default());
        assert_eq!(report.results["first"].value.as_deref(), Some("cleaning"));
        assert_eq!(
            report.results["all"].value.as_deref(),
            Some("cleaning | restoration")
        );
        assert_eq!(
            report.results["none"].error,
            Some(DimensionError::SelectorNotFound)
        );
    }

    #[test]
    fn metadata_lookup_and_errors() {
        let meta = PageMetadata {
            og_title: Some("  Precision Watch Repair  ".to_string()),
            ..PageMetadata::default()
        };
        let configs = config_map(
            r#"{
                "title":{"extraction_method":"metadata","source":"{og-title}"},
                "desc":{"extraction_method":"metadata","source":"{og-description}"},
                "bogus":{"extraction_method":"metadata","source":"{page-color}"}
            }"#,
        );
        let report = resolve_all(&configs, &empty_tree(), "/", &meta);
        assert_eq!(
            report.results["title"].value.as_deref(),
            Some("precision watch repair")
        );
        assert_eq!(report.results["desc"].error, Some(DimensionError::NoDataFound));
        assert_eq!(report.results["bogus"].error, Some(DimensionError::InvalidSource));
        assert_eq!(report.success_count, 1);
        assert_eq!(report.total_count, 3);
    }

    #[test]
    fn missing_method_or_value_is_missing_config() {
        let configs = config_map(
            r#"{
                "no_method":{"enabled":true},
                "no_value":{"extraction_method":"static_value"}
            }"#,
        );
        let report = resolve_all(&configs, &empty_tree(), "/", &PageMetadata::default());
        assert_eq!(
            report.results["no_method"].error,
            Some(DimensionError::MissingConfig)
        );
        assert_eq!(
            report.results["no_value"].error,
            Some(DimensionError::MissingConfig)
        );
    }

    #[test]
    fn metadata_from_tree() {
        let tree = MarkupTree::from_spec(
            &NodeSpec::new("html").child(
                NodeSpec::new("head")
                    .child(NodeSpec::new("title").text("Acme Watch Repair"))
                    .child(
                        NodeSpec::new("meta")
                            .attr("name", "description")
                            .attr("content", "Repairs done right"),
                    )
                    .child(
                        NodeSpec::new("meta")
                            .attr("property", "og:title")
                            .attr("content", "Acme Repair"),
                    )
                    .child(
                        NodeSpec::new("link")
                            .attr("rel", "canonical")
                            .attr("href", "https://acme.example/repair"),
                    ),
            ),
        );
        let meta = PageMetadata::from_tree(&tree);
        assert_eq!(meta.meta_title.as_deref(), Some("Acme Watch Repair"));
        assert_eq!(meta.meta_description.as_deref(), Some("Repairs done right"));
        assert_eq!(meta.og_title.as_deref(), Some("Acme Repair"));
        assert_eq!(
            meta.canonical_url.as_deref(),
            Some("https://acme.example/repair")
        );
        assert_eq!(meta.twitter_title, None);
    }

    #[test]
    fn config_with_only_enabled_true_counts_as_nonempty() {
        // `{"enabled":true}` differs from the default (`enabled: None`), so
        // it is evaluated and fails with MissingConfig rather than skipped.
        let configs = config_map(r#"{"weird":{"enabled":true}}"#);
        let report = resolve_all(&configs, &empty_tree(), "/", &PageMetadata::default());
        assert_eq!(report.total_count, 1);
        assert_eq!(report.success_count, 0);
    }
}
