use serde::Serialize;
use thiserror::Error;

/// Terminal failures of the hero-extraction pipeline. Both are returned as
/// values through [`crate::extract::ContentMap`] or `Result`, never panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The document has no visible heading at any level. The only early exit.
    #[error("no visible heading found in document")]
    NoHeadingFound,
    /// The external HTML parser dependency was not supplied to the facade.
    #[error("markup parser dependency was not supplied")]
    ParserUnavailable,
}

/// Per-dimension failures. Scoped to a single dimension; one failing
/// dimension never prevents evaluation of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionError {
    /// Regex was invalid, did not match the path, or named a missing group.
    #[error("pattern did not match")]
    InvalidPattern,
    /// Selector was unparseable or matched no node.
    #[error("selector matched nothing")]
    SelectorNotFound,
    /// A required configuration value (pattern, selector, value) is absent.
    #[error("required configuration value missing")]
    MissingConfig,
    /// The metadata template variable is not one of the known set.
    #[error("unrecognized metadata variable")]
    InvalidSource,
    /// The metadata variable is known but holds no data.
    #[error("metadata variable is empty")]
    NoDataFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_error_serializes_snake_case() {
        let json = serde_json::to_string(&DimensionError::SelectorNotFound).unwrap();
        assert_eq!(json, "\"selector_not_found\"");
    }

    #[test]
    fn extract_error_messages() {
        assert_eq!(
            ExtractError::NoHeadingFound.to_string(),
            "no visible heading found in document"
        );
    }
}
