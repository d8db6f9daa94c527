//! Loader configuration

use serde::{Deserialize, Serialize};

/// Options controlling how a document is loaded
///
/// # Examples
///
/// ```rust
/// use pipefile_parser::LoadOptions;
///
/// let options = LoadOptions::default()
///     .with_default_parallel(true)
///     .with_strict_includes(true);
/// assert_eq!(options.conf_suffix, ".conf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Parallel flag of the default block
    pub default_parallel: bool,

    /// Fail on `include` lines naming a missing file
    pub strict_includes: bool,

    /// Read `<document><conf_suffix>` next to the document when it exists
    pub load_sibling_conf: bool,

    /// Suffix of the sibling configuration file
    pub conf_suffix: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            default_parallel: false,
            strict_includes: false,
            load_sibling_conf: true,
            conf_suffix: ".conf".to_string(),
        }
    }
}

impl LoadOptions {
    pub fn with_default_parallel(mut self, parallel: bool) -> Self {
        self.default_parallel = parallel;
        self
    }

    pub fn with_strict_includes(mut self, strict: bool) -> Self {
        self.strict_includes = strict;
        self
    }

    pub fn with_sibling_conf(mut self, enabled: bool) -> Self {
        self.load_sibling_conf = enabled;
        self
    }

    pub fn with_conf_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.conf_suffix = suffix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: LoadOptions = serde_json::from_str(r#"{"strict_includes": true}"#).unwrap();
        assert!(options.strict_includes);
        assert!(options.load_sibling_conf);
        assert_eq!(options.conf_suffix, ".conf");
    }
}
