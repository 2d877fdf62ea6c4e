use serde::Deserialize;

use crate::error::ConvertError;

/// Conversion context settings, parsed from TOML. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Start the registry with the built-in converters.
    pub builtin_converters: bool,

    /// Prefix stripped from reader names before matching, e.g. `get`.
    pub reader_prefix: String,

    /// Prefix stripped from writer names before matching, e.g. `set`.
    pub writer_prefix: String,

    /// Short names of built-in converters to leave out, e.g. `"StrToBool"`.
    pub disabled_converters: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            builtin_converters:  true,
            reader_prefix:       "get".to_string(),
            writer_prefix:       "set".to_string(),
            disabled_converters: Vec::new(),
        }
    }
}

impl ContextConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConvertError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConvertError::Config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, ConvertError> {
        toml::from_str(toml_str).map_err(|e| ConvertError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ContextConfig::parse(""), Ok(ContextConfig::default()));
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = ContextConfig::parse("reader_prefix = \"fetch\"\ndisabled_converters = [\"StrToBool\"]\n");
        let cfg = cfg.unwrap_or_default();
        assert_eq!(cfg.reader_prefix, "fetch");
        assert_eq!(cfg.writer_prefix, "set");
        assert_eq!(cfg.disabled_converters, vec!["StrToBool".to_string()]);
        assert!(cfg.builtin_converters);
    }

    #[test]
    fn wrong_type_is_config_error() {
        assert!(matches!(
            ContextConfig::parse("builtin_converters = \"yes\""),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_config_error() {
        assert!(matches!(
            ContextConfig::load("/nonexistent/remodel.toml"),
            Err(ConvertError::Config(_))
        ));
    }
}
