use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::errors::{ClassDictError, Result};

/// How dictionary entries are interpreted during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum DictionaryMode {
    /// `true` emits the key as a class name; other values are normalized
    #[default]
    KeyAsClass,

    /// Keys are labels only; the literal key `"false"` is always skipped
    ValueOnly,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClassDictConfig {
    /// Dictionary semantics
    pub dictionary_mode: DictionaryMode,

    /// Split emitted dictionary keys on whitespace into individual tokens
    pub split_keys: bool,

    /// Conflict resolution settings
    pub merge: MergeConfig,
}

impl Default for ClassDictConfig {
    fn default() -> Self {
        Self {
            dictionary_mode: DictionaryMode::default(),
            split_keys: true,
            merge: MergeConfig::default(),
        }
    }
}

/// Configuration for the default conflict resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MergeConfig {
    /// Resolve conflicts; when disabled tokens are only joined with spaces
    pub enabled: bool,

    /// Utility prefix (e.g. `tw-`); classes without it are passed through
    pub prefix: Option<String>,

    /// Variant separator
    pub separator: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: None,
            separator: ":".to_string(),
        }
    }
}

impl ClassDictConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassDictError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        serde_yaml::from_str(&content)
            .map_err(|e| ClassDictError::ConfigError {
                message: format!("Failed to parse YAML config: {}", e),
            })
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassDictError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        serde_json::from_str(&content)
            .map_err(|e| ClassDictError::ConfigError {
                message: format!("Failed to parse JSON config: {}", e),
            })
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ClassDictError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Overlay another configuration on top of this one.
    ///
    /// Mode and key splitting always come from `other`; a prefix is only
    /// replaced when `other` sets one.
    pub fn merge(mut self, other: Self) -> Self {
        self.dictionary_mode = other.dictionary_mode;
        self.split_keys = other.split_keys;

        self.merge.enabled = other.merge.enabled;
        self.merge.separator = other.merge.separator;
        if other.merge.prefix.is_some() {
            self.merge.prefix = other.merge.prefix;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClassDictConfig::default();
        assert_eq!(config.dictionary_mode, DictionaryMode::KeyAsClass);
        assert!(config.split_keys);
        assert!(config.merge.enabled);
        assert_eq!(config.merge.separator, ":");
        assert!(config.merge.prefix.is_none());
    }

    #[test]
    fn test_yaml_config_loading() {
        let yaml_content = r##"
dictionary-mode: value-only
split-keys: false
merge:
  prefix: "tw-"
"##;

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let config = ClassDictConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.dictionary_mode, DictionaryMode::ValueOnly);
        assert!(!config.split_keys);
        assert_eq!(config.merge.prefix.as_deref(), Some("tw-"));
        // Unset fields fall back to defaults
        assert!(config.merge.enabled);
        assert_eq!(config.merge.separator, ":");
    }

    #[test]
    fn test_json_config_loading() {
        let json_content = r##"{
  "dictionary-mode": "key-as-class",
  "merge": { "enabled": false }
}"##;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json_content.as_bytes()).unwrap();

        let config = ClassDictConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dictionary_mode, DictionaryMode::KeyAsClass);
        assert!(config.split_keys);
        assert!(!config.merge.enabled);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let err = ClassDictConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file format"));
    }

    #[test]
    fn test_invalid_mode_is_config_error() {
        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(b"dictionary-mode: sometimes\n").unwrap();

        let err = ClassDictConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ClassDictError::ConfigError { .. }));
    }

    #[test]
    fn test_config_merge() {
        let mut base = ClassDictConfig::default();
        base.merge.prefix = Some("tw-".to_string());

        let mut other = ClassDictConfig::default();
        other.dictionary_mode = DictionaryMode::ValueOnly;
        other.split_keys = false;

        let merged = base.merge(other);
        assert_eq!(merged.dictionary_mode, DictionaryMode::ValueOnly);
        assert!(!merged.split_keys);
        assert_eq!(merged.merge.prefix.as_deref(), Some("tw-"));
    }
}
