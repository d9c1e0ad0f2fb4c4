//! Message configuration file
//!
//! ```yaml
//! message_path: ./messages   # relative to this file
//! languages: [de, fr]
//! format: php                # php (default) or yaml
//! source_language: en-US
//! ```

use crate::catalog::CatalogFormat;
use crate::error::{MessageError, MessageResult};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en-US";

/// Configuration as written in the file
#[derive(Debug, Deserialize)]
struct RawConfig {
    message_path: Option<PathBuf>,
    #[serde(default)]
    languages: Vec<String>,
    format: Option<String>,
    source_language: Option<String>,
}

/// Validated configuration passed to the export and import commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub message_path: PathBuf,
    pub languages: Vec<String>,
    pub format: CatalogFormat,
    pub source_language: String,
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> MessageResult<Self> {
        if !path.is_file() {
            return Err(MessageError::Config(format!(
                "The configuration file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_yaml(&content, base_dir)
    }

    /// Parse and validate configuration text; relative paths resolve against `base_dir`
    pub fn from_yaml(content: &str, base_dir: &Path) -> MessageResult<Self> {
        let raw: RawConfig = serde_yaml::from_str(content)?;

        let format = match raw.format.as_deref() {
            None => CatalogFormat::default(),
            Some(f) => f.parse()?,
        };

        let message_path = raw.message_path.ok_or_else(|| {
            MessageError::Config(
                "The configuration file must specify \"message_path\".".to_string(),
            )
        })?;
        let message_path = if message_path.is_absolute() {
            message_path
        } else {
            base_dir.join(message_path)
        };
        if !message_path.is_dir() {
            return Err(MessageError::Config(format!(
                "The message path {} is not a valid directory.",
                message_path.display()
            )));
        }

        if raw.languages.is_empty() {
            return Err(MessageError::Config("Languages cannot be empty.".to_string()));
        }
        let pattern = language_pattern();
        for language in &raw.languages {
            if !pattern.is_match(language) {
                return Err(MessageError::Config(format!(
                    "Invalid language code '{}'",
                    language
                )));
            }
        }

        let source_language = raw
            .source_language
            .unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string());

        Ok(Config {
            message_path,
            languages: raw.languages,
            format,
            source_language,
        })
    }
}

/// `de`, `pt-BR`, `zh_Hans_CN`, `sr-Latn`
pub(crate) fn language_pattern() -> Regex {
    Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{2,8})*$").expect("valid language regex")
}
