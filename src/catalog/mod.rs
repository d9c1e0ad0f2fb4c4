//! Message catalogs on disk
//!
//! A catalog lives at `<message_path>/<language>/<category>.<ext>`. The
//! store lists, loads and rewrites them; the codecs in [`php`] and [`yaml`]
//! handle the file syntax and [`layout`] fixes the order entries are
//! written in.

pub mod layout;
pub mod php;
pub mod yaml;

use crate::error::{MessageError, MessageResult};
use crate::types::Catalog;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Explanatory header written at the top of every message file
pub const HEADER_LINES: &[&str] = &[
    "Message translations.",
    "",
    "This file is automatically generated by 'yii message' command.",
    "It contains the localizable messages extracted from source code.",
    "You may modify this file by translating the extracted messages.",
    "",
    "Each array element represents the translation (value) of a message (key).",
    "If the value is empty, the message is considered as not translated.",
    "Messages that no longer need translation will have their translations",
    "enclosed between a pair of '@@' marks.",
    "",
    "Message string can be used with plural forms format. Check i18n section",
    "of the guide for details.",
    "",
    "NOTE: this file must be saved in UTF-8 encoding.",
];

/// Syntax of the message files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFormat {
    #[default]
    Php,
    Yaml,
}

impl CatalogFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CatalogFormat::Php => "php",
            CatalogFormat::Yaml => "yaml",
        }
    }

    pub fn parse(&self, path: &Path, content: &str) -> MessageResult<Catalog> {
        let entries = match self {
            CatalogFormat::Php => php::parse(content),
            CatalogFormat::Yaml => yaml::parse(content),
        }
        .map_err(|e| MessageError::catalog(path, e))?;
        Ok(Catalog::from_entries(entries))
    }

    pub fn render(&self, catalog: &Catalog) -> MessageResult<String> {
        match self {
            CatalogFormat::Php => Ok(php::render(catalog)),
            CatalogFormat::Yaml => Ok(yaml::render(catalog)?),
        }
    }
}

impl FromStr for CatalogFormat {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "php" => Ok(CatalogFormat::Php),
            "yaml" => Ok(CatalogFormat::Yaml),
            other => Err(MessageError::Config(format!(
                "Unsupported message format '{}'. Expected 'php' or 'yaml'",
                other
            ))),
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where catalogs are read from and written to
pub trait CatalogStore {
    /// Categories declared for a language, in file name order
    fn categories(&self, language: &str) -> MessageResult<Vec<String>>;

    /// Load a catalog; `None` when the category has no file
    fn load(&self, language: &str, category: &str) -> MessageResult<Option<Catalog>>;

    /// Overwrite a catalog with `catalog`, entries in the given order
    fn persist(&self, language: &str, category: &str, catalog: &Catalog) -> MessageResult<()>;

    /// Path of the catalog, for reporting
    fn location(&self, language: &str, category: &str) -> PathBuf;
}

/// Catalogs stored as `<root>/<language>/<category>.<ext>`
#[derive(Debug, Clone)]
pub struct FsCatalogStore {
    root: PathBuf,
    format: CatalogFormat,
}

impl FsCatalogStore {
    pub fn new(root: impl Into<PathBuf>, format: CatalogFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }
}

impl CatalogStore for FsCatalogStore {
    fn categories(&self, language: &str) -> MessageResult<Vec<String>> {
        let dir = self.root.join(language);
        if !dir.is_dir() {
            debug!(language, dir = %dir.display(), "no message directory");
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(self.format.extension())
            })
            .collect();
        files.sort();

        Ok(files
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
            .map(str::to_string)
            .collect())
    }

    fn load(&self, language: &str, category: &str) -> MessageResult<Option<Catalog>> {
        if [language, category]
            .iter()
            .any(|name| name.contains(['/', '\\']) || *name == "..")
        {
            debug!(language, category, "not a catalog name");
            return Ok(None);
        }
        let path = self.location(language, category);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| MessageError::catalog(&path, format!("Failed to read: {}", e)))?;
        let catalog = self.format.parse(&path, &content)?;
        debug!(path = %path.display(), messages = catalog.len(), "loaded catalog");
        Ok(Some(catalog))
    }

    fn persist(&self, language: &str, category: &str, catalog: &Catalog) -> MessageResult<()> {
        let path = self.location(language, category);
        let content = self.format.render(catalog)?;
        fs::write(&path, content)
            .map_err(|e| MessageError::catalog(&path, format!("Failed to write: {}", e)))?;
        debug!(path = %path.display(), messages = catalog.len(), "wrote catalog");
        Ok(())
    }

    fn location(&self, language: &str, category: &str) -> PathBuf {
        self.root
            .join(language)
            .join(format!("{}.{}", category, self.format.extension()))
    }
}
