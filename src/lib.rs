//! excel-message - message catalogs ↔ Excel workbooks
//!
//! Exports untranslated (or all) messages from per-language, per-category
//! message files into one workbook per language with one sheet per category,
//! and merges the translations entered in those workbooks back into the
//! message files.
//!
//! # Features
//!
//! - Yii-style PHP message files and flat YAML message files
//! - `new` / `all` selection of messages to export
//! - Import never overwrites a translation and never re-adds a removed message
//! - Deterministic message file layout: untranslated first, keys sorted
//!
//! # Example
//!
//! ```no_run
//! use excel_message::catalog::FsCatalogStore;
//! use excel_message::config::Config;
//! use excel_message::core::{workbook_files, Exporter, Importer};
//! use excel_message::excel::XlsxStore;
//! use excel_message::types::SelectPolicy;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("messages.yaml"))?;
//! let catalogs = FsCatalogStore::new(&config.message_path, config.format);
//!
//! Exporter::new(&config, SelectPolicy::New).run(&catalogs, &XlsxStore, Path::new("excel"))?;
//!
//! let files = workbook_files(Path::new("excel"), "xlsx")?;
//! let report = Importer::new().run(&XlsxStore, &files, &catalogs)?;
//! println!("Updated {} messages", report.updated_count());
//! # Ok::<(), excel_message::error::MessageError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{MessageError, MessageResult};
pub use types::{Catalog, SelectPolicy, Skip, SkipReason, TranslationBatch};
