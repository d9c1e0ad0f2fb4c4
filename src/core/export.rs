//! Export: message catalogs → one workbook per language

use super::selector::select;
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::error::MessageResult;
use crate::excel::{Sheet, TabularStore, Workbook};
use crate::types::{ExportBatch, SelectPolicy};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of exported workbooks
pub const EXPORT_EXTENSION: &str = "xlsx";

/// A catalog read during an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedCatalog {
    pub language: String,
    pub category: String,
    pub path: PathBuf,
    /// Messages selected for the sheet
    pub selected: usize,
}

/// Catalogs read and the messages selected from them
#[derive(Debug, Clone, Default)]
pub struct ExportScan {
    pub batch: ExportBatch,
    pub catalogs: Vec<ScannedCatalog>,
}

/// A workbook written by an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub language: String,
    pub path: PathBuf,
    pub sheets: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No catalog had a message to export; nothing was written
    NothingToExport,
    Written(Vec<ExportedFile>),
}

/// Collects messages from catalogs and writes them to workbooks
pub struct Exporter<'a> {
    config: &'a Config,
    policy: SelectPolicy,
}

impl<'a> Exporter<'a> {
    pub fn new(config: &'a Config, policy: SelectPolicy) -> Self {
        Self { config, policy }
    }

    /// Select messages from every category of every configured language
    pub fn collect<C: CatalogStore + ?Sized>(&self, catalogs: &C) -> MessageResult<ExportScan> {
        let mut scan = ExportScan::default();

        for language in &self.config.languages {
            for category in catalogs.categories(language)? {
                let path = catalogs.location(language, &category);
                let Some(catalog) = catalogs.load(language, &category)? else {
                    continue;
                };

                let sources = select(&catalog, self.policy);
                debug!(
                    language = %language,
                    category = %category,
                    selected = sources.len(),
                    total = catalog.len(),
                    policy = %self.policy,
                    "scanned catalog"
                );

                scan.catalogs.push(ScannedCatalog {
                    language: language.clone(),
                    category: category.clone(),
                    path,
                    selected: sources.len(),
                });
                if !sources.is_empty() {
                    scan.batch.insert(language, &category, sources);
                }
            }
        }

        Ok(scan)
    }

    /// Write one workbook per language of `batch` into `output_dir`
    pub fn write<T: TabularStore + ?Sized>(
        &self,
        batch: &ExportBatch,
        tabular: &T,
        output_dir: &Path,
    ) -> MessageResult<ExportOutcome> {
        if batch.is_empty() {
            info!("no messages to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        let mut written = Vec::new();
        for (language, categories) in batch.iter() {
            if categories.is_empty() {
                continue;
            }

            let mut workbook = Workbook::new(language);
            for (category, sources) in categories {
                workbook.add_sheet(Sheet::with_sources(category.as_str(), sources.iter().cloned()));
            }

            let path = output_dir.join(format!("{}.{}", language, EXPORT_EXTENSION));
            tabular.save(&workbook, &path)?;
            info!(language, path = %path.display(), sheets = workbook.sheets.len(), "wrote workbook");

            written.push(ExportedFile {
                language: language.to_string(),
                path,
                sheets: workbook.sheets.len(),
                rows: workbook.row_count(),
            });
        }

        Ok(ExportOutcome::Written(written))
    }

    /// Collect and write in one go
    pub fn run<C, T>(&self, catalogs: &C, tabular: &T, output_dir: &Path) -> MessageResult<ExportOutcome>
    where
        C: CatalogStore + ?Sized,
        T: TabularStore + ?Sized,
    {
        let scan = self.collect(catalogs)?;
        self.write(&scan.batch, tabular, output_dir)
    }
}
