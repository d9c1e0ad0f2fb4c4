//! Import: workbooks → message catalogs
//!
//! Translations from the sheets only fill messages that are still empty.
//! A message the catalog no longer declares is never added back, and an
//! existing translation is never overwritten.

use crate::catalog::layout::persisted_order;
use crate::catalog::CatalogStore;
use crate::error::{MessageError, MessageResult};
use crate::excel::TabularStore;
use crate::types::{Catalog, ImportBatch, Skip, SkipReason};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default extension of workbooks to import
pub const DEFAULT_IMPORT_EXTENSION: &str = "xlsx";

/// Workbooks `<dir>/*.<extension>`, sorted by file name
pub fn workbook_files(dir: &Path, extension: &str) -> MessageResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MessageError::MissingPath(format!(
            "The input directory does not exist: {}",
            dir.display()
        )));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Result of merging one category into its catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogUpdate {
    pub language: String,
    pub category: String,
    pub path: PathBuf,
    /// Messages that received a translation
    pub updated: usize,
    /// Translations that were not applied, in sheet order
    pub skips: Vec<Skip>,
}

/// What happened to one category of the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    Updated(CatalogUpdate),
    /// No catalog file for the category; nothing was written
    Missing { skip: Skip, path: PathBuf },
}

/// Everything an import did and did not do, in batch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub outcomes: Vec<CatalogOutcome>,
    pub dry_run: bool,
}

impl ImportReport {
    /// Catalogs that were found and merged
    pub fn updates(&self) -> impl Iterator<Item = &CatalogUpdate> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            CatalogOutcome::Updated(update) => Some(update),
            CatalogOutcome::Missing { .. } => None,
        })
    }

    pub fn updated_count(&self) -> usize {
        self.updates().map(|u| u.updated).sum()
    }

    /// Every skip, missing categories included
    pub fn skips(&self) -> impl Iterator<Item = &Skip> {
        self.outcomes.iter().flat_map(|outcome| match outcome {
            CatalogOutcome::Updated(update) => update.skips.iter(),
            CatalogOutcome::Missing { skip, .. } => std::slice::from_ref(skip).iter(),
        })
    }

    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skips().filter(|s| s.reason == reason).count()
    }
}

/// Reads workbooks and merges their translations into catalogs
#[derive(Debug, Clone, Copy, Default)]
pub struct Importer {
    dry_run: bool,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report what would change without writing any catalog
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Read the filled-in translations of every sheet of every workbook
    pub fn collect<T: TabularStore + ?Sized>(
        &self,
        tabular: &T,
        files: &[PathBuf],
    ) -> MessageResult<ImportBatch> {
        let mut batch = ImportBatch::new();

        for file in files {
            let workbook = tabular.load(file)?;
            for sheet in &workbook.sheets {
                let mut filled = 0;
                for row in sheet.data_rows() {
                    let (Some(source), Some(translation)) =
                        (row.source.as_ref(), row.filled_translation())
                    else {
                        continue;
                    };
                    batch.record(
                        &workbook.language,
                        &sheet.name,
                        source.clone(),
                        translation.to_string(),
                    );
                    filled += 1;
                }
                debug!(
                    language = %workbook.language,
                    category = %sheet.name,
                    filled,
                    "read translations"
                );
            }
        }

        Ok(batch)
    }

    /// Merge `batch` into the catalogs and write every catalog that was found
    pub fn merge<C: CatalogStore + ?Sized>(
        &self,
        batch: &ImportBatch,
        catalogs: &C,
    ) -> MessageResult<ImportReport> {
        let mut report = ImportReport {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for (language, categories) in batch.iter() {
            for (category, translations) in categories {
                let path = catalogs.location(language, category);

                let Some(mut catalog) = catalogs.load(language, category)? else {
                    warn!(language, category = %category, path = %path.display(), "category not found, skipping");
                    report.outcomes.push(CatalogOutcome::Missing {
                        skip: Skip {
                            reason: SkipReason::MissingCategory,
                            language: language.to_string(),
                            category: category.clone(),
                            source: None,
                        },
                        path,
                    });
                    continue;
                };

                let (updated, skips) = apply_translations(&mut catalog, language, category, translations);
                for skip in &skips {
                    warn!(
                        language,
                        category = %category,
                        reason = %skip.reason,
                        source = skip.source.as_deref().unwrap_or_default(),
                        "skipping translation"
                    );
                }

                if !self.dry_run {
                    catalogs.persist(language, category, &persisted_order(&catalog))?;
                    info!(path = %path.display(), updated, "updated catalog");
                }

                report.outcomes.push(CatalogOutcome::Updated(CatalogUpdate {
                    language: language.to_string(),
                    category: category.clone(),
                    path,
                    updated,
                    skips,
                }));
            }
        }

        Ok(report)
    }

    /// Collect and merge in one go
    pub fn run<T, C>(&self, tabular: &T, files: &[PathBuf], catalogs: &C) -> MessageResult<ImportReport>
    where
        T: TabularStore + ?Sized,
        C: CatalogStore + ?Sized,
    {
        let batch = self.collect(tabular, files)?;
        self.merge(&batch, catalogs)
    }
}

/// Fill empty messages of `catalog` from `translations`.
///
/// Returns the number of messages filled and the translations skipped,
/// either because the message is gone or because it is already translated.
pub fn apply_translations(
    catalog: &mut Catalog,
    language: &str,
    category: &str,
    translations: &Catalog,
) -> (usize, Vec<Skip>) {
    let mut updated = 0;
    let mut skips = Vec::new();

    for (source, translation) in translations.iter() {
        let reason = match catalog.get(source) {
            None => Some(SkipReason::Removed),
            Some(current) if !current.is_empty() => Some(SkipReason::Exists),
            Some(_) => None,
        };

        match reason {
            Some(reason) => skips.push(Skip {
                reason,
                language: language.to_string(),
                category: category.to_string(),
                source: Some(source.to_string()),
            }),
            None => {
                catalog.set(source, translation);
                updated += 1;
            }
        }
    }

    (updated, skips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{MemoryCatalogs, MemoryTabular};
    use crate::excel::{Row, Sheet, Workbook};
    use pretty_assertions::assert_eq;

    fn sheet(name: &str, rows: &[(&str, Option<&str>)]) -> Sheet {
        let mut sheet = Sheet::with_sources(name, Vec::<String>::new());
        sheet.rows.extend(
            rows.iter()
                .map(|(s, t)| Row::new(*s, t.map(str::to_string))),
        );
        sheet
    }

    fn tabular_with(language: &str, sheets: Vec<Sheet>) -> (MemoryTabular, Vec<PathBuf>) {
        let tabular = MemoryTabular::default();
        let path = PathBuf::from(format!("/in/{}.xlsx", language));
        let mut workbook = Workbook::new(language);
        for s in sheets {
            workbook.add_sheet(s);
        }
        tabular.save(&workbook, &path).unwrap();
        (tabular, vec![path])
    }

    fn entries(catalog: &Catalog) -> Vec<(&str, &str)> {
        catalog.iter().collect()
    }

    #[test]
    fn test_fills_empty_and_reports_removed() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add("en", "app", Catalog::from_entries([("Hello", ""), ("Bye", "Goodbye")]));
        let (tabular, files) = tabular_with(
            "en",
            vec![sheet("app", &[("Hello", Some("Hallo")), ("Missing", Some("X"))])],
        );

        let report = Importer::new().run(&tabular, &files, &catalogs).unwrap();

        let catalog = catalogs.catalog("en", "app").unwrap();
        assert_eq!(entries(&catalog), vec![("Bye", "Goodbye"), ("Hello", "Hallo")]);
        assert_eq!(report.updated_count(), 1);
        assert_eq!(
            report.skips().cloned().collect::<Vec<_>>(),
            vec![Skip {
                reason: SkipReason::Removed,
                language: "en".to_string(),
                category: "app".to_string(),
                source: Some("Missing".to_string()),
            }]
        );
    }

    #[test]
    fn test_never_overwrites_translation() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add("de", "app", Catalog::from_entries([("Hello", "Hallo")]));
        let (tabular, files) = tabular_with("de", vec![sheet("app", &[("Hello", Some("Servus"))])]);

        let report = Importer::new().run(&tabular, &files, &catalogs).unwrap();

        assert_eq!(catalogs.catalog("de", "app").unwrap().get("Hello"), Some("Hallo"));
        assert_eq!(report.skipped(SkipReason::Exists), 1);
        assert_eq!(report.updated_count(), 0);
    }

    #[test]
    fn test_blank_translations_silently_ignored() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add("de", "app", Catalog::from_entries([("Hello", ""), ("Gone", "")]));
        let (tabular, files) = tabular_with(
            "de",
            vec![sheet("app", &[("Hello", Some("   ")), ("Gone", None), ("Nope", Some("\t"))])],
        );

        let batch = Importer::new().collect(&tabular, &files).unwrap();
        assert!(batch.is_empty());

        let report = Importer::new().merge(&batch, &catalogs).unwrap();
        assert_eq!(report, ImportReport::default());
        assert!(catalogs.persisted.borrow().is_empty());
    }

    #[test]
    fn test_translation_kept_untrimmed() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add("de", "app", Catalog::from_entries([("Hello", "")]));
        let (tabular, files) = tabular_with("de", vec![sheet("app", &[("Hello", Some(" Hallo "))])]);

        Importer::new().run(&tabular, &files, &catalogs).unwrap();
        assert_eq!(catalogs.catalog("de", "app").unwrap().get("Hello"), Some(" Hallo "));
    }

    #[test]
    fn test_rows_after_missing_source_ignored() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add("de", "app", Catalog::from_entries([("a", ""), ("b", "")]));
        let mut app = sheet("app", &[("a", Some("A"))]);
        app.rows.push(Row {
            source: None,
            translation: None,
        });
        app.rows.push(Row::new("b", Some("B".to_string())));
        let (tabular, files) = tabular_with("de", vec![app]);

        Importer::new().run(&tabular, &files, &catalogs).unwrap();
        let catalog = catalogs.catalog("de", "app").unwrap();
        assert_eq!(entries(&catalog), vec![("b", ""), ("a", "A")]);
    }

    #[test]
    fn test_missing_category_skipped() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add("de", "app", Catalog::from_entries([("Hello", "")]));
        let (tabular, files) = tabular_with(
            "de",
            vec![
                sheet("legacy", &[("Old", Some("Alt"))]),
                sheet("app", &[("Hello", Some("Hallo"))]),
            ],
        );

        let report = Importer::new().run(&tabular, &files, &catalogs).unwrap();

        assert_eq!(report.outcomes.len(), 2);
        match &report.outcomes[0] {
            CatalogOutcome::Missing { skip, path } => {
                assert_eq!(skip.reason, SkipReason::MissingCategory);
                assert_eq!(skip.category, "legacy");
                assert_eq!(path, &PathBuf::from("/messages/de/legacy.php"));
            }
            other => panic!("expected a missing category first, got {:?}", other),
        }
        assert!(matches!(&report.outcomes[1], CatalogOutcome::Updated(u) if u.category == "app"));
        assert!(catalogs.catalog("de", "legacy").is_none());
        assert_eq!(catalogs.catalog("de", "app").unwrap().get("Hello"), Some("Hallo"));
        assert_eq!(*catalogs.persisted.borrow(), vec![("de".to_string(), "app".to_string())]);
    }

    #[test]
    fn test_rewrites_in_persisted_order_even_without_changes() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add(
            "de",
            "app",
            Catalog::from_entries([("b", "B"), ("d", ""), ("a", "A"), ("c", "")]),
        );
        let (tabular, files) = tabular_with("de", vec![sheet("app", &[("a", Some("other"))])]);

        let report = Importer::new().run(&tabular, &files, &catalogs).unwrap();

        assert_eq!(report.updated_count(), 0);
        let catalog = catalogs.catalog("de", "app").unwrap();
        assert_eq!(
            entries(&catalog),
            vec![("c", ""), ("d", ""), ("a", "A"), ("b", "B")]
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let mut catalogs = MemoryCatalogs::default();
        catalogs.add("de", "app", Catalog::from_entries([("Hello", "")]));
        let (tabular, files) = tabular_with("de", vec![sheet("app", &[("Hello", Some("Hallo"))])]);

        let report = Importer::new()
            .dry_run(true)
            .run(&tabular, &files, &catalogs)
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.updated_count(), 1);
        assert_eq!(catalogs.catalog("de", "app").unwrap().get("Hello"), Some(""));
        assert!(catalogs.persisted.borrow().is_empty());
    }

    #[test]
    fn test_apply_translations_distinguishes_removed_and_exists() {
        let mut catalog = Catalog::from_entries([("A", ""), ("B", "b")]);
        let (updated, skips) = apply_translations(
            &mut catalog,
            "de",
            "app",
            &Catalog::from_entries([("A", "a"), ("B", "x"), ("C", "c")]),
        );

        assert_eq!(updated, 1);
        let reasons: Vec<SkipReason> = skips.iter().map(|s| s.reason).collect();
        assert_eq!(reasons, vec![SkipReason::Exists, SkipReason::Removed]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("A"), Some("a"));
        assert_eq!(catalog.get("B"), Some("b"));
    }

    #[test]
    fn test_workbook_files_filters_extension() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("fr.xlsx"), "").unwrap();
        fs::write(temp.path().join("de.xlsx"), "").unwrap();
        fs::write(temp.path().join("de.ods"), "").unwrap();

        let files = workbook_files(temp.path(), "xlsx").unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("de.xlsx"), temp.path().join("fr.xlsx")]
        );
        assert!(workbook_files(&temp.path().join("missing"), "xlsx").is_err());
    }
}
