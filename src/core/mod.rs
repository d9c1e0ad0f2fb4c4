//! Merge engine between message catalogs and workbooks

pub mod export;
pub mod import;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

pub use export::{ExportOutcome, ExportScan, ExportedFile, Exporter, ScannedCatalog};
pub use import::{workbook_files, CatalogOutcome, CatalogUpdate, ImportReport, Importer};
pub use selector::select;
