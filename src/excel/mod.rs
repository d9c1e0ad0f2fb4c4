//! Excel import/export of message workbooks
//!
//! One workbook per language, named after the language code, with one sheet
//! per category. Column A holds the source string, column B the translation;
//! the first row is a header.
//! - Export: Workbook → .xlsx via `rust_xlsxwriter`
//! - Import: .xlsx / .xls / .ods → Workbook via `calamine`

mod exporter;
mod importer;
mod workbook;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
pub use workbook::{Row, RowCursor, Sheet, Workbook, HEADER};

use crate::error::MessageResult;
use std::path::Path;

/// Where workbooks are read from and written to
pub trait TabularStore {
    fn load(&self, path: &Path) -> MessageResult<Workbook>;

    fn save(&self, workbook: &Workbook, path: &Path) -> MessageResult<()>;
}

/// Spreadsheet files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxStore;

impl TabularStore for XlsxStore {
    fn load(&self, path: &Path) -> MessageResult<Workbook> {
        ExcelImporter::new(path).import()
    }

    fn save(&self, workbook: &Workbook, path: &Path) -> MessageResult<()> {
        ExcelExporter::new(workbook).export(path)
    }
}
