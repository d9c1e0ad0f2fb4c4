//! Excel importer implementation - Excel (.xlsx, .xls, .ods) → Workbook

use super::workbook::{Row, Sheet, Workbook};
use crate::config::language_pattern;
use crate::error::{MessageError, MessageResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a message workbook; the language is the file stem
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Language code derived from the file name (`de.xlsx` → `de`)
    pub fn language(&self) -> MessageResult<String> {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                MessageError::Workbook(format!(
                    "Cannot derive a language from {}",
                    self.path.display()
                ))
            })?;

        if !language_pattern().is_match(stem) {
            return Err(MessageError::Workbook(format!(
                "Invalid language code '{}' in file name {}",
                stem,
                self.path.display()
            )));
        }
        Ok(stem.to_string())
    }

    /// Read every sheet, in workbook order
    pub fn import(&self) -> MessageResult<Workbook> {
        let language = self.language()?;
        let mut xls = open_workbook_auto(&self.path).map_err(|e| {
            MessageError::Workbook(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut workbook = Workbook::new(language);
        let sheet_names = xls.sheet_names().to_vec();

        for sheet_name in sheet_names {
            let range = xls.worksheet_range(&sheet_name).map_err(|e| {
                MessageError::Workbook(format!(
                    "Failed to read sheet '{}' of {}: {}",
                    sheet_name,
                    self.path.display(),
                    e
                ))
            })?;
            let sheet = Self::read_sheet(&sheet_name, &range);
            debug!(sheet = %sheet_name, rows = sheet.rows.len(), "read sheet");
            workbook.add_sheet(sheet);
        }

        Ok(workbook)
    }

    /// Columns A and B of every row from the top of the sheet
    fn read_sheet(name: &str, range: &Range<Data>) -> Sheet {
        let height = range.end().map(|(row, _)| row + 1).unwrap_or(0);

        let rows = (0..height)
            .map(|row| Row {
                source: Self::cell_text(range.get_value((row, 0))),
                translation: Self::cell_text(range.get_value((row, 1))),
            })
            .collect();

        Sheet {
            name: name.to_string(),
            rows,
        }
    }

    /// Text of a cell; `None` for a missing or empty cell
    fn cell_text(cell: Option<&Data>) -> Option<String> {
        match cell? {
            Data::Empty => None,
            Data::String(s) => Some(s.clone()),
            Data::Int(i) => Some(i.to_string()),
            Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(format!("{}", *f as i64))
            }
            other => Some(other.to_string()),
        }
    }
}
