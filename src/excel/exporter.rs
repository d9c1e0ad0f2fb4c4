//! Excel exporter implementation - Workbook → .xlsx

use super::workbook::{Sheet, Workbook};
use crate::error::{MessageError, MessageResult};
use rust_xlsxwriter::{Format, Worksheet};
use std::path::Path;

/// Width of the source and translation columns
const COLUMN_WIDTH: f64 = 60.0;

/// Writes a message workbook to an .xlsx file
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
    header_format: Format,
    source_format: Format,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self {
            workbook,
            header_format: Format::new().set_bold(),
            source_format: Format::new().set_text_wrap(),
        }
    }

    /// Write the workbook to `output_path`, replacing any existing file
    pub fn export(&self, output_path: &Path) -> MessageResult<()> {
        let mut xlsx = rust_xlsxwriter::Workbook::new();

        for sheet in &self.workbook.sheets {
            let worksheet = xlsx.add_worksheet();
            self.export_sheet(worksheet, sheet)?;
        }

        xlsx.save(output_path).map_err(|e| {
            MessageError::Workbook(format!(
                "Failed to save Excel file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    fn export_sheet(&self, worksheet: &mut Worksheet, sheet: &Sheet) -> MessageResult<()> {
        let sheet_err = |e: rust_xlsxwriter::XlsxError| {
            MessageError::Workbook(format!("Sheet '{}': {}", sheet.name, e))
        };

        worksheet.set_name(&sheet.name).map_err(sheet_err)?;
        worksheet.set_column_width(0, COLUMN_WIDTH).map_err(sheet_err)?;
        worksheet.set_column_width(1, COLUMN_WIDTH).map_err(sheet_err)?;

        for (idx, row) in sheet.rows.iter().enumerate() {
            let row_num = idx as u32;
            let format = if idx == 0 {
                &self.header_format
            } else {
                &self.source_format
            };

            if let Some(source) = &row.source {
                worksheet
                    .write_string_with_format(row_num, 0, source, format)
                    .map_err(sheet_err)?;
            }
            if let Some(translation) = &row.translation {
                if idx == 0 {
                    worksheet
                        .write_string_with_format(row_num, 1, translation, format)
                        .map_err(sheet_err)?;
                } else {
                    worksheet
                        .write_string(row_num, 1, translation)
                        .map_err(sheet_err)?;
                }
            }
        }

        Ok(())
    }
}
