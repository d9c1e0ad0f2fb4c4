//! In-memory workbook: one per language, one sheet per category

/// Header cells of every message sheet
pub const HEADER: (&str, &str) = ("Source", "Translation");

/// One sheet row: column A holds the source, column B the translation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub source: Option<String>,
    pub translation: Option<String>,
}

impl Row {
    pub fn new(source: impl Into<String>, translation: Option<String>) -> Self {
        Self {
            source: Some(source.into()),
            translation,
        }
    }

    /// The translation, unless it is absent or only whitespace
    pub fn filled_translation(&self) -> Option<&str> {
        self.translation
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

/// A named sheet; `rows[0]` is the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// A message sheet with the header row and one row per source string
    pub fn with_sources<I, S>(name: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows = vec![Row::new(HEADER.0, Some(HEADER.1.to_string()))];
        rows.extend(sources.into_iter().map(|s| Row::new(s, None)));
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cursor over the data rows after the header
    pub fn data_rows(&self) -> RowCursor<'_> {
        RowCursor {
            rows: &self.rows,
            next: 1,
        }
    }
}

/// Walks the data rows of a sheet.
///
/// The data ends at the first row without a source cell, whatever follows.
#[derive(Debug, Clone)]
pub struct RowCursor<'a> {
    rows: &'a [Row],
    next: usize,
}

impl RowCursor<'_> {
    /// Go back to the first data row
    pub fn rewind(&mut self) {
        self.next = 1;
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = &'a Row;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.get(self.next)?;
        row.source.as_ref()?;
        self.next += 1;
        Some(row)
    }
}

/// A workbook for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    pub language: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            sheets: Vec::new(),
        }
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Data rows across all sheets
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.data_rows().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_sources_adds_header() {
        let sheet = Sheet::with_sources("app", ["Hello", "Bye"]);
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[0].source.as_deref(), Some("Source"));
        assert_eq!(sheet.rows[0].translation.as_deref(), Some("Translation"));
        assert_eq!(sheet.rows[1], Row::new("Hello", None));
    }

    #[test]
    fn test_cursor_stops_at_first_missing_source() {
        let sheet = Sheet {
            name: "app".to_string(),
            rows: vec![
                Row::new("Source", Some("Translation".to_string())),
                Row::new("a", Some("A".to_string())),
                Row::new("b", None),
                Row {
                    source: None,
                    translation: Some("orphan".to_string()),
                },
                Row::new("after gap", Some("ignored".to_string())),
            ],
        };

        let sources: Vec<&str> = sheet
            .data_rows()
            .filter_map(|r| r.source.as_deref())
            .collect();
        assert_eq!(sources, vec!["a", "b"]);
    }

    #[test]
    fn test_cursor_rewind() {
        let sheet = Sheet::with_sources("app", ["x", "y"]);
        let mut cursor = sheet.data_rows();
        assert_eq!(cursor.by_ref().count(), 2);
        assert!(cursor.next().is_none());
        cursor.rewind();
        assert_eq!(cursor.count(), 2);
    }

    #[test]
    fn test_header_only_sheet_has_no_rows() {
        let sheet = Sheet::with_sources("app", Vec::<String>::new());
        assert_eq!(sheet.data_rows().count(), 0);
    }

    #[test]
    fn test_filled_translation() {
        assert_eq!(Row::new("a", Some(" x ".into())).filled_translation(), Some(" x "));
        assert_eq!(Row::new("a", Some(" \t\n".into())).filled_translation(), None);
        assert_eq!(Row::new("a", None).filled_translation(), None);
    }

    #[test]
    fn test_workbook_row_count() {
        let mut workbook = Workbook::new("de");
        workbook.add_sheet(Sheet::with_sources("app", ["a", "b"]));
        workbook.add_sheet(Sheet::with_sources("errors", ["c"]));
        assert_eq!(workbook.row_count(), 3);
    }
}
