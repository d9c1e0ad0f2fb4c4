//! In-memory stores for engine tests

use crate::catalog::CatalogStore;
use crate::error::{MessageError, MessageResult};
use crate::excel::{TabularStore, Workbook};
use crate::types::Catalog;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct MemoryCatalogs {
    catalogs: RefCell<BTreeMap<(String, String), Catalog>>,
    pub persisted: RefCell<Vec<(String, String)>>,
}

impl MemoryCatalogs {
    pub fn add(&mut self, language: &str, category: &str, catalog: Catalog) {
        self.catalogs
            .get_mut()
            .insert((language.to_string(), category.to_string()), catalog);
    }

    pub fn catalog(&self, language: &str, category: &str) -> Option<Catalog> {
        self.catalogs
            .borrow()
            .get(&(language.to_string(), category.to_string()))
            .cloned()
    }
}

impl CatalogStore for MemoryCatalogs {
    fn categories(&self, language: &str) -> MessageResult<Vec<String>> {
        Ok(self
            .catalogs
            .borrow()
            .keys()
            .filter(|(lang, _)| lang == language)
            .map(|(_, category)| category.clone())
            .collect())
    }

    fn load(&self, language: &str, category: &str) -> MessageResult<Option<Catalog>> {
        Ok(self.catalog(language, category))
    }

    fn persist(&self, language: &str, category: &str, catalog: &Catalog) -> MessageResult<()> {
        self.catalogs.borrow_mut().insert(
            (language.to_string(), category.to_string()),
            catalog.clone(),
        );
        self.persisted
            .borrow_mut()
            .push((language.to_string(), category.to_string()));
        Ok(())
    }

    fn location(&self, language: &str, category: &str) -> PathBuf {
        PathBuf::from(format!("/messages/{}/{}.php", language, category))
    }
}

#[derive(Debug, Default)]
pub struct MemoryTabular {
    files: RefCell<Vec<(PathBuf, Workbook)>>,
}

impl MemoryTabular {
    pub fn saved(&self) -> Vec<(PathBuf, Workbook)> {
        self.files.borrow().clone()
    }
}

impl TabularStore for MemoryTabular {
    fn load(&self, path: &Path) -> MessageResult<Workbook> {
        self.files
            .borrow()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, workbook)| workbook.clone())
            .ok_or_else(|| MessageError::Workbook(format!("No workbook at {}", path.display())))
    }

    fn save(&self, workbook: &Workbook, path: &Path) -> MessageResult<()> {
        let mut files = self.files.borrow_mut();
        files.retain(|(p, _)| p != path);
        files.push((path.to_path_buf(), workbook.clone()));
        Ok(())
    }
}
