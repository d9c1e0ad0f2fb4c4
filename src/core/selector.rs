//! Which messages an export puts on the sheets

use crate::types::{Catalog, SelectPolicy};

/// Source strings of `catalog` matching `policy`, in catalog order
pub fn select(catalog: &Catalog, policy: SelectPolicy) -> Vec<String> {
    catalog
        .iter()
        .filter(|(_, translation)| match policy {
            SelectPolicy::New => translation.is_empty(),
            SelectPolicy::All => true,
        })
        .map(|(source, _)| source.to_string())
        .collect()
}
