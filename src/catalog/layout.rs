//! Entry order of persisted message files

use crate::types::Catalog;

/// Order a catalog for writing.
///
/// Keys are sorted, then all untranslated entries are placed before the
/// translated ones, each group keeping the sorted order. Untranslated
/// messages stay at the top of the file where translators look first.
pub fn persisted_order(catalog: &Catalog) -> Catalog {
    let mut entries: Vec<(&str, &str)> = catalog.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let (empty, translated): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|(_, translation)| translation.is_empty());

    Catalog::from_entries(empty.into_iter().chain(translated))
}
