use crate::error::MessageError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Catalog
//==============================================================================

/// Messages of one (language, category) pair: source string -> translation
///
/// Entries keep the order they were read in. An empty translation means the
/// message has not been translated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries in file order.
    ///
    /// A repeated key keeps its first position and takes the last value,
    /// the same way a PHP array literal behaves.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalog = Self::new();
        for (source, translation) in entries {
            catalog.put(source.into(), translation.into());
        }
        catalog
    }

    /// Add a message, or replace the value of an existing one in place
    pub fn put(&mut self, source: String, translation: String) {
        match self.index.get(&source) {
            Some(&pos) => self.entries[pos].1 = translation,
            None => {
                self.index.insert(source.clone(), self.entries.len());
                self.entries.push((source, translation));
            }
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.index
            .get(source)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Set the translation of an existing message.
    ///
    /// Returns `false` and leaves the catalog untouched when `source` is not
    /// declared: the key set of a catalog never grows through this call.
    pub fn set(&mut self, source: &str, translation: impl Into<String>) -> bool {
        match self.index.get(source) {
            Some(&pos) => {
                self.entries[pos].1 = translation.into();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, translation)| (source.as_str(), translation.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//==============================================================================
// Selection policy
//==============================================================================

/// Which catalog entries an export includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectPolicy {
    /// Only messages without a translation
    #[default]
    New,
    /// Every message, translated or not
    All,
}

impl FromStr for SelectPolicy {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(SelectPolicy::New),
            "all" => Ok(SelectPolicy::All),
            other => Err(MessageError::Config(format!(
                "Invalid message type '{}'. Expected 'new' or 'all'",
                other
            ))),
        }
    }
}

impl fmt::Display for SelectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectPolicy::New => write!(f, "new"),
            SelectPolicy::All => write!(f, "all"),
        }
    }
}

//==============================================================================
// Translation batch
//==============================================================================

/// Messages grouped by language, then category, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationBatch<P> {
    languages: Vec<(String, Vec<(String, P)>)>,
    language_index: HashMap<String, usize>,
    category_index: HashMap<(String, String), usize>,
}

/// Export direction: the source strings to put on each sheet
pub type ExportBatch = TranslationBatch<Vec<String>>;

/// Import direction: source -> translation read from each sheet
pub type ImportBatch = TranslationBatch<Catalog>;

impl<P> Default for TranslationBatch<P> {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            language_index: HashMap::new(),
            category_index: HashMap::new(),
        }
    }
}

impl<P> TranslationBatch<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the payload for a category, replacing any earlier one
    pub fn insert(&mut self, language: &str, category: &str, payload: P) {
        match self.position(language, category) {
            Some((lang, pos)) => self.languages[lang].1[pos].1 = payload,
            None => {
                let lang = self.language_slot(language);
                self.push_category(lang, language, category, payload);
            }
        }
    }

    /// Payload for a category, created empty on first access
    pub fn entry(&mut self, language: &str, category: &str) -> &mut P
    where
        P: Default,
    {
        let (lang, pos) = match self.position(language, category) {
            Some(found) => found,
            None => {
                let lang = self.language_slot(language);
                let pos = self.push_category(lang, language, category, P::default());
                (lang, pos)
            }
        };
        &mut self.languages[lang].1[pos].1
    }

    fn position(&self, language: &str, category: &str) -> Option<(usize, usize)> {
        let lang = *self.language_index.get(language)?;
        let pos = *self
            .category_index
            .get(&(language.to_string(), category.to_string()))?;
        Some((lang, pos))
    }

    fn language_slot(&mut self, language: &str) -> usize {
        if let Some(&lang) = self.language_index.get(language) {
            return lang;
        }
        self.languages.push((language.to_string(), Vec::new()));
        let lang = self.languages.len() - 1;
        self.language_index.insert(language.to_string(), lang);
        lang
    }

    fn push_category(&mut self, lang: usize, language: &str, category: &str, payload: P) -> usize {
        let categories = &mut self.languages[lang].1;
        categories.push((category.to_string(), payload));
        let pos = categories.len() - 1;
        self.category_index
            .insert((language.to_string(), category.to_string()), pos);
        pos
    }

    pub fn get(&self, language: &str, category: &str) -> Option<&P> {
        self.position(language, category)
            .map(|(lang, pos)| &self.languages[lang].1[pos].1)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|(name, _)| name.as_str())
    }

    pub fn categories<'a>(&'a self, language: &str) -> impl Iterator<Item = (&'a str, &'a P)> {
        self.language_index
            .get(language)
            .map(|&lang| self.languages[lang].1.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|(name, payload)| (name.as_str(), payload))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(String, P)])> {
        self.languages
            .iter()
            .map(|(name, categories)| (name.as_str(), categories.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.languages.iter().all(|(_, categories)| categories.is_empty())
    }
}

impl ImportBatch {
    /// Record a translation; a later row for the same source wins
    pub fn record(&mut self, language: &str, category: &str, source: String, translation: String) {
        self.entry(language, category).put(source, translation);
    }
}

//==============================================================================
// Import outcomes
//==============================================================================

/// Why a spreadsheet translation was not written to a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The catalog no longer declares the message
    Removed,
    /// The message already has a translation
    Exists,
    /// No catalog file exists for the sheet's category
    MissingCategory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Removed => write!(f, "removed"),
            SkipReason::Exists => write!(f, "exists"),
            SkipReason::MissingCategory => write!(f, "missing category"),
        }
    }
}

/// One skipped spreadsheet translation, identified well enough to
/// reconcile catalog and spreadsheet by hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub reason: SkipReason,
    pub language: String,
    pub category: String,
    /// `None` for a skipped category
    pub source: Option<String>,
}
