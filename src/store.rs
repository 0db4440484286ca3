//! The local translation records an import is reconciled against.
//!
//! A [`TranslationStore`] holds one [`LocalRecord`] per translation key with a
//! text per language and a single language-independent comment. Keys are
//! storage locations (e.g. `Assets/Translations/Greeting.asset`); a record's
//! display name is derived from the key with [`record_name`].

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    language::Language,
    types::{Dataset, Specification},
};

/// File stem of a key used as a storage location; the key itself when it has
/// no stem.
///
/// ```rust
/// use xliff_bridge::store::record_name;
/// assert_eq!(record_name("Assets/Translations/Greeting.asset"), "Greeting");
/// assert_eq!(record_name("Greeting"), "Greeting");
/// ```
pub fn record_name(key: &str) -> String {
    Path::new(key)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

/// One local translation record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalRecord {
    pub key: String,
    pub name: String,
    pub translations: BTreeMap<Language, String>,
    #[serde(default)]
    pub comment: String,
}

impl LocalRecord {
    /// An empty record named after `key`.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            name: record_name(&key),
            key,
            translations: BTreeMap::new(),
            comment: String::new(),
        }
    }

    pub fn with_translation(mut self, language: Language, text: impl Into<String>) -> Self {
        self.translations.insert(language, text.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Text in `language`; empty when the record has none.
    pub fn text(&self, language: Language) -> &str {
        self.translations
            .get(&language)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Result of [`TranslationStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated,
    Created,
}

/// Source and sink of local translation records.
pub trait TranslationStore {
    /// Record stored under `key`, if any.
    fn record(&self, key: &str) -> Option<LocalRecord>;

    /// Every record, in a stable order.
    fn records(&self) -> Vec<LocalRecord>;

    /// Sets the text of `key` in `language` and the record's comment,
    /// creating the record when it does not exist.
    fn upsert(
        &mut self,
        key: &str,
        language: Language,
        text: &str,
        comment: &str,
    ) -> Result<UpsertOutcome, Error>;
}

/// In-memory [`TranslationStore`] keyed by translation key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    records: BTreeMap<String, LocalRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, replacing any record with the same key.
    pub fn insert(&mut self, record: LocalRecord) -> Option<LocalRecord> {
        self.records.insert(record.key.clone(), record)
    }

    pub fn get(&self, key: &str) -> Option<&LocalRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<LocalRecord> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = LocalRecord>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

impl TranslationStore for MemoryStore {
    fn record(&self, key: &str) -> Option<LocalRecord> {
        self.records.get(key).cloned()
    }

    fn records(&self) -> Vec<LocalRecord> {
        self.records.values().cloned().collect()
    }

    fn upsert(
        &mut self,
        key: &str,
        language: Language,
        text: &str,
        comment: &str,
    ) -> Result<UpsertOutcome, Error> {
        let outcome = if self.records.contains_key(key) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        };
        let record = self
            .records
            .entry(key.to_string())
            .or_insert_with(|| LocalRecord::new(key));
        record.translations.insert(language, text.to_string());
        record.comment = comment.to_string();
        Ok(outcome)
    }
}

impl Dataset {
    /// Snapshot of `store` for export from `source_language` into
    /// `target_languages`.
    ///
    /// Every record contributes its key to the source and every target
    /// language (empty text when it has no translation). Blank comments are
    /// left out. Fails when no target differs from the source language.
    pub fn from_store<S: TranslationStore + ?Sized>(
        specification: Specification,
        source_language: Language,
        target_languages: &[Language],
        store: &S,
    ) -> Result<Dataset, Error> {
        let languages: BTreeSet<Language> = std::iter::once(source_language)
            .chain(target_languages.iter().copied())
            .collect();
        if languages.len() < 2 {
            return Err(Error::invalid_argument(
                "source and target languages are the same; specify at least one different target language",
            ));
        }

        let mut translations: BTreeMap<Language, BTreeMap<String, String>> = languages
            .iter()
            .map(|language| (*language, BTreeMap::new()))
            .collect();
        let mut comments = BTreeMap::new();

        let records = store.records();
        for record in &records {
            for (language, texts) in translations.iter_mut() {
                texts
                    .entry(record.key.clone())
                    .or_insert_with(|| record.text(*language).to_string());
            }
            if !record.comment.trim().is_empty() {
                comments
                    .entry(record.key.clone())
                    .or_insert_with(|| record.comment.clone());
            }
        }

        debug!(
            "snapshot of {} record(s) for {} language(s)",
            records.len(),
            languages.len()
        );
        Ok(Dataset::new(
            specification,
            source_language,
            translations,
            comments,
        ))
    }
}
