//! Reconciles an imported [`Dataset`] with local translation records.
//!
//! An [`ImportSession`] compares every imported `(language, key)` pair with
//! the [`TranslationStore`], surfaces new and changed pairs as entries the
//! caller can select, edit and revert, and finally applies the selected
//! entries language by language in a caller-controlled order.
//!
//! ```rust
//! use xliff_bridge::{Dataset, ImportSession, Language, MemoryStore, TranslationStore};
//! use xliff_bridge::store::LocalRecord;
//!
//! let mut store: MemoryStore = [LocalRecord::new("Assets/Greeting.asset")
//!     .with_translation(Language::French, "Salut")]
//! .into_iter()
//! .collect();
//!
//! let imported = Dataset::builder()
//!     .translation(Language::French, "Assets/Greeting.asset", "Bonjour")
//!     .translation(Language::French, "Assets/Thanks.asset", "Merci")
//!     .build();
//!
//! let mut session = ImportSession::new(imported);
//! let views = session.refresh(&store);
//! assert_eq!(views.len(), 2);
//!
//! let report = session.apply(&mut store)?;
//! assert_eq!((report.updated, report.created), (1, 1));
//! assert_eq!(store.record("Assets/Thanks.asset").unwrap().name, "Thanks");
//! # Ok::<(), xliff_bridge::Error>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::Error,
    language::Language,
    search::SearchQuery,
    store::{TranslationStore, UpsertOutcome, record_name},
    types::Dataset,
};

/// The caller's decision about one imported `(language, key)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileEntry {
    pub is_selected: bool,
    pub modified_translation: String,
    pub modified_comment: String,
    /// Local language whose current text is shown as being replaced.
    pub preview_language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A local record exists and its text or comment differs.
    Changed,
    /// No local record exists for the key.
    New,
}

/// A visible entry as produced by [`ImportSession::refresh`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub language: Language,
    pub key: String,
    pub kind: EntryKind,
    /// Local record name, or the key's file stem for new entries.
    pub name: String,
    pub foreign_text: String,
    pub foreign_comment: String,
    /// Local text in `language`; empty for new entries.
    pub local_text: String,
    /// Local comment; empty for new entries.
    pub local_comment: String,
    pub entry: ReconcileEntry,
}

impl EntryView {
    /// Whether the caller edited the entry away from the imported values.
    pub fn is_modified(&self) -> bool {
        self.entry.modified_translation != self.foreign_text
            || self.entry.modified_comment != self.foreign_comment
    }
}

/// Counters returned by [`ImportSession::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub processed_languages: usize,
    pub updated: usize,
    pub created: usize,
    pub skipped_deselected: usize,
}

impl ApplyReport {
    /// Number of `(language, key)` pairs written to the store.
    pub fn applied(&self) -> usize {
        self.updated + self.created
    }
}

/// Interactive reconciliation of one imported dataset.
#[derive(Debug, Clone)]
pub struct ImportSession {
    dataset: Dataset,
    language_order: Vec<Language>,
    entries: BTreeMap<Language, BTreeMap<String, ReconcileEntry>>,
    search: SearchQuery,
}

impl ImportSession {
    pub fn new(dataset: Dataset) -> Self {
        let language_order = initial_language_order(&dataset);
        Self {
            dataset,
            language_order,
            entries: BTreeMap::new(),
            search: SearchQuery::default(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Replaces the imported dataset. A different dataset discards every
    /// entry and resets the language order.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        if self.dataset != dataset {
            self.language_order = initial_language_order(&dataset);
            self.entries.clear();
            self.dataset = dataset;
        }
    }

    /// Order in which languages are applied.
    pub fn language_order(&self) -> &[Language] {
        &self.language_order
    }

    /// Sets the apply order; it must be a permutation of the current order.
    pub fn set_language_order(&mut self, order: Vec<Language>) -> Result<(), Error> {
        let current: BTreeSet<Language> = self.language_order.iter().copied().collect();
        let requested: BTreeSet<Language> = order.iter().copied().collect();
        if order.len() != self.language_order.len() || current != requested {
            return Err(Error::invalid_argument(format!(
                "language order {:?} is not a permutation of {:?}",
                order, self.language_order
            )));
        }
        self.language_order = order;
        Ok(())
    }

    /// Swaps the language at `index` with its predecessor.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.language_order.len() {
            return false;
        }
        self.language_order.swap(index - 1, index);
        true
    }

    /// Swaps the language at `index` with its successor.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.language_order.len() {
            return false;
        }
        self.language_order.swap(index, index + 1);
        true
    }

    pub fn search(&self) -> &SearchQuery {
        &self.search
    }

    pub fn set_search(&mut self, query: &str) {
        self.search.set(query);
    }

    /// Computes the visible entries against `store`, in language order.
    ///
    /// Entries are created (selected, with the imported values) the first
    /// time they become visible and keep the caller's edits afterwards.
    pub fn refresh<S: TranslationStore + ?Sized>(&mut self, store: &S) -> Vec<EntryView> {
        let mut views = Vec::new();
        for language in self.language_order.clone() {
            let Some(translations) = self.dataset.try_get_translations(language) else {
                continue;
            };
            let entries = self.entries.entry(language).or_default();
            for (key, foreign_text) in translations {
                let foreign_comment = self.dataset.comment(key).unwrap_or_default();
                let (kind, name, local_text, local_comment) = match store.record(key) {
                    Some(record) => {
                        let local_text = record.text(language).to_string();
                        let is_different =
                            *foreign_text != local_text || foreign_comment != record.comment;
                        let is_visible = is_different
                            && self.search.matches_any([
                                record.name.as_str(),
                                foreign_text.as_str(),
                                foreign_comment,
                                local_text.as_str(),
                                record.comment.as_str(),
                            ]);
                        if !is_visible {
                            continue;
                        }
                        (EntryKind::Changed, record.name, local_text, record.comment)
                    }
                    None => {
                        let name = record_name(key);
                        let is_visible = self.search.matches_any([
                            name.as_str(),
                            foreign_text.as_str(),
                            foreign_comment,
                        ]);
                        if !is_visible {
                            continue;
                        }
                        (EntryKind::New, name, String::new(), String::new())
                    }
                };
                let entry = entries
                    .entry(key.clone())
                    .or_insert_with(|| ReconcileEntry {
                        is_selected: true,
                        modified_translation: foreign_text.clone(),
                        modified_comment: foreign_comment.to_string(),
                        preview_language: language,
                    });
                views.push(EntryView {
                    language,
                    key: key.clone(),
                    kind,
                    name,
                    foreign_text: foreign_text.clone(),
                    foreign_comment: foreign_comment.to_string(),
                    local_text,
                    local_comment,
                    entry: entry.clone(),
                });
            }
        }
        debug!("{} visible reconciliation entries", views.len());
        views
    }

    pub fn entry(&self, language: Language, key: &str) -> Option<&ReconcileEntry> {
        self.entries.get(&language)?.get(key)
    }

    fn entry_mut(&mut self, language: Language, key: &str) -> Result<&mut ReconcileEntry, Error> {
        self.entries
            .get_mut(&language)
            .and_then(|entries| entries.get_mut(key))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "no reconciliation entry for \"{}\" in {}",
                    key, language
                ))
            })
    }

    /// Selects every entry created so far.
    pub fn select_all(&mut self) {
        self.set_all_selected(true);
    }

    /// Deselects every entry created so far.
    pub fn deselect_all(&mut self) {
        self.set_all_selected(false);
    }

    fn set_all_selected(&mut self, is_selected: bool) {
        for entry in self.entries.values_mut().flat_map(BTreeMap::values_mut) {
            entry.is_selected = is_selected;
        }
    }

    pub fn set_selected(
        &mut self,
        language: Language,
        key: &str,
        is_selected: bool,
    ) -> Result<(), Error> {
        self.entry_mut(language, key)?.is_selected = is_selected;
        Ok(())
    }

    /// Replaces the text and comment that will be applied for an entry.
    pub fn edit(
        &mut self,
        language: Language,
        key: &str,
        translation: impl Into<String>,
        comment: impl Into<String>,
    ) -> Result<(), Error> {
        let entry = self.entry_mut(language, key)?;
        entry.modified_translation = translation.into();
        entry.modified_comment = comment.into();
        Ok(())
    }

    /// Restores the imported text and comment; selection and preview
    /// language are kept.
    pub fn revert(&mut self, language: Language, key: &str) -> Result<(), Error> {
        let translation = self.dataset.text(language, key).to_string();
        let comment = self.dataset.comment(key).unwrap_or_default().to_string();
        let entry = self.entry_mut(language, key)?;
        entry.modified_translation = translation;
        entry.modified_comment = comment;
        Ok(())
    }

    pub fn set_preview_language(
        &mut self,
        language: Language,
        key: &str,
        preview_language: Language,
    ) -> Result<(), Error> {
        self.entry_mut(language, key)?.preview_language = preview_language;
        Ok(())
    }

    /// Local text in the entry's preview language, i.e. what applying the
    /// entry would be compared against. `None` without an entry or record.
    pub fn preview<S: TranslationStore + ?Sized>(
        &self,
        store: &S,
        language: Language,
        key: &str,
    ) -> Option<String> {
        let entry = self.entry(language, key)?;
        let record = store.record(key)?;
        Some(record.text(entry.preview_language).to_string())
    }

    /// Writes every selected entry to `store`, language by language in
    /// [`language_order`](Self::language_order).
    ///
    /// The comment is not per language, so the last applied language wins.
    /// Entries hidden by the current search are applied too. A store error
    /// aborts; pairs written before it stay written.
    pub fn apply<S: TranslationStore + ?Sized>(self, store: &mut S) -> Result<ApplyReport, Error> {
        let mut report = ApplyReport::default();
        for language in &self.language_order {
            let Some(entries) = self.entries.get(language) else {
                continue;
            };
            report.processed_languages += 1;
            for (key, entry) in entries {
                if !entry.is_selected {
                    report.skipped_deselected += 1;
                    continue;
                }
                match store.upsert(
                    key,
                    *language,
                    &entry.modified_translation,
                    &entry.modified_comment,
                )? {
                    UpsertOutcome::Updated => report.updated += 1,
                    UpsertOutcome::Created => report.created += 1,
                }
            }
        }
        info!(
            "applied {} translation(s): {} updated, {} created, {} deselected",
            report.applied(),
            report.updated,
            report.created,
            report.skipped_deselected
        );
        Ok(report)
    }
}

/// Supported languages with English moved to the front.
fn initial_language_order(dataset: &Dataset) -> Vec<Language> {
    let mut order: Vec<Language> = dataset.supported_languages().collect();
    if let Some(index) = order.iter().position(|l| *l == Language::English) {
        let english = order.remove(index);
        order.insert(0, english);
    }
    order
}

/// Applies `dataset` to `store` without interaction: every new or changed
/// pair is applied except the `deselected` ones, in `language_order` (or the
/// default order when empty). Returns the number of pairs written.
pub fn reconcile<S: TranslationStore + ?Sized>(
    dataset: Dataset,
    store: &mut S,
    deselected: &[(Language, String)],
    language_order: &[Language],
) -> Result<usize, Error> {
    let mut session = ImportSession::new(dataset);
    if !language_order.is_empty() {
        session.set_language_order(language_order.to_vec())?;
    }
    session.refresh(&*store);
    for (language, key) in deselected {
        if session.entry(*language, key).is_some() {
            session.set_selected(*language, key, false)?;
        }
    }
    Ok(session.apply(store)?.applied())
}
