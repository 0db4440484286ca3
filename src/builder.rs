use std::collections::BTreeMap;

use crate::{
    language::Language,
    types::{Dataset, Specification},
};

/// Builder for creating a [`Dataset`] with a fluent interface.
///
/// Defaults to XLIFF 2.0 with English as the source language.
///
/// # Example
///
/// ```rust
/// use xliff_bridge::{Dataset, Language, Specification};
///
/// let dataset = Dataset::builder()
///     .specification(Specification::V1_2)
///     .source_language(Language::English)
///     .translation(Language::English, "Greeting", "Hello")
///     .translation(Language::French, "Greeting", "Bonjour")
///     .comment("Greeting", "greeting phrase")
///     .build();
///
/// assert_eq!(dataset.text(Language::French, "Greeting"), "Bonjour");
/// assert_eq!(dataset.target_languages(), vec![Language::French]);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    specification: Specification,
    source_language: Language,
    languages: BTreeMap<Language, BTreeMap<String, String>>,
    comments: BTreeMap<String, String>,
}

impl DatasetBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            specification: Specification::V2_0,
            source_language: Language::English,
            languages: BTreeMap::new(),
            comments: BTreeMap::new(),
        }
    }

    pub fn specification(mut self, specification: Specification) -> Self {
        self.specification = specification;
        self
    }

    pub fn source_language(mut self, language: Language) -> Self {
        self.source_language = language;
        self
    }

    /// Adds (or replaces) the text of `key` in `language`.
    pub fn translation(
        mut self,
        language: Language,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.languages
            .entry(language)
            .or_default()
            .insert(key.into(), text.into());
        self
    }

    /// Adds every `(key, text)` pair to `language`.
    ///
    /// The language becomes supported even when `translations` is empty.
    pub fn translations<I, K, V>(mut self, language: Language, translations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.languages.entry(language).or_default().extend(
            translations
                .into_iter()
                .map(|(key, text)| (key.into(), text.into())),
        );
        self
    }

    /// Sets the comment of `key`.
    pub fn comment(mut self, key: impl Into<String>, comment: impl Into<String>) -> Self {
        self.comments.insert(key.into(), comment.into());
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(
            self.specification,
            self.source_language,
            self.languages,
            self.comments,
        )
    }
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
