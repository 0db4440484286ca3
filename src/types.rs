//! Core, format-agnostic types for xliff-bridge.
//! Readers decode into a [`Dataset`]; dialects render a [`Dataset`] into documents.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{document::Document, error::Error, language::Language};

static EMPTY_TRANSLATIONS: BTreeMap<String, String> = BTreeMap::new();

/// XLIFF specification versions understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Specification {
    #[serde(rename = "1.0")]
    V1_0,
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "1.2")]
    V1_2,
    #[serde(rename = "2.0")]
    V2_0,
}

impl Specification {
    pub const ALL: [Specification; 4] = [
        Specification::V1_0,
        Specification::V1_1,
        Specification::V1_2,
        Specification::V2_0,
    ];

    /// The value of the root `version` attribute.
    pub fn version(&self) -> &'static str {
        match self {
            Specification::V1_0 => "1.0",
            Specification::V1_1 => "1.1",
            Specification::V1_2 => "1.2",
            Specification::V2_0 => "2.0",
        }
    }

    /// The document namespace written on the root element.
    pub fn namespace(&self) -> String {
        format!("urn:oasis:names:tc:xliff:document:{}", self.version())
    }

    /// Whether one document holds every target language (1.x) or one document
    /// is produced per target language (2.0).
    pub fn is_multilingual(&self) -> bool {
        !matches!(self, Specification::V2_0)
    }
}

impl Display for Specification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version())
    }
}

/// Accepts exactly `"1.0"`, `"1.1"`, `"1.2"` and `"2.0"`.
///
/// ```rust
/// use xliff_bridge::Specification;
/// use std::str::FromStr;
/// assert_eq!(Specification::from_str("1.2").unwrap(), Specification::V1_2);
/// assert!(Specification::from_str("1.3").is_err());
/// ```
impl FromStr for Specification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" => Ok(Specification::V1_0),
            "1.1" => Ok(Specification::V1_1),
            "1.2" => Ok(Specification::V1_2),
            "2.0" => Ok(Specification::V2_0),
            other => Err(Error::UnknownSpecification(other.to_string())),
        }
    }
}

/// A multi-language translation table: one key → text map per language plus
/// sparse per-key comments.
///
/// The canonical key set is the union of every language's keys and is computed
/// once at construction. A language map that lacks a canonical key reads as
/// an empty string for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDataset")]
pub struct Dataset {
    specification: Specification,
    source_language: Language,
    languages: BTreeMap<Language, BTreeMap<String, String>>,
    comments: BTreeMap<String, String>,
    #[serde(skip)]
    keys: BTreeSet<String>,
}

#[derive(Deserialize)]
struct RawDataset {
    specification: Specification,
    source_language: Language,
    languages: BTreeMap<Language, BTreeMap<String, String>>,
    #[serde(default)]
    comments: BTreeMap<String, String>,
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        Dataset::new(
            raw.specification,
            raw.source_language,
            raw.languages,
            raw.comments,
        )
    }
}

impl Dataset {
    pub fn new(
        specification: Specification,
        source_language: Language,
        languages: BTreeMap<Language, BTreeMap<String, String>>,
        comments: BTreeMap<String, String>,
    ) -> Self {
        let keys = languages
            .values()
            .flat_map(|translations| translations.keys().cloned())
            .collect();
        Dataset {
            specification,
            source_language,
            languages,
            comments,
            keys,
        }
    }

    /// Returns a fluent builder.
    pub fn builder() -> crate::builder::DatasetBuilder {
        crate::builder::DatasetBuilder::new()
    }

    pub fn specification(&self) -> Specification {
        self.specification
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    /// Same content, different active specification.
    pub fn with_specification(&self, specification: Specification) -> Self {
        Dataset {
            specification,
            ..self.clone()
        }
    }

    /// Languages that have a translation map, in stable order.
    pub fn supported_languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.keys().copied()
    }

    /// Supported languages other than the source language.
    pub fn target_languages(&self) -> Vec<Language> {
        self.supported_languages()
            .filter(|language| *language != self.source_language)
            .collect()
    }

    pub fn contains_language(&self, language: Language) -> bool {
        self.languages.contains_key(&language)
    }

    pub fn try_get_translations(&self, language: Language) -> Option<&BTreeMap<String, String>> {
        self.languages.get(&language)
    }

    /// Translations for `language`, or an empty map when the language is absent.
    pub fn translations(&self, language: Language) -> &BTreeMap<String, String> {
        self.try_get_translations(language)
            .unwrap_or(&EMPTY_TRANSLATIONS)
    }

    /// Text for a `(language, key)` pair; empty when either is absent.
    pub fn text(&self, language: Language, key: &str) -> &str {
        self.translations(language)
            .get(key)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn comment(&self, key: &str) -> Option<&str> {
        self.comments.get(key).map(String::as_str)
    }

    pub fn comments(&self) -> &BTreeMap<String, String> {
        &self.comments
    }

    /// The canonical key set: union of every language's keys.
    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Renders the dataset with its own specification.
    pub fn documents(&self) -> Result<Vec<Document>, Error> {
        self.documents_for(self.specification)
    }

    /// Renders the dataset with any specification.
    pub fn documents_for(&self, specification: Specification) -> Result<Vec<Document>, Error> {
        crate::formats::render(self, specification)
    }
}
