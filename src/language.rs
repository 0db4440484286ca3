//! The closed set of human languages a translation table can carry.
//!
//! Languages are never free text inside the crate; they only become ISO-639
//! codes at the XML boundary (see [`crate::iso639`]).

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum Language {
    Afrikaans,
    Arabic,
    Basque,
    Belarusian,
    Bulgarian,
    Catalan,
    Chinese,
    Czech,
    Danish,
    Dutch,
    #[default]
    English,
    Estonian,
    Faroese,
    Finnish,
    French,
    German,
    Greek,
    Hebrew,
    Hungarian,
    Icelandic,
    Indonesian,
    Italian,
    Japanese,
    Korean,
    Latvian,
    Lithuanian,
    Norwegian,
    Polish,
    Portuguese,
    Romanian,
    Russian,
    SerboCroatian,
    Slovak,
    Slovenian,
    Spanish,
    Swedish,
    Thai,
    Turkish,
    Ukrainian,
    Vietnamese,
    ChineseSimplified,
    ChineseTraditional,
    /// Sentinel for codes with no close match.
    Unknown,
}

impl Language {
    pub const ALL: [Language; 43] = [
        Language::Afrikaans,
        Language::Arabic,
        Language::Basque,
        Language::Belarusian,
        Language::Bulgarian,
        Language::Catalan,
        Language::Chinese,
        Language::Czech,
        Language::Danish,
        Language::Dutch,
        Language::English,
        Language::Estonian,
        Language::Faroese,
        Language::Finnish,
        Language::French,
        Language::German,
        Language::Greek,
        Language::Hebrew,
        Language::Hungarian,
        Language::Icelandic,
        Language::Indonesian,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Latvian,
        Language::Lithuanian,
        Language::Norwegian,
        Language::Polish,
        Language::Portuguese,
        Language::Romanian,
        Language::Russian,
        Language::SerboCroatian,
        Language::Slovak,
        Language::Slovenian,
        Language::Spanish,
        Language::Swedish,
        Language::Thai,
        Language::Turkish,
        Language::Ukrainian,
        Language::Vietnamese,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
        Language::Unknown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::Afrikaans => "Afrikaans",
            Language::Arabic => "Arabic",
            Language::Basque => "Basque",
            Language::Belarusian => "Belarusian",
            Language::Bulgarian => "Bulgarian",
            Language::Catalan => "Catalan",
            Language::Chinese => "Chinese",
            Language::Czech => "Czech",
            Language::Danish => "Danish",
            Language::Dutch => "Dutch",
            Language::English => "English",
            Language::Estonian => "Estonian",
            Language::Faroese => "Faroese",
            Language::Finnish => "Finnish",
            Language::French => "French",
            Language::German => "German",
            Language::Greek => "Greek",
            Language::Hebrew => "Hebrew",
            Language::Hungarian => "Hungarian",
            Language::Icelandic => "Icelandic",
            Language::Indonesian => "Indonesian",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Latvian => "Latvian",
            Language::Lithuanian => "Lithuanian",
            Language::Norwegian => "Norwegian",
            Language::Polish => "Polish",
            Language::Portuguese => "Portuguese",
            Language::Romanian => "Romanian",
            Language::Russian => "Russian",
            Language::SerboCroatian => "SerboCroatian",
            Language::Slovak => "Slovak",
            Language::Slovenian => "Slovenian",
            Language::Spanish => "Spanish",
            Language::Swedish => "Swedish",
            Language::Thai => "Thai",
            Language::Turkish => "Turkish",
            Language::Ukrainian => "Ukrainian",
            Language::Vietnamese => "Vietnamese",
            Language::ChineseSimplified => "ChineseSimplified",
            Language::ChineseTraditional => "ChineseTraditional",
            Language::Unknown => "Unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Language::Unknown
    }

    /// Two-letter ISO-639-1 code used when writing this language to XLIFF.
    pub fn code(&self) -> &'static str {
        crate::iso639::code_from_language(*self)
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses a language by its English name, case-insensitively.
///
/// ```rust
/// use xliff_bridge::Language;
/// use std::str::FromStr;
/// assert_eq!(Language::from_str("french").unwrap(), Language::French);
/// assert!(Language::from_str("Klingon").is_err());
/// ```
impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .iter()
            .find(|language| language.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| Error::invalid_argument(format!("unknown language `{}`", wanted)))
    }
}
