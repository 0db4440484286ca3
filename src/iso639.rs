//! ISO-639-1 code table.
//!
//! The forward direction (code → language) covers every ISO-639-1 code. Codes
//! with no close counterpart in [`Language`] map to [`Language::Unknown`], and a
//! number of regional or minority codes deliberately collapse onto the nearest
//! supported major language. The table is curated policy; lookups must not
//! try to be smarter than it.
//!
//! The reverse direction (language → code) yields one canonical code per
//! language and falls back to `"en"`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

use crate::language::Language;

/// Code returned for languages without a canonical code.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

const CODE_TO_LANGUAGE: &[(&str, Language)] = &[
    ("aa", Language::Unknown),       // Afar
    ("ab", Language::Unknown),       // Abkhazian
    ("af", Language::Afrikaans),     // Afrikaans
    ("ak", Language::Unknown),       // Akan
    ("sq", Language::Unknown),       // Albanian
    ("am", Language::Unknown),       // Amharic
    ("ar", Language::Arabic),        // Arabic
    ("hy", Language::Unknown),       // Armenian
    ("as", Language::Unknown),       // Assamese
    ("av", Language::Unknown),       // Avaric
    ("ae", Language::Unknown),       // Avestan
    ("ay", Language::Unknown),       // Aymara
    ("az", Language::Turkish),       // Azerbaijani
    ("ba", Language::Unknown),       // Bashkir
    ("bm", Language::Unknown),       // Bambara
    ("eu", Language::Basque),        // Basque
    ("be", Language::Belarusian),    // Belarusian
    ("bn", Language::Unknown),       // Bengali
    ("bh", Language::Unknown),       // Bihari languages
    ("bi", Language::Unknown),       // Bislama
    ("bo", Language::Unknown),       // Tibetan
    ("bs", Language::SerboCroatian), // Bosnian
    ("br", Language::Unknown),       // Breton
    ("bg", Language::Bulgarian),     // Bulgarian
    ("by", Language::Unknown),       // Burmese
    ("ca", Language::Catalan),       // Catalan
    ("cs", Language::Czech),         // Czech
    ("ch", Language::Unknown),       // Chamorro
    ("ce", Language::Unknown),       // Chechen
    ("zh", Language::Chinese),       // Chinese
    ("cu", Language::Unknown),       // Church Slavic
    ("cv", Language::Unknown),       // Chuvash
    ("kw", Language::Unknown),       // Cornish
    ("co", Language::Italian),       // Corsican
    ("cr", Language::Unknown),       // Cree
    ("cy", Language::English),       // Welsh
    ("da", Language::Danish),        // Danish
    ("de", Language::German),        // German
    ("dv", Language::Unknown),       // Divehi
    ("nl", Language::Dutch),         // Dutch
    ("dz", Language::Unknown),       // Dzongkha
    ("el", Language::Greek),         // Greek
    ("en", Language::English),       // English
    ("eo", Language::Unknown),       // Esperanto
    ("et", Language::Estonian),      // Estonian
    ("ee", Language::Unknown),       // Ewe
    ("fo", Language::Faroese),       // Faroese
    ("fa", Language::Unknown),       // Persian
    ("fj", Language::Unknown),       // Fijian
    ("fi", Language::Finnish),       // Finnish
    ("fr", Language::French),        // French
    ("fy", Language::Dutch),         // Western Frisian
    ("ff", Language::Unknown),       // Fulah
    ("ka", Language::Unknown),       // Georgian
    ("gd", Language::English),       // Gaelic
    ("ga", Language::English),       // Irish
    ("gl", Language::Unknown),       // Galician
    ("gv", Language::Unknown),       // Manx
    ("gn", Language::Unknown),       // Guarani
    ("gu", Language::Unknown),       // Gujarati
    ("ht", Language::French),        // Haitian
    ("ha", Language::Unknown),       // Hausa
    ("he", Language::Hebrew),        // Hebrew
    ("hz", Language::Unknown),       // Herero
    ("hi", Language::Unknown),       // Hindi
    ("ho", Language::Unknown),       // Hiri Motu
    ("hr", Language::SerboCroatian), // Croatian
    ("hu", Language::Hungarian),     // Hungarian
    ("ig", Language::Unknown),       // Igbo
    ("is", Language::Icelandic),     // Icelandic
    ("io", Language::Unknown),       // Ido
    ("ii", Language::Unknown),       // Sichuan Yi
    ("iu", Language::Unknown),       // Inuktitut
    ("ie", Language::Unknown),       // Interlingue
    ("ia", Language::Unknown),       // Interlingua
    ("id", Language::Indonesian),    // Indonesian
    ("ik", Language::Unknown),       // Inupiak
    ("it", Language::Italian),       // Italian
    ("jv", Language::Unknown),       // Javanese
    ("ja", Language::Japanese),      // Japanese
    ("kl", Language::Danish),        // Kalaallisut
    ("kn", Language::Unknown),       // Kannada
    ("ks", Language::Unknown),       // Kashmiri
    ("kr", Language::Unknown),       // Kanuri
    ("kk", Language::Turkish),       // Kazakh
    ("km", Language::Unknown),       // Central Khmer
    ("ki", Language::Unknown),       // Kikuyu
    ("rw", Language::Unknown),       // Kinyarwanda
    ("ky", Language::Turkish),       // Kirghiz
    ("kv", Language::Unknown),       // Komi
    ("kg", Language::Unknown),       // Kongo
    ("ko", Language::Korean),        // Korean
    ("kj", Language::Unknown),       // Kuanyama
    ("ku", Language::Unknown),       // Kurdish
    ("lo", Language::Unknown),       // Lao
    ("la", Language::Unknown),       // Latin
    ("lv", Language::Latvian),       // Latvian
    ("li", Language::Unknown),       // Limburgan
    ("ln", Language::Unknown),       // Lingala
    ("lt", Language::Lithuanian),    // Lithuanian
    ("lb", Language::German),        // Luxembourgish
    ("lu", Language::Unknown),       // Luba-Katanga
    ("lg", Language::Unknown),       // Ganda
    ("mk", Language::SerboCroatian), // Macedonian
    ("mh", Language::Unknown),       // Marshallese
    ("ml", Language::Unknown),       // Malayalam
    ("mi", Language::Unknown),       // Maori
    ("mr", Language::Unknown),       // Marathi
    ("ms", Language::Unknown),       // Malay
    ("mg", Language::Unknown),       // Malagasy
    ("mt", Language::Unknown),       // Maltese
    ("mn", Language::Unknown),       // Mongolian
    ("my", Language::Unknown),       // Burmese
    ("na", Language::Unknown),       // Nauru
    ("nv", Language::Unknown),       // Navajo
    ("nr", Language::Unknown),       // Ndebele, South
    ("nd", Language::Unknown),       // Ndebele, North
    ("ng", Language::Unknown),       // Ndonga
    ("ne", Language::Unknown),       // Nepali
    ("nn", Language::Norwegian),     // Norwegian
    ("nb", Language::Norwegian),     // Bokmal, Norwegian
    ("no", Language::Norwegian),     // Norwegian
    ("ny", Language::Unknown),       // Chichewa
    ("oc", Language::Unknown),       // Occitan
    ("oj", Language::Unknown),       // Ojibwa
    ("or", Language::Unknown),       // Oriya
    ("om", Language::Unknown),       // Oromo
    ("os", Language::Unknown),       // Ossetian
    ("pa", Language::Unknown),       // Panjabi
    ("pi", Language::Unknown),       // Pali
    ("pl", Language::Polish),        // Polish
    ("pt", Language::Portuguese),    // Portuguese
    ("ps", Language::Unknown),       // Pushto
    ("qu", Language::Unknown),       // Quechua
    ("rm", Language::Romanian),      // Romansh
    ("ro", Language::Romanian),      // Romanian
    ("rn", Language::Unknown),       // Rundi
    ("ru", Language::Russian),       // Russian
    ("sg", Language::Unknown),       // Sango
    ("sa", Language::Unknown),       // Sanskrit
    ("si", Language::Unknown),       // Sinhala
    ("sk", Language::Slovak),        // Slovak
    ("sl", Language::Slovenian),     // Slovenian
    ("se", Language::Unknown),       // Northern Sami
    ("sm", Language::Unknown),       // Samoan
    ("sn", Language::Unknown),       // Shona
    ("sd", Language::Unknown),       // Sindhi
    ("so", Language::Unknown),       // Somali
    ("st", Language::Unknown),       // Sotho, Southern
    ("es", Language::Spanish),       // Spanish
    ("sc", Language::Unknown),       // Sardinian
    ("sr", Language::SerboCroatian), // Serbian
    ("ss", Language::Unknown),       // Swati
    ("su", Language::Unknown),       // Sundanese
    ("sw", Language::Unknown),       // Swahili
    ("sv", Language::Swedish),       // Swedish
    ("ty", Language::French),        // Tahitian
    ("ta", Language::Unknown),       // Tamil
    ("tt", Language::Turkish),       // Tatar
    ("te", Language::Unknown),       // Telugu
    ("tg", Language::Unknown),       // Tajik
    ("tl", Language::Unknown),       // Tagalog
    ("th", Language::Thai),          // Thai
    ("ti", Language::Unknown),       // Tigrinya
    ("to", Language::Unknown),       // Tonga
    ("tn", Language::Unknown),       // Tswana
    ("ts", Language::Unknown),       // Tsonga
    ("tk", Language::Turkish),       // Turkmen
    ("tr", Language::Turkish),       // Turkish
    ("tw", Language::Unknown),       // Twi
    ("ug", Language::Turkish),       // Uighur
    ("uk", Language::Ukrainian),     // Ukrainian
    ("ur", Language::Unknown),       // Urdu
    ("uz", Language::Turkish),       // Uzbek
    ("ve", Language::Unknown),       // Venda
    ("vi", Language::Vietnamese),    // Vietnamese
    ("vo", Language::Unknown),       // Volapük
    ("wa", Language::Unknown),       // Walloon
    ("wo", Language::Unknown),       // Wolof
    ("xh", Language::Unknown),       // Xhosa
    ("yi", Language::German),        // Yiddish
    ("yo", Language::Unknown),       // Yoruba
    ("za", Language::Unknown),       // Zhuang
    ("zu", Language::Unknown),       // Zulu
];

lazy_static! {
    static ref LANGUAGE_LOOKUP: HashMap<&'static str, Language> =
        CODE_TO_LANGUAGE.iter().copied().collect();
}

fn lookup(code: &str) -> Option<Language> {
    LANGUAGE_LOOKUP.get(code.trim().to_lowercase().as_str()).copied()
}

/// Resolves a language code, returning `None` for unknown codes and for codes
/// that map to [`Language::Unknown`].
///
/// ```rust
/// use xliff_bridge::{Language, iso639};
/// assert_eq!(iso639::language_from_code(" FR "), Some(Language::French));
/// assert_eq!(iso639::language_from_code("aa"), None);
/// ```
pub fn language_from_code(code: &str) -> Option<Language> {
    lookup(code).filter(|language| !language.is_unknown())
}

/// Total variant of [`language_from_code`].
pub fn language_from_code_or_unknown(code: &str) -> Language {
    lookup(code).unwrap_or(Language::Unknown)
}

pub fn is_valid_code(code: &str) -> bool {
    language_from_code(code).is_some()
}

/// Resolves a region-qualified tag such as `fr-FR` or `pt_BR` through its
/// primary language subtag. Only used when a reader opts into region tags;
/// the table itself knows bare codes only.
pub fn language_from_tag(tag: &str) -> Option<Language> {
    if let Some(language) = language_from_code(tag) {
        return Some(language);
    }
    let langid: LanguageIdentifier = tag.trim().parse().ok()?;
    language_from_code(langid.language.as_str())
}

/// Canonical two-letter code for `language`; never empty.
pub fn code_from_language(language: Language) -> &'static str {
    match language {
        Language::Afrikaans => "af",
        Language::Arabic => "ar",
        Language::Basque => "eu",
        Language::Belarusian => "be",
        Language::Bulgarian => "bg",
        Language::Catalan => "ca",
        Language::Chinese => "zh",
        Language::Czech => "cs",
        Language::Danish => "da",
        Language::Dutch => "nl",
        Language::English => "en",
        Language::Estonian => "et",
        Language::Faroese => "fo",
        Language::Finnish => "fi",
        Language::French => "fr",
        Language::German => "de",
        Language::Greek => "el",
        Language::Hebrew => "he",
        Language::Hungarian => "hu",
        Language::Icelandic => "is",
        Language::Indonesian => "id",
        Language::Italian => "it",
        Language::Japanese => "ja",
        Language::Korean => "ko",
        Language::Latvian => "lv",
        Language::Lithuanian => "lt",
        Language::Norwegian => "no",
        Language::Polish => "pl",
        Language::Portuguese => "pt",
        Language::Romanian => "ro",
        Language::Russian => "ru",
        Language::SerboCroatian => "sr",
        Language::Slovak => "sk",
        Language::Slovenian => "sl",
        Language::Spanish => "es",
        Language::Swedish => "sv",
        Language::Thai => "th",
        Language::Turkish => "tr",
        Language::Ukrainian => "uk",
        Language::Vietnamese => "vi",
        Language::ChineseSimplified => "zh",
        Language::ChineseTraditional => "zh",
        Language::Unknown => DEFAULT_LANGUAGE_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(language_from_code("DE"), Some(Language::German));
        assert_eq!(language_from_code("\tja \n"), Some(Language::Japanese));
    }

    #[test]
    fn test_approximations_are_preserved() {
        assert_eq!(language_from_code("az"), Some(Language::Turkish));
        assert_eq!(language_from_code("uz"), Some(Language::Turkish));
        assert_eq!(language_from_code("hr"), Some(Language::SerboCroatian));
        assert_eq!(language_from_code("bs"), Some(Language::SerboCroatian));
        assert_eq!(language_from_code("cy"), Some(Language::English));
        assert_eq!(language_from_code("ga"), Some(Language::English));
        assert_eq!(language_from_code("co"), Some(Language::Italian));
        assert_eq!(language_from_code("fy"), Some(Language::Dutch));
        assert_eq!(language_from_code("ht"), Some(Language::French));
        assert_eq!(language_from_code("kl"), Some(Language::Danish));
        assert_eq!(language_from_code("yi"), Some(Language::German));
        assert_eq!(language_from_code("rm"), Some(Language::Romanian));
        assert_eq!(language_from_code("nb"), Some(Language::Norwegian));
        assert_eq!(language_from_code("nn"), Some(Language::Norwegian));
    }

    #[test]
    fn test_unknown_codes_are_not_valid() {
        assert!(!is_valid_code("aa"));
        assert!(!is_valid_code("hi"));
        assert!(!is_valid_code("xx"));
        assert!(!is_valid_code(""));
        assert_eq!(language_from_code_or_unknown("hi"), Language::Unknown);
        assert_eq!(language_from_code_or_unknown("xx"), Language::Unknown);
        assert!(is_valid_code("fr"));
    }

    #[test]
    fn test_region_tags_are_not_codes() {
        for tag in ["fr-FR", "en_GB", "de-AT", "pt-BR"] {
            assert!(!is_valid_code(tag), "{} accepted as a code", tag);
            assert_eq!(language_from_code(tag), None);
            assert_eq!(language_from_code_or_unknown(tag), Language::Unknown);
        }
    }

    #[test]
    fn test_region_tags_use_primary_subtag() {
        assert_eq!(language_from_tag("fr-FR"), Some(Language::French));
        assert_eq!(language_from_tag("pt_BR"), Some(Language::Portuguese));
        assert_eq!(language_from_tag("zh-Hant-TW"), Some(Language::Chinese));
        assert_eq!(language_from_tag(" DE "), Some(Language::German));
        assert_eq!(language_from_tag("hi-IN"), None);
        assert_eq!(language_from_tag("not a tag"), None);
    }

    #[test]
    fn test_code_from_language_is_total() {
        for language in Language::ALL {
            let code = code_from_language(language);
            assert_eq!(code.len(), 2, "{} has no two-letter code", language);
        }
        assert_eq!(code_from_language(Language::Unknown), "en");
        assert_eq!(code_from_language(Language::ChineseTraditional), "zh");
    }

    #[test]
    fn test_canonical_codes_resolve_back() {
        for language in Language::ALL {
            if language.is_unknown() {
                continue;
            }
            let back = language_from_code(code_from_language(language)).unwrap();
            match language {
                Language::ChineseSimplified | Language::ChineseTraditional => {
                    assert_eq!(back, Language::Chinese)
                }
                _ => assert_eq!(back, language),
            }
        }
    }

    #[test]
    fn test_table_covers_iso_639_1() {
        assert_eq!(LANGUAGE_LOOKUP.len(), CODE_TO_LANGUAGE.len());
        assert!(CODE_TO_LANGUAGE.len() >= 180);
    }
}
