//! XLIFF 1.0, 1.1 and 1.2: one document holding a `file` per target language.
//!
//! 1.1/1.2 nest `source`/`target` children in each `trans-unit`:
//!
//! ```xml
//! <xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
//!   <file source-language="en" target-language="fr" datatype="plaintext" original="FR.xml">
//!     <header>
//!       <note>Greeting: greeting phrase</note>
//!     </header>
//!     <body>
//!       <trans-unit id="Greeting">
//!         <source>Hello</source>
//!         <target>Bonjour</target>
//!       </trans-unit>
//!     </body>
//!   </file>
//! </xliff>
//! ```
//!
//! 1.0 has no `target-language`; its `source-language` carries the target code
//! and the translated text is the `trans-unit`'s own content.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    document::{Document, Element},
    error::Error,
    formats::{export_targets, header_note, normalize_text},
    iso639,
    language::Language,
    options::ReadOptions,
    traits::Dialect,
    types::{Dataset, Specification},
};

/// XLIFF 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xliff10;

/// XLIFF 1.1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xliff11;

/// XLIFF 1.2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xliff12;

macro_rules! impl_xliff1_dialect {
    ($dialect:ty, $specification:expr) => {
        impl Dialect for $dialect {
            fn specification(&self) -> Specification {
                $specification
            }

            fn render(&self, dataset: &Dataset) -> Result<Vec<Document>, Error> {
                Ok(vec![render(dataset, $specification)?])
            }

            fn read(&self, root: &Element, options: &ReadOptions) -> Result<Dataset, Error> {
                read(root, $specification, options)
            }

            fn declared_languages(&self, root: &Element) -> (Language, Vec<Language>) {
                declared_languages(root, $specification)
            }
        }
    };
}

impl_xliff1_dialect!(Xliff10, Specification::V1_0);
impl_xliff1_dialect!(Xliff11, Specification::V1_1);
impl_xliff1_dialect!(Xliff12, Specification::V1_2);

/// The `file` attribute naming the language whose text the file carries.
fn language_attribute(specification: Specification) -> &'static str {
    match specification {
        Specification::V1_0 => "source-language",
        _ => "target-language",
    }
}

fn render(dataset: &Dataset, specification: Specification) -> Result<Document, Error> {
    let source = dataset.source_language();
    let targets = export_targets(dataset)?;

    let mut root = Element::new("xliff")
        .with_attribute("version", specification.version())
        .with_attribute("xmlns", specification.namespace());
    for target in &targets {
        root.push_child(render_file(dataset, specification, *target));
    }

    Ok(Document::new(source, targets, root))
}

fn render_file(dataset: &Dataset, specification: Specification, target: Language) -> Element {
    let source = dataset.source_language();
    let target_code = target.code();

    let mut file = match specification {
        Specification::V1_0 => Element::new("file").with_attribute("source-language", target_code),
        _ => Element::new("file")
            .with_attribute("source-language", source.code())
            .with_attribute("target-language", target_code),
    }
    .with_attribute("datatype", "plaintext")
    .with_attribute("original", format!("{}.xml", target_code.to_uppercase()));

    let mut header = Element::new("header");
    for key in dataset.keys() {
        if let Some(comment) = dataset.comment(key) {
            header.push_child(Element::new("note").with_text(header_note(key, comment)));
        }
    }
    file.push_child(header);

    let mut body = Element::new("body");
    for key in dataset.keys() {
        let unit = Element::new("trans-unit").with_attribute("id", key.as_str());
        let unit = match specification {
            Specification::V1_0 => unit.with_text(dataset.text(target, key)),
            _ => unit
                .with_child(Element::new("source").with_text(dataset.text(source, key)))
                .with_child(Element::new("target").with_text(dataset.text(target, key))),
        };
        body.push_child(unit);
    }
    file.push_child(body);

    file
}

fn read(
    root: &Element,
    specification: Specification,
    options: &ReadOptions,
) -> Result<Dataset, Error> {
    let attribute = language_attribute(specification);
    let mut languages: BTreeMap<Language, BTreeMap<String, String>> = BTreeMap::new();
    let mut comments = BTreeMap::new();

    for file in root.children("file") {
        let code = file.attribute(attribute).ok_or_else(|| {
            Error::format(format!("File must contain \"{}\" attribute.", attribute))
        })?;
        let language = options
            .resolve_language(code)
            .ok_or_else(|| Error::format(format!("Language code \"{}\" is not valid.", code)))?;
        let body = file
            .child("body")
            .ok_or_else(|| Error::format("File node must contain \"body\" node."))?;

        let translations = languages.entry(language).or_default();
        for unit in body.children("trans-unit") {
            let id = unit.attribute("id").ok_or_else(|| {
                Error::format("Translation unit must contain an \"id\" attribute.")
            })?;
            if translations.contains_key(id) {
                return Err(Error::format(format!(
                    "Duplicate translation unit ID \"{}\". Translation unit must contain an unique \"id\" attribute.",
                    id
                )));
            }
            let text = match specification {
                Specification::V1_0 => unit.inner_text(),
                _ => unit
                    .child("target")
                    .ok_or_else(|| {
                        Error::format("Translation unit must contain a \"target\" node.")
                    })?
                    .inner_text(),
            };
            translations.insert(id.to_string(), normalize_text(&text));
        }

        if options.header_notes {
            if let Some(header) = file.child("header") {
                read_header_notes(header, translations, &mut comments);
            }
        }
    }

    debug!(
        "read XLIFF {} with {} language(s)",
        specification,
        languages.len()
    );
    Ok(Dataset::new(
        specification,
        options.resolved_source_language(),
        languages,
        comments,
    ))
}

/// Recovers `"{key}: {comment}"` notes for keys present in `translations`.
/// Keys may contain `": "` themselves; the longest key prefixing a note owns
/// it. The first note seen for a key wins.
fn read_header_notes(
    header: &Element,
    translations: &BTreeMap<String, String>,
    comments: &mut BTreeMap<String, String>,
) {
    for note in header.children("note") {
        let text = normalize_text(&note.inner_text());
        let owner = translations
            .keys()
            .filter(|key| {
                text.strip_prefix(key.as_str())
                    .is_some_and(|rest| rest.starts_with(": "))
            })
            .max_by_key(|key| key.len());
        let Some(key) = owner else {
            continue;
        };
        if !comments.contains_key(key) {
            let comment = &text[key.len() + 2..];
            comments.insert(key.clone(), comment.to_string());
        }
    }
}

fn declared_languages(root: &Element, specification: Specification) -> (Language, Vec<Language>) {
    let files: Vec<&Element> = root.children("file").collect();
    let source = match specification {
        // 1.0 files only name the language they carry.
        Specification::V1_0 => Language::Unknown,
        _ => files
            .iter()
            .find_map(|file| file.attribute("source-language"))
            .map(iso639::language_from_code_or_unknown)
            .unwrap_or(Language::Unknown),
    };
    let attribute = language_attribute(specification);
    let targets = files
        .iter()
        .filter_map(|file| file.attribute(attribute))
        .filter_map(iso639::language_from_code)
        .collect();
    (source, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    fn greeting() -> Dataset {
        Dataset::builder()
            .source_language(Language::English)
            .translation(Language::English, "Greeting", "Hello")
            .translation(Language::French, "Greeting", "Bonjour")
            .comment("Greeting", "greeting phrase")
            .build()
    }

    #[test]
    fn test_greeting_scenario_1_2() {
        let documents = Xliff12.render(&greeting()).unwrap();
        assert_eq!(documents.len(), 1);
        let document = &documents[0];
        assert_eq!(document.source_language(), Language::English);
        assert_eq!(document.target_languages(), [Language::French]);

        let root = document.root();
        assert_eq!(root.attribute("version"), Some("1.2"));
        let files: Vec<&Element> = root.children("file").collect();
        assert_eq!(files.len(), 1);
        let file = files[0];
        assert_eq!(file.attribute("source-language"), Some("en"));
        assert_eq!(file.attribute("target-language"), Some("fr"));
        assert_eq!(file.attribute("datatype"), Some("plaintext"));
        assert_eq!(file.attribute("original"), Some("FR.xml"));

        let notes: Vec<String> = file
            .child("header")
            .unwrap()
            .children("note")
            .map(Element::inner_text)
            .collect();
        assert_eq!(notes, vec!["Greeting: greeting phrase"]);

        let units: Vec<&Element> = file.child("body").unwrap().children("trans-unit").collect();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].attribute("id"), Some("Greeting"));
        assert_eq!(units[0].child("source").unwrap().inner_text(), "Hello");
        assert_eq!(units[0].child("target").unwrap().inner_text(), "Bonjour");
    }

    #[test]
    fn test_1_0_puts_target_code_in_source_language() {
        let documents = Xliff10.render(&greeting()).unwrap();
        let file = documents[0].root().child("file").unwrap();
        assert_eq!(file.attribute("source-language"), Some("fr"));
        assert_eq!(file.attribute("target-language"), None);
        let unit = file.child("body").unwrap().child("trans-unit").unwrap();
        assert!(unit.child("source").is_none());
        assert_eq!(unit.inner_text(), "Bonjour");
    }

    #[test]
    fn test_one_file_per_target_in_order() {
        let dataset = Dataset::builder()
            .source_language(Language::German)
            .translation(Language::German, "a", "A")
            .translation(Language::Spanish, "a", "A-es")
            .translation(Language::French, "b", "B-fr")
            .build();
        let documents = Xliff11.render(&dataset).unwrap();
        assert_eq!(documents.len(), 1);
        let codes: Vec<&str> = documents[0]
            .root()
            .children("file")
            .filter_map(|file| file.attribute("target-language"))
            .collect();
        assert_eq!(codes, vec!["fr", "es"]);
        assert_eq!(
            documents[0].target_languages(),
            [Language::French, Language::Spanish]
        );

        let french = documents[0].root().child("file").unwrap();
        let units: Vec<&Element> = french.child("body").unwrap().children("trans-unit").collect();
        assert_eq!(units.len(), 2);
        assert!(french.child("header").unwrap().elements().next().is_none());
    }

    #[test]
    fn test_read_round_trips_targets() {
        let dialects: [&dyn Dialect; 3] = [&Xliff10, &Xliff11, &Xliff12];
        for dialect in dialects {
            let rendered = dialect.render(&greeting()).unwrap().remove(0);
            let xml = rendered.to_xml_string().unwrap();
            let parsed = Document::from_str(&xml).unwrap();
            let dataset = dialect.read(parsed.root(), &ReadOptions::default()).unwrap();
            assert_eq!(dataset.specification(), dialect.specification());
            assert_eq!(dataset.source_language(), Language::English);
            assert_eq!(dataset.text(Language::French, "Greeting"), "Bonjour");
            assert!(dataset.comments().is_empty());
        }
    }

    #[test]
    fn test_header_notes_are_opt_in() {
        let rendered = Xliff12.render(&greeting()).unwrap().remove(0);
        let parsed = Document::from_str(&rendered.to_xml_string().unwrap()).unwrap();
        let options = ReadOptions::new().with_header_notes(true);
        let dataset = Xliff12.read(parsed.root(), &options).unwrap();
        assert_eq!(dataset.comment("Greeting"), Some("greeting phrase"));
    }

    #[test]
    fn test_header_notes_ignore_unknown_keys() {
        let xml = r#"<xliff version="1.2"><file target-language="fr"><header><note>Other: x</note><note>a: first</note><note>a: second</note><note>no separator</note></header><body><trans-unit id="a"><target>A</target></trans-unit></body></file></xliff>"#;
        let document = Document::from_str(xml).unwrap();
        let options = ReadOptions::new().with_header_notes(true);
        let dataset = Xliff12.read(document.root(), &options).unwrap();
        assert_eq!(dataset.comments().len(), 1);
        assert_eq!(dataset.comment("a"), Some("first"));
    }

    #[test]
    fn test_header_notes_for_keys_containing_the_separator() {
        let dataset = Dataset::builder()
            .specification(Specification::V1_2)
            .translation(Language::English, "Title: Intro", "Intro")
            .translation(Language::French, "Title: Intro", "Introduction")
            .translation(Language::French, "Title", "Titre")
            .comment("Title: Intro", "chapter one")
            .comment("Title", "book: title")
            .build();
        let rendered = Xliff12.render(&dataset).unwrap().remove(0);
        let parsed = Document::from_str(&rendered.to_xml_string().unwrap()).unwrap();
        let options = ReadOptions::new().with_header_notes(true);
        let read = Xliff12.read(parsed.root(), &options).unwrap();
        assert_eq!(read.comment("Title: Intro"), Some("chapter one"));
        assert_eq!(read.comment("Title"), Some("book: title"));
    }

    #[test]
    fn test_read_errors() {
        let cases: [(&dyn Dialect, &str, &str); 6] = [
            (
                &Xliff12,
                r#"<xliff version="1.2"><file source-language="en"><body/></file></xliff>"#,
                "File must contain \"target-language\" attribute.",
            ),
            (
                &Xliff10,
                r#"<xliff version="1.0"><file target-language="fr"><body/></file></xliff>"#,
                "File must contain \"source-language\" attribute.",
            ),
            (
                &Xliff11,
                r#"<xliff version="1.1"><file target-language="zz"><body/></file></xliff>"#,
                "Language code \"zz\" is not valid.",
            ),
            (
                &Xliff11,
                r#"<xliff version="1.1"><file target-language="fr"/></xliff>"#,
                "File node must contain \"body\" node.",
            ),
            (
                &Xliff12,
                r#"<xliff version="1.2"><file target-language="fr"><body><trans-unit id="a"><source>A</source></trans-unit></body></file></xliff>"#,
                "Translation unit must contain a \"target\" node.",
            ),
            (
                &Xliff10,
                r#"<xliff version="1.0"><file source-language="fr"><body><trans-unit id="a">A</trans-unit><trans-unit id="a">B</trans-unit></body></file></xliff>"#,
                "Duplicate translation unit ID \"a\"",
            ),
        ];
        for (dialect, xml, expected) in cases {
            let document = Document::from_str(xml).unwrap();
            let error = dialect
                .read(document.root(), &ReadOptions::default())
                .unwrap_err();
            assert!(error.is_format_error());
            assert!(
                error.to_string().contains(expected),
                "`{}` does not mention `{}`",
                error,
                expected
            );
        }
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let xml = r#"<xliff version="1.2"><file target-language="fr"><body><trans-unit><target/></trans-unit></body></file></xliff>"#;
        let document = Document::from_str(xml).unwrap();
        let error = Xliff12
            .read(document.root(), &ReadOptions::default())
            .unwrap_err();
        assert!(error.to_string().contains("\"id\" attribute"));
    }

    #[test]
    fn test_duplicate_ids_are_checked_per_language() {
        let xml = r#"<xliff version="1.2"><file target-language="fr"><body><trans-unit id="a"><target>A-fr</target></trans-unit></body></file><file target-language="de"><body><trans-unit id="a"><target>A-de</target></trans-unit></body></file></xliff>"#;
        let document = Document::from_str(xml).unwrap();
        let dataset = Xliff12
            .read(document.root(), &ReadOptions::default())
            .unwrap();
        assert_eq!(dataset.text(Language::French, "a"), "A-fr");
        assert_eq!(dataset.text(Language::German, "a"), "A-de");
    }

    #[test]
    fn test_declared_languages() {
        let documents = Xliff11.render(&greeting()).unwrap();
        let (source, targets) = declared_languages(documents[0].root(), Specification::V1_1);
        assert_eq!(source, Language::English);
        assert_eq!(targets, vec![Language::French]);

        let documents = Xliff10.render(&greeting()).unwrap();
        let (source, targets) = declared_languages(documents[0].root(), Specification::V1_0);
        assert_eq!(source, Language::Unknown);
        assert_eq!(targets, vec![Language::French]);
    }
}
