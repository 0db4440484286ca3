//! XLIFF 2.0: one bilingual document per target language.
//!
//! ```xml
//! <xliff version="2.0" srcLang="en" trgLang="fr" xmlns="urn:oasis:names:tc:xliff:document:2.0">
//!   <file id="ENToFR">
//!     <unit id="Greeting">
//!       <notes><note id="n:Greeting">greeting phrase</note></notes>
//!       <segment id="s:Greeting">
//!         <source>Hello</source>
//!         <target>Bonjour</target>
//!       </segment>
//!     </unit>
//!   </file>
//! </xliff>
//! ```

use std::collections::BTreeMap;

use crate::{
    document::{Document, Element},
    error::Error,
    formats::{export_targets, normalize_text},
    iso639,
    language::Language,
    options::ReadOptions,
    traits::Dialect,
    types::{Dataset, Specification},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Xliff20;

impl Dialect for Xliff20 {
    fn specification(&self) -> Specification {
        Specification::V2_0
    }

    fn render(&self, dataset: &Dataset) -> Result<Vec<Document>, Error> {
        let source = dataset.source_language();
        let documents = export_targets(dataset)?
            .into_iter()
            .map(|target| Document::new(source, vec![target], render_pair(dataset, target)))
            .collect();
        Ok(documents)
    }

    fn read(&self, root: &Element, options: &ReadOptions) -> Result<Dataset, Error> {
        let code = root
            .attribute("trgLang")
            .ok_or_else(|| Error::format("File must contain a \"trgLang\" attribute."))?;
        let language = options
            .resolve_language(code)
            .ok_or_else(|| Error::format(format!("Language code \"{}\" is not valid.", code)))?;

        let mut translations = BTreeMap::new();
        let mut comments = BTreeMap::new();

        for file in root.children("file") {
            for unit in file.children("unit") {
                let id = unit.attribute("id").ok_or_else(|| {
                    Error::format("Translation unit must contain an \"id\" attribute.")
                })?;
                if translations.contains_key(id) {
                    return Err(Error::format(format!(
                        "Duplicate translation unit ID \"{}\". Translation unit must contain an unique \"id\" attribute.",
                        id
                    )));
                }
                if let Some(note) = unit.child("notes").and_then(|notes| notes.child("note")) {
                    comments
                        .entry(id.to_string())
                        .or_insert_with(|| normalize_text(&note.inner_text()));
                }
                let segment = unit.child("segment").ok_or_else(|| {
                    Error::format("Translation unit must contain a \"segment\" node.")
                })?;
                let target = segment
                    .child("target")
                    .ok_or_else(|| Error::format("Segment must contain a \"target\" node."))?;
                translations.insert(id.to_string(), normalize_text(&target.inner_text()));
            }
        }

        let mut languages = BTreeMap::new();
        languages.insert(language, translations);
        Ok(Dataset::new(
            Specification::V2_0,
            options.resolved_source_language(),
            languages,
            comments,
        ))
    }

    fn declared_languages(&self, root: &Element) -> (Language, Vec<Language>) {
        let source = root
            .attribute("srcLang")
            .map(iso639::language_from_code_or_unknown)
            .unwrap_or(Language::Unknown);
        let targets = root
            .attribute("trgLang")
            .and_then(iso639::language_from_code)
            .into_iter()
            .collect();
        (source, targets)
    }
}

fn render_pair(dataset: &Dataset, target: Language) -> Element {
    let source = dataset.source_language();
    let source_code = source.code();
    let target_code = target.code();

    let mut file = Element::new("file").with_attribute(
        "id",
        format!(
            "{}To{}",
            source_code.to_uppercase(),
            target_code.to_uppercase()
        ),
    );

    for key in dataset.keys() {
        let mut unit = Element::new("unit").with_attribute("id", key.as_str());
        if let Some(comment) = dataset.comment(key) {
            unit.push_child(
                Element::new("notes").with_child(
                    Element::new("note")
                        .with_attribute("id", format!("n:{}", key))
                        .with_text(comment),
                ),
            );
        }
        unit.push_child(
            Element::new("segment")
                .with_attribute("id", format!("s:{}", key))
                .with_child(Element::new("source").with_text(dataset.text(source, key)))
                .with_child(Element::new("target").with_text(dataset.text(target, key))),
        );
        file.push_child(unit);
    }

    Element::new("xliff")
        .with_attribute("version", Specification::V2_0.version())
        .with_attribute("srcLang", source_code)
        .with_attribute("trgLang", target_code)
        .with_attribute("xmlns", Specification::V2_0.namespace())
        .with_child(file)
}
