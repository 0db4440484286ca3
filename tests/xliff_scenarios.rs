use indoc::indoc;
use std::str::FromStr;
use tempfile::tempdir;
use xliff_bridge::codec::{self, export_to_string, try_export_documents};
use xliff_bridge::store::LocalRecord;
use xliff_bridge::{
    Dataset, Document, Error, Language, MemoryStore, Parser, ReadOptions, Specification,
    WriteOptions, render,
};

fn greeting(specification: Specification) -> Dataset {
    Dataset::builder()
        .specification(specification)
        .source_language(Language::English)
        .translation(Language::English, "Greeting", "Hello")
        .translation(Language::French, "Greeting", "Bonjour")
        .comment("Greeting", "greeting phrase")
        .build()
}

#[test]
fn test_greeting_rendered_as_xliff_1_2() {
    let documents = render(&greeting(Specification::V1_2), Specification::V1_2).unwrap();
    assert_eq!(documents.len(), 1);
    let xml = export_to_string(&documents[0], &WriteOptions::default()).unwrap();

    let expected = indoc! {r#"
        <?xml version="1.0" encoding="utf-8"?>
        <!DOCTYPE xliff PUBLIC "-//XLIFF//DTD XLIFF//EN" "http://www.oasis-open.org/committees/xliff/documents/xliff.dtd">
        <xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
          <file source-language="en" target-language="fr" datatype="plaintext" original="FR.xml">
            <header>
              <note>Greeting: greeting phrase</note>
            </header>
            <body>
              <trans-unit id="Greeting">
                <source>Hello</source>
                <target>Bonjour</target>
              </trans-unit>
            </body>
          </file>
        </xliff>
    "#};
    assert_eq!(xml, expected);
}

#[test]
fn test_greeting_rendered_as_xliff_2_0() {
    let documents = render(&greeting(Specification::V2_0), Specification::V2_0).unwrap();
    assert_eq!(documents.len(), 1);
    let xml = export_to_string(
        &documents[0],
        &WriteOptions::new().with_doctype(false),
    )
    .unwrap();

    let expected = indoc! {r#"
        <?xml version="1.0" encoding="utf-8"?>
        <xliff version="2.0" srcLang="en" trgLang="fr" xmlns="urn:oasis:names:tc:xliff:document:2.0">
          <file id="ENToFR">
            <unit id="Greeting">
              <notes>
                <note id="n:Greeting">greeting phrase</note>
              </notes>
              <segment id="s:Greeting">
                <source>Hello</source>
                <target>Bonjour</target>
              </segment>
            </unit>
          </file>
        </xliff>
    "#};
    assert_eq!(xml, expected);
}

#[test]
fn test_unknown_specification_is_named() {
    let error = Specification::from_str("1.3").unwrap_err();
    assert!(matches!(error, Error::UnknownSpecification(ref v) if v == "1.3"));

    let error = codec::parse_str(r#"<xliff version="1.3"><file/></xliff>"#).unwrap_err();
    assert_eq!(
        error.to_string(),
        "XML document does not conform XLIFF specification: XLIFF version \"1.3\" is not supported."
    );
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let xml = indoc! {r#"
        <xliff version="2.0" srcLang="en" trgLang="de">
          <file id="ENToDE">
            <unit id="Greeting"><segment><source/><target>Hallo</target></segment></unit>
            <unit id="Greeting"><segment><source/><target>Servus</target></segment></unit>
          </file>
        </xliff>
    "#};
    let error = codec::parse_str(xml).unwrap_err();
    assert!(error.is_format_error());
    assert!(
        error
            .to_string()
            .contains("Duplicate translation unit ID \"Greeting\"")
    );
}

#[test]
fn test_carriage_returns_are_stripped() {
    let xml = "<xliff version=\"1.0\">\r\n<file source-language=\"fr\">\r\n<body>\r\n<trans-unit id=\"a\">ligne 1\r\nligne 2</trans-unit>\r\n</body>\r\n</file>\r\n</xliff>\r\n";
    let dataset = codec::parse_str(xml).unwrap();
    assert_eq!(dataset.text(Language::French, "a"), "ligne 1\nligne 2");
}

#[test]
fn test_utf16_file_is_transcoded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("utf16.xlf");
    let xml = r#"<xliff version="1.2"><file target-language="ja"><body><trans-unit id="a"><target>こんにちは</target></trans-unit></body></file></xliff>"#;
    let mut bytes = vec![0xFF, 0xFE];
    for unit in xml.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    std::fs::write(&path, bytes).unwrap();

    let dataset = codec::try_import_from_file(&path, &ReadOptions::default()).unwrap();
    assert_eq!(dataset.text(Language::Japanese, "a"), "こんにちは");
}

#[test]
fn test_region_tags_are_rejected_by_default() {
    let cases = [
        (
            r#"<xliff version="2.0" srcLang="en" trgLang="fr-CA"><file><unit id="a"><segment><target>Allo</target></segment></unit></file></xliff>"#,
            "fr-CA",
        ),
        (
            r#"<xliff version="1.2"><file target-language="de-AT"><body><trans-unit id="a"><target>Servus</target></trans-unit></body></file></xliff>"#,
            "de-AT",
        ),
    ];
    for (xml, tag) in cases {
        let error = codec::parse_str(xml).unwrap_err();
        assert!(error.is_format_error());
        assert!(
            error
                .to_string()
                .ends_with(&format!("Language code \"{}\" is not valid.", tag))
        );
    }
}

#[test]
fn test_region_tags_resolve_on_request() {
    let xml = r#"<xliff version="2.0" srcLang="en-US" trgLang="pt-BR"><file><unit id="a"><segment><target>Olá</target></segment></unit></file></xliff>"#;
    let document = Document::from_str(xml).unwrap();
    assert!(document.target_languages().is_empty());

    let options = ReadOptions::new().with_region_tags(true);
    let dataset = codec::read_document(&document, &options).unwrap();
    assert_eq!(dataset.text(Language::Portuguese, "a"), "Olá");
}

#[test]
fn test_header_notes_recovered_on_request() {
    let xml = export_to_string(
        &render(&greeting(Specification::V1_1), Specification::V1_1).unwrap()[0],
        &WriteOptions::default(),
    )
    .unwrap();
    assert!(codec::parse_str(&xml).unwrap().comments().is_empty());

    let options = ReadOptions::new().with_header_notes(true);
    let dataset = codec::parse_with(xml.as_bytes(), &options).unwrap();
    assert_eq!(dataset.comment("Greeting"), Some("greeting phrase"));
}

#[test]
fn test_export_from_store_to_multiple_files() {
    let store: MemoryStore = [
        LocalRecord::new("Assets/Greeting.asset")
            .with_translation(Language::English, "Hello")
            .with_translation(Language::French, "Bonjour")
            .with_translation(Language::German, "Hallo")
            .with_comment("greeting phrase"),
        LocalRecord::new("Assets/Farewell.asset").with_translation(Language::English, "Bye"),
    ]
    .into_iter()
    .collect();
    let dataset = Dataset::from_store(
        Specification::V2_0,
        Language::English,
        &[Language::French, Language::German],
        &store,
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let written = try_export_documents(
        &dataset.documents().unwrap(),
        dir.path().join("translations.xml"),
        &WriteOptions::default(),
    )
    .unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["translations_ENToFR.xml", "translations_ENToDE.xml"]
    );
    for path in &written {
        assert_eq!(path.parent(), Some(dir.path()));
    }

    let german = codec::import_from_file(&written[1]).unwrap();
    assert_eq!(
        german.text(Language::German, "Assets/Greeting.asset"),
        "Hallo"
    );
    assert_eq!(german.text(Language::German, "Assets/Farewell.asset"), "");
    assert_eq!(
        german.comment("Assets/Greeting.asset"),
        Some("greeting phrase")
    );
}

#[test]
fn test_same_dataset_in_every_version() {
    let dataset = greeting(Specification::V2_0);
    for specification in Specification::ALL {
        let documents = dataset.documents_for(specification).unwrap();
        for document in &documents {
            let xml = document.to_xml_string().unwrap();
            assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
            let parsed = codec::parse_str(&xml).unwrap();
            assert_eq!(parsed.specification(), specification);
            assert_eq!(parsed.text(Language::French, "Greeting"), "Bonjour");
        }
    }
}

#[test]
fn test_export_needs_a_distinct_target_language() {
    let english_only = Dataset::builder()
        .translation(Language::English, "a", "A")
        .build();
    for specification in Specification::ALL {
        let error = english_only.documents_for(specification).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(_)));
    }

    let chinese = Dataset::builder()
        .translation(Language::English, "a", "A")
        .translation(Language::ChineseSimplified, "a", "简")
        .translation(Language::ChineseTraditional, "a", "繁")
        .build();
    for specification in Specification::ALL {
        let error = chinese.documents_for(specification).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(_)));
    }
}
