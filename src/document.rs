//! A small owned XML tree and the [`Document`] wrapper rendered/parsed by the
//! XLIFF dialects.
//!
//! quick-xml is used in streaming mode on both sides: the writer walks the
//! tree and emits events, the reader folds events back into a tree.

use std::{
    borrow::Cow,
    io::{BufRead, BufReader, Write},
};

use encoding_rs::{Encoding, UTF_8};
use lazy_static::lazy_static;
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use regex::bytes::Regex;
use tracing::debug;

use crate::{error::Error, formats, language::Language, options::WriteOptions, traits::Parser};

lazy_static! {
    static ref DECLARED_ENCODING: Regex =
        Regex::new(r#"^\s*<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#).unwrap();
}

/// Content of the `DOCTYPE` declaration written ahead of every document.
pub const XLIFF_DOCTYPE: &str = r#"xliff PUBLIC "-//XLIFF//DTD XLIFF//EN" "http://www.oasis-open.org/committees/xliff/documents/xliff.dtd""#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Adds a text child. An empty string still counts as content, so the
    /// element is written as `<name></name>` rather than `<name/>`.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Sets an attribute, replacing an existing one of the same name.
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Appends text, merging with a directly preceding text node.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(Node::Text(text));
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements named `name`.
    pub fn children<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.elements().filter(move |element| element.name == name)
    }

    /// First direct child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text of this element and all its descendants.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Drops whitespace-only text between child elements (indentation).
    fn drop_formatting_whitespace(&mut self) {
        if self.has_element_children() {
            self.children.retain(|node| match node {
                Node::Text(text) => !text.trim().is_empty(),
                Node::Element(_) => true,
            });
        }
    }
}

/// An XLIFF XML tree with the languages it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source_language: Language,
    target_languages: Vec<Language>,
    root: Element,
}

impl Document {
    pub fn new(source_language: Language, target_languages: Vec<Language>, root: Element) -> Self {
        Document {
            source_language,
            target_languages,
            root,
        }
    }

    /// Wraps a parsed root element, describing its languages from the root's
    /// `version` attribute. Nothing is validated here; see [`crate::codec::parse`].
    pub fn from_root(root: Element) -> Self {
        let (source_language, target_languages) = formats::declared_languages(&root);
        Document::new(source_language, target_languages, root)
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    pub fn target_languages(&self) -> &[Language] {
        &self.target_languages
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// Writes the document with explicit options.
    pub fn write_with<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<(), Error> {
        let mut xml_writer = match options.indent {
            Some((indent_char, indent_size)) => {
                Writer::new_with_indent(writer, indent_char, indent_size)
            }
            None => Writer::new(writer),
        };

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        if options.doctype {
            xml_writer.write_event(Event::DocType(BytesText::from_escaped(XLIFF_DOCTYPE)))?;
        }
        write_element(&mut xml_writer, &self.root)?;
        xml_writer.into_inner().write_all(b"\n")?;
        Ok(())
    }

    /// Serializes the document to a UTF-8 string with default options.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::InvalidXml(e.to_string()))
    }
}

impl Parser for Document {
    /// Parse from any reader. A byte order mark selects the encoding, then the
    /// XML declaration's `encoding`; anything else is read as UTF-8.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let declared = declared_encoding(reader.fill_buf()?);
        if let Some(encoding) = declared {
            debug!("decoding XLIFF input as declared {}", encoding.name());
        }
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(declared)
            .bom_override(true)
            .build(reader);
        let root = parse_tree(BufReader::new(decoder))?
            .ok_or_else(|| Error::format("Is not a XLIFF document."))?;
        Ok(Document::from_root(root))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        self.write_with(writer, &WriteOptions::default())
    }
}

/// Non-UTF-8 encoding named by the XML declaration at the start of `head`.
/// Only ASCII-compatible encodings qualify: the declaration has to be
/// readable before the encoding is known.
fn declared_encoding(head: &[u8]) -> Option<&'static Encoding> {
    let captures = DECLARED_ENCODING.captures(head)?;
    Encoding::for_label(captures.get(1)?.as_bytes())
        .filter(|encoding| encoding.is_ascii_compatible() && *encoding != UTF_8)
}

fn write_element<W: Write>(xml_writer: &mut Writer<W>, element: &Element) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        xml_writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml_writer.write_event(Event::Start(start))?;
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(xml_writer, child)?,
            Node::Text(text) => xml_writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    xml_writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Folds a quick-xml event stream into an element tree. Returns `None` when
/// the input has no root element.
pub(crate) fn parse_tree<R: BufRead>(reader: R) -> Result<Option<Element>, Error> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(element_from_start(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                if let Some(mut element) = stack.pop() {
                    element.drop_formatting_whitespace();
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(parent) = stack.last_mut() {
                    let text = e.unescape().map_err(Error::XmlParse)?;
                    parent.push_text(text.into_owned());
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(parent) = stack.last_mut() {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| Error::InvalidXml(e.to_string()))?;
                    parent.push_text(text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::InvalidXml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    debug!(
        "parsed XML tree with root {:?}",
        root.as_ref().map(|r| r.name.as_str())
    );
    Ok(root)
}

fn element_from_start(e: &BytesStart) -> Result<Element, Error> {
    let name = decode_name(e.name().as_ref())?.into_owned();
    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::InvalidXml(e.to_string()))?;
        let key = decode_name(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push((key.into_owned(), value.into_owned()));
    }
    Ok(element)
}

fn decode_name(bytes: &[u8]) -> Result<Cow<'_, str>, Error> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| Error::InvalidXml(e.to_string()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), Error> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::InvalidXml(format!(
            "multiple root elements; unexpected <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}
