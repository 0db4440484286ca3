//! Options for reading XLIFF into a [`crate::Dataset`] and writing documents out.

use crate::{iso639, language::Language};

/// Read behavior options for the XLIFF import APIs.
///
/// With the defaults the parsed dataset is attributed to English whatever the
/// file declares, 1.x `header/note` comments are ignored and language
/// attributes must be bare ISO-639-1 codes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Source language assigned to the parsed dataset instead of English.
    pub source_language: Option<Language>,
    /// Recover `"{key}: {comment}"` notes from 1.x file headers.
    pub header_notes: bool,
    /// Accept region-qualified language attributes such as `fr-CA`.
    pub region_tags: bool,
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source language of the parsed dataset.
    pub fn with_source_language(mut self, source_language: Option<Language>) -> Self {
        self.source_language = source_language;
        self
    }

    /// Enables/disables 1.x header note recovery.
    pub fn with_header_notes(mut self, header_notes: bool) -> Self {
        self.header_notes = header_notes;
        self
    }

    /// Enables/disables resolving region-qualified tags by their primary subtag.
    pub fn with_region_tags(mut self, region_tags: bool) -> Self {
        self.region_tags = region_tags;
        self
    }

    pub(crate) fn resolved_source_language(&self) -> Language {
        self.source_language.unwrap_or(Language::English)
    }

    /// Resolves a language attribute of an imported file.
    pub(crate) fn resolve_language(&self, code: &str) -> Option<Language> {
        if self.region_tags {
            iso639::language_from_tag(code)
        } else {
            iso639::language_from_code(code)
        }
    }
}

/// Write behavior options for document serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indentation character and width; `None` writes everything on one line.
    pub indent: Option<(u8, usize)>,
    /// Whether to emit the XLIFF `DOCTYPE` declaration.
    pub doctype: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: Some((b' ', 2)),
            doctype: true,
        }
    }
}

impl WriteOptions {
    /// Creates default write options (two-space indent, with DOCTYPE).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Option<(u8, usize)>) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_doctype(mut self, doctype: bool) -> Self {
        self.doctype = doctype;
        self
    }
}
