//! Traits for reading/writing XLIFF documents and for the per-version dialects.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{
    document::{Document, Element},
    error::Error,
    language::Language,
    options::ReadOptions,
    types::{Dataset, Specification},
};

/// A trait for parsing and writing one XML file.
///
/// # Example
///
/// ```rust,no_run
/// use xliff_bridge::{Document, traits::Parser};
/// let document = Document::read_from("translations.xlf")?;
/// document.write_to("translations_copy.xlf")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// One XLIFF specification version: how a [`Dataset`] is laid out as XML and
/// how that XML is read back.
///
/// Implementations are selected by [`Specification::dialect`].
pub trait Dialect {
    fn specification(&self) -> Specification;

    /// Renders `dataset` into one or more documents.
    fn render(&self, dataset: &Dataset) -> Result<Vec<Document>, Error>;

    /// Reads a dataset from a root element whose version was already detected.
    fn read(&self, root: &Element, options: &ReadOptions) -> Result<Dataset, Error>;

    /// Best-effort source and target languages declared by a root element.
    /// Unresolvable codes are skipped (targets) or reported as
    /// [`Language::Unknown`] (source).
    fn declared_languages(&self, root: &Element) -> (Language, Vec<Language>);
}
