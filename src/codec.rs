//! File and byte boundary of the XLIFF codec.
//!
//! `parse*` and `try_*` functions return [`Result`]s. [`import_from_file`],
//! [`export_to_file`] and [`export_documents`] are the fire-and-forget
//! variants: they log failures with `tracing` and report success as a value.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, error};

use crate::{
    document::Document,
    error::Error,
    formats,
    language::Language,
    options::{ReadOptions, WriteOptions},
    traits::Parser,
    types::Dataset,
};

/// Parses XLIFF bytes with the default [`ReadOptions`].
///
/// # Example
///
/// ```rust
/// use xliff_bridge::{Language, codec};
///
/// let xml = r#"<xliff version="2.0" srcLang="en" trgLang="fr">
///   <file id="ENToFR">
///     <unit id="Greeting">
///       <segment id="s:Greeting"><source>Hello</source><target>Bonjour</target></segment>
///     </unit>
///   </file>
/// </xliff>"#;
/// let dataset = codec::parse(xml.as_bytes())?;
/// assert_eq!(dataset.text(Language::French, "Greeting"), "Bonjour");
/// # Ok::<(), xliff_bridge::Error>(())
/// ```
pub fn parse(bytes: &[u8]) -> Result<Dataset, Error> {
    parse_with(bytes, &ReadOptions::default())
}

pub fn parse_with(bytes: &[u8], options: &ReadOptions) -> Result<Dataset, Error> {
    parse_reader(Cursor::new(bytes), options)
}

pub fn parse_str(xml: &str) -> Result<Dataset, Error> {
    parse(xml.as_bytes())
}

/// Parses XLIFF from any reader.
pub fn parse_reader<R: BufRead>(reader: R, options: &ReadOptions) -> Result<Dataset, Error> {
    let document = Document::from_reader(reader)?;
    read_document(&document, options)
}

/// Reads a dataset from an already parsed document.
pub fn read_document(document: &Document, options: &ReadOptions) -> Result<Dataset, Error> {
    formats::read_root(document.root(), options)
}

impl Dataset {
    /// Same as [`read_document`].
    pub fn from_document(document: &Document, options: &ReadOptions) -> Result<Dataset, Error> {
        read_document(document, options)
    }

    /// Caches the dataset to a JSON file.
    ///
    /// # Parameters
    /// - `path`: Destination file path for the cache.
    ///
    /// # Returns
    ///
    /// `Ok(())` if caching succeeds, or an `Error` if file I/O or serialization fails.
    pub fn cache_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path).map_err(Error::Io)?);
        serde_json::to_writer(&mut writer, self).map_err(Error::Parse)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads a dataset from a JSON cache file.
    ///
    /// # Parameters
    /// - `path`: Path to the JSON file written by [`Dataset::cache_to_file`].
    ///
    /// # Returns
    ///
    /// `Ok(Dataset)` with the canonical key set rebuilt, or an `Error` if
    /// loading or deserialization fails.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path).map_err(Error::Io)?);
        let dataset = serde_json::from_reader(reader).map_err(Error::Parse)?;
        Ok(dataset)
    }
}

/// Reads and parses an XLIFF file.
pub fn try_import_from_file<P: AsRef<Path>>(
    path: P,
    options: &ReadOptions,
) -> Result<Dataset, Error> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let dataset = parse_with(&bytes, options)?;
    debug!(
        "imported XLIFF {} from {}: {} key(s)",
        dataset.specification(),
        path.display(),
        dataset.len()
    );
    Ok(dataset)
}

/// Imports an XLIFF file with the default options, logging any failure.
pub fn import_from_file<P: AsRef<Path>>(path: P) -> Option<Dataset> {
    let path = path.as_ref();
    match try_import_from_file(path, &ReadOptions::default()) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            error!("failed to import XLIFF from {}: {}", path.display(), e);
            None
        }
    }
}

/// Serializes a document to a string.
pub fn export_to_string(document: &Document, options: &WriteOptions) -> Result<String, Error> {
    let mut out = Vec::new();
    document.write_with(&mut out, options)?;
    String::from_utf8(out).map_err(|e| Error::InvalidXml(e.to_string()))
}

/// Writes a document to `path`, replacing any existing file.
pub fn try_export_to_file<P: AsRef<Path>>(
    document: &Document,
    path: P,
    options: &WriteOptions,
) -> Result<(), Error> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    document.write_with(&mut writer, options)?;
    writer.flush()?;
    debug!("wrote XLIFF document to {}", path.display());
    Ok(())
}

/// Writes a document with the default options, logging any failure.
pub fn export_to_file<P: AsRef<Path>>(document: &Document, path: P) -> bool {
    let path = path.as_ref();
    match try_export_to_file(document, path, &WriteOptions::default()) {
        Ok(()) => true,
        Err(e) => {
            error!("failed to export XLIFF to {}: {}", path.display(), e);
            false
        }
    }
}

/// Path of one document among several exported to `path`:
/// `{stem}_{SOURCE}To{TARGETS}{.extension}` next to `path`.
///
/// ```rust
/// use std::path::Path;
/// use xliff_bridge::{Dataset, Language, Specification, codec};
///
/// let dataset = Dataset::builder()
///     .translation(Language::French, "a", "A")
///     .build();
/// let documents = dataset.documents_for(Specification::V2_0)?;
/// assert_eq!(
///     codec::document_file_path(Path::new("out/translations.xlf"), &documents[0]),
///     Path::new("out/translations_ENToFR.xlf")
/// );
/// # Ok::<(), xliff_bridge::Error>(())
/// ```
pub fn document_file_path(path: &Path, document: &Document) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let targets: String = document
        .target_languages()
        .iter()
        .map(|language| language.code().to_uppercase())
        .collect();
    let mut file_name = format!(
        "{}_{}To{}",
        stem,
        document.source_language().code().to_uppercase(),
        targets
    );
    if let Some(extension) = path.extension() {
        file_name.push('.');
        file_name.push_str(&extension.to_string_lossy());
    }
    path.with_file_name(file_name)
}

/// Writes `documents` for the requested `path`: a single document goes to
/// `path` itself, several go to [`document_file_path`]s. Nothing is written
/// when the list is empty or two documents would share a file. Otherwise
/// stops at the first failure.
///
/// # Returns
///
/// The written paths, in document order.
pub fn try_export_documents<P: AsRef<Path>>(
    documents: &[Document],
    path: P,
    options: &WriteOptions,
) -> Result<Vec<PathBuf>, Error> {
    let path = path.as_ref();
    let planned = documents_with_paths(documents, path)?;
    let mut written = Vec::with_capacity(planned.len());
    for (document, file_path) in planned {
        try_export_to_file(document, &file_path, options)?;
        written.push(file_path);
    }
    Ok(written)
}

/// Like [`try_export_documents`] with default options, but keeps going after
/// a failed document. Returns `true` when every document was written.
pub fn export_documents<P: AsRef<Path>>(documents: &[Document], path: P) -> bool {
    let path = path.as_ref();
    match documents_with_paths(documents, path) {
        Ok(planned) => planned
            .into_iter()
            .fold(true, |ok, (document, file_path)| {
                export_to_file(document, file_path) && ok
            }),
        Err(e) => {
            error!("failed to export XLIFF to {}: {}", path.display(), e);
            false
        }
    }
}

fn documents_with_paths<'a>(
    documents: &'a [Document],
    path: &Path,
) -> Result<Vec<(&'a Document, PathBuf)>, Error> {
    match documents {
        [] => Err(Error::invalid_argument("No XLIFF documents to export.")),
        [document] => Ok(vec![(document, path.to_path_buf())]),
        _ => {
            let mut planned: Vec<(&Document, PathBuf)> = Vec::with_capacity(documents.len());
            for document in documents {
                let file_path = document_file_path(path, document);
                if let Some((other, _)) = planned.iter().find(|(_, p)| *p == file_path) {
                    return Err(Error::invalid_argument(format!(
                        "Documents for {} and {} would both be written to {}.",
                        language_list(other.target_languages()),
                        language_list(document.target_languages()),
                        file_path.display()
                    )));
                }
                planned.push((document, file_path));
            }
            Ok(planned)
        }
    }
}

fn language_list(languages: &[Language]) -> String {
    languages
        .iter()
        .map(Language::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
