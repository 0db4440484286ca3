//! XLIFF dialects supported by xliff-bridge.
//!
//! Each specification version is one [`Dialect`] implementation; this module
//! provides the factory ([`Specification::dialect`]) and version detection.

pub mod xliff1;
pub mod xliff2;

pub use xliff1::{Xliff10, Xliff11, Xliff12};
pub use xliff2::Xliff20;

use std::{collections::BTreeMap, str::FromStr};

use tracing::{debug, warn};

use crate::{
    document::{Document, Element},
    error::Error,
    language::Language,
    options::ReadOptions,
    traits::Dialect,
    types::{Dataset, Specification},
};

impl Specification {
    /// Returns the dialect that renders and reads this version.
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Specification::V1_0 => Box::new(Xliff10),
            Specification::V1_1 => Box::new(Xliff11),
            Specification::V1_2 => Box::new(Xliff12),
            Specification::V2_0 => Box::new(Xliff20),
        }
    }
}

/// Renders `dataset` as documents of the given specification.
///
/// 2.0 yields one document per target language; 1.x yields exactly one
/// document holding every target language.
pub fn render(dataset: &Dataset, specification: Specification) -> Result<Vec<Document>, Error> {
    let documents = specification.dialect().render(dataset)?;
    debug!(
        "rendered {} XLIFF {} document(s) for {} key(s)",
        documents.len(),
        specification,
        dataset.len()
    );
    Ok(documents)
}

/// Like [`render`], with the version given as text (e.g. from a settings file).
pub fn render_version(dataset: &Dataset, version: &str) -> Result<Vec<Document>, Error> {
    render(dataset, Specification::from_str(version)?)
}

/// Reads the root `version` attribute.
pub fn detect_specification(root: &Element) -> Result<Specification, Error> {
    let version = root
        .attribute("version")
        .ok_or_else(|| Error::format("XLIFF version is not specified."))?;
    Specification::from_str(version)
        .map_err(|_| Error::format(format!("XLIFF version \"{}\" is not supported.", version)))
}

/// Detects the version of `root` and reads it into a dataset.
pub fn read_root(root: &Element, options: &ReadOptions) -> Result<Dataset, Error> {
    if root.name != "xliff" {
        warn!("root element is <{}>, expected <xliff>", root.name);
    }
    let specification = detect_specification(root)?;
    specification.dialect().read(root, options)
}

/// Languages a root element declares, without validating it.
pub fn declared_languages(root: &Element) -> (Language, Vec<Language>) {
    match detect_specification(root) {
        Ok(specification) => specification.dialect().declared_languages(root),
        Err(_) => (Language::Unknown, Vec::new()),
    }
}

/// Target languages `dataset` renders to. A dataset without a target besides
/// its source, or with two targets sharing one language code, cannot be
/// written to files that read back as the same dataset.
pub(crate) fn export_targets(dataset: &Dataset) -> Result<Vec<Language>, Error> {
    let targets = dataset.target_languages();
    if targets.is_empty() {
        return Err(Error::invalid_argument(format!(
            "Dataset has no target language besides its source language {}.",
            dataset.source_language()
        )));
    }
    let mut by_code: BTreeMap<&str, Language> = BTreeMap::new();
    for target in &targets {
        if let Some(other) = by_code.insert(target.code(), *target) {
            return Err(Error::invalid_argument(format!(
                "Target languages {} and {} share the language code \"{}\".",
                other,
                target,
                target.code()
            )));
        }
    }
    Ok(targets)
}

/// Removes carriage returns from imported text.
pub(crate) fn normalize_text(text: &str) -> String {
    text.replace('\r', "")
}

/// Header note line for a commented key in 1.x files.
pub(crate) fn header_note(key: &str, comment: &str) -> String {
    format!("{}: {}", key, comment)
}
