#![forbid(unsafe_code)]
//! XLIFF interchange for multi-language translation tables.
//!
//! Renders a [`Dataset`] into XLIFF 1.0, 1.1, 1.2 or 2.0 documents, reads
//! those documents back, and reconciles an imported dataset with local
//! translation records through an [`ImportSession`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xliff_bridge::{Dataset, ImportSession, Language, MemoryStore, Specification, codec};
//!
//! let dataset = Dataset::builder()
//!     .source_language(Language::English)
//!     .translation(Language::English, "Greeting", "Hello")
//!     .translation(Language::French, "Greeting", "Bonjour")
//!     .comment("Greeting", "greeting phrase")
//!     .build();
//!
//! // One document per target language for 2.0, a single one for 1.x
//! let documents = dataset.documents_for(Specification::V2_0)?;
//! codec::try_export_documents(&documents, "translations.xlf", &Default::default())?;
//!
//! // Import the translated file and apply it to the local records
//! let imported = codec::try_import_from_file("translations_ENToFR.xlf", &Default::default())?;
//! let mut store = MemoryStore::new();
//! let mut session = ImportSession::new(imported);
//! session.refresh(&store);
//! session.apply(&mut store)?;
//! # Ok::<(), xliff_bridge::Error>(())
//! ```
//!
//! # Supported Specifications
//!
//! - **1.0**: one `file` per target language, translated text inline in each `trans-unit`
//! - **1.1 / 1.2**: one `file` per target language with `source`/`target` pairs
//! - **2.0**: one bilingual document per target language with `unit`/`segment`

pub mod builder;
pub mod codec;
pub mod document;
pub mod error;
pub mod formats;
pub mod iso639;
pub mod language;
pub mod options;
pub mod reconcile;
pub mod search;
pub mod store;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    builder::DatasetBuilder,
    codec::{export_documents, export_to_file, import_from_file, parse},
    document::{Document, Element, Node},
    error::Error,
    formats::{Xliff10, Xliff11, Xliff12, Xliff20, render},
    language::Language,
    options::{ReadOptions, WriteOptions},
    reconcile::{ApplyReport, EntryKind, EntryView, ImportSession, ReconcileEntry, reconcile},
    store::{LocalRecord, MemoryStore, TranslationStore, UpsertOutcome},
    traits::{Dialect, Parser},
    types::{Dataset, Specification},
};
