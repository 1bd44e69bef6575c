//! Content ingestion and i18n normalization engine.
//!
//! Turns a flat list of version-controlled text files into a canonical,
//! locale-aware entry model. Content may be split one-file-per-locale, laid
//! out in per-locale folders, or kept in a single multi-locale file; the
//! engine reconciles all of these using configurable path/slug templates and
//! a small set of structural rules, and it tolerates partial failures — a
//! single malformed file never aborts a batch.
//!
//! # Pipeline
//!
//! 1. Load a [`config::SiteConfig`] and build a
//!    [`registry::CollectionRegistry`] from it (i18n settings are resolved
//!    and path patterns compiled once, here).
//! 2. Feed [`entry::RawFileItem`]s from any file transport into
//!    [`batch::EntryIngestor::prepare_entries`].
//! 3. Consume the resulting [`entry::BatchResult`]: assembled entries plus
//!    every recoverable decode error.
//!
//! # Example
//!
//! ```rust,ignore
//! use entry_ingest::{batch::EntryIngestor, config, registry::CollectionRegistry};
//!
//! let site = config::load_site_config("config.yml")?;
//! let registry = CollectionRegistry::from_site_config(&site)?;
//! let result = EntryIngestor::new(&registry).prepare_entries(&files);
//! println!("{} entries, {} errors", result.entries.len(), result.errors.len());
//! ```

pub mod assembler;
pub mod batch;
pub mod config;
pub mod content;
pub mod decoder;
pub mod entry;
pub mod i18n;
pub mod id;
pub mod index_file;
pub mod registry;
pub mod template;

pub use batch::EntryIngestor;
pub use entry::{BatchResult, Entry, FolderDescriptor, LocalizedEntry, RawFileItem};
pub use registry::CollectionRegistry;
