//! Internationalization (i18n) resolution for collections and files.
//!
//! Raw configuration allows i18n settings at three levels (site, collection,
//! file); everything downstream of configuration loading works with a single
//! resolved option set per collection-or-file instead. This module owns that
//! resolution.
//!
//! - `options`: the resolved `NormalizedI18nOptions` type and its parts
//! - `normalizer`: the merge logic producing resolved options from raw blocks
//!
//! # Example
//!
//! ```rust,ignore
//! use entry_ingest::i18n::normalize;
//!
//! let options = normalize(site.i18n.as_ref(), &collection, None);
//! if options.i18n_enabled {
//!     // options.all_locales, options.default_locale, ...
//! }
//! ```

mod normalizer;
mod options;

pub use normalizer::normalize;
pub use options::{
    CanonicalSlug, I18nStructure, NormalizedI18nOptions, StructureMap, DEFAULT_LOCALE_KEY,
};
