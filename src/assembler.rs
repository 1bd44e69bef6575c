//! Per-file entry assembly.
//!
//! Given one decoded file plus its resolved collection configuration, the
//! assembler either creates a new entry draft, merges into an existing one
//! (multi-file i18n), or skips the file. All drafts accumulate in an
//! [`EntryAccumulator`] owned by the batch driver; nothing here is global.

use crate::content::{self, ParsedContent};
use crate::entry::{Entry, LocalizedEntry, RawFileItem};
use crate::i18n::{NormalizedI18nOptions, DEFAULT_LOCALE_KEY};
use crate::id::IdGenerator;
use crate::index_file::should_skip_index_file;
use crate::registry::{Collection, CollectionFile};
use crate::template::{extract_path_info, get_slug};
use indexmap::IndexMap;
use tracing::debug;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyOutcome {
    /// A new entry draft was created.
    New,
    /// The file was merged into an existing draft as an additional locale.
    Merged,
    /// The file does not belong to any recognized entry.
    Skipped,
}

/// An entry being accumulated across files. Becomes an [`Entry`] (and gains
/// an id) only in the final sweep.
#[derive(Debug, Clone)]
struct DraftEntry {
    /// `<collection>/<canonical slug>` for multi-file i18n drafts; the key
    /// later locale files merge under. `None` for drafts that can never be
    /// merged into.
    merge_key: Option<String>,
    slug: String,
    sub_path: String,
    locales: IndexMap<String, LocalizedEntry>,
}

/// The shared, growing set of entry drafts for one batch. The single-writer
/// boundary: all lookups and merges go through one `&mut` borrow, so a merge
/// can never lose a concurrent update.
#[derive(Debug, Default)]
pub struct EntryAccumulator {
    drafts: Vec<DraftEntry>,
}

impl EntryAccumulator {
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    fn find_mut(&mut self, merge_key: &str) -> Option<&mut DraftEntry> {
        self.drafts
            .iter_mut()
            .find(|draft| draft.merge_key.as_deref() == Some(merge_key))
    }

    /// Final sweep: assign fresh ids and drop drafts that never acquired a
    /// slug or any locale content. Must run only after every file of the
    /// batch has been processed.
    pub fn into_entries(self, ids: &dyn IdGenerator) -> Vec<Entry> {
        self.drafts
            .into_iter()
            .filter(|draft| !draft.slug.is_empty() && !draft.locales.is_empty())
            .map(|draft| Entry {
                id: ids.new_id(),
                slug: draft.slug,
                sub_path: draft.sub_path,
                locales: draft.locales,
            })
            .collect()
    }
}

/// Assemble one decoded file into the accumulator.
///
/// `file_config` is the resolved named-file configuration for file-collection
/// items, already looked up by the driver.
pub fn assemble_file(
    file: &RawFileItem,
    parsed: ParsedContent,
    collection: &Collection,
    file_config: Option<&CollectionFile>,
    accumulator: &mut EntryAccumulator,
) -> AssemblyOutcome {
    let i18n: &NormalizedI18nOptions = match file_config {
        Some(file_config) => &file_config.i18n,
        None => &collection.i18n,
    };
    let root_list_field = match file_config {
        Some(file_config) => file_config.root_list_field.as_deref(),
        None => collection.root_list_field.as_deref(),
    };
    let file_name = file.folder.file_name.as_deref();

    let Some(parsed) = content::normalize_shape(
        parsed,
        root_list_field,
        i18n.structure_map.i18n_single_file,
        &i18n.all_locales,
    ) else {
        debug!("Skipping {}: content shape mismatch", file.path);
        return AssemblyOutcome::Skipped;
    };

    if should_skip_index_file(
        &file.path,
        file_name,
        collection.index_file.as_ref(),
        collection.sub_path_template.as_deref(),
        &collection.extension,
    ) {
        debug!("Skipping index file {}", file.path);
        return AssemblyOutcome::Skipped;
    }

    let path_info = extract_path_info(
        file,
        file_name,
        collection.full_path_regex.as_ref(),
        &i18n.default_locale,
        i18n.structure_map.i18n_multiple_files,
    );

    let Some(sub_path) = path_info.sub_path else {
        debug!("Skipping {}: path does not match the collection", file.path);
        return AssemblyOutcome::Skipped;
    };

    let slug = match file_name {
        Some(name) => name.to_string(),
        None => get_slug(&sub_path, collection.sub_path_template.as_deref()),
    };

    if !i18n.i18n_enabled {
        let localized = LocalizedEntry {
            slug: slug.clone(),
            path: file.path.clone(),
            content: parsed,
        };
        let mut locales = IndexMap::new();
        locales.insert(DEFAULT_LOCALE_KEY.to_string(), localized);
        accumulator.drafts.push(DraftEntry {
            merge_key: None,
            slug,
            sub_path,
            locales,
        });
        return AssemblyOutcome::New;
    }

    if i18n.structure_map.i18n_single_file {
        // One file carries every locale, keyed by locale code. Locales absent
        // from the content are omitted, not errored.
        let mut locales = IndexMap::new();
        for locale in &i18n.all_locales {
            if let Some(locale_content) = parsed.get(locale) {
                locales.insert(
                    locale.clone(),
                    LocalizedEntry {
                        slug: slug.clone(),
                        path: file.path.clone(),
                        content: locale_content.clone(),
                    },
                );
            }
        }
        accumulator.drafts.push(DraftEntry {
            merge_key: None,
            slug,
            sub_path,
            locales,
        });
        return AssemblyOutcome::New;
    }

    // Multi-file i18n: this file carries a single locale's content.
    let Some(locale) = path_info.locale else {
        debug!("Skipping {}: locale cannot be determined", file.path);
        return AssemblyOutcome::Skipped;
    };

    let canonical_slug = content::get_path(&parsed, &i18n.canonical_slug.key)
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| slug.clone());
    let merge_key = format!("{}/{}", collection.name, canonical_slug);

    let localized = LocalizedEntry {
        slug: slug.clone(),
        path: file.path.clone(),
        content: parsed,
    };

    if let Some(draft) = accumulator.find_mut(&merge_key) {
        draft.locales.insert(locale.clone(), localized);
        // Default-locale content is authoritative for naming.
        if locale == i18n.default_locale {
            draft.slug = slug;
            draft.sub_path = sub_path;
        }
        return AssemblyOutcome::Merged;
    }

    let mut locales = IndexMap::new();
    locales.insert(locale, localized);
    accumulator.drafts.push(DraftEntry {
        merge_key: Some(merge_key),
        slug,
        sub_path,
        locales,
    });
    AssemblyOutcome::New
}
