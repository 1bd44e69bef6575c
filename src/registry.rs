//! The collection registry: the resolved, per-collection view of the site
//! configuration.
//!
//! Built once from a [`SiteConfig`]. Resolution work that must not happen per
//! file — i18n normalization, full-path pattern compilation, root-list
//! detection — happens here, during construction.

use crate::config::{
    has_root_list_field, CollectionConfig, IndexFileConfig, SiteConfig,
};
use crate::i18n::{normalize, NormalizedI18nOptions};
use crate::template::pattern_from_template;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;

/// A collection with its i18n options resolved and path pattern compiled.
#[derive(Debug, Clone)]
pub struct Collection {
    pub name: String,
    pub folder: Option<String>,
    pub sub_path_template: Option<String>,

    /// File extension without the dot, e.g. `md`.
    pub extension: String,

    pub i18n: NormalizedI18nOptions,

    /// Matches an entry file's repository-relative path, capturing `sub_path`
    /// and, for locale-splitting structures, `locale`. `None` for file
    /// collections.
    pub full_path_regex: Option<Regex>,

    /// Explicit registration of the generator's index file as content.
    pub index_file: Option<IndexFileConfig>,

    /// Name of the single root-level list field, when the schema has one.
    pub root_list_field: Option<String>,

    files: IndexMap<String, CollectionFile>,
}

/// One named file of a file collection, with its i18n options resolved.
#[derive(Debug, Clone)]
pub struct CollectionFile {
    pub name: String,
    pub path_template: String,
    pub i18n: NormalizedI18nOptions,
    pub root_list_field: Option<String>,
}

/// Registry of all collections, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    collections: IndexMap<String, Collection>,
}

impl CollectionRegistry {
    /// Build the registry from a loaded site configuration.
    pub fn from_site_config(site: &SiteConfig) -> Result<Self> {
        let mut collections = IndexMap::new();

        for config in &site.collections {
            let i18n = normalize(site.i18n.as_ref(), config, None);
            let extension = config.resolved_extension();

            let full_path_regex = build_full_path_regex(config, &i18n, &extension)
                .with_context(|| format!("invalid path pattern for collection {}", config.name))?;

            let files = config
                .files
                .iter()
                .map(|file| {
                    let file_i18n = normalize(site.i18n.as_ref(), config, Some(file));
                    (
                        file.name.clone(),
                        CollectionFile {
                            name: file.name.clone(),
                            path_template: file.path_template.clone(),
                            i18n: file_i18n,
                            root_list_field: root_list_field(&file.fields),
                        },
                    )
                })
                .collect();

            collections.insert(
                config.name.clone(),
                Collection {
                    name: config.name.clone(),
                    folder: config.folder.clone(),
                    sub_path_template: config.sub_path_template.clone(),
                    extension,
                    i18n,
                    full_path_regex,
                    index_file: config.index_file.clone(),
                    root_list_field: root_list_field(&config.fields),
                    files,
                },
            );
        }

        Ok(Self { collections })
    }

    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn get_collection_file<'a>(
        &self,
        collection: &'a Collection,
        file_name: &str,
    ) -> Option<&'a CollectionFile> {
        collection.files.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

fn root_list_field(fields: &[crate::config::FieldConfig]) -> Option<String> {
    has_root_list_field(fields).then(|| fields[0].name.clone())
}

/// Compile the pattern matching an entry collection's file paths.
///
/// Layout, in order: optional root-level locale folder, the collection
/// folder, optional per-collection locale folder, the sub-path (from the
/// template when configured), optional locale file suffix, the extension.
fn build_full_path_regex(
    config: &CollectionConfig,
    i18n: &NormalizedI18nOptions,
    extension: &str,
) -> Result<Option<Regex>> {
    let Some(folder) = &config.folder else {
        return Ok(None);
    };

    let locale_group = format!(
        "(?P<locale>{})",
        i18n.all_locales
            .iter()
            .map(|locale| regex::escape(locale))
            .collect::<Vec<_>>()
            .join("|")
    );

    let mut pattern = String::from("^");

    if i18n.structure_map.i18n_root_multiple_folders {
        pattern.push_str(&locale_group);
        pattern.push('/');
    }

    let folder = folder.trim_matches('/');
    if !folder.is_empty() {
        pattern.push_str(&regex::escape(folder));
        pattern.push('/');
    }

    if i18n.structure_map.i18n_multiple_folders {
        pattern.push_str(&locale_group);
        pattern.push('/');
    }

    match &config.sub_path_template {
        Some(template) => {
            pattern.push_str("(?P<sub_path>");
            pattern.push_str(&pattern_from_template(template, false));
            pattern.push(')');
        }
        None => pattern.push_str("(?P<sub_path>.+?)"),
    }

    if i18n.structure_map.i18n_multiple_files {
        if i18n.omit_default_locale_from_filename {
            pattern.push_str(&format!("(?:\\.{locale_group})?"));
        } else {
            pattern.push_str(&format!("\\.{locale_group}"));
        }
    }

    pattern.push_str(&format!("\\.{}$", regex::escape(extension)));

    let regex = Regex::new(&pattern).with_context(|| format!("bad pattern {pattern}"))?;
    Ok(Some(regex))
}
