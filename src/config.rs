//! Site and collection configuration as loaded from a YAML config file.
//!
//! These types mirror the configuration document verbatim; nothing here is
//! resolved or validated beyond deserialization. The resolved, per-collection
//! view (normalized i18n options, precompiled path patterns) is built once by
//! [`crate::registry::CollectionRegistry`].

use crate::i18n::I18nStructure;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level site configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Global i18n settings, inherited by collections that enable i18n.
    #[serde(default)]
    pub i18n: Option<I18nConfig>,

    /// All content collections (entry collections and file/singleton collections).
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

/// An i18n settings block. Appears at the site level, on a collection, or on
/// an individual file of a file collection; later levels override earlier ones
/// field by field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct I18nConfig {
    /// How localized content is laid out across files and folders.
    #[serde(default)]
    pub structure: Option<I18nStructure>,

    /// All locale codes content may be written in, in display order.
    #[serde(default)]
    pub locales: Vec<String>,

    /// The authoritative locale. Falls back to the first of `locales` when
    /// absent or not a member.
    #[serde(default)]
    pub default_locale: Option<String>,

    /// Which locales a brand-new entry starts with: `all`, `default`, or an
    /// explicit list.
    #[serde(default)]
    pub initial_locales: Option<InitialLocales>,

    /// Legacy flag predating `initial_locales`. Only consulted when
    /// `initial_locales` is absent.
    #[serde(default)]
    pub save_all_locales: Option<bool>,

    /// How locale-split files of the same logical entry are correlated.
    #[serde(default)]
    pub canonical_slug: Option<CanonicalSlugConfig>,

    /// Drop the default locale from file names under the `multiple_files`
    /// structure (e.g. `about.md` instead of `about.en.md`).
    #[serde(default)]
    pub omit_default_locale_from_filename: Option<bool>,
}

/// The `initial_locales` setting: the keywords `all` / `default`, or an
/// explicit locale list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InitialLocales {
    Keyword(String),
    List(Vec<String>),
}

/// Configuration of the stored field that correlates locale-split files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CanonicalSlugConfig {
    /// Property name within entry content. Defaults to `translationKey`.
    #[serde(default)]
    pub key: Option<String>,

    /// Template used to populate the field for the default locale. Applied by
    /// the entry editor on save, not by this engine.
    #[serde(default, rename = "value")]
    pub value_template: Option<String>,
}

/// A collection's i18n declaration: `true` (inherit the site settings as-is),
/// `false` (opt out), or a partial override block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum I18nOverride {
    Enabled(bool),
    Config(I18nConfig),
}

/// One logical content bucket.
///
/// Entry collections set `folder` (plus an optional `path` template); file
/// collections set `files`. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    pub name: String,

    /// Base folder of an entry collection, relative to the repository root.
    #[serde(default)]
    pub folder: Option<String>,

    /// Named files of a file/singleton collection.
    #[serde(default)]
    pub files: Vec<CollectionFileConfig>,

    /// Sub-path template for entry collections, e.g. `{{year}}/{{slug}}`.
    #[serde(default, rename = "path")]
    pub sub_path_template: Option<String>,

    /// Content format; determines the default file extension.
    #[serde(default)]
    pub format: Option<FileFormat>,

    /// Explicit file extension, overriding the format's default.
    #[serde(default)]
    pub extension: Option<String>,

    /// Collection-level i18n declaration.
    #[serde(default)]
    pub i18n: Option<I18nOverride>,

    /// Opt-in to treating the generator's special `_index` file as a regular,
    /// addressable entry.
    #[serde(default)]
    pub index_file: Option<IndexFileConfig>,

    /// Field schema. Only inspected for the root-list exception; field
    /// semantics are otherwise out of scope.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl CollectionConfig {
    /// Whether this is a file/singleton collection rather than an entry
    /// collection.
    pub fn is_file_collection(&self) -> bool {
        !self.files.is_empty()
    }

    /// The file extension entries of this collection use, without the dot.
    pub fn resolved_extension(&self) -> String {
        if let Some(extension) = &self.extension {
            return extension.trim_start_matches('.').to_string();
        }

        match self.format {
            Some(FileFormat::Json) => "json".to_string(),
            Some(FileFormat::Yaml) => "yml".to_string(),
            Some(FileFormat::Frontmatter) | Some(FileFormat::YamlFrontmatter) | None => {
                "md".to_string()
            }
        }
    }
}

/// One named file of a file/singleton collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionFileConfig {
    pub name: String,

    /// Path template relative to the repository root. May contain a
    /// `{{locale}}` placeholder, which forces the `multiple_files` structure.
    #[serde(rename = "file")]
    pub path_template: String,

    /// File-level i18n declaration; `false` opts this file out entirely.
    #[serde(default)]
    pub i18n: Option<I18nOverride>,

    /// Field schema; see [`CollectionConfig::fields`].
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// Supported content formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileFormat {
    Frontmatter,
    YamlFrontmatter,
    Yaml,
    Json,
}

/// Registration of the generator's special index file as addressable content.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndexFileConfig {
    /// Base name of the index file. Defaults to `_index`.
    #[serde(default)]
    pub name: Option<String>,
}

/// A single field of a collection schema. Only the properties needed for
/// root-list detection are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    /// Widget type, e.g. `string`, `list`.
    #[serde(default)]
    pub widget: Option<String>,

    /// Marks a list field whose items live at the document root rather than
    /// under the field name.
    #[serde(default)]
    pub root: Option<bool>,
}

/// Whether a schema stores a whole list at the document root: exactly one
/// field, a list widget, explicitly marked `root`.
pub fn has_root_list_field(fields: &[FieldConfig]) -> bool {
    match fields {
        [field] => field.widget.as_deref() == Some("list") && field.root == Some(true),
        _ => false,
    }
}

/// Load and deserialize a site configuration document from a YAML file.
pub fn load_site_config(path: impl AsRef<Path>) -> Result<SiteConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    serde_yaml_ng::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
