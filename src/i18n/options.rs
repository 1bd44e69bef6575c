//! Resolved i18n option types.

use serde::{Deserialize, Serialize};

/// Pseudo-locale used for all content when i18n is disabled.
pub const DEFAULT_LOCALE_KEY: &str = "_default";

/// Default property name correlating locale-split files of one logical entry.
const DEFAULT_CANONICAL_SLUG_KEY: &str = "translationKey";

/// Default template populating the canonical slug field for the default locale.
const DEFAULT_CANONICAL_SLUG_TEMPLATE: &str = "{{slug}}";

/// How localized content is laid out across files and folders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum I18nStructure {
    /// One file per entry, containing all locales keyed by locale code.
    #[default]
    SingleFile,
    /// One file per locale per entry, locale encoded in the file name.
    MultipleFiles,
    /// One folder per locale inside the collection folder.
    MultipleFolders,
    /// One root-level folder per locale, above the collection folder.
    MultipleFoldersI18nRoot,
}

/// Mutually exclusive layout flags derived from the resolved structure.
///
/// At most one flag is true; all four are false exactly when i18n is disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StructureMap {
    pub i18n_single_file: bool,
    pub i18n_multiple_files: bool,
    pub i18n_multiple_folders: bool,
    pub i18n_root_multiple_folders: bool,
}

impl StructureMap {
    /// Derive the flag set from the resolved structure and enablement.
    pub fn resolve(i18n_enabled: bool, structure: I18nStructure) -> Self {
        if !i18n_enabled {
            return Self::default();
        }

        Self {
            i18n_single_file: structure == I18nStructure::SingleFile,
            i18n_multiple_files: structure == I18nStructure::MultipleFiles,
            i18n_multiple_folders: structure == I18nStructure::MultipleFolders,
            i18n_root_multiple_folders: structure == I18nStructure::MultipleFoldersI18nRoot,
        }
    }

    /// Whether the layout splits one logical entry across multiple files.
    pub fn is_multi_file(&self) -> bool {
        self.i18n_multiple_files || self.i18n_multiple_folders || self.i18n_root_multiple_folders
    }
}

/// Resolved canonical-slug settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalSlug {
    /// Property name read from entry content to correlate locale-split files.
    pub key: String,

    /// Template used to populate the property for the default locale. Applied
    /// downstream by the entry editor on save; carried here for completeness.
    pub value_template: String,
}

impl Default for CanonicalSlug {
    fn default() -> Self {
        Self {
            key: DEFAULT_CANONICAL_SLUG_KEY.to_string(),
            value_template: DEFAULT_CANONICAL_SLUG_TEMPLATE.to_string(),
        }
    }
}

/// The resolved i18n option set for one collection or collection file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedI18nOptions {
    pub i18n_enabled: bool,
    pub structure: I18nStructure,
    pub structure_map: StructureMap,

    /// All configured locales in display order; `["_default"]` when disabled.
    pub all_locales: Vec<String>,

    /// Always a member of `all_locales`.
    pub default_locale: String,

    /// Locales a new entry starts with; always contains `default_locale`.
    pub initial_locales: Vec<String>,

    pub save_all_locales: bool,
    pub canonical_slug: CanonicalSlug,
    pub omit_default_locale_from_filename: bool,
}

impl NormalizedI18nOptions {
    /// The option set used when no applicable configuration level enables
    /// i18n: a single `_default` pseudo-locale and a single-file layout.
    pub fn disabled() -> Self {
        Self {
            i18n_enabled: false,
            structure: I18nStructure::SingleFile,
            structure_map: StructureMap::default(),
            all_locales: vec![DEFAULT_LOCALE_KEY.to_string()],
            default_locale: DEFAULT_LOCALE_KEY.to_string(),
            initial_locales: vec![DEFAULT_LOCALE_KEY.to_string()],
            save_all_locales: true,
            canonical_slug: CanonicalSlug::default(),
            omit_default_locale_from_filename: false,
        }
    }
}

impl Default for NormalizedI18nOptions {
    fn default() -> Self {
        Self::disabled()
    }
}
