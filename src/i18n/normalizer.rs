//! Merges site, collection, and file i18n settings into one resolved set.

use crate::config::{
    CollectionConfig, CollectionFileConfig, I18nConfig, I18nOverride, InitialLocales,
};
use crate::i18n::options::{CanonicalSlug, I18nStructure, NormalizedI18nOptions, StructureMap};

/// Resolve the i18n options applying to `collection`, or to one named `file`
/// of a file collection when given.
///
/// Merge order: site settings, overridden by the collection's `i18n` block,
/// overridden by the file's own `i18n` block. A collection without an i18n
/// declaration resolves to the disabled default unless it is a file/singleton
/// collection, which inherits the site settings directly. A file declaring
/// `i18n: false` is disabled regardless of the outer levels.
pub fn normalize(
    site: Option<&I18nConfig>,
    collection: &CollectionConfig,
    file: Option<&CollectionFileConfig>,
) -> NormalizedI18nOptions {
    let mut merged = match &collection.i18n {
        Some(I18nOverride::Enabled(true)) => site.cloned(),
        Some(I18nOverride::Enabled(false)) => None,
        Some(I18nOverride::Config(block)) => Some(overlay(site, block)),
        // Singletons have no per-collection block to override and inherit the
        // site settings as-is; entry collections must opt in.
        None if collection.is_file_collection() => site.cloned(),
        None => None,
    };

    if let Some(file) = file {
        match &file.i18n {
            Some(I18nOverride::Enabled(false)) => return NormalizedI18nOptions::disabled(),
            Some(I18nOverride::Enabled(true)) | None => {}
            Some(I18nOverride::Config(block)) => merged = Some(overlay(merged.as_ref(), block)),
        }
    }

    let Some(config) = merged else {
        return NormalizedI18nOptions::disabled();
    };

    if config.locales.is_empty() {
        return NormalizedI18nOptions::disabled();
    }

    let all_locales = config.locales.clone();

    let default_locale = config
        .default_locale
        .clone()
        .filter(|locale| all_locales.contains(locale))
        .unwrap_or_else(|| all_locales[0].clone());

    // The shape of a file's path template is authoritative for its structure,
    // overriding any configured value.
    let structure = match file {
        Some(file) if file.path_template.contains("{{locale}}") => I18nStructure::MultipleFiles,
        Some(_) => I18nStructure::SingleFile,
        None => config.structure.unwrap_or_default(),
    };

    let (initial_locales, save_all_locales) = resolve_initial_locales(
        config.initial_locales.as_ref(),
        config.save_all_locales,
        &all_locales,
        &default_locale,
    );

    let canonical_slug = config
        .canonical_slug
        .as_ref()
        .map(|slug| {
            let defaults = CanonicalSlug::default();
            CanonicalSlug {
                key: slug.key.clone().unwrap_or(defaults.key),
                value_template: slug.value_template.clone().unwrap_or(defaults.value_template),
            }
        })
        .unwrap_or_default();

    let omit_requested = config.omit_default_locale_from_filename == Some(true);
    let omit_default_locale_from_filename = omit_requested
        && match file {
            Some(file) => template_splits_locale(&file.path_template),
            None => structure == I18nStructure::MultipleFiles,
        };

    NormalizedI18nOptions {
        i18n_enabled: true,
        structure,
        structure_map: StructureMap::resolve(true, structure),
        all_locales,
        default_locale,
        initial_locales,
        save_all_locales,
        canonical_slug,
        omit_default_locale_from_filename,
    }
}

/// Field-wise override of `base` with `over`.
fn overlay(base: Option<&I18nConfig>, over: &I18nConfig) -> I18nConfig {
    let Some(base) = base else {
        return over.clone();
    };

    I18nConfig {
        structure: over.structure.or(base.structure),
        locales: if over.locales.is_empty() {
            base.locales.clone()
        } else {
            over.locales.clone()
        },
        default_locale: over.default_locale.clone().or(base.default_locale.clone()),
        initial_locales: over
            .initial_locales
            .clone()
            .or(base.initial_locales.clone()),
        save_all_locales: over.save_all_locales.or(base.save_all_locales),
        canonical_slug: over.canonical_slug.clone().or(base.canonical_slug.clone()),
        omit_default_locale_from_filename: over
            .omit_default_locale_from_filename
            .or(base.omit_default_locale_from_filename),
    }
}

/// Resolve `initial_locales` plus the `save_all_locales` flag it supersedes.
fn resolve_initial_locales(
    initial: Option<&InitialLocales>,
    save_all_locales: Option<bool>,
    all_locales: &[String],
    default_locale: &str,
) -> (Vec<String>, bool) {
    match initial {
        None => (all_locales.to_vec(), save_all_locales != Some(false)),
        Some(InitialLocales::Keyword(keyword)) if keyword == "default" => {
            (vec![default_locale.to_string()], false)
        }
        // `all`, and any unrecognized keyword, start with every locale.
        Some(InitialLocales::Keyword(_)) => (all_locales.to_vec(), false),
        Some(InitialLocales::List(list)) => {
            let mut locales: Vec<String> = list
                .iter()
                .filter(|locale| all_locales.iter().any(|l| l == *locale))
                .cloned()
                .collect();
            if !locales.iter().any(|l| l == default_locale) {
                locales.insert(0, default_locale.to_string());
            }
            (locales, false)
        }
    }
}

/// Whether a file path template structurally separates the locale into the
/// file name or a folder segment.
fn template_splits_locale(template: &str) -> bool {
    template.contains(".{{locale}}.") || template.contains("{{locale}}/")
}
