//! Path and slug template matching.
//!
//! Templates are literal paths with `{{name}}` placeholders, e.g.
//! `{{year}}/{{slug}}`. Compilation turns a template into a regular
//! expression: literals are escaped, placeholders match one path segment, and
//! the `{{slug}}` placeholder captures greedily up to the next literal
//! delimiter.

use crate::entry::RawFileItem;
use regex::Regex;

/// Compiles a slug template into a matching pattern. The default compiler is
/// regex-based; callers that need different matching semantics (e.g. a
/// hand-rolled segment matcher) can substitute their own.
pub trait SlugTemplateCompiler {
    /// Compile `template` into a pattern with a named `slug` capture group.
    /// Returns `None` when the template cannot be compiled.
    fn compile(&self, template: &str) -> Option<Regex>;
}

/// The default, regex-backed template compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTemplateCompiler;

impl SlugTemplateCompiler for RegexTemplateCompiler {
    fn compile(&self, template: &str) -> Option<Regex> {
        let pattern = format!("^{}$", pattern_from_template(template, true));
        Regex::new(&pattern).ok()
    }
}

/// Translate a template into a regex fragment. With `named_slug`, the
/// `{{slug}}` placeholder becomes a named capture group; other placeholders
/// match a single path segment without capturing.
///
/// An unterminated `{{` stops placeholder parsing: the remainder is treated
/// as literal text, so real paths fail to match and callers fall back.
pub(crate) fn pattern_from_template(template: &str, named_slug: bool) -> String {
    let mut pattern = String::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        pattern.push_str(&regex::escape(&rest[..start]));
        let after = &rest[start + 2..];

        match after.find("}}") {
            Some(end) => {
                if &after[..end] == "slug" && named_slug {
                    pattern.push_str("(?P<slug>.+)");
                } else {
                    pattern.push_str("[^/]+");
                }
                rest = &after[end + 2..];
            }
            None => {
                pattern.push_str(&regex::escape(&rest[start..]));
                rest = "";
            }
        }
    }

    pattern.push_str(&regex::escape(rest));
    pattern
}

/// Extract the logical slug from a sub-path. Never fails: without a template,
/// without a `{{slug}}` placeholder, or on any match failure, the sub-path is
/// returned unchanged.
pub fn get_slug(sub_path: &str, template: Option<&str>) -> String {
    get_slug_with(&RegexTemplateCompiler, sub_path, template)
}

/// [`get_slug`] with an explicit template compiler.
pub fn get_slug_with(
    compiler: &dyn SlugTemplateCompiler,
    sub_path: &str,
    template: Option<&str>,
) -> String {
    let Some(template) = template else {
        return sub_path.to_string();
    };

    if !template.contains("{{slug}}") {
        return sub_path.to_string();
    }

    let Some(pattern) = compiler.compile(template) else {
        return sub_path.to_string();
    };

    match pattern.captures(sub_path).and_then(|caps| caps.name("slug")) {
        Some(slug) => slug.as_str().to_string(),
        None => sub_path.to_string(),
    }
}

/// Positional identity extracted from a file's path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathInfo {
    /// Template-relative path fragment; `None` when the path does not belong
    /// to the collection.
    pub sub_path: Option<String>,

    /// Locale carried by the path, when determinable.
    pub locale: Option<String>,
}

/// Resolve a file's sub-path and locale.
///
/// File-collection items (`file_name` given) use the path itself as sub-path;
/// under a multi-file layout the locale is whichever key of the folder's
/// locale→path map points at this exact path (an empty key counts as no
/// locale). Entry-collection items are matched against the collection's
/// precompiled full-path pattern; a missing `locale` capture falls back to
/// `default_locale`, which is the `_default` pseudo-locale when i18n is
/// disabled.
pub fn extract_path_info(
    file: &RawFileItem,
    file_name: Option<&str>,
    full_path_regex: Option<&Regex>,
    default_locale: &str,
    is_multi_file_structure: bool,
) -> PathInfo {
    if file_name.is_some() {
        if !is_multi_file_structure {
            return PathInfo {
                sub_path: Some(file.path.clone()),
                locale: None,
            };
        }

        let locale = file
            .folder
            .file_path_map
            .as_ref()
            .and_then(|map| {
                map.iter()
                    .find(|(_, path)| path.as_str() == file.path)
                    .map(|(locale, _)| locale.clone())
            })
            .filter(|locale| !locale.is_empty());

        return PathInfo {
            sub_path: Some(file.path.clone()),
            locale,
        };
    }

    let Some(pattern) = full_path_regex else {
        return PathInfo::default();
    };

    let Some(caps) = pattern.captures(&file.path) else {
        return PathInfo::default();
    };

    let sub_path = caps.name("sub_path").map(|m| m.as_str().to_string());
    let locale = caps
        .name("locale")
        .map(|m| m.as_str().to_string())
        .or_else(|| Some(default_locale.to_string()));

    PathInfo { sub_path, locale }
}
