//! Policy for the generator's special `_index` files.
//!
//! Some static-site generators keep section-level content in a file named
//! `_index` (optionally locale-suffixed, e.g. `_index.fr.md`). Those files are
//! normally not addressable entries and must be skipped, unless a collection
//! explicitly registers them or repurposes them through its sub-path template.

use crate::config::IndexFileConfig;
use regex::Regex;
use std::sync::OnceLock;

static INDEX_FILE_RE: OnceLock<Regex> = OnceLock::new();

fn index_file_re() -> &'static Regex {
    INDEX_FILE_RE.get_or_init(|| {
        Regex::new(r"(?:^|/)_index(?:\.[a-zA-Z0-9-]+)?\.[a-zA-Z0-9]+$")
            .expect("index file pattern should be valid")
    })
}

/// Whether a path's base name is exactly `_index.<ext>` or
/// `_index.<locale>.<ext>`. Case-sensitive; no extra characters allowed.
pub fn is_index_file(path: &str) -> bool {
    index_file_re().is_match(path)
}

/// Whether an index file should be silently excluded from entry assembly.
///
/// Never skips file-collection items or non-index paths. An index file
/// survives when the collection registers it explicitly, or when the sub-path
/// template itself targets `_index` — the latter only for the Markdown
/// format, the one format allowed to repurpose the generator's index file as
/// addressable content.
pub fn should_skip_index_file(
    path: &str,
    file_name: Option<&str>,
    index_file: Option<&IndexFileConfig>,
    sub_path_template: Option<&str>,
    extension: &str,
) -> bool {
    if file_name.is_some() {
        return false;
    }

    if !is_index_file(path) {
        return false;
    }

    if index_file.is_some() {
        return false;
    }

    if sub_path_template.is_some_and(|template| template.ends_with("_index")) && extension == "md" {
        return false;
    }

    true
}
