//! The entry data model: raw inputs and assembled outputs.

use crate::content::ParsedContent;
use crate::decoder::DecodeError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where a raw file came from: the owning collection and, for file
/// collections, the specific named file plus its locale→path map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderDescriptor {
    pub collection_name: String,

    /// Set for file/singleton collection items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Locale→path map for multi-file singletons; resolves which locale a
    /// given physical path carries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path_map: Option<IndexMap<String, String>>,
}

/// One version-controlled text file as delivered by the file transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFileItem {
    /// Base name, e.g. `hello.en.md`.
    pub name: String,

    /// Repository-relative path, e.g. `content/posts/hello.en.md`.
    pub path: String,

    /// Decoded file text.
    pub text: String,

    /// Content identity, e.g. a blob hash from the version-control provider.
    pub content_id: String,

    /// Size in bytes.
    pub size: u64,

    pub folder: FolderDescriptor,
}

/// One locale's slice of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedEntry {
    pub slug: String,

    /// Path of the file this locale's content came from.
    pub path: String,

    pub content: ParsedContent,
}

/// A fully assembled, locale-aware entry.
///
/// Created the first time any file resolves to it, mutated as further locale
/// files of the same logical entry arrive, and frozen (with an `id`) by the
/// batch driver's final sweep.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Opaque unique identifier, assigned after the whole batch has been
    /// processed.
    pub id: String,

    /// Canonical short name, authoritative from the default locale.
    pub slug: String,

    /// Template-relative path fragment identifying the entry within its
    /// collection.
    pub sub_path: String,

    /// Locale code (or `_default`) → that locale's slug, path, and content.
    pub locales: IndexMap<String, LocalizedEntry>,
}

/// Terminal output of a batch run: the usable entries plus every recoverable
/// per-file failure encountered along the way.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub entries: Vec<Entry>,
    pub errors: Vec<DecodeError>,
}
