//! Helpers over decoded entry content.
//!
//! Content is an explicit JSON tree ([`serde_json::Value`]); nested field
//! values are addressed by dotted key paths (`seo.title`) rather than by a
//! flattened record.

use serde_json::{Map, Value};

/// Opaque structured value produced by the content decoder. Shape depends on
/// the i18n structure: a plain object, an object keyed by locale, or a bare
/// array for root-list collections.
pub type ParsedContent = Value;

/// Look up a nested value by dotted key path.
pub fn get_path<'a>(content: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(content, |node, key| node.get(key))
}

/// All dotted leaf paths under `prefix`, in document order. An empty prefix
/// lists every leaf.
pub fn keys_under(content: &Value, prefix: &str) -> Vec<String> {
    let mut paths = Vec::new();
    collect_leaf_paths(content, String::new(), &mut paths);
    paths
        .into_iter()
        .filter(|path| {
            prefix.is_empty()
                || path == prefix
                || path.starts_with(&format!("{prefix}."))
        })
        .collect()
}

fn collect_leaf_paths(node: &Value, current: String, out: &mut Vec<String>) {
    match node {
        Value::Object(map) if !map.is_empty() => {
            for (key, value) in map {
                let path = if current.is_empty() {
                    key.clone()
                } else {
                    format!("{current}.{key}")
                };
                collect_leaf_paths(value, path, out);
            }
        }
        _ => {
            if !current.is_empty() {
                out.push(current);
            }
        }
    }
}

/// Bring decoded content into the object shape the assembler branches expect.
///
/// For collections whose schema stores a whole list at the document root, the
/// bare array is wrapped as `{ <field_name>: [...] }` — per locale when the
/// content is a locale-keyed object (`single_file` i18n). Everything else must
/// already be an object. Returns `None` on a shape mismatch, which skips the
/// file silently.
pub fn normalize_shape(
    content: ParsedContent,
    root_list_field: Option<&str>,
    locale_keyed: bool,
    all_locales: &[String],
) -> Option<ParsedContent> {
    let Some(field_name) = root_list_field else {
        return content.is_object().then_some(content);
    };

    if !locale_keyed {
        return match content {
            Value::Array(items) => {
                let mut wrapped = Map::new();
                wrapped.insert(field_name.to_string(), Value::Array(items));
                Some(Value::Object(wrapped))
            }
            _ => None,
        };
    }

    // Locale-keyed: wrap each locale's list independently.
    let Value::Object(map) = content else {
        return None;
    };

    let mut out = Map::new();
    for (key, value) in map {
        if !all_locales.iter().any(|locale| locale == &key) {
            out.insert(key, value);
            continue;
        }

        match value {
            Value::Array(items) => {
                let mut wrapped = Map::new();
                wrapped.insert(field_name.to_string(), Value::Array(items));
                out.insert(key, Value::Object(wrapped));
            }
            _ => return None,
        }
    }

    Some(Value::Object(out))
}
