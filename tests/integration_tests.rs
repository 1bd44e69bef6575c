//! Integration tests for the content ingestion engine.
//!
//! These tests exercise the full pipeline — site config → collection
//! registry → batch driver → assembled entries — the way a content-store
//! caller would drive it. Component-level behavior is covered by the unit
//! tests next to each module.

use entry_ingest::config::SiteConfig;
use entry_ingest::entry::{FolderDescriptor, RawFileItem};
use entry_ingest::{CollectionRegistry, EntryIngestor};
use indexmap::IndexMap;
use serde_json::json;
use std::collections::HashSet;

// ==================== Test Helpers ====================

fn registry_from_yaml(yaml: &str) -> CollectionRegistry {
    let site: SiteConfig = serde_yaml_ng::from_str(yaml).expect("site config");
    CollectionRegistry::from_site_config(&site).expect("registry")
}

fn entry_file(path: &str, collection_name: &str, text: &str) -> RawFileItem {
    RawFileItem {
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path: path.to_string(),
        text: text.to_string(),
        content_id: format!("sha:{path}"),
        size: text.len() as u64,
        folder: FolderDescriptor {
            collection_name: collection_name.to_string(),
            file_name: None,
            file_path_map: None,
        },
    }
}

fn singleton_file(
    path: &str,
    collection_name: &str,
    file_name: &str,
    file_path_map: Option<IndexMap<String, String>>,
    text: &str,
) -> RawFileItem {
    RawFileItem {
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path: path.to_string(),
        text: text.to_string(),
        content_id: format!("sha:{path}"),
        size: text.len() as u64,
        folder: FolderDescriptor {
            collection_name: collection_name.to_string(),
            file_name: Some(file_name.to_string()),
            file_path_map,
        },
    }
}

// ==================== Multi-File i18n Tests ====================

const MULTI_FILE_CONFIG: &str = r#"
i18n:
  structure: multiple_files
  locales: [en, fr]
  default_locale: en
collections:
  - name: posts
    folder: posts
    i18n: true
"#;

#[test]
fn test_two_locale_files_merge_into_one_entry() {
    let registry = registry_from_yaml(MULTI_FILE_CONFIG);
    let files = vec![
        entry_file("posts/hello.en.md", "posts", "---\ntitle: Hi\n---\n"),
        entry_file("posts/hello.fr.md", "posts", "---\ntitle: Salut\n---\n"),
    ];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);

    assert!(result.errors.is_empty());
    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    assert_eq!(entry.slug, "hello");
    assert_eq!(entry.locales["en"].content["title"], json!("Hi"));
    assert_eq!(entry.locales["fr"].content["title"], json!("Salut"));
}

#[test]
fn test_merge_is_order_independent() {
    let registry = registry_from_yaml(MULTI_FILE_CONFIG);
    let en = entry_file("posts/hello.en.md", "posts", "---\ntitle: Hi\n---\n");
    let fr = entry_file("posts/hello.fr.md", "posts", "---\ntitle: Salut\n---\n");

    let forward = EntryIngestor::new(&registry).prepare_entries(&[en.clone(), fr.clone()]);
    let reverse = EntryIngestor::new(&registry).prepare_entries(&[fr, en]);

    assert_eq!(forward.entries.len(), 1);
    assert_eq!(reverse.entries.len(), 1);
    assert_eq!(forward.entries[0].slug, reverse.entries[0].slug);
    assert_eq!(forward.entries[0].sub_path, reverse.entries[0].sub_path);
    assert_eq!(
        forward.entries[0].locales["en"],
        reverse.entries[0].locales["en"]
    );
    assert_eq!(
        forward.entries[0].locales["fr"],
        reverse.entries[0].locales["fr"]
    );
}

#[test]
fn test_multiple_folders_structure() {
    let registry = registry_from_yaml(
        r#"
i18n:
  structure: multiple_folders
  locales: [en, fr]
  default_locale: en
collections:
  - name: docs
    folder: docs
    i18n: true
"#,
    );
    let files = vec![
        entry_file("docs/en/setup.md", "docs", "---\ntitle: Setup\n---\n"),
        entry_file("docs/fr/setup.md", "docs", "---\ntitle: Installation\n---\n"),
    ];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    assert_eq!(entry.slug, "setup");
    assert_eq!(entry.locales.len(), 2);
    assert_eq!(entry.locales["fr"].content["title"], json!("Installation"));
}

#[test]
fn test_canonical_slug_correlates_localized_file_names() {
    let registry = registry_from_yaml(MULTI_FILE_CONFIG);
    let files = vec![
        entry_file(
            "posts/bonjour.fr.md",
            "posts",
            "---\ntitle: Salut\ntranslationKey: greeting\n---\n",
        ),
        entry_file(
            "posts/hello.en.md",
            "posts",
            "---\ntitle: Hi\ntranslationKey: greeting\n---\n",
        ),
    ];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
    // Default-locale naming wins even though the French file arrived first.
    assert_eq!(result.entries[0].slug, "hello");
    assert_eq!(result.entries[0].locales["fr"].slug, "bonjour");
}

// ==================== Single-File i18n Tests ====================

#[test]
fn test_single_file_structure_splits_locales() {
    let registry = registry_from_yaml(
        r#"
i18n:
  structure: single_file
  locales: [en, fr, de]
  default_locale: en
collections:
  - name: pages
    folder: pages
    format: yaml
    i18n: true
"#,
    );
    let files = vec![entry_file(
        "pages/about.yml",
        "pages",
        "en:\n  title: About\nfr:\n  title: À propos\n",
    )];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    assert_eq!(entry.locales.len(), 2);
    assert_eq!(entry.locales["en"].content["title"], json!("About"));
    assert_eq!(entry.locales["fr"].content["title"], json!("À propos"));
    assert!(!entry.locales.contains_key("de"));
}

// ==================== Non-i18n Tests ====================

#[test]
fn test_plain_collection_with_slug_template() {
    let registry = registry_from_yaml(
        r#"
collections:
  - name: posts
    folder: posts
    path: "{{year}}/{{slug}}"
"#,
    );
    let files = vec![entry_file(
        "posts/2023/my-post.md",
        "posts",
        "---\ntitle: My Post\n---\nBody text\n",
    )];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    assert_eq!(entry.slug, "my-post");
    assert_eq!(entry.sub_path, "2023/my-post");
    assert_eq!(entry.locales["_default"].content["body"], json!("Body text\n"));
}

// ==================== Index-File Tests ====================

#[test]
fn test_index_files_are_skipped_by_default() {
    let registry = registry_from_yaml(
        r#"
collections:
  - name: sections
    folder: content
"#,
    );
    let files = vec![
        entry_file("content/_index.md", "sections", "---\ntitle: Home\n---\n"),
        entry_file("content/about.md", "sections", "---\ntitle: About\n---\n"),
    ];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].slug, "about");
}

#[test]
fn test_registered_index_file_is_kept() {
    let registry = registry_from_yaml(
        r#"
collections:
  - name: sections
    folder: content
    index_file:
      name: _index
"#,
    );
    let files = vec![entry_file(
        "content/_index.md",
        "sections",
        "---\ntitle: Home\n---\n",
    )];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].slug, "_index");
}

// ==================== File Collection Tests ====================

#[test]
fn test_multi_locale_singleton_merges_into_one_entry() {
    let registry = registry_from_yaml(
        r#"
i18n:
  locales: [en, fr]
  default_locale: en
collections:
  - name: settings
    files:
      - name: general
        file: data/general.{{locale}}.yml
"#,
    );

    let mut path_map = IndexMap::new();
    path_map.insert("en".to_string(), "data/general.en.yml".to_string());
    path_map.insert("fr".to_string(), "data/general.fr.yml".to_string());

    let files = vec![
        singleton_file(
            "data/general.en.yml",
            "settings",
            "general",
            Some(path_map.clone()),
            "site_title: My Site\n",
        ),
        singleton_file(
            "data/general.fr.yml",
            "settings",
            "general",
            Some(path_map),
            "site_title: Mon Site\n",
        ),
    ];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    assert_eq!(entry.slug, "general");
    assert_eq!(entry.locales["en"].content["site_title"], json!("My Site"));
    assert_eq!(entry.locales["fr"].content["site_title"], json!("Mon Site"));
}

// ==================== Batch Integrity Tests ====================

#[test]
fn test_batch_integrity_with_mixed_input() {
    let registry = registry_from_yaml(MULTI_FILE_CONFIG);
    let files = vec![
        entry_file("posts/hello.en.md", "posts", "---\ntitle: Hi\n---\n"),
        entry_file("posts/hello.fr.md", "posts", "---\ntitle: Salut\n---\n"),
        entry_file("posts/other.en.md", "posts", "---\ntitle: Other\n---\n"),
        entry_file("posts/broken.en.md", "posts", "---\ntitle: [unclosed\n---\n"),
        entry_file("posts/_index.md", "posts", "---\ntitle: Section\n---\n"),
        entry_file("static/logo.svg", "assets", "<svg/>"),
    ];

    let result = EntryIngestor::new(&registry).prepare_entries(&files);

    // Usable entries arrive even though the batch contains failures.
    assert_eq!(result.entries.len(), 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "posts/broken.en.md");

    assert!(result.entries.len() <= files.len());
    let ids: HashSet<&str> = result.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), result.entries.len());
    for entry in &result.entries {
        assert!(!entry.slug.is_empty());
        assert!(!entry.locales.is_empty());
    }
}

// ==================== Config Loading Tests ====================

#[test]
fn test_pipeline_from_config_file_on_disk() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.yml");
    std::fs::write(&config_path, MULTI_FILE_CONFIG).expect("write config");

    let site = entry_ingest::config::load_site_config(&config_path).expect("load");
    let registry = CollectionRegistry::from_site_config(&site).expect("registry");

    let files = vec![entry_file(
        "posts/hello.en.md",
        "posts",
        "---\ntitle: Hi\n---\n",
    )];
    let result = EntryIngestor::new(&registry).prepare_entries(&files);
    assert_eq!(result.entries.len(), 1);
}
