//! The batch driver: one pass over every raw file, then a final sweep.

use crate::assembler::{assemble_file, AssemblyOutcome, EntryAccumulator};
use crate::decoder::{ContentDecoder, DefaultDecoder};
use crate::entry::{BatchResult, RawFileItem};
use crate::id::{IdGenerator, UuidGenerator};
use crate::registry::CollectionRegistry;
use tracing::{debug, info, warn};

/// Drives entry preparation for a whole file batch.
///
/// Per-file problems never abort the batch: decode failures are collected
/// into the result's error list, everything else is a silent skip.
pub struct EntryIngestor<'a> {
    registry: &'a CollectionRegistry,
    decoder: Box<dyn ContentDecoder + 'a>,
    ids: Box<dyn IdGenerator + 'a>,
}

impl<'a> EntryIngestor<'a> {
    /// Ingestor with the bundled decoder and UUID id generator.
    pub fn new(registry: &'a CollectionRegistry) -> Self {
        Self {
            registry,
            decoder: Box::new(DefaultDecoder::default()),
            ids: Box::new(UuidGenerator),
        }
    }

    /// Substitute the content decoder.
    pub fn with_decoder(mut self, decoder: Box<dyn ContentDecoder + 'a>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Substitute the id generator.
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator + 'a>) -> Self {
        self.ids = ids;
        self
    }

    /// Process every raw file and return the assembled entries plus all
    /// recoverable decode errors.
    pub fn prepare_entries(&self, files: &[RawFileItem]) -> BatchResult {
        let mut accumulator = EntryAccumulator::default();
        let mut errors = Vec::new();

        let mut new_count = 0usize;
        let mut merged_count = 0usize;
        let mut skipped_count = 0usize;

        for file in files {
            let parsed = match self.decoder.decode(file) {
                Ok(parsed) => parsed,
                Err(error) => {
                    warn!("✗ {}", error);
                    errors.push(error);
                    continue;
                }
            };

            let Some(collection) = self.registry.get_collection(&file.folder.collection_name)
            else {
                debug!(
                    "Skipping {}: unknown collection {}",
                    file.path, file.folder.collection_name
                );
                skipped_count += 1;
                continue;
            };

            let file_config = match &file.folder.file_name {
                Some(file_name) => {
                    match self.registry.get_collection_file(collection, file_name) {
                        Some(file_config) => Some(file_config),
                        None => {
                            debug!(
                                "Skipping {}: collection {} has no file {}",
                                file.path, collection.name, file_name
                            );
                            skipped_count += 1;
                            continue;
                        }
                    }
                }
                None => None,
            };

            match assemble_file(file, parsed, collection, file_config, &mut accumulator) {
                AssemblyOutcome::New => new_count += 1,
                AssemblyOutcome::Merged => merged_count += 1,
                AssemblyOutcome::Skipped => skipped_count += 1,
            }
        }

        // Barrier: ids and the validity filter only after the whole batch,
        // since a locale contribution may arrive with any file.
        let entries = accumulator.into_entries(self.ids.as_ref());

        info!(
            "Batch complete: {} entries ({} new, {} merged), {} skipped, {} errors from {} files",
            entries.len(),
            new_count,
            merged_count,
            skipped_count,
            errors.len(),
            files.len()
        );

        BatchResult { entries, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::entry::FolderDescriptor;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingIds(AtomicUsize);

    impl IdGenerator for CountingIds {
        fn new_id(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::Relaxed))
        }
    }

    fn registry(yaml: &str) -> CollectionRegistry {
        let site: SiteConfig = serde_yaml_ng::from_str(yaml).expect("site config");
        CollectionRegistry::from_site_config(&site).expect("registry")
    }

    fn markdown_file(path: &str, collection_name: &str, text: &str) -> RawFileItem {
        RawFileItem {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            text: text.to_string(),
            content_id: format!("sha:{path}"),
            size: text.len() as u64,
            folder: FolderDescriptor {
                collection_name: collection_name.to_string(),
                ..FolderDescriptor::default()
            },
        }
    }

    fn posts_registry() -> CollectionRegistry {
        registry(
            r#"
i18n:
  structure: multiple_files
  locales: [en, fr]
  default_locale: en
collections:
  - name: posts
    folder: posts
    i18n: true
"#,
        )
    }

    // ==================== Scenario Tests ====================

    #[test]
    fn test_two_locale_files_yield_one_entry() {
        let registry = posts_registry();
        let files = vec![
            markdown_file("posts/hello.en.md", "posts", "---\ntitle: Hi\n---\n"),
            markdown_file("posts/hello.fr.md", "posts", "---\ntitle: Salut\n---\n"),
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
    fn test_decode_error_does_not_abort_batch() {
        let registry = posts_registry();
        let files = vec![
            markdown_file("posts/bad.en.md", "posts", "---\ntitle: [unclosed\n---\n"),
            markdown_file("posts/good.en.md", "posts", "---\ntitle: Fine\n---\n"),
        ];

        let result = EntryIngestor::new(&registry).prepare_entries(&files);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "posts/bad.en.md");
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].slug, "good");
    }

    #[test]
    fn test_unknown_collection_is_silent_skip() {
        let registry = posts_registry();
        let files = vec![markdown_file(
            "notes/stray.en.md",
            "notes",
            "---\ntitle: Stray\n---\n",
        )];

        let result = EntryIngestor::new(&registry).prepare_entries(&files);
        assert!(result.entries.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_unknown_collection_file_is_silent_skip() {
        let registry = registry(
            r#"
collections:
  - name: settings
    files:
      - name: general
        file: data/general.yml
"#,
        );
        let mut file = markdown_file("data/other.yml", "settings", "site_title: X\n");
        file.folder.file_name = Some("other".to_string());

        let result = EntryIngestor::new(&registry).prepare_entries(&[file]);
        assert!(result.entries.is_empty());
        assert!(result.errors.is_empty());
    }

    // ==================== Integrity Tests ====================

    #[test]
    fn test_batch_integrity_invariants() {
        let registry = posts_registry();
        let files = vec![
            markdown_file("posts/hello.en.md", "posts", "---\ntitle: Hi\n---\n"),
            markdown_file("posts/hello.fr.md", "posts", "---\ntitle: Salut\n---\n"),
            markdown_file("posts/other.en.md", "posts", "---\ntitle: Other\n---\n"),
            markdown_file("posts/_index.md", "posts", "---\ntitle: Section\n---\n"),
            markdown_file("posts/broken.en.md", "posts", "---\ntitle: [unclosed\n---\n"),
        ];

        let result = EntryIngestor::new(&registry).prepare_entries(&files);

        assert!(result.entries.len() <= files.len());
        let ids: HashSet<&str> = result.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), result.entries.len());
        for entry in &result.entries {
            assert!(!entry.slug.is_empty());
            assert!(!entry.locales.is_empty());
        }
    }

    #[test]
    fn test_injected_id_generator() {
        let registry = posts_registry();
        let files = vec![
            markdown_file("posts/a.en.md", "posts", "---\ntitle: A\n---\n"),
            markdown_file("posts/b.en.md", "posts", "---\ntitle: B\n---\n"),
        ];

        let result = EntryIngestor::new(&registry)
            .with_id_generator(Box::new(CountingIds(AtomicUsize::new(0))))
            .prepare_entries(&files);

        let ids: Vec<&str> = result.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["id-0", "id-1"]);
    }

    #[test]
    fn test_empty_batch() {
        let registry = posts_registry();
        let result = EntryIngestor::new(&registry).prepare_entries(&[]);
        assert!(result.entries.is_empty());
        assert!(result.errors.is_empty());
    }
}
