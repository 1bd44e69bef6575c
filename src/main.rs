//! `ingest-report`: run the ingestion engine against a local content
//! directory and print a JSON report.
//!
//! Usage: `ingest-report <config.yml> <content-root>`
//!
//! This binary stands in for the version-control file transport: it walks the
//! content root, hashes each file, attributes it to a collection the way a
//! real transport would, and hands the batch to the engine.

use anyhow::{bail, Context, Result};
use entry_ingest::config::{self, SiteConfig};
use entry_ingest::{CollectionRegistry, EntryIngestor, FolderDescriptor, RawFileItem};
use indexmap::IndexMap;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("entry_ingest=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(content_root)) = (args.next(), args.next()) else {
        bail!("usage: ingest-report <config.yml> <content-root>");
    };

    let site = config::load_site_config(&config_path)?;
    let registry = CollectionRegistry::from_site_config(&site)?;
    info!("Loaded {} collections from {}", registry.len(), config_path);

    let files = collect_files(Path::new(&content_root), &site)?;
    info!("Found {} files under {}", files.len(), content_root);

    let result = EntryIngestor::new(&registry).prepare_entries(&files);

    let report = json!({
        "files": files.len(),
        "entries": result.entries,
        "errors": result.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Walk the content root and build raw file items with collection
/// attribution, the way the file transport would deliver them.
fn collect_files(root: &Path, site: &SiteConfig) -> Result<Vec<RawFileItem>> {
    let mut paths = Vec::new();
    walk(root, root, &mut paths)?;
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let full_path = root.join(&path);
            let text = std::fs::read_to_string(&full_path)
                .with_context(|| format!("failed to read {}", full_path.display()))?;

            let name = path.rsplit('/').next().unwrap_or(&path).to_string();
            let content_id = hex::encode(Sha256::digest(text.as_bytes()));
            let size = text.len() as u64;
            let folder = attribute_to_collection(&path, site);

            Ok(RawFileItem {
                name,
                path,
                text,
                content_id,
                size,
                folder,
            })
        })
        .collect()
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    for dir_entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
    {
        let path = dir_entry?.path();
        if path.is_dir() {
            walk(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(())
}

/// Decide which collection a path belongs to. File-collection templates are
/// matched first (with `{{locale}}` substituted per configured locale), then
/// entry-collection folders by prefix. Unattributed files keep their first
/// path segment as a collection name; the engine skips them as unknown.
fn attribute_to_collection(path: &str, site: &SiteConfig) -> FolderDescriptor {
    let locales: Vec<String> = site
        .i18n
        .as_ref()
        .map(|i18n| i18n.locales.clone())
        .unwrap_or_default();

    for collection in &site.collections {
        for file in &collection.files {
            if !file.path_template.contains("{{locale}}") {
                if file.path_template == path {
                    return FolderDescriptor {
                        collection_name: collection.name.clone(),
                        file_name: Some(file.name.clone()),
                        file_path_map: None,
                    };
                }
                continue;
            }

            let map: IndexMap<String, String> = locales
                .iter()
                .map(|locale| {
                    (
                        locale.clone(),
                        file.path_template.replace("{{locale}}", locale),
                    )
                })
                .collect();

            if map.values().any(|candidate| candidate == path) {
                return FolderDescriptor {
                    collection_name: collection.name.clone(),
                    file_name: Some(file.name.clone()),
                    file_path_map: Some(map),
                };
            }
        }

        if let Some(folder) = &collection.folder {
            let folder = folder.trim_matches('/');
            // Root-level locale folders sit above the collection folder.
            let locale_prefixed = locales
                .iter()
                .any(|locale| path.starts_with(&format!("{locale}/{folder}/")));
            if path.starts_with(&format!("{folder}/")) || locale_prefixed {
                return FolderDescriptor {
                    collection_name: collection.name.clone(),
                    file_name: None,
                    file_path_map: None,
                };
            }
        }
    }

    FolderDescriptor {
        collection_name: path.split('/').next().unwrap_or_default().to_string(),
        file_name: None,
        file_path_map: None,
    }
}
