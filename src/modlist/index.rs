//! Lookups derived from a loaded manifest

use std::collections::HashMap;

use tracing::{debug, warn};

use super::error::MalformedDirective;
use super::types::{Directive, Manifest};

/// One file an archive contributes to the installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Install path, relative, `/`-separated
    pub target_path: String,
    /// Path inside the source archive
    pub source_path: String,
    pub size: u64,
}

/// Per-archive view of a manifest.
///
/// Built from scratch by [`ModlistIndex::build`]; nothing carries over between
/// builds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModlistIndex {
    /// Archive hash -> archive filename
    pub archive_names: HashMap<String, String>,
    /// Archive hash -> `FromArchive` files in directive order
    pub mod_details: HashMap<String, Vec<FileEntry>>,
    /// Directive type -> count, including non-archive directives
    pub directive_counts: HashMap<String, usize>,
    /// Directives that were skipped because they could not be interpreted
    pub malformed: Vec<MalformedDirective>,
    /// `FromArchive` directives naming an archive the manifest does not list
    pub orphaned: usize,
}

impl ModlistIndex {
    pub fn build(manifest: &Manifest) -> Self {
        let mut index = Self::default();

        for archive in &manifest.archives {
            index
                .archive_names
                .insert(archive.hash.clone(), archive.name.clone());
        }

        for (position, value) in manifest.directives.iter().enumerate() {
            let directive = match Directive::from_value(position, value) {
                Ok(d) => d,
                Err(e) => {
                    warn!("Skipping malformed directive: {}", e);
                    index.malformed.push(e);
                    continue;
                }
            };

            *index
                .directive_counts
                .entry(directive.directive_type().to_string())
                .or_insert(0) += 1;

            let Directive::FromArchive(d) = directive else {
                continue;
            };

            if !index.archive_names.contains_key(&d.archive_hash) {
                debug!("Directive #{} references unknown archive {}", position, d.archive_hash);
                index.orphaned += 1;
                continue;
            }

            index
                .mod_details
                .entry(d.archive_hash)
                .or_default()
                .push(FileEntry {
                    target_path: d.to,
                    source_path: d.archive_path,
                    size: d.size,
                });
        }

        debug!(
            "Indexed {} archives, {} with file details ({} malformed, {} orphaned directives)",
            index.archive_names.len(),
            index.mod_details.len(),
            index.malformed.len(),
            index.orphaned
        );

        index
    }

    /// Files an archive installs; empty for archives without directives
    pub fn files_for(&self, hash: &str) -> &[FileEntry] {
        self.mod_details.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of directives installing files straight from an archive
    pub fn from_archive_count(&self) -> usize {
        self.mod_details.values().map(Vec::len).sum()
    }
}
