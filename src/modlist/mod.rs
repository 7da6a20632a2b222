//! Wabbajack modlist reading and indexing
//!
//! This module handles:
//! - Opening .wabbajack files (ZIP archives)
//! - Extracting and parsing the modlist JSON
//! - Deriving per-archive lookups, file trees and download links

mod error;
mod index;
mod links;
mod source;
mod tree;
mod types;

pub use error::*;
pub use index::*;
pub use links::*;
pub use source::*;
pub use tree::*;
pub use types::*;

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Entry names the manifest may be stored under
const MANIFEST_ENTRY_NAMES: [&str; 2] = ["modlist", "modlist.json"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Open a .wabbajack file and parse the modlist
pub fn parse_wabbajack_file(path: &Path) -> Result<Manifest, LoadError> {
    read_manifest_in(path, &std::env::temp_dir())
}

/// Like [`parse_wabbajack_file`], extracting into a scratch directory created
/// under `temp_base_dir`. The scratch directory is removed before returning.
pub fn read_manifest_in(path: &Path, temp_base_dir: &Path) -> Result<Manifest, LoadError> {
    info!("Opening wabbajack file: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut archive = ZipArchive::new(BufReader::new(file))?;
    debug!("Archive contains {} files", archive.len());

    let entry_name = find_manifest_entry(&archive)
        .ok_or_else(|| LoadError::ManifestNotFound(path.to_path_buf()))?;

    // Dropped on every return below, which deletes the extracted copy
    let temp_dir = tempfile::Builder::new()
        .prefix("wjview-")
        .tempdir_in(temp_base_dir)
        .map_err(LoadError::Extract)?;

    let extracted = temp_dir.path().join(&entry_name);
    {
        let mut entry = archive.by_name(&entry_name)?;
        let mut out = File::create(&extracted).map_err(LoadError::Extract)?;
        io::copy(&mut entry, &mut out).map_err(LoadError::Extract)?;
    }

    let data = fs::read(&extracted).map_err(LoadError::Extract)?;
    info!("Read {} bytes of JSON from '{}'", data.len(), entry_name);

    // .NET tooling likes to write a byte order mark
    let json = data.strip_prefix(UTF8_BOM).unwrap_or(&data[..]);
    let manifest: Manifest = serde_json::from_slice(json)?;

    info!(
        "Parsed modlist '{}' v{} - {} archives, {} directives",
        manifest.name,
        manifest.version,
        manifest.archives.len(),
        manifest.directives.len()
    );

    Ok(manifest)
}

/// Name of the manifest entry, in central directory order.
///
/// A container holding both names is ambiguous; the first one wins and the
/// other is reported.
fn find_manifest_entry<R: io::Read + io::Seek>(archive: &ZipArchive<R>) -> Option<String> {
    let mut candidates = archive
        .file_names()
        .filter(|name| MANIFEST_ENTRY_NAMES.contains(name));

    let chosen = candidates.next()?.to_string();
    for ignored in candidates {
        warn!(
            "Archive contains both '{}' and '{}'; using '{}'",
            chosen, ignored, chosen
        );
    }

    Some(chosen)
}
