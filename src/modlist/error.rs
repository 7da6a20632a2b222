//! Errors raised while loading and indexing a modlist

use std::path::PathBuf;

/// Failure to load a `.wabbajack` file. Loading is all-or-nothing.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a valid wabbajack archive: {0}")]
    ArchiveFormat(#[from] zip::result::ZipError),

    #[error("No modlist file found in {0}")]
    ManifestNotFound(PathBuf),

    #[error("Failed to extract modlist: {0}")]
    Extract(#[source] std::io::Error),

    #[error("Failed to parse modlist JSON: {0}")]
    ManifestParse(#[from] serde_json::Error),
}

/// A directive that could not be interpreted. Skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Directive #{position}: {reason}")]
pub struct MalformedDirective {
    /// Index into the manifest's `Directives` array
    pub position: usize,
    pub reason: &'static str,
}

impl MalformedDirective {
    pub fn new(position: usize, reason: &'static str) -> Self {
        Self { position, reason }
    }
}
