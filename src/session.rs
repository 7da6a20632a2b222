//! The currently loaded modlist
//!
//! A [`Session`] holds at most one [`LoadedModlist`]. Loading reads and indexes
//! the new file completely before touching the current one, so a failed load
//! leaves whatever was loaded before (or nothing) in place.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::catalogue::Catalogue;
use crate::modlist::{self, LoadError, Manifest, ModlistIndex};

/// A parsed modlist together with its derived lookups
#[derive(Debug)]
pub struct LoadedModlist {
    pub source_path: PathBuf,
    pub manifest: Manifest,
    pub index: ModlistIndex,
}

impl LoadedModlist {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let manifest = modlist::parse_wabbajack_file(path)?;
        let index = ModlistIndex::build(&manifest);
        Ok(Self {
            source_path: path.to_path_buf(),
            manifest,
            index,
        })
    }

    pub fn catalogue(&self) -> Catalogue<'_> {
        Catalogue::new(&self.manifest, &self.index)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    current: Option<LoadedModlist>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded modlist with the one at `path`
    pub fn load(&mut self, path: &Path) -> Result<&LoadedModlist, LoadError> {
        let loaded = LoadedModlist::open(path)?;
        info!(
            "Loaded '{}' ({} mods)",
            loaded.manifest.name,
            loaded.manifest.archives.len()
        );
        Ok(self.current.insert(loaded))
    }

    pub fn current(&self) -> Option<&LoadedModlist> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Drop the loaded modlist, if any
    pub fn clear(&mut self) {
        self.current = None;
    }
}
