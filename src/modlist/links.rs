//! Outbound links for an archive's download source
//!
//! Pure string templating over already-loaded fields; nothing is fetched.

use super::source::{SourceDescriptor, SourceKind};
use crate::games;

const NEXUS_BASE_URL: &str = "https://www.nexusmods.com";

/// Game assumed for Nexus states that omit `GameName`
const DEFAULT_NEXUS_GAME: &str = "skyrimse";

/// Links derived from a source descriptor. Both empty means "not available".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModLinks {
    /// Landing page of the mod on its host
    pub mod_page: Option<String>,
    /// Page (or file) the archive itself is downloaded from
    pub direct_file: Option<String>,
}

impl ModLinks {
    pub fn is_available(&self) -> bool {
        self.mod_page.is_some() || self.direct_file.is_some()
    }

    /// Link to open: the mod page when asked for, otherwise the download page
    /// falling back to the mod page
    pub fn open_target(&self, prefer_mod_page: bool) -> Option<&str> {
        if !self.is_available() {
            return None;
        }
        if prefer_mod_page {
            self.mod_page.as_deref()
        } else {
            self.direct_file.as_deref().or(self.mod_page.as_deref())
        }
    }
}

/// Resolve the links for a source descriptor
pub fn resolve_links(source: &SourceDescriptor) -> ModLinks {
    match &source.kind {
        SourceKind::Nexus(nexus) => {
            let (Some(mod_id), Some(file_id)) = (nexus.mod_id, nexus.file_id) else {
                return ModLinks::default();
            };
            let game = nexus.game_name.as_deref().unwrap_or(DEFAULT_NEXUS_GAME);
            let mod_page = format!(
                "{}/{}/mods/{}",
                NEXUS_BASE_URL,
                games::nexus_segment(game),
                mod_id
            );
            let direct_file = format!("{}?tab=files&file_id={}", mod_page, file_id);

            ModLinks {
                mod_page: Some(mod_page),
                direct_file: Some(direct_file),
            }
        }
        SourceKind::Http(http) if !http.url.is_empty() => ModLinks {
            mod_page: None,
            direct_file: Some(http.url.clone()),
        },
        SourceKind::Http(_) | SourceKind::Other { .. } => ModLinks::default(),
    }
}
