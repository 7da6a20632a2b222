//! Download source descriptors (`Archive.State`)
//!
//! The `$type` tag names a downloader, e.g. `NexusDownloader, Wabbajack.Lib` or
//! `MediaFireDownloader+State, Wabbajack.Lib`. Only the downloaders the viewer
//! can build links for get a typed variant; everything else is kept as its
//! type name so the archive still shows up in the catalogue.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Where an archive is downloaded from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub overrides: SourceOverrides,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceKind {
    Nexus(NexusSource),
    Http(HttpSource),
    Other { type_name: String },
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::Other {
            type_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NexusSource {
    /// Wabbajack game name, e.g. `SkyrimSpecialEdition`
    pub game_name: Option<String>,
    pub mod_id: Option<u64>,
    pub file_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpSource {
    pub url: String,
}

/// Metadata fields several downloaders carry about the mod itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceOverrides {
    pub name: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

impl SourceDescriptor {
    /// Recognize a state object. Never fails: unknown shapes become `Other`.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let type_name = obj.get("$type").and_then(Value::as_str).unwrap_or_default();

        let kind = match downloader_name(type_name) {
            "NexusDownloader" => SourceKind::Nexus(NexusSource {
                game_name: string_field(obj, "GameName"),
                mod_id: id_field(obj, "ModID"),
                file_id: id_field(obj, "FileID"),
            }),
            "HttpDownloader" => SourceKind::Http(HttpSource {
                url: string_field(obj, "Url").unwrap_or_default(),
            }),
            _ => SourceKind::Other {
                type_name: type_name.to_string(),
            },
        };

        Self {
            kind,
            overrides: SourceOverrides {
                name: string_field(obj, "Name"),
                author: string_field(obj, "Author"),
                version: string_field(obj, "Version"),
                description: string_field(obj, "Description"),
            },
        }
    }

    /// Short label for summaries ("Nexus", "HTTP", or the downloader name)
    pub fn label(&self) -> &str {
        match &self.kind {
            SourceKind::Nexus(_) => "Nexus",
            SourceKind::Http(_) => "HTTP",
            SourceKind::Other { type_name } if type_name.is_empty() => "Unknown",
            SourceKind::Other { type_name } => {
                downloader_name(type_name).trim_end_matches("Downloader")
            }
        }
    }
}

impl<'de> Deserialize<'de> for SourceDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// `MediaFireDownloader+State, Wabbajack.Lib` -> `MediaFireDownloader`
fn downloader_name(type_name: &str) -> &str {
    let name = type_name.split(',').next().unwrap_or_default().trim();
    name.strip_suffix("+State").unwrap_or(name)
}

/// Non-empty string field
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Nexus ids are numbers, but some tools write them as strings. Zero means unset.
fn id_field(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    let id = match obj.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|&id| id != 0)
}
