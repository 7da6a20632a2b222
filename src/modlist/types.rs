//! Wabbajack modlist JSON types
//!
//! Serde definitions for the parts of a `.wabbajack` manifest the viewer reads.
//! Every field is optional on the wire: modlists produced by different
//! Wabbajack versions disagree on which keys are present, and a viewer has no
//! business rejecting a list the installer would accept.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::error::MalformedDirective;
use super::source::SourceDescriptor;

/// Directive `$type` carrying installable-file semantics
pub const FROM_ARCHIVE: &str = "FromArchive";

/// Root modlist structure
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Manifest {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub author: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub version: String,
    #[serde(deserialize_with = "lenient")]
    pub wabbajack_version: String,
    #[serde(deserialize_with = "lenient")]
    pub game_type: String,
    #[serde(deserialize_with = "lenient")]
    pub website: String,
    #[serde(rename = "IsNSFW", deserialize_with = "lenient")]
    pub is_nsfw: bool,
    #[serde(deserialize_with = "lenient_archives")]
    pub archives: Vec<ArchiveEntry>,
    /// Kept as raw JSON so one bad directive cannot fail the whole load.
    /// Use [`Directive::from_value`] to interpret an entry.
    #[serde(deserialize_with = "lenient")]
    pub directives: Vec<Value>,
}

/// Archive (download) definition
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ArchiveEntry {
    #[serde(deserialize_with = "lenient")]
    pub hash: String,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub size: u64,
    pub state: SourceDescriptor,
}

/// Field value, or its default when the value is `null` or the wrong type
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Archive list where only entries that are not JSON objects are dropped
fn lenient_archives<'de, D>(deserializer: D) -> Result<Vec<ArchiveEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Value> = lenient(deserializer)?;
    let archives = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            if !value.is_object() {
                warn!("Skipping archive #{}: not a JSON object", position);
                return None;
            }
            serde_json::from_value(value)
                .map_err(|e| warn!("Skipping archive #{}: {}", position, e))
                .ok()
        })
        .collect();
    Ok(archives)
}

impl ArchiveEntry {
    /// Name shown in the mod list: the source's mod name, else the filename
    pub fn display_name(&self) -> &str {
        self.state.overrides.name.as_deref().unwrap_or(&self.name)
    }

    pub fn author(&self) -> &str {
        self.state.overrides.author.as_deref().unwrap_or("Unknown")
    }

    pub fn version(&self) -> &str {
        self.state.overrides.version.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.state.overrides.description.as_deref().unwrap_or("")
    }
}

/// Installation directive, interpreted from its raw JSON form
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    FromArchive(FromArchiveDirective),
    /// Inline files, patches, generated BSAs... nothing to show per archive
    Other { type_name: String },
}

/// Extract file directly from an archive
#[derive(Debug, Clone, PartialEq)]
pub struct FromArchiveDirective {
    pub to: String,
    pub size: u64,
    /// First element of `ArchiveHashPath`
    pub archive_hash: String,
    /// Second element of `ArchiveHashPath` (empty when absent)
    pub archive_path: String,
}

impl Directive {
    /// Interpret one entry of the manifest's `Directives` array.
    ///
    /// `position` is the entry's index, used only for error reporting.
    pub fn from_value(position: usize, value: &Value) -> Result<Self, MalformedDirective> {
        let obj = value
            .as_object()
            .ok_or_else(|| MalformedDirective::new(position, "directive is not a JSON object"))?;

        let type_name = obj.get("$type").and_then(Value::as_str).unwrap_or_default();
        if type_name != FROM_ARCHIVE {
            return Ok(Directive::Other {
                type_name: type_name.to_string(),
            });
        }

        let hash_path = obj
            .get("ArchiveHashPath")
            .and_then(Value::as_array)
            .ok_or_else(|| MalformedDirective::new(position, "missing ArchiveHashPath"))?;

        let archive_hash = hash_path
            .first()
            .and_then(Value::as_str)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                MalformedDirective::new(position, "ArchiveHashPath has no archive hash")
            })?;

        let archive_path = hash_path.get(1).and_then(Value::as_str).unwrap_or_default();

        Ok(Directive::FromArchive(FromArchiveDirective {
            to: obj.get("To").and_then(Value::as_str).unwrap_or_default().to_string(),
            size: obj.get("Size").and_then(Value::as_u64).unwrap_or(0),
            archive_hash: archive_hash.to_string(),
            archive_path: archive_path.to_string(),
        }))
    }

    /// Get directive type as string
    pub fn directive_type(&self) -> &str {
        match self {
            Directive::FromArchive(_) => FROM_ARCHIVE,
            Directive::Other { type_name } => type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manifest_tolerates_missing_fields() {
        let manifest: Manifest = serde_json::from_value(json!({
            "Name": "Tiny",
            "Archives": [{ "Hash": "abc=", "Name": "mod.7z" }],
            "SomethingNew": 42
        }))
        .unwrap();

        assert_eq!(manifest.name, "Tiny");
        assert_eq!(manifest.author, "");
        assert_eq!(manifest.archives.len(), 1);
        assert_eq!(manifest.archives[0].size, 0);
        assert!(manifest.directives.is_empty());
    }

    #[test]
    fn test_archive_display_fallbacks() {
        let manifest: Manifest = serde_json::from_value(json!({
            "Archives": [
                {
                    "Hash": "a=",
                    "Name": "SkyUI_5_2_SE-12604-5-2SE.7z",
                    "State": {
                        "$type": "NexusDownloader, Wabbajack.Lib",
                        "Name": "SkyUI",
                        "Author": "schlangster",
                        "Version": "5.2SE"
                    }
                },
                { "Hash": "b=", "Name": "bare.zip" }
            ]
        }))
        .unwrap();

        let skyui = &manifest.archives[0];
        assert_eq!(skyui.display_name(), "SkyUI");
        assert_eq!(skyui.author(), "schlangster");
        assert_eq!(skyui.version(), "5.2SE");

        let bare = &manifest.archives[1];
        assert_eq!(bare.display_name(), "bare.zip");
        assert_eq!(bare.author(), "Unknown");
        assert_eq!(bare.version(), "");
    }

    #[test]
    fn test_manifest_tolerates_null_fields() {
        let manifest: Manifest = serde_json::from_value(json!({
            "Name": "L",
            "Description": null,
            "Website": null,
            "Author": 17,
            "IsNSFW": null,
            "Archives": [
                { "Hash": "a=", "Name": null, "Size": null, "State": null },
                { "Hash": "b=", "Name": "good.7z", "Size": 2048 }
            ],
            "Directives": null
        }))
        .unwrap();

        assert_eq!(manifest.name, "L");
        assert_eq!(manifest.description, "");
        assert_eq!(manifest.website, "");
        assert_eq!(manifest.author, "");
        assert!(!manifest.is_nsfw);
        assert!(manifest.directives.is_empty());

        assert_eq!(manifest.archives.len(), 2);
        assert_eq!(manifest.archives[0].hash, "a=");
        assert_eq!(manifest.archives[0].name, "");
        assert_eq!(manifest.archives[0].size, 0);
        assert_eq!(manifest.archives[1].name, "good.7z");
        assert_eq!(manifest.archives[1].size, 2048);
    }

    #[test]
    fn test_non_object_archive_is_skipped() {
        let manifest: Manifest = serde_json::from_value(json!({
            "Archives": ["oops", { "Hash": "b=", "Name": "good.7z" }, null]
        }))
        .unwrap();

        assert_eq!(manifest.archives.len(), 1);
        assert_eq!(manifest.archives[0].hash, "b=");
    }

    #[test]
    fn test_from_archive_directive() {
        let value = json!({
            "$type": "FromArchive",
            "To": "mods/SkyUI/interface/skyui.swf",
            "Hash": "xyz=",
            "Size": 1234,
            "ArchiveHashPath": ["abc=", "Data/interface/skyui.swf"]
        });

        let directive = Directive::from_value(0, &value).unwrap();
        assert_eq!(
            directive,
            Directive::FromArchive(FromArchiveDirective {
                to: "mods/SkyUI/interface/skyui.swf".to_string(),
                size: 1234,
                archive_hash: "abc=".to_string(),
                archive_path: "Data/interface/skyui.swf".to_string(),
            })
        );
    }

    #[test]
    fn test_other_directive_types_are_opaque() {
        let value = json!({ "$type": "InlineFile", "To": "profiles/x/modlist.txt" });
        let directive = Directive::from_value(3, &value).unwrap();
        assert_eq!(directive.directive_type(), "InlineFile");
    }

    #[test]
    fn test_from_archive_without_hash_path_is_malformed() {
        let value = json!({ "$type": "FromArchive", "To": "a.esp", "Size": 1 });
        let err = Directive::from_value(7, &value).unwrap_err();
        assert_eq!(err.position, 7);

        let value = json!({ "$type": "FromArchive", "ArchiveHashPath": [] });
        assert!(Directive::from_value(0, &value).is_err());

        assert!(Directive::from_value(0, &json!("FromArchive")).is_err());
    }

    #[test]
    fn test_hash_path_without_inner_path() {
        let value = json!({ "$type": "FromArchive", "To": "a.esp", "ArchiveHashPath": ["h="] });
        match Directive::from_value(0, &value).unwrap() {
            Directive::FromArchive(d) => assert_eq!(d.archive_path, ""),
            other => panic!("unexpected directive: {:?}", other),
        }
    }
}
