//! Server-side file location payloads.

use serde::{Deserialize, Serialize};

/// Locations the server exposes for browsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct LocationListResponse {
    /// One entry per location.
    pub directories: Vec<Location>,
}

/// Named server directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Location {
    /// Location name used in requests.
    pub name: String,
    /// Directory on the server.
    pub location: String,
}

/// Contents of a directory within a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectoryListing {
    /// Path requested, relative to the location.
    pub reference: String,
    /// Location name.
    pub location: String,
    /// Directory entries.
    pub content: Vec<DirectoryEntry>,
}

/// File or directory inside a [`DirectoryListing`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectoryEntry {
    /// Entry name.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// Entry type (`file` or `directory`).
    #[serde(rename = "Type")]
    pub kind: String,
    /// Modification time.
    pub modified: String,
    /// Creation time.
    pub created: String,
}
