//! Database file and field definition payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::wire;

/// Files loaded in a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileListResponse {
    /// One entry per file.
    pub files: Vec<FileSummary>,
}

/// Entry of [`FileListResponse`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileSummary {
    /// File number.
    pub file_nr: i64,
    /// File name.
    pub name: String,
    /// Number of records loaded.
    pub record_count: i64,
    /// Base file number when this file holds LOB data, otherwise zero.
    pub is_lob: i64,
    /// LOB file number when this file is a LOB base file, otherwise zero.
    pub is_lob_root: i64,
}

/// File detail wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileDetailResponse {
    /// File control block information.
    pub file: FileDetail,
}

/// File control block and extent layout of a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileDetail {
    /// File name.
    pub name: String,
    /// File number.
    pub number: i64,
    /// Last modification time.
    pub last_modification: String,
    /// File flags.
    #[serde(deserialize_with = "wire::text")]
    pub flags: String,
    /// ISNs in use.
    pub isn_cnt: i64,
    /// Top ISN in use.
    pub top_isn: i64,
    /// Highest ISN allowed.
    pub max_isn: i64,
    /// Maximum MU occurrence count.
    pub max_mu_occurence: i64,
    /// ASSO padding factor.
    pub padding_factor_asso: i64,
    /// DATA padding factor.
    pub padding_factor_data: i64,
    /// Maximum record length.
    pub max_record_length: i64,
    /// Structure level.
    pub structure_level: i64,
    /// Base file of a LOB file.
    pub root_file: i64,
    /// LOB file of a base file.
    pub lob_file: i64,
    /// Number of records loaded.
    pub record_count: i64,
    /// Security information.
    pub security_info: i64,
    /// Address converter extents.
    #[serde(rename = "ACextents")]
    pub ac_extents: Vec<FileExtent>,
    /// Data storage extents.
    #[serde(rename = "DSextents")]
    pub ds_extents: Vec<FileExtent>,
    /// Normal index extents.
    #[serde(rename = "NIextents")]
    pub ni_extents: Vec<FileExtent>,
    /// Upper index extents.
    #[serde(rename = "UIextents")]
    pub ui_extents: Vec<FileExtent>,
}

/// Extent of a file component.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileExtent {
    /// First RABN.
    pub first_rabn: i64,
    /// Last RABN.
    pub last_rabn: i64,
    /// Free blocks, or the top ISN for address converter extents.
    pub free_or_isn: i64,
}

/// Request body for file creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileDefinition {
    /// File number to load.
    pub file_number: i64,
    /// Loader options.
    #[serde(rename = "FDUOptions")]
    pub fdu_options: FduOptions,
    /// Field definitions in their single-line form.
    #[serde(rename = "FDTDefinition", skip_serializing_if = "Option::is_none")]
    pub fdt_definition: Option<String>,
    /// Additional settings.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// File loader options of a [`FileDefinition`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FduOptions {
    /// Name of the new file; required by the server.
    #[serde(rename = "FduName")]
    pub fdu_name: String,
    /// Further loader settings.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters for file modification endpoints.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub struct FileParameterUpdate {
    /// Program refresh allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pgmrefresh: Option<bool>,
    /// ISN reusage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isnreusage: Option<bool>,
    /// Space reusage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacereusage: Option<bool>,
    /// New file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New file number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl FileParameterUpdate {
    /// True when no attribute is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pgmrefresh.is_none()
            && self.isnreusage.is_none()
            && self.spacereusage.is_none()
            && self.name.is_none()
            && self.number.is_none()
    }
}

/// Field definition table wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FieldTableResponse {
    /// Field definition table.
    #[serde(rename = "FDT")]
    pub fdt: FieldTable,
}

/// Field definition table of a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FieldTable {
    /// Fields, sub, super, phonetic and collation descriptors.
    pub fields: Vec<FieldDefinition>,
    /// Descriptors, listed in the same shape as fields.
    pub descriptors: Vec<FieldDefinition>,
    /// Referential constraints.
    pub referentials: Vec<FieldDefinition>,
}

/// Entry of a [`FieldTable`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FieldDefinition {
    /// Level number; zero for derived descriptors.
    pub level: i64,
    /// Field short name.
    pub name: String,
    /// Standard length.
    pub length: i64,
    /// Format code.
    pub format: String,
    /// Options such as `UQ,DE`.
    #[serde(deserialize_with = "wire::text")]
    pub flags: String,
    /// `FIELD`, `SUB`, `SUPER`, `PHONETIC` or `COLLATION`.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Parent fields of a sub or super descriptor.
    pub sub_fields: Vec<SubField>,
}

/// Parent field slice of a derived descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubField {
    /// Parent field name.
    pub sub_name: String,
    /// First byte.
    pub from: i64,
    /// Last byte.
    pub to: i64,
}
