//! Database lifecycle, configuration and layout payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::StatusMessage;
use crate::wire;

/// Databases known to the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DatabaseList {
    /// One entry per database.
    pub database: Vec<DatabaseSummary>,
}

/// Entry of [`DatabaseList`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DatabaseSummary {
    /// Database identifier.
    pub dbid: i64,
    /// Database name.
    pub name: String,
    /// Whether the nucleus is running.
    pub active: bool,
    /// Adabas version of the database.
    pub version: String,
}

/// Reply to a database operation or status query.
///
/// Completed requests carry `Database`; requests still running on the server
/// (HTTP 202) carry `Status` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct OperationResponse {
    /// Current database state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseState>,
    /// Accepted-operation status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusMessage>,
}

/// Database state carried by [`OperationResponse`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DatabaseState {
    /// Database identifier.
    pub dbid: i64,
    /// Database name.
    pub name: String,
    /// Online state text.
    pub status: String,
}

/// Request body for database creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DatabaseDefinition {
    /// Database name.
    pub name: String,
    /// Database identifier.
    pub dbid: i64,
    /// Load the demo files after creation.
    pub load_demo: bool,
    /// Containers to allocate.
    pub container_list: Vec<ContainerDefinition>,
    /// File number of the checkpoint file.
    pub checkpoint_file: i64,
    /// File number of the security file.
    pub security_file: i64,
    /// File number of the user data file.
    pub user_file: i64,
    /// Additional settings passed through from definition files.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Container to allocate for a new database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerDefinition {
    /// Block size such as `8K`.
    pub block_size: String,
    /// Container size such as `60M`.
    pub container_size: String,
    /// Container path; may reference `${ADADATADIR}`.
    pub path: String,
}

impl DatabaseDefinition {
    /// Demo database layout used when no definition file is supplied.
    #[must_use]
    pub fn demo(dbid: u32) -> Self {
        let container = |block_size: &str, container_size: &str, name: &str| ContainerDefinition {
            block_size: block_size.to_string(),
            container_size: container_size.to_string(),
            path: format!("${{ADADATADIR}}/db{dbid:03}/{name}.{dbid:03}"),
        };
        Self {
            name: "DEMODB".to_string(),
            dbid: i64::from(dbid),
            load_demo: true,
            container_list: vec![
                container("8K", "60M", "ASSO1"),
                container("32K", "20M", "ASSO2"),
                container("32K", "100M", "DATA1"),
                container("4K", "20M", "WORK"),
            ],
            checkpoint_file: 1,
            security_file: 2,
            user_file: 3,
            extra: Map::new(),
        }
    }
}

/// Nucleus log wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct NucleusLogResponse {
    /// Log document.
    pub log: NucleusLog,
}

/// Nucleus log text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct NucleusLog {
    /// Complete log text.
    pub log: String,
}

/// General control block wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct GcbResponse {
    /// Control block contents.
    #[serde(alias = "GCB")]
    pub gcb: Gcb,
}

/// General control block (GCB) of a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Gcb {
    /// Database identifier.
    pub dbid: i64,
    /// Database name.
    pub name: String,
    /// Structure level.
    #[serde(deserialize_with = "wire::text")]
    pub structure_level: String,
    /// Platform architecture.
    #[serde(deserialize_with = "wire::text")]
    pub architecture: String,
    /// Creation timestamp.
    pub date: String,
    /// Last modification timestamp.
    pub time_stamp_log: String,
    /// Number of protection logs.
    #[serde(rename = "PLOGCount")]
    pub plog_count: i64,
    /// Current command log number.
    #[serde(rename = "CurrentCLOGNumber")]
    pub current_clog_number: i64,
    /// Current protection log number.
    #[serde(rename = "CurrentPLOGNumber")]
    pub current_plog_number: i64,
    /// Database flags.
    #[serde(deserialize_with = "wire::text")]
    pub flags: String,
    /// Highest file number allowed.
    pub max_file_number: i64,
    /// Highest file number loaded.
    pub max_file_number_loaded: i64,
    /// Checkpoint file number.
    pub checkpoint_file: i64,
    /// Security file number.
    pub security_file: i64,
    /// ET data file number.
    #[serde(rename = "ETDataFile")]
    pub et_data_file: i64,
    /// Replication metadata file number.
    pub replication_metadata_file: i64,
    /// Replication command file number.
    pub replication_command_file: i64,
    /// Replication transition file number.
    pub replication_transition_file: i64,
    /// Replication timestamp.
    pub time_stamp_replication: String,
    /// WORK container extents.
    #[serde(rename = "WORKExtents")]
    pub work_extents: Vec<WorkExtent>,
    /// Size of WORK part 1.
    #[serde(rename = "WORKPart1Size")]
    pub work_part1_size: i64,
}

/// WORK container extent of the GCB.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct WorkExtent {
    /// Block size.
    pub block_size: i64,
    /// Device type.
    #[serde(deserialize_with = "wire::text")]
    pub device_type: String,
    /// Extent identifier.
    #[serde(rename = "ID", deserialize_with = "wire::text")]
    pub id: String,
    /// Extent number.
    pub number: i64,
    /// First RABN.
    #[serde(rename = "RABNfirst")]
    pub rabn_first: i64,
    /// Last RABN.
    #[serde(rename = "RABNlast")]
    pub rabn_last: i64,
    /// First unused RABN; zero marks an unused slot.
    #[serde(rename = "RABNunused")]
    pub rabn_unused: i64,
}

/// Activity statistics wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActivityResponse {
    /// Counters.
    pub statistics: ActivityStatistics,
}

/// I/O, throwback and pool counters of a running nucleus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActivityStatistics {
    /// Buffer pool I/O.
    #[serde(rename = "BufferPoolIO")]
    pub buffer_pool_io: i64,
    /// WORK reads.
    pub work_reads: i64,
    /// WORK writes.
    pub work_writes: i64,
    /// PLOG writes.
    pub plog_writes: i64,
    /// Throwbacks waiting for a user queue context.
    #[serde(rename = "ThbWaitUQContext")]
    pub thb_wait_uq_context: i64,
    /// Throwbacks waiting for an ISN.
    pub thb_wait_isn: i64,
    /// Throwbacks for ET synchronization.
    pub thb_et_sync: i64,
    /// Throwbacks for DWP overflow.
    #[serde(rename = "ThbDWPOverflow")]
    pub thb_dwp_overflow: i64,
    /// Buffer pool hit rate in percent.
    #[serde(rename = "BPHitRate")]
    pub bp_hit_rate: f64,
    /// Format pool hit rate in percent.
    #[serde(rename = "FPHitRate")]
    pub fp_hit_rate: f64,
    /// Current work pool space waits.
    #[serde(rename = "WPSpaceWaitCurrent")]
    pub wp_space_wait_current: i64,
    /// Total work pool space waits.
    pub wp_space_wait_total: i64,
}

/// Thread table of a running nucleus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ThreadTableResponse {
    /// One entry per nucleus thread.
    pub threads: Vec<ThreadEntry>,
}

/// Entry of [`ThreadTableResponse`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ThreadEntry {
    /// Thread number.
    pub thread: i64,
    /// Commands processed.
    pub command_count: i64,
    /// File of the current command.
    pub file: i64,
    /// Current command code.
    pub command_code: String,
    /// Thread status.
    pub status: String,
}

/// Static or dynamic parameter set of a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParameterResponse {
    /// Parameter acronym to value.
    pub parameter: Map<String, Value>,
}

/// Parameter catalogue wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParameterInfoResponse {
    /// Catalogue.
    pub parameter_info: ParameterInfoList,
}

/// Parameter catalogue with ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParameterInfoList {
    /// One entry per parameter.
    pub parameter: Vec<ParameterInfo>,
}

/// Description, values and range of a single parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParameterInfo {
    /// Parameter acronym such as `LBP`.
    pub acronym: String,
    /// Long name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Whether the parameter can be changed online.
    pub is_dynamic: bool,
    /// Built-in default.
    #[serde(deserialize_with = "wire::text")]
    pub default_value: String,
    /// Value in the configuration file.
    #[serde(deserialize_with = "wire::text")]
    pub inifile_value: String,
    /// Value of the running nucleus.
    #[serde(deserialize_with = "wire::text")]
    pub online_value: String,
    /// Whether [`ParameterInfo::min_value`] is meaningful.
    pub is_min_value_available: bool,
    /// Minimum value.
    pub min_value: i64,
    /// Whether [`ParameterInfo::max_value`] is meaningful.
    pub is_max_value_available: bool,
    /// Maximum value.
    pub max_value: i64,
}

/// Container layout wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerResponse {
    /// Layout.
    pub container: ContainerLayout,
}

/// Containers and free space of a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerLayout {
    /// Allocated containers.
    pub container_list: Vec<ContainerEntry>,
    /// Free space table.
    pub free_space_table: Vec<FreeSpaceEntry>,
}

/// Allocated container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerEntry {
    /// Container type (`ASSO`, `DATA`, `WORK`).
    #[serde(rename = "Type")]
    pub kind: String,
    /// Container number within its type.
    pub container_number: i64,
    /// Device type.
    #[serde(deserialize_with = "wire::text")]
    pub device_type: String,
    /// Block size.
    pub block_size: i64,
    /// Block size unit.
    pub block_unit: String,
    /// Container size.
    pub size: i64,
    /// Container size unit.
    pub size_unit: String,
    /// First RABN of the extent.
    pub first_extent_rabn: i64,
    /// Last RABN of the extent.
    pub last_extent_rabn: i64,
    /// First unused RABN.
    pub first_unused_rabn: i64,
    /// Container path.
    pub path: String,
}

/// Free space table entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FreeSpaceEntry {
    /// Container type.
    #[serde(rename = "Type")]
    pub kind: String,
    /// First free RABN.
    #[serde(rename = "FirstRABN")]
    pub first_rabn: i64,
    /// Last free RABN.
    #[serde(rename = "LastRABN")]
    pub last_rabn: i64,
    /// Block size.
    pub block_size: i64,
}

/// Checkpoints in a time range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CheckpointResponse {
    /// Checkpoints in ascending time order.
    pub checkpoints: Vec<Checkpoint>,
}

/// Single checkpoint record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Checkpoint {
    /// Checkpoint name.
    pub name: String,
    /// Nucleus session number.
    pub session: i64,
    /// Timestamp.
    pub date: String,
    /// Additional details.
    #[serde(deserialize_with = "wire::text")]
    pub details: String,
}

/// Utility control block (UCB) wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UcbResponse {
    /// UCB list.
    #[serde(rename = "UCB")]
    pub ucb: UcbList,
}

/// Utility control block entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UcbList {
    /// Entries.
    #[serde(rename = "UCB")]
    pub entries: Vec<UcbEntry>,
}

/// Utility holding resources in the database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UcbEntry {
    /// Timestamp of the entry.
    pub date: String,
    /// Entry sequence number used for deletion.
    pub sequence: i64,
    /// Utility name.
    #[serde(rename = "ID")]
    pub id: String,
    /// Database access mode.
    #[serde(rename = "DBMode")]
    pub db_mode: String,
    /// Files locked by the utility.
    pub ucb_files: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn demo_definition_places_containers_under_dbid() {
        let demo = DatabaseDefinition::demo(12);
        assert_eq!(demo.name, "DEMODB");
        assert_eq!(demo.dbid, 12);
        assert!(demo.load_demo);
        let paths: Vec<_> = demo.container_list.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "${ADADATADIR}/db012/ASSO1.012",
                "${ADADATADIR}/db012/ASSO2.012",
                "${ADADATADIR}/db012/DATA1.012",
                "${ADADATADIR}/db012/WORK.012",
            ]
        );
        assert_eq!(
            (demo.checkpoint_file, demo.security_file, demo.user_file),
            (1, 2, 3)
        );
    }

    #[test]
    fn definition_files_keep_unknown_settings() -> Result<()> {
        let definition: DatabaseDefinition = serde_json::from_str(
            r#"{"Name":"PROD","Dbid":7,"ContainerList":[{"BlockSize":"8K","ContainerSize":"1G","Path":"/data/ASSO1"}],"Charset":"UTF-8"}"#,
        )?;
        assert_eq!(definition.name, "PROD");
        assert_eq!(definition.container_list.len(), 1);
        assert_eq!(
            definition.extra.get("Charset"),
            Some(&Value::String("UTF-8".to_string()))
        );

        let encoded = serde_json::to_value(&definition)?;
        assert_eq!(encoded["Charset"], "UTF-8");
        assert_eq!(encoded["LoadDemo"], false);
        Ok(())
    }

    #[test]
    fn parameter_info_values_accept_numbers() -> Result<()> {
        let info: ParameterInfoResponse = serde_json::from_str(
            r#"{"ParameterInfo":{"Parameter":[{"Acronym":"LOGGING","DefaultValue":0,"InifileValue":"248","OnlineValue":1,"IsMaxValueAvailable":true,"MaxValue":2047}]}}"#,
        )?;
        let entry = &info.parameter_info.parameter[0];
        assert_eq!(entry.default_value, "0");
        assert_eq!(entry.inifile_value, "248");
        assert_eq!(entry.online_value, "1");
        assert!(entry.is_max_value_available);
        assert!(!entry.is_min_value_available);
        Ok(())
    }

    #[test]
    fn operation_response_distinguishes_accepted_status() -> Result<()> {
        let accepted: OperationResponse =
            serde_json::from_str(r#"{"Status":{"Dbid":12,"Message":"start initiated"}}"#)?;
        assert!(accepted.database.is_none());
        assert_eq!(
            accepted.status.map(|status| status.message),
            Some("start initiated".to_string())
        );
        Ok(())
    }
}
