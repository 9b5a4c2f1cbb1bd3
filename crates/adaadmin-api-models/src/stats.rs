//! Nucleus statistics payloads.

use serde::{Deserialize, Serialize};

/// High water mark wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HighWaterResponse {
    /// Marks since nucleus start.
    pub high_water: HighWater,
}

/// Pool sizes and usage peaks since nucleus start.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HighWater {
    /// Nucleus start time.
    pub nucleus_start_time: String,
    /// User queue size.
    pub user_queue_size: i64,
    /// User queue high water mark.
    pub user_queue_high_water_mark: HighWaterMark,
    /// Command queue high water mark.
    pub command_queue_high_water_mark: HighWaterMark,
    /// Hold queue high water mark.
    pub hold_queue_high_water_mark: HighWaterMark,
    /// Client queue size.
    pub client_queue_size: i64,
    /// Client queue high water mark.
    pub client_queue_high_water_mark: HighWaterMark,
    /// Hold queue user limit high water mark.
    #[serde(rename = "HQUserLimitHighWaterMark")]
    pub hq_user_limit_high_water_mark: HighWaterMark,
    /// Thread size.
    pub thread_size: i64,
    /// Threads high water mark.
    pub threads_high_water_mark: HighWaterMark,
    /// Workpool size.
    pub workpool_size: i64,
    /// Workpool high water mark.
    pub workpool_high_water_mark: HighWaterMark,
    /// Sort area size.
    pub sort_area_size: i64,
    /// Isn sort high water mark.
    pub isn_sort_high_water_mark: HighWaterMark,
    /// Complex search high water mark.
    pub complex_search_high_water_mark: HighWaterMark,
    /// Attached buffer size.
    pub attached_buffer_size: i64,
    /// Attached buffer high water mark.
    pub attached_buffer_high_water_mark: HighWaterMark,
    /// LABX size.
    #[serde(rename = "LABXSize")]
    pub labx_size: i64,
    /// LABX high water mark.
    #[serde(rename = "LABXHighWaterMark")]
    pub labx_high_water_mark: HighWaterMark,
    /// Bufferpool size.
    pub bufferpool_size: i64,
    /// Bufferpool high water mark.
    pub bufferpool_high_water_mark: HighWaterMark,
    /// Protection area size.
    pub protection_area_size: i64,
    /// Protection area high water mark.
    pub protection_area_high_water_mark: HighWaterMark,
    /// Protection area active size.
    pub protection_area_active_size: i64,
    /// Protection area active high water mark.
    pub protection_area_active_high_water_mark: HighWaterMark,
    /// Group commit size.
    pub group_commit_size: i64,
    /// Group commit high water mark.
    pub group_commit_high_water_mark: HighWaterMark,
    /// Transaction time size.
    pub transaction_time_size: i64,
    /// Transaction time high water mark.
    pub transaction_time_high_water_mark: HighWaterMark,
}

/// Usage of a pool at its peak.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HighWaterMark {
    /// Current usage.
    pub inuse: i64,
    /// Peak usage.
    pub high: i64,
    /// Time the peak was reached.
    pub time: String,
}

/// Command statistics wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandStatsResponse {
    /// Counters.
    pub command_stats: CommandStats,
}

/// Per-command counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandStats {
    /// One entry per command code.
    pub commands: Vec<CommandCount>,
}

/// Counter for a single command code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandCount {
    /// Command code such as `L3`.
    pub command_name: String,
    /// Number of calls.
    pub command_count: i64,
}

/// Buffer pool statistics wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BufferPoolResponse {
    /// Counters.
    pub statistics: BufferPoolStatistics,
}

/// Buffer pool allocation, content and I/O counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BufferPoolStatistics {
    /// Size.
    pub size: i64,
    /// Alloc current.
    pub alloc_current: i64,
    /// Alloc highwater.
    pub alloc_highwater: i64,
    /// Alloc internal.
    pub alloc_internal: i64,
    /// Alloc workpool.
    pub alloc_workpool: i64,
    /// RABNs asso.
    pub rabns_asso: i64,
    /// RABNs data.
    pub rabns_data: i64,
    /// RABNs work.
    pub rabns_work: i64,
    /// RABNs nuc tmp.
    pub rabns_nuc_tmp: i64,
    /// RABNs nuc sort.
    pub rabns_nuc_sort: i64,
    /// Logical reads.
    #[serde(rename = "IOLogicalReads")]
    pub io_logical_reads: i64,
    /// Physical reads.
    #[serde(rename = "IOPhysicalsReads")]
    pub io_physical_reads: i64,
    /// Physical writes.
    #[serde(rename = "IOPhysicalWrites")]
    pub io_physical_writes: i64,
    /// Flushes total.
    pub flushes_total: i64,
    /// Flushes free.
    pub flushes_free: i64,
    /// Write limit.
    pub write_limit: i64,
    /// Modified.
    pub modified: i64,
}
