//! User, command and hold queue payloads.

use serde::{Deserialize, Serialize};

use crate::wire;

/// Identity of an Adabas session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AdabasUserId {
    /// Entire System session id.
    #[serde(rename = "ID")]
    pub id: i64,
    /// Node name.
    pub node: String,
    /// Terminal or login id.
    pub terminal: String,
    /// Session timestamp.
    pub timestamp: String,
}

/// User queue wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserQueueResponse {
    /// Queue contents.
    pub user_queue: UserQueue,
}

/// Active user queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserQueue {
    /// One entry per connected user.
    pub user_queue_entry: Vec<UserQueueEntry>,
}

/// User queue element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserQueueEntry {
    /// Queue element id.
    #[serde(rename = "UqID")]
    pub uq_id: i64,
    /// Session identity.
    #[serde(rename = "UID")]
    pub uid: AdabasUserId,
    /// User type.
    #[serde(deserialize_with = "wire::text")]
    pub user: String,
    /// Element flags.
    #[serde(deserialize_with = "wire::text")]
    pub flags: String,
    /// Transaction flags.
    #[serde(deserialize_with = "wire::text")]
    pub et_flags: String,
}

/// Detailed view of a single user queue element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserQueueDetailResponse {
    /// Element being described.
    pub user_queue_detail: UserQueueDetail,
    /// Session start.
    pub start_session: String,
    /// Transaction start.
    pub start_transaction: String,
    /// Last command time.
    pub last_activity: String,
    /// Transaction time limit.
    #[serde(rename = "TTLimit")]
    pub tt_limit: i64,
    /// Non-activity time limit.
    #[serde(rename = "TNALimit")]
    pub tna_limit: i64,
    /// ISN lists held.
    #[serde(rename = "ISNLists")]
    pub isn_lists: i64,
    /// ISNs in hold.
    #[serde(rename = "ISNHold")]
    pub isn_hold: i64,
    /// Files in use.
    pub files: Vec<i64>,
    /// Commands issued.
    pub command_count: i64,
    /// Transactions completed.
    pub transaction_count: i64,
    /// Client encoding.
    pub user_encoding: i64,
}

/// Element list of [`UserQueueDetailResponse`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserQueueDetail {
    /// Matching elements; the first is the one requested.
    pub detail_entry: Vec<UserQueueEntry>,
}

/// Command queue wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandQueueResponse {
    /// Queue contents.
    pub command_queue: CommandQueue,
}

/// Pending commands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandQueue {
    /// One entry per queued command.
    pub commands: Vec<CommandQueueEntry>,
}

/// Command queue element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandQueueEntry {
    /// Command id.
    #[serde(rename = "CommID")]
    pub comm_id: i64,
    /// Issuing session.
    pub user: AdabasUserId,
    /// Command code.
    pub command_code: String,
    /// Target file.
    pub file: i64,
    /// Status flags.
    #[serde(deserialize_with = "wire::text")]
    pub flags: String,
}

/// Hold queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HoldQueueResponse {
    /// One entry per held record.
    pub hold_queue: Vec<HoldQueueEntry>,
}

/// Hold queue element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HoldQueueEntry {
    /// Hold queue element id.
    pub hq_commid: i64,
    /// Sessions holding the record.
    pub hid: Vec<AdabasUserId>,
    /// User id.
    #[serde(deserialize_with = "wire::text")]
    pub user: String,
    /// File number.
    pub file: i64,
    /// Held ISN.
    pub isn: i64,
    /// Lock mode.
    #[serde(deserialize_with = "wire::text")]
    pub locks: String,
    /// Element flags.
    #[serde(deserialize_with = "wire::text")]
    pub flags: String,
}
