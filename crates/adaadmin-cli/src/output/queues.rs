//! Renderers for the user, command and hold queues.

use adaadmin_api_models::{
    AdabasUserId, CommandQueueResponse, HoldQueueResponse, UserQueueDetailResponse,
    UserQueueResponse,
};

use super::format_count;

pub(crate) fn user_queue_lines(reply: &UserQueueResponse) -> Vec<String> {
    let mut lines = vec![
        " User queue entries:".to_string(),
        format!(
            " {:>3} {:<10} {:<8} {:<8} {:<28} {:<8} {:<8} {:<8}",
            "Id", "Es ID", "Node Id", "Login Id", "Timestamp", "User", "Flags", "ETFlags"
        ),
    ];
    lines.extend(reply.user_queue.user_queue_entry.iter().map(|entry| {
        format!(
            " {:>3} {:>10} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8}",
            entry.uq_id,
            entry.uid.id,
            entry.uid.node,
            entry.uid.terminal,
            entry.uid.timestamp,
            entry.user,
            entry.flags,
            entry.et_flags
        )
    }));
    lines
}

fn detail(label: &str, value: impl std::fmt::Display) -> String {
    format!("{label:>20} : {value}")
}

fn user_id_lines(uid: &AdabasUserId) -> [String; 4] {
    [
        format!("{:>21} : {}", "ID", uid.id),
        format!("{:>21} : {}", "Node", uid.node),
        format!("{:>21} : {}", "Terminal", uid.terminal),
        format!("{:>21} : {}", "Timestamp", uid.timestamp),
    ]
}

pub(crate) fn user_detail_lines(queue_id: u64, reply: &UserQueueDetailResponse) -> Vec<String> {
    let mut lines = vec![format!(" Got user queue details of queue id {queue_id}:")];
    if let Some(entry) = reply.user_queue_detail.detail_entry.first() {
        lines.push(detail("User", &entry.user));
        lines.push(format!("{:>20}", "Adabas ID:"));
        lines.extend(user_id_lines(&entry.uid));
        lines.push(detail("Flags", &entry.flags));
        lines.push(detail("ET Flags", &entry.et_flags));
    }
    let files = reply
        .files
        .iter()
        .filter(|file| **file > 0)
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    lines.extend([
        detail("Start session", &reply.start_session),
        detail("Start transaction", &reply.start_transaction),
        detail("Last activity", &reply.last_activity),
        detail("TT Limit", reply.tt_limit),
        detail("TNA Limit", reply.tna_limit),
        detail("ISN lists", format_count(reply.isn_lists)),
        detail("ISN in hold", format_count(reply.isn_hold)),
        detail("Files in use", files),
        detail("Command count", format_count(reply.command_count)),
        detail("Transaction count", format_count(reply.transaction_count)),
        detail("User encoding", reply.user_encoding),
    ]);
    lines
}

pub(crate) fn command_queue_lines(reply: &CommandQueueResponse) -> Vec<String> {
    let mut lines = vec![
        " Command queue entries:".to_string(),
        format!(
            " {:>3}  {:<8}  {:<8}  {:<10}  {:<3}  {:<8}  {:<8}",
            "No", "Node Id", "Login Id", "ES Id", "Cmd", "File", "Status"
        ),
    ];
    lines.extend(reply.command_queue.commands.iter().map(|command| {
        format!(
            " {:>3}  {:<8}  {:<8}  {:<10}  {:<3}  {:<8}  {}",
            command.comm_id,
            command.user.node,
            command.user.terminal,
            command.user.id,
            command.command_code,
            command.file,
            command.flags
        )
    }));
    lines
}

pub(crate) fn hold_queue_lines(reply: &HoldQueueResponse) -> Vec<String> {
    let mut lines = vec![
        " Hold queue entries:".to_string(),
        "   Id Node Id   Login Id     ES Id     User Id  File           ISN Locks  Flg"
            .to_string(),
    ];
    let unknown = AdabasUserId::default();
    lines.extend(reply.hold_queue.iter().map(|entry| {
        let holder = entry.hid.first().unwrap_or(&unknown);
        format!(
            " {:>3}  {:<8}  {:<8}     {:>3}  {:>3}  {:<3}  {} {} {}",
            entry.hq_commid,
            holder.node,
            holder.terminal,
            holder.id,
            entry.user,
            entry.file,
            entry.isn,
            entry.locks,
            entry.flags
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn user_queue_rows_follow_header_columns() -> Result<()> {
        let reply: UserQueueResponse = serde_json::from_value(json!({
            "UserQueue": { "UserQueueEntry": [
                { "UqID": 1, "UID": { "ID": 4711, "Node": "host1", "Terminal": "tty1",
                  "Timestamp": "1526374800" }, "User": "sag", "Flags": "ET", "EtFlags": "" }
            ]}
        }))?;
        let lines = user_queue_lines(&reply);
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "   1       4711 host1    tty1     1526374800 sag      ET               "
        );
        Ok(())
    }

    #[test]
    fn user_details_list_active_files_only() -> Result<()> {
        let reply: UserQueueDetailResponse = serde_json::from_value(json!({
            "UserQueueDetail": { "DetailEntry": [ { "User": "sag", "UID": { "ID": 7 } } ] },
            "Files": [0, 11, 0, 12],
            "CommandCount": 12345
        }))?;
        let lines = user_detail_lines(3, &reply);
        assert_eq!(lines[0], " Got user queue details of queue id 3:");
        assert!(lines.contains(&"                User : sag".to_string()));
        assert!(lines.contains(&"                   ID : 7".to_string()));
        assert!(lines.contains(&"        Files in use : 11 12".to_string()));
        assert!(lines.contains(&"       Command count : 12,345".to_string()));
        Ok(())
    }

    #[test]
    fn user_details_tolerate_missing_entry() {
        let lines = user_detail_lines(9, &UserQueueDetailResponse::default());
        assert!(!lines.iter().any(|line| line.contains("Adabas ID:")));
        assert!(lines.iter().any(|line| line.contains("Files in use")));
    }

    #[test]
    fn hold_queue_uses_first_holder() -> Result<()> {
        let reply: HoldQueueResponse = serde_json::from_value(json!({
            "HoldQueue": [
                { "HqCommid": 2, "Hid": [ { "ID": 55, "Node": "n1", "Terminal": "t1" } ],
                  "User": 8, "File": 11, "Isn": 1024, "Locks": "X", "Flags": "H" },
                { "HqCommid": 3, "File": 12, "Isn": 1 }
            ]
        }))?;
        let lines = hold_queue_lines(&reply);
        assert_eq!(lines[2], "   2  n1        t1            55    8  11   1024 X H");
        assert_eq!(lines[3], "   3                           0       12   1  ");
        Ok(())
    }
}
