//! Renderers for nucleus statistics.

use adaadmin_api_models::{
    BufferPoolResponse, CommandStatsResponse, HighWaterMark, HighWaterResponse,
};

use super::format_count;

const COMMANDS_PER_LINE: usize = 3;

/// Share of `part` in `whole` as a whole percentage; zero when `whole` is not positive.
fn percent_of(part: i64, whole: i64) -> i64 {
    if whole > 0 { part * 100 / whole } else { 0 }
}

fn high_water_row(label: &str, size: Option<i64>, mark: &HighWaterMark) -> String {
    let (size_text, percent) = size.map_or_else(
        || ("-".to_string(), 0),
        |size| (format_count(size), percent_of(mark.high, size)),
    );
    format!(
        "{label:<18}  {size_text:>10}   {:>10}   {:>10}   {percent:02}  {}",
        format_count(mark.inuse),
        format_count(mark.high),
        mark.time
    )
}

pub(crate) fn high_water_lines(dbid: u32, reply: &HighWaterResponse) -> Vec<String> {
    let hw = &reply.high_water;
    vec![
        String::new(),
        format!("Database {dbid}, startup at {}", hw.nucleus_start_time),
        "High Water Mark:".to_string(),
        String::new(),
        format!(
            "{:<18}  {:>10}   {:>10}   {:>10}   {:>2}  {}",
            "Area/Entry", "Size", "In Use", "High Water", "%", "Date/Time"
        ),
        high_water_row("User Queue", Some(hw.user_queue_size), &hw.user_queue_high_water_mark),
        high_water_row("Command Queue", None, &hw.command_queue_high_water_mark),
        high_water_row("Hold Queue", None, &hw.hold_queue_high_water_mark),
        high_water_row(
            "Client Queue",
            Some(hw.client_queue_size),
            &hw.client_queue_high_water_mark,
        ),
        high_water_row("HQ User Limit", None, &hw.hq_user_limit_high_water_mark),
        high_water_row("Threads", Some(hw.thread_size), &hw.threads_high_water_mark),
        high_water_row("Workpool", Some(hw.workpool_size), &hw.workpool_high_water_mark),
        high_water_row("  ISN Sort", Some(hw.sort_area_size), &hw.isn_sort_high_water_mark),
        high_water_row(
            "  Complex Search",
            Some(hw.sort_area_size),
            &hw.complex_search_high_water_mark,
        ),
        high_water_row(
            "Attached Buffer",
            Some(hw.attached_buffer_size),
            &hw.attached_buffer_high_water_mark,
        ),
        high_water_row("ATBX (MB)", Some(hw.labx_size), &hw.labx_high_water_mark),
        high_water_row(
            "Buffer Pool",
            Some(hw.bufferpool_size),
            &hw.bufferpool_high_water_mark,
        ),
        high_water_row(
            "Protection Area",
            Some(hw.protection_area_size),
            &hw.protection_area_high_water_mark,
        ),
        high_water_row(
            "  Active Area",
            Some(hw.protection_area_active_size),
            &hw.protection_area_active_high_water_mark,
        ),
        high_water_row(
            "Group Commit",
            Some(hw.group_commit_size),
            &hw.group_commit_high_water_mark,
        ),
        high_water_row(
            "Transaction Commit",
            Some(hw.transaction_time_size),
            &hw.transaction_time_high_water_mark,
        ),
    ]
}

pub(crate) fn command_stats_lines(reply: &CommandStatsResponse) -> Vec<String> {
    let mut lines = vec![String::new(), " Adabas command statistics:".to_string()];
    lines.extend(reply.command_stats.commands.chunks(COMMANDS_PER_LINE).map(|chunk| {
        chunk
            .iter()
            .map(|command| {
                format!(
                    " {:>3}  {:>8}\t\t",
                    command.command_name, command.command_count
                )
            })
            .collect::<String>()
    }));
    lines
}

pub(crate) fn buffer_pool_lines(reply: &BufferPoolResponse) -> Vec<String> {
    let bp = &reply.statistics;
    let count = |value: i64| format!("{:>12}", format_count(value));
    let allocation = |label: &str, value: i64, rabn_label: &str, rabns: i64| {
        format!(
            " {label:<11} ({:>3}%) :  {}     {rabn_label:<18} : {}",
            percent_of(value, bp.size),
            count(value),
            count(rabns)
        )
    };
    #[allow(clippy::cast_precision_loss)]
    let hit_rate = if bp.io_logical_reads > 0 {
        (bp.io_logical_reads - bp.io_physical_reads) as f64 / bp.io_logical_reads as f64 * 100.0
    } else {
        0.0
    };
    vec![
        String::new(),
        " Adabas buffer pool statistics:".to_string(),
        String::new(),
        format!(" Buffer Pool Size    :  {:>8}", format_count(bp.size)),
        String::new(),
        " Pool Allocation                        RABNs present".to_string(),
        " ---------------                        -------------".to_string(),
        allocation("Current", bp.alloc_current, "ASSO", bp.rabns_asso),
        allocation("Highwater", bp.alloc_highwater, "DATA", bp.rabns_data),
        allocation("Internal", bp.alloc_internal, "WORK", bp.rabns_work),
        allocation("Workpool", bp.alloc_workpool, "NUCTMP", bp.rabns_nuc_tmp),
        format!(
            "                                        NUCSRT             : {}",
            count(bp.rabns_nuc_sort)
        ),
        String::new(),
        " I/O Statistics                         Buffer Flushes".to_string(),
        " --------------                         --------------".to_string(),
        format!(
            " Logical Reads      :  {}     Total              : {}",
            count(bp.io_logical_reads),
            count(bp.flushes_total)
        ),
        format!(
            " Physical Reads     :  {}     To Free Space      : {}",
            count(bp.io_physical_reads),
            count(bp.flushes_free)
        ),
        format!(
            " Pool Hit Rate      :            {hit_rate:.1}%  Temporary Blocks   : {}",
            count(0)
        ),
        format!(
            "                                        Write Limit  ( 50%): {}",
            count(bp.write_limit)
        ),
        format!(
            " Physical Writes    :  {}     Modified     (  0%): {}",
            count(bp.io_physical_writes),
            count(bp.modified)
        ),
        String::new(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn high_water_rows_compute_usage_share() -> Result<()> {
        let reply: HighWaterResponse = serde_json::from_value(json!({
            "HighWater": {
                "NucleusStartTime": "2018-05-15T09:04:05Z",
                "UserQueueSize": 2000,
                "UserQueueHighWaterMark": { "Inuse": 3, "High": 500, "Time": "09:10:00" },
                "CommandQueueHighWaterMark": { "Inuse": 1, "High": 4 }
            }
        }))?;
        let lines = high_water_lines(12, &reply);
        assert_eq!(lines[1], "Database 12, startup at 2018-05-15T09:04:05Z");
        assert_eq!(
            lines[5],
            "User Queue               2,000            3          500   25  09:10:00"
        );
        assert_eq!(
            lines[6],
            "Command Queue                -            1            4   00  "
        );
        assert_eq!(lines.len(), 21);
        Ok(())
    }

    #[test]
    fn command_stats_group_three_per_line() -> Result<()> {
        let reply: CommandStatsResponse = serde_json::from_value(json!({
            "CommandStats": { "Commands": [
                { "CommandName": "L1", "CommandCount": 10 },
                { "CommandName": "L3", "CommandCount": 20 },
                { "CommandName": "S1", "CommandCount": 30 },
                { "CommandName": "ET", "CommandCount": 40 }
            ]}
        }))?;
        let lines = command_stats_lines(&reply);
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[2],
            "  L1        10\t\t  L3        20\t\t  S1        30\t\t"
        );
        assert_eq!(lines[3], "  ET        40\t\t");
        Ok(())
    }

    #[test]
    fn buffer_pool_survives_empty_statistics() {
        let lines = buffer_pool_lines(&BufferPoolResponse::default());
        assert!(lines.contains(&" Current     (  0%) :             0     ASSO               :            0".to_string()));
        assert!(lines.iter().any(|line| line.contains("0.0%")));
    }

    #[test]
    fn buffer_pool_reports_hit_rate() -> Result<()> {
        let reply: BufferPoolResponse = serde_json::from_value(json!({
            "Statistics": { "Size": 1000, "AllocCurrent": 250,
                            "IOLogicalReads": 200, "IOPhysicalsReads": 50 }
        }))?;
        let lines = buffer_pool_lines(&reply);
        assert!(lines.contains(&" Buffer Pool Size    :     1,000".to_string()));
        assert!(lines.iter().any(|line| line.starts_with(" Current     ( 25%) :")));
        assert!(lines.iter().any(|line| line.contains("75.0%")));
        Ok(())
    }
}
