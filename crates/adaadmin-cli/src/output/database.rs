//! Renderers for server, database and configuration payloads.

use adaadmin_api_models::{
    ActivityResponse, CheckpointResponse, ContainerResponse, DatabaseList, EnvironmentInfo,
    GcbResponse, NucleusLogResponse, OperationResponse, ParameterInfo, ParameterInfoResponse,
    ParameterResponse, ThreadTableResponse, UcbResponse, VersionInfo,
};
use adaadmin_core::{FlagDomain, ParameterMode, decode_auto_restart};
use serde_json::Value;

use super::{format_count, format_server_time};

pub(crate) fn version_lines(info: &VersionInfo) -> Vec<String> {
    let mut lines = vec![
        format!("Version {} {}", info.version, info.product),
        String::new(),
        "Handlers:".to_string(),
    ];
    lines.extend(
        info.handler
            .iter()
            .map(|handler| format!(" {}: {}", handler.name, handler.version)),
    );
    lines
}

pub(crate) fn environment_lines(info: &EnvironmentInfo) -> Vec<String> {
    let mut lines = vec!["Adabas environment:".to_string()];
    match &info.environment {
        Value::Object(entries) => {
            lines.extend(
                entries
                    .iter()
                    .map(|(key, value)| format!(" {key:<20}: {}", value_text(value))),
            );
        }
        Value::Null => {}
        other => lines.push(format!(" {}", value_text(other))),
    }
    lines
}

pub(crate) fn database_list_lines(list: &DatabaseList) -> Vec<String> {
    let mut lines = vec![
        format!(" {:>3}   {:<16}    {:>8}    {}", "Dbid", "Name", "Active", "Version"),
        String::new(),
    ];
    lines.extend(list.database.iter().map(|db| {
        format!(
            "  {:03} [{:<16}]   {:>8}    {}",
            db.dbid, db.name, db.active, db.version
        )
    }));
    lines.push(String::new());
    lines
}

/// Lines for an operation or information request; an empty `operation` is a
/// plain information query.
pub(crate) fn operation_lines(dbid: u32, operation: &str, reply: &OperationResponse) -> Vec<String> {
    let header = if operation.is_empty() {
        format!("Get database information {dbid}")
    } else {
        format!("Send following operation to database {dbid}: {operation}")
    };
    let mut lines = vec![header];
    match (&reply.status, &reply.database) {
        (Some(status), _) => {
            lines.push(format!("Database status dbid={dbid} {}", status.message));
        }
        (None, Some(database)) => {
            lines.push(format!(
                "Database status dbid={} {}",
                database.dbid, database.status
            ));
        }
        (None, None) => lines.push("Database operation inited successfully".to_string()),
    }
    lines
}

pub(crate) fn status_lines(dbid: u32, reply: &OperationResponse) -> Vec<String> {
    let status = reply
        .database
        .as_ref()
        .map(|database| database.status.clone())
        .or_else(|| reply.status.as_ref().map(|status| status.message.clone()))
        .unwrap_or_default();
    vec![format!(" Adabas status of database {dbid}:  {status}")]
}

pub(crate) fn nucleus_log_lines(dbid: u32, reply: &NucleusLogResponse) -> Vec<String> {
    vec![format!("Database {dbid:03} Nucleus log:"), reply.log.log.clone()]
}

fn labelled(label: &str, value: impl std::fmt::Display) -> String {
    format!("{label:<20}: {value}")
}

pub(crate) fn information_lines(dbid: u32, reply: &GcbResponse) -> Vec<String> {
    let gcb = &reply.gcb;
    let mut lines = vec![
        format!("Database {dbid:03} information:"),
        labelled("Dbid", gcb.dbid),
        labelled("Name", &gcb.name),
        labelled("Version", &gcb.structure_level),
        labelled("Architecture", &gcb.architecture),
        labelled("Created", format_server_time(&gcb.date)),
        labelled("Last changed", format_server_time(&gcb.time_stamp_log)),
        labelled("PLOG count", gcb.plog_count),
        labelled("Current CLOG", gcb.current_clog_number),
        labelled("Current PLOG", gcb.current_plog_number),
        labelled("Flags", &gcb.flags),
        labelled("Maximum File Number", gcb.max_file_number),
        labelled("Files loaded", gcb.max_file_number_loaded),
        "Reserved Files".to_string(),
        labelled(" Checkpoint File", gcb.checkpoint_file),
        labelled(" Security File", gcb.security_file),
        labelled(" User File", gcb.et_data_file),
        "Replication".to_string(),
        labelled(" Metadata File", gcb.replication_metadata_file),
        labelled(" Command File", gcb.replication_command_file),
        labelled(" Transition File", gcb.replication_transition_file),
        labelled(" Timestamp Repl", format_server_time(&gcb.time_stamp_replication)),
        "Work".to_string(),
    ];
    for (index, extent) in gcb
        .work_extents
        .iter()
        .enumerate()
        .filter(|(_, extent)| extent.rabn_unused != 0)
    {
        lines.push(labelled(" Work extent ", index + 1));
        lines.push(labelled("  Blocksize", format_count(extent.block_size)));
        lines.push(labelled("  Device Type", &extent.device_type));
        lines.push(labelled("  ID", &extent.id));
        lines.push(labelled("  Number", extent.number));
        lines.push(labelled("  First RABN", format_count(extent.rabn_first)));
        lines.push(labelled("  Last RABN", format_count(extent.rabn_last)));
        lines.push(labelled("  Unused RABN", format_count(extent.rabn_unused)));
    }
    lines.push(labelled(" Work part 1", format_count(gcb.work_part1_size)));
    lines
}

pub(crate) fn activity_lines(reply: &ActivityResponse) -> Vec<String> {
    let stats = &reply.statistics;
    let counter = |value: i64| format!("{:>12}", format_count(value));
    vec![
        " Adabas activity:".to_string(),
        String::new(),
        " I/O Activity                     Total   Throwbacks                       Total"
            .to_string(),
        " ------------                     -----   ----------                       -----"
            .to_string(),
        format!(
            " Buffer Pool               {}   Waiting for UQ context    {}",
            counter(stats.buffer_pool_io),
            counter(stats.thb_wait_uq_context)
        ),
        format!(
            " WORK Read                 {}   Waiting for ISN           {}",
            counter(stats.work_reads),
            counter(stats.thb_wait_isn)
        ),
        format!(
            " WORK Write                {}   ET Sync                   {}",
            counter(stats.work_writes),
            counter(stats.thb_et_sync)
        ),
        format!(
            " PLOG Write                {}   DWP Overflow              {}",
            counter(stats.plog_writes),
            counter(stats.thb_dwp_overflow)
        ),
        format!(" NUCTMP                    {}", counter(-1)),
        format!(" NUCSRT                    {}", counter(-1)),
        String::new(),
        " Pool Hit Rate                    Total   Interrupts       Current         Total"
            .to_string(),
        " -------------                    -----   ----------       -------         -----"
            .to_string(),
        format!(
            " Buffer Pool                        {:.1}% WP Space Wait {:>10}    {:>10}",
            stats.bp_hit_rate,
            format_count(stats.wp_space_wait_current),
            format_count(stats.wp_space_wait_total)
        ),
        format!(
            " Format pool                        {:.1}%",
            stats.fp_hit_rate
        ),
    ]
}

pub(crate) fn thread_table_lines(reply: &ThreadTableResponse) -> Vec<String> {
    let mut lines = vec![
        " Adabas thread table:".to_string(),
        " No     Cmd Count  File  Cmd  Status".to_string(),
        " --     ---------  ----  ---  ------".to_string(),
    ];
    lines.extend(reply.threads.iter().map(|thread| {
        format!(
            " {:>2}    {:>10} {:>5}   {:>2}  {}",
            thread.thread,
            format_count(thread.command_count),
            thread.file,
            thread.command_code,
            thread.status
        )
    }));
    lines
}

pub(crate) fn parameter_lines(mode: ParameterMode, reply: &ParameterResponse) -> Vec<String> {
    let mut lines = vec![format!(" Adabas {} parameter info:", mode.as_str())];
    lines.extend(
        reply
            .parameter
            .iter()
            .map(|(name, value)| format!("     {name} = {}", value_text(value))),
    );
    lines
}

pub(crate) fn parameter_info_lines(reply: &ParameterInfoResponse) -> Vec<String> {
    let mut lines = vec![" Adabas parameter info:".to_string()];
    for info in reply
        .parameter_info
        .parameter
        .iter()
        .filter(|info| !info.acronym.is_empty())
    {
        lines.extend(parameter_info_entry(info));
    }
    lines
}

fn parameter_info_entry(info: &ParameterInfo) -> Vec<String> {
    let mut lines = vec![
        format!("[{}]", info.acronym),
        format!("{:<20}: {}", info.name, info.description),
        format!("  Dynamic: {}", info.is_dynamic),
    ];
    match info.acronym.as_str() {
        "AR" => lines.push(format!(
            "  Default: {:>14}  Configuration: {:>14}",
            decode_auto_restart(&info.default_value),
            decode_auto_restart(&info.inifile_value)
        )),
        "OPTIONS" => {
            lines.push(format!("  Default: {}", info.default_value));
            lines.push(format!("  Configuration: {}", info.inifile_value));
            lines.push(format!("  Online:        {}", info.online_value));
        }
        acronym => match FlagDomain::from_acronym(acronym) {
            Some(domain) => {
                lines.push("  Default:".to_string());
                lines.push(format!(
                    "  Configuration: {}",
                    domain.decode(&info.inifile_value)
                ));
                lines.push(format!(
                    "  Online:        {}",
                    domain.decode(&info.online_value)
                ));
            }
            None => lines.push(format!(
                "  Default: {:>14}  Configuration: {:>14}  Online: {:>14}",
                info.default_value, info.inifile_value, info.online_value
            )),
        },
    }
    if info.is_min_value_available {
        lines.push(format!("  Minimum: {:>14}", info.min_value));
    }
    if info.is_max_value_available {
        lines.push(format!("  Maximum: {:>14}", info.max_value));
    }
    lines.push(String::new());
    lines
}

pub(crate) fn container_lines(dbid: u32, reply: &ContainerResponse) -> Vec<String> {
    let layout = &reply.container;
    let mut lines = vec![format!("Database {dbid:03} container:")];
    lines.extend(layout.container_list.iter().map(|container| {
        format!(
            " {:>5}{:<2} {} {:>8}{} {:>8}{}  {:>8}:{:>8} {:>6}  {}",
            container.kind,
            container.container_number,
            container.device_type,
            format_count(container.block_size),
            container.block_unit,
            format_count(container.size),
            container.size_unit,
            format_count(container.first_extent_rabn),
            format_count(container.last_extent_rabn),
            format_count(container.first_unused_rabn),
            container.path
        )
    }));
    lines.push(format!("Database {dbid:03} free space table:"));
    lines.extend(layout.free_space_table.iter().map(|free| {
        format!(
            " {:>5} {:>10} {:>10} {:>4}",
            free.kind,
            format_count(free.first_rabn),
            format_count(free.last_rabn),
            free.block_size
        )
    }));
    lines
}

pub(crate) fn checkpoint_lines(start: &str, end: &str, reply: &CheckpointResponse) -> Vec<String> {
    let mut lines = vec![format!("Query checkpoint from  {start}  to  {end}")];
    lines.extend(reply.checkpoints.iter().map(|checkpoint| {
        format!(
            "{} {} {} {}",
            checkpoint.name, checkpoint.session, checkpoint.date, checkpoint.details
        )
    }));
    lines
}

pub(crate) fn ucb_lines(reply: &UcbResponse) -> Vec<String> {
    let mut lines = vec![
        " UCB entries:".to_string(),
        format!(
            " {:<20} {:<10} {:<8} {:<8} {:<8}",
            "Date/Time", "Entry ID", "Utility", "Mode", "Files"
        ),
    ];
    lines.extend(reply.ucb.entries.iter().map(|entry| {
        format!(
            " {:<20} {:<10} {:<8} {:<8} {}",
            entry.date,
            entry.sequence,
            entry.id,
            entry.db_mode,
            value_text(&entry.ucb_files)
        )
    }));
    lines
}

/// Strings print without quotes; everything else prints as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
