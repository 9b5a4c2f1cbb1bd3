//! Database lifecycle, layout and maintenance commands.

use std::path::Path;

use adaadmin_api_models::{
    ActivityResponse, CheckpointResponse, ContainerResponse, DatabaseDefinition, DatabaseList,
    GcbResponse, NucleusLogResponse, OperationResponse, StatusResponse, ThreadTableResponse,
    UcbResponse,
};
use chrono::{Duration, Local};
use reqwest::Method;
use tracing::info;

use super::{
    database_path, fetch, parse_number, read_json_file, require_dbid, require_param,
};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, read_json, send};
use crate::output::database::{
    activity_lines, checkpoint_lines, container_lines, database_list_lines, information_lines,
    nucleus_log_lines, operation_lines, status_lines, thread_table_lines, ucb_lines,
};
use crate::output::{emit, render_status};

const CHECKPOINT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const CHECKPOINT_RANGE_USAGE: &str = "<from>,<to> with '_' between date and time";

pub(crate) async fn handle_list(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let list: DatabaseList = fetch(ctx, "/adabas/database", "database list").await?;
    emit(&list, output, database_list_lines)
}

/// Send a nucleus operation; an empty operation only queries the database.
pub(crate) async fn handle_operation(
    ctx: &AppContext,
    args: &CommandArgs,
    operation: &str,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}:{operation}", database_path(dbid));
    info!(dbid, operation, "sending database operation");
    let response = send(ctx.request(Method::PUT, &path)?, &path).await?;
    let reply: OperationResponse = read_json(response, "operation status").await?;
    emit(&reply, output, |reply| operation_lines(dbid, operation, reply))
}

pub(crate) async fn handle_status(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let reply: OperationResponse = fetch(ctx, &database_path(dbid), "database status").await?;
    emit(&reply, output, |reply| status_lines(dbid, reply))
}

/// Build the creation request from the `--input` definition, or the demo layout.
fn database_definition(args: &CommandArgs) -> CliResult<DatabaseDefinition> {
    let mut definition = match args.inputs.as_slice() {
        [] => DatabaseDefinition::demo(require_dbid(args)?),
        [input] => read_json_file(Path::new(input))?,
        _ => {
            return Err(CliError::validation(
                "exactly one --input database definition is accepted",
            ));
        }
    };
    if args.dbid > 0 {
        definition.dbid = i64::from(args.dbid);
    }
    Ok(definition)
}

pub(crate) async fn handle_create(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let definition = database_definition(args)?;
    let path = "/adabas/database";
    info!(dbid = definition.dbid, name = %definition.name, "creating database");
    let response = send(ctx.request(Method::POST, path)?.json(&definition), path).await?;
    let status: StatusResponse = read_json(response, "creation status").await?;
    emit(&status, output, |status| {
        vec![
            String::new(),
            " Adabas status of database creation:".to_string(),
            String::new(),
            format!(" {}", status.status.message),
        ]
    })
}

pub(crate) async fn handle_delete(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = database_path(dbid);
    info!(dbid, "deleting database");
    let response = send(ctx.request(Method::DELETE, &path)?, &path).await?;
    let status: StatusResponse = read_json(response, "delete status").await?;
    render_status(&status, "Adabas status of database delete", output)
}

pub(crate) async fn handle_rename(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let name = require_param(args, "--param <new database name>")?;
    let path = database_path(dbid);
    let request = ctx.request(Method::PUT, &path)?.query(&[("name", name)]);
    let status: StatusResponse = read_json(send(request, &path).await?, "rename status").await?;
    render_status(&status, "Adabas status of database rename", output)
}

pub(crate) async fn handle_nucleus_log(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/nucleuslog", database_path(dbid));
    let log: NucleusLogResponse = fetch(ctx, &path, "nucleus log").await?;
    emit(&log, output, |log| nucleus_log_lines(dbid, log))
}

pub(crate) async fn handle_information(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/gcb", database_path(dbid));
    let request = ctx.request(Method::GET, &path)?.query(&[("rfc3339", "true")]);
    let gcb: GcbResponse = read_json(send(request, &path).await?, "control block").await?;
    emit(&gcb, output, |gcb| information_lines(dbid, gcb))
}

pub(crate) async fn handle_activity(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/activity", database_path(dbid));
    let activity: ActivityResponse = fetch(ctx, &path, "activity statistics").await?;
    emit(&activity, output, activity_lines)
}

pub(crate) async fn handle_thread_table(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/threadtable", database_path(dbid));
    let threads: ThreadTableResponse = fetch(ctx, &path, "thread table").await?;
    emit(&threads, output, thread_table_lines)
}

pub(crate) async fn handle_container(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/container", database_path(dbid));
    let layout: ContainerResponse = fetch(ctx, &path, "container layout").await?;
    emit(&layout, output, |layout| container_lines(dbid, layout))
}

/// Parse `from,to`, where `_` stands for the space between date and time.
fn parse_checkpoint_range(param: &str) -> CliResult<(String, String)> {
    let normalized = param.replace('_', " ");
    match normalized.split(',').collect::<Vec<_>>().as_slice() {
        [start, end] => Ok((start.trim().to_string(), end.trim().to_string())),
        _ => Err(CliError::validation(format!(
            "invalid checkpoint range '{param}', expected {CHECKPOINT_RANGE_USAGE}"
        ))),
    }
}

fn last_day() -> (String, String) {
    let end = Local::now();
    let start = end - Duration::days(1);
    (
        start.format(CHECKPOINT_TIME_FORMAT).to_string(),
        end.format(CHECKPOINT_TIME_FORMAT).to_string(),
    )
}

pub(crate) async fn handle_checkpoints(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let (start, end) = if args.param.trim().is_empty() {
        if output == OutputFormat::Table {
            println!("Query checkpoint of the last 24 hours");
        }
        last_day()
    } else {
        parse_checkpoint_range(&args.param)?
    };
    let path = format!("{}/checkpoint", database_path(dbid));
    let request = ctx
        .request(Method::GET, &path)?
        .query(&[("start_time", start.as_str()), ("end_time", end.as_str())]);
    let checkpoints: CheckpointResponse =
        read_json(send(request, &path).await?, "checkpoint list").await?;
    emit(&checkpoints, output, |checkpoints| {
        checkpoint_lines(&start, &end, checkpoints)
    })
}

pub(crate) async fn handle_delete_checkpoints(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let (start, end) = parse_checkpoint_range(require_param(args, CHECKPOINT_RANGE_USAGE)?)?;
    let path = format!("{}/checkpoint", database_path(dbid));
    info!(dbid, %start, %end, "deleting checkpoints");
    let request = ctx
        .request(Method::DELETE, &path)?
        .query(&[("start_time", start.as_str()), ("end_time", end.as_str())]);
    let status: StatusResponse = read_json(send(request, &path).await?, "delete status").await?;
    render_status(
        &status,
        &format!("Adabas status of delete checkpoint in range of {start} to {end}"),
        output,
    )
}

pub(crate) async fn handle_list_ucb(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/ucb", database_path(dbid));
    let ucb: UcbResponse = fetch(ctx, &path, "UCB list").await?;
    emit(&ucb, output, ucb_lines)
}

pub(crate) async fn handle_delete_ucb(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let entry: u64 = parse_number(require_param(args, "--param <UCB entry id>")?, "UCB id")?;
    let path = format!("{}/ucb/{entry}", database_path(dbid));
    info!(dbid, entry, "deleting UCB entry");
    let response = send(ctx.request(Method::DELETE, &path)?, &path).await?;
    let status: StatusResponse = read_json(response, "UCB delete status").await?;
    render_status(&status, "Adabas status of UCB delete", output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{AUTHORIZATION, context_for, database, with_param};
    use anyhow::Result;
    use httpmock::Method::{DELETE, GET, POST, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn list_reads_every_database() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/adabas/database")
                .header("authorization", AUTHORIZATION);
            then.status(200).json_body(json!({
                "Database": [ { "Dbid": 12, "Name": "DEMODB", "Active": true, "Version": "6.7" } ]
            }));
        });

        handle_list(&context_for(&server)?, OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn operations_use_the_colon_suffix() -> Result<()> {
        let server = MockServer::start_async().await;
        let shutdown = server.mock(|when, then| {
            when.method(PUT).path("/adabas/database/12:shutdown");
            then.status(202)
                .json_body(json!({ "Status": { "Message": "shutdown initiated" } }));
        });
        let info = server.mock(|when, then| {
            when.method(PUT).path("/adabas/database/12:");
            then.status(200)
                .json_body(json!({ "Database": { "Dbid": 12, "Status": "Running" } }));
        });

        let ctx = context_for(&server)?;
        handle_operation(&ctx, &database(12), "shutdown", OutputFormat::Table).await?;
        handle_operation(&ctx, &database(12), "", OutputFormat::Table).await?;
        shutdown.assert();
        info.assert();
        Ok(())
    }

    #[tokio::test]
    async fn database_commands_require_dbid() -> Result<()> {
        let server = MockServer::start_async().await;
        let any = server.mock(|_, then| {
            then.status(200);
        });
        let ctx = context_for(&server)?;

        let err = handle_operation(&ctx, &CommandArgs::default(), "start", OutputFormat::Table)
            .await
            .err();
        assert!(matches!(err, Some(CliError::Validation(_))));
        assert!(handle_status(&ctx, &CommandArgs::default(), OutputFormat::Table)
            .await
            .is_err());
        any.assert_hits(0);
        Ok(())
    }

    #[tokio::test]
    async fn create_posts_demo_definition_by_default() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/adabas/database")
                .json_body_includes(r#"{ "Name": "DEMODB", "Dbid": 45, "LoadDemo": true }"#);
            then.status(200)
                .json_body(json!({ "Status": { "Message": "Database creation started" } }));
        });

        handle_create(&context_for(&server)?, &database(45), OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn create_overrides_dbid_of_definition_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("db.json");
        std::fs::write(&path, r#"{"Name":"PROD","Dbid":7,"CheckpointFile":20}"#)?;

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/adabas/database")
                .json_body_includes(r#"{ "Name": "PROD", "Dbid": 8, "CheckpointFile": 20 }"#);
            then.status(200).json_body(json!({ "Status": { "Message": "ok" } }));
        });

        let args = CommandArgs {
            dbid: 8,
            inputs: vec![path.display().to_string()],
            ..CommandArgs::default()
        };
        handle_create(&context_for(&server)?, &args, OutputFormat::Json).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn rename_sends_new_name_as_query() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/adabas/database/12")
                .query_param("name", "NEWNAME");
            then.status(200).json_body(json!({ "Status": { "Message": "renamed" } }));
        });

        let ctx = context_for(&server)?;
        handle_rename(&ctx, &with_param(12, "NEWNAME"), OutputFormat::Table).await?;
        assert!(matches!(
            handle_rename(&ctx, &database(12), OutputFormat::Table).await,
            Err(CliError::Validation(_))
        ));
        mock.assert_hits(1);
        Ok(())
    }

    #[tokio::test]
    async fn information_requests_rfc3339_timestamps() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/adabas/database/12/gcb")
                .query_param("rfc3339", "true");
            then.status(200)
                .json_body(json!({ "GCB": { "Dbid": 12, "Name": "DEMODB" } }));
        });

        handle_information(&context_for(&server)?, &database(12), OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn checkpoint_range_replaces_underscores() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/adabas/database/12/checkpoint")
                .query_param("start_time", "2018-05-01 00:00:00")
                .query_param("end_time", "2018-05-02 00:00:00");
            then.status(200).json_body(json!({
                "Checkpoints": [ { "Name": "SYNP", "Session": 3, "Date": "2018-05-01 08:00:00" } ]
            }));
        });

        let args = with_param(12, "2018-05-01_00:00:00,2018-05-02_00:00:00");
        handle_checkpoints(&context_for(&server)?, &args, OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn checkpoints_default_to_last_day() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/adabas/database/12/checkpoint")
                .query_param_exists("start_time")
                .query_param_exists("end_time");
            then.status(200).json_body(json!({ "Checkpoints": [] }));
        });

        handle_checkpoints(&context_for(&server)?, &database(12), OutputFormat::Json).await?;
        mock.assert();
        Ok(())
    }

    #[test]
    fn checkpoint_ranges_need_two_bounds() {
        assert!(matches!(
            parse_checkpoint_range("a_b,c_d"),
            Ok((ref start, ref end)) if start == "a b" && end == "c d"
        ));
        assert!(parse_checkpoint_range("2018-05-01").is_err());
        assert!(parse_checkpoint_range("a,b,c").is_err());
    }

    #[test]
    fn default_checkpoint_window_spans_one_day() -> Result<()> {
        let (start, end) = last_day();
        let start = chrono::NaiveDateTime::parse_from_str(&start, CHECKPOINT_TIME_FORMAT)?;
        let end = chrono::NaiveDateTime::parse_from_str(&end, CHECKPOINT_TIME_FORMAT)?;
        assert!((23..=25).contains(&(end - start).num_hours()));
        Ok(())
    }

    #[tokio::test]
    async fn delete_checkpoints_requires_range() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/adabas/database/12/checkpoint")
                .query_param("start_time", "2018-05-01 00:00:00")
                .query_param("end_time", "2018-05-02 00:00:00");
            then.status(200).json_body(json!({ "Status": { "Message": "deleted" } }));
        });

        let ctx = context_for(&server)?;
        assert!(matches!(
            handle_delete_checkpoints(&ctx, &database(12), OutputFormat::Table).await,
            Err(CliError::Validation(_))
        ));
        let args = with_param(12, "2018-05-01_00:00:00,2018-05-02_00:00:00");
        handle_delete_checkpoints(&ctx, &args, OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn ucb_delete_needs_numeric_entry() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/adabas/database/12/ucb/4");
            then.status(200).json_body(json!({ "Status": { "Message": "removed" } }));
        });

        let ctx = context_for(&server)?;
        assert!(matches!(
            handle_delete_ucb(&ctx, &with_param(12, "four"), OutputFormat::Table).await,
            Err(CliError::Validation(_))
        ));
        handle_delete_ucb(&ctx, &with_param(12, "4"), OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }
}
