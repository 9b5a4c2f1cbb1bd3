//! User, command and hold queue commands.

use adaadmin_api_models::{
    CommandQueueResponse, HoldQueueResponse, StatusResponse, UserQueueDetailResponse,
    UserQueueResponse,
};
use reqwest::Method;
use tracing::info;

use super::{database_path, fetch, parse_number, require_dbid, require_param};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliResult, read_json, send};
use crate::output::emit;
use crate::output::queues::{
    command_queue_lines, hold_queue_lines, user_detail_lines, user_queue_lines,
};

const QUEUE_ID_USAGE: &str = "--param <user queue id>";

fn queue_entry(args: &CommandArgs) -> CliResult<u64> {
    parse_number(require_param(args, QUEUE_ID_USAGE)?, "user queue id")
}

pub(crate) async fn handle_user_queue(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/userqueue", database_path(dbid));
    let queue: UserQueueResponse = fetch(ctx, &path, "user queue").await?;
    emit(&queue, output, user_queue_lines)
}

pub(crate) async fn handle_user_details(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let entry = queue_entry(args)?;
    let path = format!("{}/userqueue/{entry}", database_path(dbid));
    let detail: UserQueueDetailResponse = fetch(ctx, &path, "user queue details").await?;
    emit(&detail, output, |detail| user_detail_lines(entry, detail))
}

pub(crate) async fn handle_stop_user(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let entry = queue_entry(args)?;
    let path = format!("{}/userqueue/{entry}", database_path(dbid));
    info!(dbid, entry, "stopping user");
    let response = send(ctx.request(Method::DELETE, &path)?, &path).await?;
    let status: StatusResponse = read_json(response, "stop status").await?;
    emit(&status, output, |_| {
        vec![format!(" Stop of user {entry} in user queue initiated")]
    })
}

pub(crate) async fn handle_command_queue(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/commandqueue", database_path(dbid));
    let queue: CommandQueueResponse = fetch(ctx, &path, "command queue").await?;
    emit(&queue, output, command_queue_lines)
}

pub(crate) async fn handle_hold_queue(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/holdqueue", database_path(dbid));
    let queue: HoldQueueResponse = fetch(ctx, &path, "hold queue").await?;
    emit(&queue, output, hold_queue_lines)
}
