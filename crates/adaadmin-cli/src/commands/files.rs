//! Database file commands.

use std::path::Path;

use adaadmin_api_models::{
    FileDefinition, FileDetailResponse, FileListResponse, FileParameterUpdate, StatusResponse,
};
use adaadmin_core::fdt::compact_fdt;
use reqwest::Method;
use tracing::{debug, info};

use super::{
    database_path, fetch, parse_number, read_json_file, read_text, require_dbid, require_fnr,
    require_param,
};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, read_json, send};
use crate::output::emit;
use crate::output::files::{file_detail_lines, file_list_lines};

const FILE_PARAMETER_USAGE: &str = "pgmRefresh=<bool>,isnReusage=<bool>,spaceReusage=<bool>";
const FDT_INPUT_PREFIX: &str = "fdt:";
const FDU_INPUT_PREFIX: &str = "fdu:";

fn file_path(dbid: u32, fnr: u32) -> String {
    format!("{}/file/{fnr}", database_path(dbid))
}

/// Status reply of a file modification, printed as `Status:  <message>`.
pub(crate) fn render_file_status(status: &StatusResponse, output: OutputFormat) -> CliResult<()> {
    emit(status, output, |status| {
        vec![format!("Status:  {}", status.status.message)]
    })
}

async fn modify_file(
    ctx: &AppContext,
    path: &str,
    update: &FileParameterUpdate,
    output: OutputFormat,
) -> CliResult<()> {
    let mut request = ctx.request(Method::PUT, path)?;
    if !update.is_empty() {
        request = request.query(update);
    }
    let status: StatusResponse = read_json(send(request, path).await?, "file status").await?;
    render_file_status(&status, output)
}

/// Boolean literal accepted for file attributes: `1`, `t`, `true`, `0`, `f`, `false`.
fn parse_flag(name: &str, value: &str) -> CliResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(CliError::validation(format!(
            "{name} parameter invalid: {value}"
        ))),
    }
}

/// Parse `name=value` pairs into a file attribute update.
fn parse_file_update(param: &str) -> CliResult<FileParameterUpdate> {
    let mut update = FileParameterUpdate::default();
    for pair in param.split(',') {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(CliError::validation(format!(
                "invalid file parameter '{pair}', expected {FILE_PARAMETER_USAGE}"
            )));
        };
        debug!(name, value, "file parameter");
        let flag = parse_flag(name, value)?;
        match name.trim().to_ascii_lowercase().as_str() {
            "pgmrefresh" => update.pgmrefresh = Some(flag),
            "isnreusage" => update.isnreusage = Some(flag),
            "spacereusage" => update.spacereusage = Some(flag),
            _ => {
                return Err(CliError::validation(format!(
                    "unknown file parameter '{name}', expected {FILE_PARAMETER_USAGE}"
                )));
            }
        }
    }
    Ok(update)
}

pub(crate) async fn handle_files(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/file", database_path(dbid));
    let files: FileListResponse = fetch(ctx, &path, "file list").await?;
    emit(&files, output, |files| file_list_lines(dbid, files))
}

/// Show a file, or update its attributes when `--param` is given.
pub(crate) async fn handle_file(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    let path = file_path(dbid, fnr);
    if !args.param.trim().is_empty() {
        let update = parse_file_update(args.param.trim())?;
        info!(dbid, fnr, "updating file attributes");
        return modify_file(ctx, &path, &update, output).await;
    }

    let request = ctx.request(Method::GET, &path)?.query(&[("rfc3339", "true")]);
    let detail: FileDetailResponse = read_json(send(request, &path).await?, "file detail").await?;
    emit(&detail, output, |detail| file_detail_lines(dbid, fnr, detail))
}

pub(crate) async fn handle_delete_file(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    let path = file_path(dbid, fnr);
    info!(dbid, fnr, "deleting file");
    let response = send(ctx.request(Method::DELETE, &path)?, &path).await?;
    let status: StatusResponse = read_json(response, "delete status").await?;
    emit(&status, output, |status| {
        vec![format!(" Adabas status deleting file: {}", status.status.message)]
    })
}

pub(crate) async fn handle_renumber_file(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    let number: u32 = parse_number(
        require_param(args, "--param <new file number>")?,
        "file number",
    )?;
    let update = FileParameterUpdate {
        number: Some(number),
        ..FileParameterUpdate::default()
    };
    info!(dbid, fnr, number, "renumbering file");
    modify_file(ctx, &format!("{}:renumber", file_path(dbid, fnr)), &update, output).await
}

pub(crate) async fn handle_rename_file(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    let update = FileParameterUpdate {
        name: Some(require_param(args, "--param <new file name>")?.to_string()),
        ..FileParameterUpdate::default()
    };
    modify_file(ctx, &format!("{}:rename", file_path(dbid, fnr)), &update, output).await
}

pub(crate) async fn handle_refresh_file(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    info!(dbid, fnr, "refreshing file");
    let path = format!("{}:refresh", file_path(dbid, fnr));
    modify_file(ctx, &path, &FileParameterUpdate::default(), output).await
}

/// Assemble the creation request from `fdu:` and `fdt:` inputs.
fn file_definition(args: &CommandArgs, fnr: u32) -> CliResult<FileDefinition> {
    if args.inputs.is_empty() {
        return Err(CliError::validation(
            "--input fdu:<definition.json> is required, optionally with --input fdt:<fields.fdt>",
        ));
    }
    let mut definition: Option<FileDefinition> = None;
    let mut fdt: Option<String> = None;
    for input in &args.inputs {
        if let Some(path) = input.strip_prefix(FDU_INPUT_PREFIX) {
            definition = Some(read_json_file(Path::new(path))?);
        } else if let Some(path) = input.strip_prefix(FDT_INPUT_PREFIX) {
            fdt = Some(compact_fdt(&read_text(Path::new(path))?));
        } else {
            return Err(CliError::validation(format!(
                "input '{input}' needs a '{FDU_INPUT_PREFIX}' or '{FDT_INPUT_PREFIX}' prefix"
            )));
        }
    }

    let mut definition = definition.ok_or_else(|| {
        CliError::validation("file creation needs an --input fdu:<definition.json>")
    })?;
    definition.file_number = i64::from(fnr);
    if fdt.is_some() {
        definition.fdt_definition = fdt;
    }
    if definition.fdu_options.fdu_name.trim().is_empty() {
        return Err(CliError::validation(
            "file definition must name the file in FDUOptions.FduName",
        ));
    }
    Ok(definition)
}

pub(crate) async fn handle_create_file(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    let definition = file_definition(args, fnr)?;
    let path = format!("{}/file", database_path(dbid));
    info!(dbid, fnr, name = %definition.fdu_options.fdu_name, "creating file");
    let response = send(ctx.request(Method::POST, &path)?.json(&definition), &path).await?;
    let status: StatusResponse = read_json(response, "creation status").await?;
    render_file_status(&status, output)
}
