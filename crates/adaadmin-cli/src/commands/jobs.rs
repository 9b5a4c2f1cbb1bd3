//! Scheduler job commands.

use std::path::Path;

use adaadmin_api_models::{JobListResponse, JobResultResponse, StatusResponse};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::{fetch, read_json_file, require_param, single_input, split_pair};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliResult, read_json, send};
use crate::output::emit;
use crate::output::jobs::{job_list_lines, job_log_lines, job_start_lines, job_status_lines};

const JOB_PATH: &str = "/scheduler/job";
const EXECUTION_USAGE: &str = "--param <job name>:<execution id>";

fn job_path(name: &str) -> String {
    format!("{JOB_PATH}/{name}")
}

fn execution_path(args: &CommandArgs) -> CliResult<String> {
    let (name, id) = split_pair(require_param(args, EXECUTION_USAGE)?, EXECUTION_USAGE)?;
    Ok(format!("{}/result/{id}", job_path(name)))
}

pub(crate) async fn handle_job_list(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let jobs: JobListResponse = fetch(ctx, JOB_PATH, "job list").await?;
    emit(&jobs, output, job_list_lines)
}

pub(crate) async fn handle_job_start(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let name = require_param(args, "--param <job name>")?;
    let path = job_path(name);
    info!(job = name, "starting job");
    let status: StatusResponse =
        read_json(send(ctx.request(Method::PUT, &path)?, &path).await?, "job status").await?;
    emit(&status, output, job_start_lines)
}

pub(crate) async fn handle_delete_job(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let name = require_param(args, "--param <job name>")?;
    let path = job_path(name);
    info!(job = name, "deleting job");
    let status: StatusResponse =
        read_json(send(ctx.request(Method::DELETE, &path)?, &path).await?, "job status").await?;
    emit(&status, output, job_status_lines)
}

pub(crate) async fn handle_delete_execution(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let path = execution_path(args)?;
    let response = send(ctx.request(Method::DELETE, &path)?, &path).await?;
    let status: StatusResponse = read_json(response, "execution status").await?;
    emit(&status, output, job_status_lines)
}

/// Submit a job definition read from the single `--input` file.
pub(crate) async fn handle_create_job(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let input = single_input(args, "--input <job definition.json>")?;
    let definition: Value = read_json_file(Path::new(input))?;
    info!(input, "creating job");
    let request = ctx.request(Method::POST, JOB_PATH)?.json(&definition);
    let status: StatusResponse = read_json(send(request, JOB_PATH).await?, "job status").await?;
    emit(&status, output, job_status_lines)
}

pub(crate) async fn handle_job_log(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let path = execution_path(args)?;
    let result: JobResultResponse = fetch(ctx, &path, "job result").await?;
    emit(&result, output, job_log_lines)
}
