//! Server version and installation environment.

use adaadmin_api_models::{EnvironmentInfo, VersionInfo};
use reqwest::Method;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliResult, read_json, send};
use crate::output::database::{environment_lines, version_lines};
use crate::output::emit;

const VERSION_PATH: &str = "/version";

/// Show the server version; the only request sent without credentials.
pub(crate) async fn handle_version(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    debug!(path = VERSION_PATH, "sending unauthenticated request");
    let request = ctx.client.get(ctx.endpoint(VERSION_PATH)?);
    let response = send(request, VERSION_PATH).await?;
    let info: VersionInfo = read_json(response, "version information").await?;
    emit(&info, output, version_lines)
}

pub(crate) async fn handle_environment(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let path = "/adabas/env";
    let response = send(ctx.request(Method::GET, path)?, path).await?;
    let info: EnvironmentInfo = read_json(response, "environment").await?;
    emit(&info, output, environment_lines)
}
