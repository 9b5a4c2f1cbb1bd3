//! Nucleus statistics commands.

use adaadmin_api_models::{BufferPoolResponse, CommandStatsResponse, HighWaterResponse};
use reqwest::Method;

use super::{database_path, require_dbid};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliResult, read_json, send};
use crate::output::emit;
use crate::output::stats::{buffer_pool_lines, command_stats_lines, high_water_lines};

pub(crate) async fn handle_high_water(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/highwater", database_path(dbid));
    let request = ctx.request(Method::GET, &path)?.query(&[("rfc3339", "true")]);
    let marks: HighWaterResponse = read_json(send(request, &path).await?, "high water marks").await?;
    emit(&marks, output, |marks| high_water_lines(dbid, marks))
}

pub(crate) async fn handle_command_stats(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/commandstats", database_path(dbid));
    let response = send(ctx.request(Method::GET, &path)?, &path).await?;
    let stats: CommandStatsResponse = read_json(response, "command statistics").await?;
    emit(&stats, output, command_stats_lines)
}

pub(crate) async fn handle_buffer_pool(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/bpstats", database_path(dbid));
    let response = send(ctx.request(Method::GET, &path)?, &path).await?;
    let stats: BufferPoolResponse = read_json(response, "buffer pool statistics").await?;
    emit(&stats, output, buffer_pool_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CliError;
    use crate::commands::testing::{context_for, database};
    use anyhow::Result;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn high_water_marks_use_rfc3339_times() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/adabas/database/12/highwater")
                .query_param("rfc3339", "true");
            then.status(200).json_body(json!({
                "HighWater": { "NucleusStartTime": "2018-05-15T09:04:05Z", "UserQueueSize": 100 }
            }));
        });

        handle_high_water(&context_for(&server)?, &database(12), OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn statistics_read_their_endpoints() -> Result<()> {
        let server = MockServer::start_async().await;
        let commands = server.mock(|when, then| {
            when.method(GET).path("/adabas/database/12/commandstats");
            then.status(200).json_body(json!({
                "CommandStats": { "Commands": [ { "CommandName": "L3", "CommandCount": 42 } ] }
            }));
        });
        let pool = server.mock(|when, then| {
            when.method(GET).path("/adabas/database/12/bpstats");
            then.status(200).json_body(json!({ "Statistics": { "Size": 0 } }));
        });

        let ctx = context_for(&server)?;
        handle_command_stats(&ctx, &database(12), OutputFormat::Table).await?;
        handle_buffer_pool(&ctx, &database(12), OutputFormat::Table).await?;
        commands.assert();
        pool.assert();
        Ok(())
    }

    #[tokio::test]
    async fn inactive_database_is_a_validation_error() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/adabas/database/12/bpstats");
            then.status(400)
                .json_body(json!({ "Error": { "Code": 17, "Message": "Database not active" } }));
        });

        let outcome = handle_buffer_pool(&context_for(&server)?, &database(12), OutputFormat::Table).await;
        assert!(matches!(
            outcome,
            Err(CliError::Validation(ref message)) if message == "17: Database not active"
        ));
        Ok(())
    }
}
