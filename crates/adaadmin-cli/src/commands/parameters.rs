//! Nucleus parameter inspection and updates.

use adaadmin_api_models::{ParameterInfoResponse, ParameterResponse, StatusResponse};
use adaadmin_core::{ParameterMode, ParameterUpdate};
use reqwest::Method;
use tracing::info;

use super::{database_path, fetch, require_dbid, require_param};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, read_json, send};
use crate::output::database::{parameter_info_lines, parameter_lines};
use crate::output::{emit, render_status};

const SET_PARAMETER_USAGE: &str = "<name>=<value>[,...] such as NT=5,OPTIONS=(XA),type=dynamic";

pub(crate) async fn handle_parameter(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let param = require_param(args, "--param static|dynamic")?;
    let mode = ParameterMode::parse(param).ok_or_else(|| {
        CliError::validation(format!(
            "parameter type '{param}' is not valid, use static or dynamic"
        ))
    })?;
    let path = format!("{}/parameter", database_path(dbid));
    let request = ctx
        .request(Method::GET, &path)?
        .query(&[("type", mode.as_str())]);
    let reply: ParameterResponse = read_json(send(request, &path).await?, "parameters").await?;
    emit(&reply, output, |reply| parameter_lines(mode, reply))
}

pub(crate) async fn handle_parameter_info(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let path = format!("{}/parameterinfo", database_path(dbid));
    let reply: ParameterInfoResponse = fetch(ctx, &path, "parameter catalogue").await?;
    emit(&reply, output, parameter_info_lines)
}

/// Apply a `name=value` list; the parsed record travels as query pairs.
pub(crate) async fn handle_set_parameter(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let update = ParameterUpdate::parse(require_param(args, SET_PARAMETER_USAGE)?)
        .map_err(|err| CliError::validation(err.to_string()))?;
    let path = format!("{}/parameter", database_path(dbid));
    info!(dbid, mode = update.mode.as_str(), "updating parameters");
    let request = ctx.request(Method::PUT, &path)?.query(&update);
    let status: StatusResponse = read_json(send(request, &path).await?, "parameter status").await?;
    render_status(&status, "Adabas parameter", output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context_for, database, with_param};
    use anyhow::Result;
    use httpmock::Method::{GET, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn parameter_type_must_be_static_or_dynamic() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/adabas/database/12/parameter")
                .query_param("type", "dynamic");
            then.status(200)
                .json_body(json!({ "Parameter": { "NT": 5, "LBP": 1_073_741_824_i64 } }));
        });

        let ctx = context_for(&server)?;
        assert!(matches!(
            handle_parameter(&ctx, &with_param(12, "online"), OutputFormat::Table).await,
            Err(CliError::Validation(_))
        ));
        assert!(matches!(
            handle_parameter(&ctx, &database(12), OutputFormat::Table).await,
            Err(CliError::Validation(_))
        ));
        handle_parameter(&ctx, &with_param(12, "Dynamic"), OutputFormat::Table).await?;
        mock.assert_hits(1);
        Ok(())
    }

    #[tokio::test]
    async fn parameter_info_is_decoded() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/adabas/database/12/parameterinfo");
            then.status(200).json_body(json!({
                "ParameterInfo": { "Parameter": [
                    { "Acronym": "USEREXITS", "InifileValue": 9, "OnlineValue": 0 }
                ]}
            }));
        });

        handle_parameter_info(&context_for(&server)?, &database(12), OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn set_parameter_sends_assignments_as_query() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/adabas/database/12/parameter")
                .query_param("type", "dynamic")
                .query_param("NT", "5")
                .query_param("ADATCP", "true")
                .query_param("OPTIONS", "TRUNCATION,XA")
                .query_param_missing("LBP");
            then.status(200)
                .json_body(json!({ "Status": { "Message": "Parameter updated" } }));
        });

        let args = with_param(12, "NT=5,ADATCP=on,OPTIONS=(TRUNCATION,XA),type=dynamic");
        handle_set_parameter(&context_for(&server)?, &args, OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn set_parameter_rejects_bad_input_before_sending() -> Result<()> {
        let server = MockServer::start_async().await;
        let any = server.mock(|_, then| {
            then.status(200);
        });

        let ctx = context_for(&server)?;
        for raw in ["NT", "NT=five", "OPTIONS=(XA,TRUNCATION"] {
            let outcome = handle_set_parameter(&ctx, &with_param(12, raw), OutputFormat::Table).await;
            assert!(matches!(outcome, Err(CliError::Validation(_))), "{raw}");
        }
        any.assert_hits(0);
        Ok(())
    }
}
