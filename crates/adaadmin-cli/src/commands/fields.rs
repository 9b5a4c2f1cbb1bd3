//! Field definition table commands.

use adaadmin_api_models::{FieldTableResponse, StatusResponse};
use reqwest::Method;
use tracing::info;

use super::files::render_file_status;
use super::{database_path, require_dbid, require_fnr, require_param};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliResult, read_json, send};
use crate::output::emit;
use crate::output::files::field_table_lines;

fn fields_path(dbid: u32, fnr: u32) -> String {
    format!("{}/file/{fnr}/fields", database_path(dbid))
}

pub(crate) async fn handle_fields(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    let path = fields_path(dbid, fnr);
    let request = ctx.request(Method::GET, &path)?.query(&[("rfc3339", "true")]);
    let table: FieldTableResponse = read_json(send(request, &path).await?, "field table").await?;
    emit(&table, output, |table| field_table_lines(dbid, fnr, table))
}

/// Append fields given in FDT notation, e.g. `1,XX,8,A`.
pub(crate) async fn handle_add_fields(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let dbid = require_dbid(args)?;
    let fnr = require_fnr(args)?;
    let fields = require_param(args, "--param <field definitions>")?;
    let path = fields_path(dbid, fnr);
    info!(dbid, fnr, fields, "adding fields");
    let request = ctx.request(Method::PUT, &path)?.query(&[("addfields", fields)]);
    let status: StatusResponse = read_json(send(request, &path).await?, "field status").await?;
    render_file_status(&status, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CliError;
    use crate::commands::testing::{AUTHORIZATION, context_for, database};
    use anyhow::Result;
    use httpmock::Method::{GET, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    fn file_args(param: &str) -> CommandArgs {
        CommandArgs {
            fnr: 11,
            param: param.to_string(),
            ..database(12)
        }
    }

    #[tokio::test]
    async fn field_table_is_requested_with_rfc3339_times() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/adabas/database/12/file/11/fields")
                .query_param("rfc3339", "true")
                .header("authorization", AUTHORIZATION);
            then.status(200).json_body(json!({
                "FDT": {
                    "Fields": [ { "Level": 1, "Name": "AA", "Length": 8, "Format": "A", "Flags": "UQ,DE" } ],
                    "Descriptors": []
                }
            }));
        });

        handle_fields(&context_for(&server)?, &file_args(""), OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn add_fields_passes_definitions_as_query() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/adabas/database/12/file/11/fields")
                .query_param("addfields", "1,XX,8,A");
            then.status(200).json_body(json!({ "Status": { "Message": "Fields added" } }));
        });

        let ctx = context_for(&server)?;
        assert!(matches!(
            handle_add_fields(&ctx, &file_args(""), OutputFormat::Table).await,
            Err(CliError::Validation(_))
        ));
        handle_add_fields(&ctx, &file_args("1,XX,8,A"), OutputFormat::Table).await?;
        mock.assert_hits(1);
        Ok(())
    }
}
