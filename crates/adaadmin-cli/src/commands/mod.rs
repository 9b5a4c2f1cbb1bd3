//! Command handlers grouped by concern.

pub(crate) mod browser;
pub(crate) mod databases;
pub(crate) mod environment;
pub(crate) mod fields;
pub(crate) mod files;
pub(crate) mod jobs;
pub(crate) mod parameters;
pub(crate) mod queues;
pub(crate) mod stats;

use std::fs;
use std::path::Path;

use anyhow::anyhow;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::cli::CommandArgs;
use crate::client::{AppContext, CliError, CliResult, read_json, send};

/// API path of a database.
pub(crate) fn database_path(dbid: u32) -> String {
    format!("/adabas/database/{dbid}")
}

/// GET an API path and decode its JSON body.
pub(crate) async fn fetch<T: DeserializeOwned>(
    ctx: &AppContext,
    path: &str,
    what: &str,
) -> CliResult<T> {
    let response = send(ctx.request(Method::GET, path)?, path).await?;
    read_json(response, what).await
}

/// Database id of the run; zero means the flag was not given.
pub(crate) fn require_dbid(args: &CommandArgs) -> CliResult<u32> {
    if args.dbid < 1 {
        return Err(CliError::validation(
            "please add option --dbid with the Adabas database id",
        ));
    }
    Ok(args.dbid)
}

/// File number of the run; zero means the flag was not given.
pub(crate) fn require_fnr(args: &CommandArgs) -> CliResult<u32> {
    if args.fnr < 1 {
        return Err(CliError::validation(
            "please add option --fnr with the Adabas file number",
        ));
    }
    Ok(args.fnr)
}

/// Non-empty `--param` value.
pub(crate) fn require_param<'a>(args: &'a CommandArgs, usage: &str) -> CliResult<&'a str> {
    let param = args.param.trim();
    if param.is_empty() {
        return Err(CliError::validation(format!("--param is required: {usage}")));
    }
    Ok(param)
}

/// Split a `left:right` parameter into its two non-empty halves.
pub(crate) fn split_pair<'a>(param: &'a str, usage: &str) -> CliResult<(&'a str, &'a str)> {
    match param.split(':').collect::<Vec<_>>().as_slice() {
        [left, right] if !left.is_empty() && !right.is_empty() => Ok((*left, *right)),
        _ => Err(CliError::validation(format!(
            "invalid parameter '{param}', expected {usage}"
        ))),
    }
}

/// Parse a numeric `--param`.
pub(crate) fn parse_number<T: std::str::FromStr>(param: &str, what: &str) -> CliResult<T> {
    param
        .trim()
        .parse::<T>()
        .map_err(|_| CliError::validation(format!("{what} '{param}' is not numeric")))
}

/// The single `--input` a command operates on.
pub(crate) fn single_input<'a>(args: &'a CommandArgs, usage: &str) -> CliResult<&'a str> {
    match args.inputs.as_slice() {
        [input] if !input.trim().is_empty() => Ok(input.trim()),
        [] => Err(CliError::validation(format!("--input is required: {usage}"))),
        _ => Err(CliError::validation(format!(
            "exactly one --input is accepted: {usage}"
        ))),
    }
}

/// Read a local text file.
pub(crate) fn read_text(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|err| {
        CliError::failure(anyhow!("failed to read '{}': {err}", path.display()))
    })
}

/// Read and decode a local JSON file.
pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        CliError::validation(format!("'{}' is not valid JSON: {err}", path.display()))
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use anyhow::Result;
    use httpmock::MockServer;
    use reqwest::Client;

    use crate::cli::CommandArgs;
    use crate::client::{AppContext, Credentials};

    /// Basic auth header for the `admin`/`secret` test account.
    pub(crate) const AUTHORIZATION: &str = "Basic YWRtaW46c2VjcmV0";

    pub(crate) fn context_for(server: &MockServer) -> Result<AppContext> {
        Ok(AppContext {
            client: Client::new(),
            base_url: server.base_url().parse()?,
            credentials: Credentials {
                user: "admin".to_string(),
                password: "secret".to_string(),
            },
        })
    }

    pub(crate) fn database(dbid: u32) -> CommandArgs {
        CommandArgs {
            dbid,
            ..CommandArgs::default()
        }
    }

    pub(crate) fn with_param(dbid: u32, param: &str) -> CommandArgs {
        CommandArgs {
            param: param.to_string(),
            ..database(dbid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::Value;

    fn args() -> CommandArgs {
        CommandArgs::default()
    }

    #[test]
    fn dbid_and_fnr_must_be_positive() {
        assert!(matches!(require_dbid(&args()), Err(CliError::Validation(_))));
        assert!(matches!(require_fnr(&args()), Err(CliError::Validation(_))));

        let selected = CommandArgs {
            dbid: 12,
            fnr: 3,
            ..args()
        };
        assert!(matches!(require_dbid(&selected), Ok(12)));
        assert!(matches!(require_fnr(&selected), Ok(3)));
    }

    #[test]
    fn pairs_need_exactly_two_parts() {
        assert!(matches!(
            split_pair("backup:17", "<job>:<id>"),
            Ok(("backup", "17"))
        ));
        assert!(split_pair("backup", "<job>:<id>").is_err());
        assert!(split_pair("a:b:c", "<job>:<id>").is_err());
        assert!(split_pair(":17", "<job>:<id>").is_err());
    }

    #[test]
    fn numbers_are_validated() {
        assert!(matches!(parse_number::<u32>(" 42 ", "UCB id"), Ok(42)));
        let err = parse_number::<u32>("x", "UCB id").err().map(|err| err.display_message());
        assert_eq!(err.as_deref(), Some("UCB id 'x' is not numeric"));
    }

    #[test]
    fn single_input_rejects_missing_and_extra_files() {
        assert!(single_input(&args(), "job definition").is_err());
        let two = CommandArgs {
            inputs: vec!["a.json".to_string(), "b.json".to_string()],
            ..args()
        };
        assert!(single_input(&two, "job definition").is_err());
        let one = CommandArgs {
            inputs: vec!["job.json".to_string()],
            ..args()
        };
        assert!(matches!(single_input(&one, "job definition"), Ok("job.json")));
    }

    #[test]
    fn json_files_are_decoded() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("job.json");
        fs::write(&path, r#"{"Job":{"Name":"backup"}}"#)?;
        let value: Value = read_json_file(&path).map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(value["Job"]["Name"], "backup");

        fs::write(&path, "not json")?;
        assert!(matches!(
            read_json_file::<Value>(&path),
            Err(CliError::Validation(_))
        ));
        Ok(())
    }
}
