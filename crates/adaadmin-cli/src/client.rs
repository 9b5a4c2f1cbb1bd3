//! Shared HTTP client, credentials and error types for the CLI.

use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

use adaadmin_api_models::ErrorResponse;
use anyhow::anyhow;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::cli::Cli;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Administrator account sent as HTTP Basic credentials.
#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) user: String,
    pub(crate) password: String,
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Dependencies constructed from environment flags and CLI options.
#[derive(Clone)]
pub(crate) struct CliDependencies {
    pub(crate) client: Client,
}

impl CliDependencies {
    /// Construct the HTTP client shared by every command of a run.
    ///
    /// The cookie store keeps the server's session cookie between requests.
    pub(crate) fn from_env(cli: &Cli, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(Duration::from_secs(cli.timeout))
            .default_headers(default_headers)
            .cookie_store(true)
            .danger_accept_invalid_certs(cli.ignore_tls)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self { client })
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) credentials: Credentials,
}

impl AppContext {
    /// Resolve an absolute API path against the server URL.
    pub(crate) fn endpoint(&self, path: &str) -> CliResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| CliError::failure(anyhow!("invalid base URL: {err}")))
    }

    /// Authenticated request builder for an API path.
    pub(crate) fn request(&self, method: Method, path: &str) -> CliResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!(%method, path, "sending request");
        Ok(self
            .client
            .request(method, url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password)))
    }
}

/// Send a request and turn any non-success status into a [`CliError`].
pub(crate) async fn send(request: RequestBuilder, path: &str) -> CliResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|err| CliError::failure(anyhow!("request to {path} failed: {err}")))?;

    if response.status().is_success() {
        Ok(response)
    } else {
        Err(classify_problem(response).await)
    }
}

/// Decode a JSON response body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> CliResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to parse {what}: {err}")))
}

/// Parse the server URL provided to the CLI.
///
/// A bare `host:port` is treated as plain HTTP.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    let trimmed = input.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let url = candidate
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(format!(
            "invalid URL '{input}': scheme must be http or https"
        ))
    }
}

/// Classify an HTTP response into a CLI error.
pub(crate) async fn classify_problem(response: Response) -> CliError {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();

    let body_text = String::from_utf8_lossy(&bytes).trim().to_string();
    let problem = serde_json::from_slice::<ErrorResponse>(&bytes)
        .ok()
        .filter(|problem| !problem.error.message.is_empty() || !problem.error.code.is_empty());

    let message = match problem {
        Some(problem) if problem.error.code.is_empty() => problem.error.message,
        Some(problem) => format!("{}: {}", problem.error.code, problem.error.message),
        None => body_text,
    };

    if matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::NOT_FOUND
            | StatusCode::CONFLICT
            | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        if message.is_empty() {
            CliError::validation(format!("request rejected with status {status}"))
        } else {
            CliError::validation(message)
        }
    } else if message.is_empty() {
        CliError::failure(anyhow!("request failed with status {status}"))
    } else {
        CliError::failure(anyhow!("{message} (status {status})"))
    }
}
