//! Server-side file location browsing and transfer.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use adaadmin_api_models::{DirectoryListing, LocationListResponse, StatusResponse};
use anyhow::anyhow;
use futures_util::{Stream, StreamExt};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::{fetch, require_param, single_input, split_pair};
use crate::cli::{CommandArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, read_json, send};
use crate::output::browser::{listing_lines, location_lines};
use crate::output::emit;

const BROWSE_PATH: &str = "/file/browse";
const REFERENCE_USAGE: &str = "--param <location>:<file reference>";
const UPLOAD_PART: &str = "uploadFile";

fn location_reference(args: &CommandArgs) -> CliResult<(&str, &str)> {
    split_pair(require_param(args, REFERENCE_USAGE)?, REFERENCE_USAGE)
}

fn io_failure(action: &str, path: &Path, err: std::io::Error) -> CliError {
    CliError::failure(anyhow!("failed to {action} '{}': {err}", path.display()))
}

pub(crate) async fn handle_locations(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let locations: LocationListResponse = fetch(ctx, BROWSE_PATH, "file locations").await?;
    emit(&locations, output, location_lines)
}

pub(crate) async fn handle_list_files(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let (location, reference) = location_reference(args)?;
    let path = format!("{BROWSE_PATH}/{location}");
    let request = ctx.request(Method::GET, &path)?.query(&[("file", reference)]);
    let listing: DirectoryListing = read_json(send(request, &path).await?, "file listing").await?;
    emit(&listing, output, listing_lines)
}

/// Sibling file a download is written to before it replaces the target.
fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn copy_stream<S, B, E>(partial: &Path, reference: &str, stream: S) -> CliResult<u64>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut file = File::create(partial)
        .await
        .map_err(|err| io_failure("create", partial, err))?;
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk
            .map_err(|err| CliError::failure(anyhow!("download of {reference} failed: {err}")))?;
        let bytes = chunk.as_ref();
        file.write_all(bytes)
            .await
            .map_err(|err| io_failure("write", partial, err))?;
        written += bytes.len() as u64;
    }
    file.flush()
        .await
        .map_err(|err| io_failure("write", partial, err))?;
    Ok(written)
}

/// Write a download stream to `target`; the target is only replaced once the
/// whole body has arrived.
async fn write_download<S, B, E>(target: &Path, reference: &str, stream: S) -> CliResult<u64>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let partial = partial_path(target);
    match copy_stream(&partial, reference, stream).await {
        Ok(written) => {
            fs::rename(&partial, target)
                .await
                .map_err(|err| io_failure("replace", target, err))?;
            Ok(written)
        }
        Err(err) => {
            if let Err(remove) = fs::remove_file(&partial).await {
                warn!(path = %partial.display(), error = %remove, "failed to remove partial download");
            }
            Err(err)
        }
    }
}

/// Stream a server file into the local `--input` path, replacing its content.
pub(crate) async fn handle_download(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let (location, reference) = location_reference(args)?;
    let target = Path::new(single_input(args, "--input <local file>")?);
    let path = format!("/file/{location}/download");
    let request = ctx.request(Method::GET, &path)?.query(&[("file", reference)]);
    let response = send(request, &path).await?;

    let written = write_download(target, reference, response.bytes_stream()).await?;
    info!(location, reference, bytes = written, "download complete");

    let summary = json!({
        "Location": location,
        "File": reference,
        "Target": target.display().to_string(),
        "Bytes": written,
    });
    emit(&summary, output, |_| {
        vec![format!(
            "Downloaded {reference} from {location} into {} ({written} bytes)",
            target.display()
        )]
    })
}

/// Send the local `--input` file as a multipart upload.
pub(crate) async fn handle_upload(
    ctx: &AppContext,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let (location, reference) = location_reference(args)?;
    let source = Path::new(single_input(args, "--input <local file>")?);
    let content = fs::read(source)
        .await
        .map_err(|err| io_failure("read", source, err))?;
    let file_name = source
        .file_name()
        .map_or_else(|| reference.to_string(), |name| name.to_string_lossy().into_owned());
    let form = Form::new().part(UPLOAD_PART, Part::bytes(content).file_name(file_name));

    let path = format!("/file/{location}/upload");
    info!(location, reference, "uploading file");
    let request = ctx
        .request(Method::PUT, &path)?
        .query(&[("file", reference)])
        .multipart(form);
    let status: StatusResponse = read_json(send(request, &path).await?, "upload status").await?;
    emit(&status, output, |status| {
        vec![format!("Upload  {}", status.status.message)]
    })
}
