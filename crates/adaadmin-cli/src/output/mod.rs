//! Output renderers and formatting helpers for CLI commands.
//!
//! Table renderers build their lines first and print them in one go, which
//! keeps the layouts testable without capturing stdout.

pub(crate) mod browser;
pub(crate) mod database;
pub(crate) mod files;
pub(crate) mod jobs;
pub(crate) mod queues;
pub(crate) mod stats;

use adaadmin_api_models::StatusResponse;
use anyhow::anyhow;
use chrono::DateTime;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const GCB_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Print a payload as pretty JSON or as the table produced by `table`.
pub(crate) fn emit<T: Serialize>(
    payload: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> Vec<String>,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(payload)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            println!("{text}");
        }
        OutputFormat::Table => {
            for line in table(payload) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Render a status document with a leading label.
pub(crate) fn render_status(
    status: &StatusResponse,
    label: &str,
    format: OutputFormat,
) -> CliResult<()> {
    emit(status, format, |status| {
        vec![
            String::new(),
            format!(" {label}: {}", status.status.message),
            String::new(),
        ]
    })
}

/// Group digits in thousands (`1234567` becomes `1,234,567`).
#[must_use]
pub(crate) fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Reformat an RFC 3339 server timestamp; other text is returned unchanged.
#[must_use]
pub(crate) fn format_server_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw.trim()).map_or_else(
        |_| raw.to_string(),
        |time| time.format(GCB_TIME_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_grouped_by_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-98_765), "-98,765");
        assert_eq!(format_count(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn server_times_use_the_long_date_layout() {
        assert_eq!(
            format_server_time("2018-05-15T09:04:05+02:00"),
            "Tue May 15 09:04:05 2018"
        );
        assert_eq!(
            format_server_time("2018-05-03T17:30:00Z"),
            "Thu May  3 17:30:00 2018"
        );
        assert_eq!(format_server_time("yesterday"), "yesterday");
        assert_eq!(format_server_time(""), "");
    }
}
