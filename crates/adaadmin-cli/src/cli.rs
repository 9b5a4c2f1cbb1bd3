//! Argument parsing, the run banner and command dispatch.

use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

use adaadmin_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use anyhow::anyhow;
use chrono::Local;
use clap::{Parser, ValueEnum};
use tokio::time::sleep;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliDependencies, CliError, CliResult, Credentials, parse_url};
use crate::commands::{browser, databases, environment, fields, files, jobs, parameters, queues, stats};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER: &str = "admin";
const BANNER_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Parser)]
#[command(
    name = "adaadmin",
    version,
    about = "Adabas administration RESTful client",
    after_help = "Commands run in the order given; the first failure stops the run."
)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "ADABAS_ADMIN_URL",
        value_parser = parse_url,
        help = "Administration server URL (example: localhost:8120, https://localhost:8121)"
    )]
    pub(crate) url: Url,
    #[arg(
        long,
        env = "ADABAS_ADMIN_USER",
        default_value = DEFAULT_USER,
        help = "User name of the main administrator"
    )]
    pub(crate) user: String,
    #[arg(
        long,
        env = "ADABAS_ADMIN_PASSWORD",
        hide_env_values = true,
        help = "Administrator password; prompted for when omitted on a terminal"
    )]
    pub(crate) passwd: Option<String>,
    #[arg(long, default_value_t = 0, help = "Adabas database id")]
    pub(crate) dbid: u32,
    #[arg(long, default_value_t = 0, help = "Adabas file number")]
    pub(crate) fnr: u32,
    #[arg(
        long,
        default_value = "",
        allow_hyphen_values = true,
        help = "Command specific parameter"
    )]
    pub(crate) param: String,
    #[arg(
        long = "input",
        help = "Input file; repeatable (createfile expects fdu:<file> and fdt:<file>)"
    )]
    pub(crate) inputs: Vec<String>,
    #[arg(
        long,
        default_value_t = 0,
        help = "Repeat the command list after the given number of seconds"
    )]
    pub(crate) repeat: u64,
    #[arg(
        long = "ignore-tls",
        alias = "ignoreTLS",
        help = "Skip TLS certificate validation"
    )]
    pub(crate) ignore_tls: bool,
    #[arg(
        long,
        env = "ADABAS_ADMIN_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, env = "ADABAS_ADMIN_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(long, default_value = "pretty")]
    pub(crate) log_format: LogFormat,
    #[arg(value_enum, help = "Commands to run; shows the server version when omitted")]
    pub(crate) commands: Vec<AdminCommand>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Administration commands accepted as positional arguments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub(crate) enum AdminCommand {
    /// Show the server version and its handlers
    Version,
    /// List Adabas environment version
    Env,
    /// List all Adabas databases
    List,
    /// Start Adabas database
    Start,
    /// Shutdown Adabas database
    Shutdown,
    /// Cancel Adabas database
    Cancel,
    /// Abort Adabas database
    Abort,
    /// Retrieve Adabas database information
    Info,
    /// Adabas database online state
    Status,
    /// Display current user queue
    UserQueue,
    /// Display the user queue entry given by --param
    UserDetails,
    /// Stop the user queue entry given by --param
    StopUser,
    /// Display current command queue
    CmdQueue,
    /// Display current hold queue
    HoldQueue,
    /// Display high water mark
    HighWater,
    /// Display Adabas command statistics
    CommandStats,
    /// Display Adabas buffer pool statistics
    Bp,
    /// Display Adabas activity
    Activity,
    /// Display Adabas thread table
    ThreadTable,
    /// Create new Adabas database
    CreateDatabase,
    /// Delete a Adabas database
    DeleteDatabase,
    /// Rename a Adabas database
    RenameDatabase,
    /// List database parameter information
    Parameter,
    /// List database parameter information with minimum and maximum ranges
    ParameterInfo,
    /// Set database parameter
    SetParameter,
    /// Display Adabas nucleus log
    NucleusLog,
    /// Display Adabas file list
    Files,
    /// Display Adabas file, or change its settings with --param
    File,
    /// Delete Adabas file
    DeleteFile,
    /// Renumber Adabas file
    RenumberFile,
    /// Refresh Adabas file
    RefreshFile,
    /// Display Adabas file definition table
    Fields,
    /// Display Adabas database information
    Information,
    /// Display Adabas database container
    Container,
    /// Rename Database file
    RenameFile,
    /// Create Database file
    CreateFile,
    /// Display checkpoints of one day, or of --param FROM,TO (e.g. 2018-05-15_01:00:00,2018-05-20_00:00:00)
    Checkpoints,
    /// Delete checkpoints in the --param FROM,TO range
    DeleteCheckpoints,
    /// Job control list
    JobList,
    /// Start a specific job
    JobStart,
    /// Delete a specific job and the execution log
    DeleteJob,
    /// Delete the execution log of a job
    DeleteJobExec,
    /// Create a new specific job
    CreateJob,
    /// Job entry log
    JobLog,
    /// List Adabas UCB entries
    ListUcb,
    /// Delete Adabas UCB entry
    DeleteUcb,
    /// Add Adabas fields
    AddFields,
    /// List all available file locations
    FileLocations,
    /// List file in file location
    ListFiles,
    /// Download file out of file location
    DownloadFile,
    /// Upload file to file location
    UploadFile,
}

impl AdminCommand {
    /// Command word as typed on the command line.
    pub(crate) fn label(self) -> String {
        self.to_possible_value()
            .map_or_else(|| format!("{self:?}"), |value| value.get_name().to_string())
    }

    const fn requires_auth(self) -> bool {
        !matches!(self, Self::Version)
    }
}

/// Selection flags shared by all command handlers.
#[derive(Debug, Clone, Default)]
pub(crate) struct CommandArgs {
    pub(crate) dbid: u32,
    pub(crate) fnr: u32,
    pub(crate) param: String,
    pub(crate) inputs: Vec<String>,
}

/// Parses CLI arguments, runs the requested commands and prints the run
/// banner. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
    }) {
        eprintln!("warning: {err:#}");
    }

    let trace_id = Uuid::new_v4().to_string();
    let deps = match CliDependencies::from_env(&cli, &trace_id) {
        Ok(deps) => deps,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };

    let banner = cli.output == OutputFormat::Table;
    if banner {
        print_start(&cli.url, &cli.user);
    }
    let started = Instant::now();

    let result = dispatch(cli, &deps).await;

    let exit_code = match &result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    };

    if banner {
        print_end(started.elapsed(), result.is_err());
    }
    exit_code
}

async fn dispatch(cli: Cli, deps: &CliDependencies) -> CliResult<()> {
    let Cli {
        url,
        user,
        passwd,
        dbid,
        fnr,
        param,
        inputs,
        repeat,
        output,
        commands,
        ..
    } = cli;

    let commands = if commands.is_empty() {
        vec![AdminCommand::Version]
    } else {
        commands
    };

    let password = if commands.iter().any(|command| command.requires_auth()) {
        resolve_password(passwd.as_deref())?
    } else {
        String::new()
    };

    let ctx = AppContext {
        client: deps.client.clone(),
        base_url: url,
        credentials: Credentials { user, password },
    };
    let args = CommandArgs {
        dbid,
        fnr,
        param,
        inputs,
    };

    loop {
        for command in &commands {
            debug!(command = %command.label(), "running command");
            execute(&ctx, *command, &args, output).await?;
        }
        if repeat == 0 {
            return Ok(());
        }
        info!(seconds = repeat, "repeating command list");
        sleep(Duration::from_secs(repeat)).await;
    }
}

pub(crate) async fn execute(
    ctx: &AppContext,
    command: AdminCommand,
    args: &CommandArgs,
    output: OutputFormat,
) -> CliResult<()> {
    match command {
        AdminCommand::Version => environment::handle_version(ctx, output).await,
        AdminCommand::Env => environment::handle_environment(ctx, output).await,
        AdminCommand::List => databases::handle_list(ctx, output).await,
        AdminCommand::Start => databases::handle_operation(ctx, args, "start", output).await,
        AdminCommand::Shutdown => databases::handle_operation(ctx, args, "shutdown", output).await,
        AdminCommand::Cancel => databases::handle_operation(ctx, args, "cancel", output).await,
        AdminCommand::Abort => databases::handle_operation(ctx, args, "abort", output).await,
        AdminCommand::Info => databases::handle_operation(ctx, args, "", output).await,
        AdminCommand::Status => databases::handle_status(ctx, args, output).await,
        AdminCommand::CreateDatabase => databases::handle_create(ctx, args, output).await,
        AdminCommand::DeleteDatabase => databases::handle_delete(ctx, args, output).await,
        AdminCommand::RenameDatabase => databases::handle_rename(ctx, args, output).await,
        AdminCommand::NucleusLog => databases::handle_nucleus_log(ctx, args, output).await,
        AdminCommand::Information => databases::handle_information(ctx, args, output).await,
        AdminCommand::Activity => databases::handle_activity(ctx, args, output).await,
        AdminCommand::ThreadTable => databases::handle_thread_table(ctx, args, output).await,
        AdminCommand::Container => databases::handle_container(ctx, args, output).await,
        AdminCommand::Checkpoints => databases::handle_checkpoints(ctx, args, output).await,
        AdminCommand::DeleteCheckpoints => {
            databases::handle_delete_checkpoints(ctx, args, output).await
        }
        AdminCommand::ListUcb => databases::handle_list_ucb(ctx, args, output).await,
        AdminCommand::DeleteUcb => databases::handle_delete_ucb(ctx, args, output).await,
        AdminCommand::Parameter => parameters::handle_parameter(ctx, args, output).await,
        AdminCommand::ParameterInfo => parameters::handle_parameter_info(ctx, args, output).await,
        AdminCommand::SetParameter => parameters::handle_set_parameter(ctx, args, output).await,
        AdminCommand::UserQueue => queues::handle_user_queue(ctx, args, output).await,
        AdminCommand::UserDetails => queues::handle_user_details(ctx, args, output).await,
        AdminCommand::StopUser => queues::handle_stop_user(ctx, args, output).await,
        AdminCommand::CmdQueue => queues::handle_command_queue(ctx, args, output).await,
        AdminCommand::HoldQueue => queues::handle_hold_queue(ctx, args, output).await,
        AdminCommand::HighWater => stats::handle_high_water(ctx, args, output).await,
        AdminCommand::CommandStats => stats::handle_command_stats(ctx, args, output).await,
        AdminCommand::Bp => stats::handle_buffer_pool(ctx, args, output).await,
        AdminCommand::Files => files::handle_files(ctx, args, output).await,
        AdminCommand::File => files::handle_file(ctx, args, output).await,
        AdminCommand::DeleteFile => files::handle_delete_file(ctx, args, output).await,
        AdminCommand::RenumberFile => files::handle_renumber_file(ctx, args, output).await,
        AdminCommand::RenameFile => files::handle_rename_file(ctx, args, output).await,
        AdminCommand::RefreshFile => files::handle_refresh_file(ctx, args, output).await,
        AdminCommand::CreateFile => files::handle_create_file(ctx, args, output).await,
        AdminCommand::Fields => fields::handle_fields(ctx, args, output).await,
        AdminCommand::AddFields => fields::handle_add_fields(ctx, args, output).await,
        AdminCommand::JobList => jobs::handle_job_list(ctx, output).await,
        AdminCommand::JobStart => jobs::handle_job_start(ctx, args, output).await,
        AdminCommand::DeleteJob => jobs::handle_delete_job(ctx, args, output).await,
        AdminCommand::DeleteJobExec => jobs::handle_delete_execution(ctx, args, output).await,
        AdminCommand::CreateJob => jobs::handle_create_job(ctx, args, output).await,
        AdminCommand::JobLog => jobs::handle_job_log(ctx, args, output).await,
        AdminCommand::FileLocations => browser::handle_locations(ctx, output).await,
        AdminCommand::ListFiles => browser::handle_list_files(ctx, args, output).await,
        AdminCommand::DownloadFile => browser::handle_download(ctx, args, output).await,
        AdminCommand::UploadFile => browser::handle_upload(ctx, args, output).await,
    }
}

fn resolve_password(provided: Option<&str>) -> CliResult<String> {
    if let Some(password) = provided.filter(|value| !value.is_empty()) {
        return Ok(password.to_string());
    }

    if io::stdin().is_terminal() {
        let password = rpassword::prompt_password("Enter Password: ").map_err(|err| {
            CliError::failure(anyhow!("failed to read password from stdin: {err}"))
        })?;
        Ok(password.trim().to_string())
    } else {
        Err(CliError::validation(
            "password required; supply via --passwd or ADABAS_ADMIN_PASSWORD when running non-interactively",
        ))
    }
}

fn print_start(url: &Url, user: &str) {
    let now = Local::now().format(BANNER_TIME_FORMAT);
    println!("{now} Adabas Administration RESTful client started");
    println!();
    println!("{now} Server: {url}");
    println!("{now} User:   {user}");
    println!();
}

fn print_end(elapsed: Duration, aborted: bool) {
    let now = Local::now().format(BANNER_TIME_FORMAT);
    println!();
    println!(
        "{now} Adabas Administration RESTful client took {} {}",
        format_elapsed(elapsed),
        if aborted { "aborted" } else { "terminated" }
    );
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{:.3}ms", elapsed.as_secs_f64() * 1000.0)
    } else {
        format!("{:.3}s", elapsed.as_secs_f64())
    }
}
