//! Argument parsing and command dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Instrument;
use url::Url;
use visor_http::{DEFAULT_TIMEOUT, PostEncoding};
use visor_telemetry::{
    CommandContext, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, command_span, init_logging,
};

use crate::client::{CliResult, build_gateway, parse_url};
use crate::commands::records::{handle_list, handle_note, handle_read};
use crate::commands::shell::handle_shell;

const BUILD_SHA: &str = match option_env!("VISOR_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Parses CLI arguments, executes the requested command, and reports the
/// outcome on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: BUILD_SHA,
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let context = CommandContext::new(command_label(&cli.command));
    let span = command_span(&context);
    match dispatch(cli).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

pub(crate) async fn dispatch(cli: Cli) -> CliResult<()> {
    let gateway = build_gateway(&cli)?;
    match cli.command {
        Command::Ls(args) => handle_list(gateway, args, cli.output).await,
        Command::Note(args) => handle_note(gateway, args, cli.output).await,
        Command::Read(args) => handle_read(gateway, args, cli.output).await,
        Command::Shell => handle_shell(gateway).await,
    }
}

#[derive(Parser)]
#[command(
    name = "visor",
    about = "Browse call records, edit their notes, and read transcripts"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "VISOR_API_URL",
        value_parser = parse_url,
        help = "Spreadsheet endpoint URL"
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "VISOR_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs()
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "VISOR_POST_ENCODING",
        value_parser = parse_post_encoding,
        default_value = "plain",
        help = "Content type of the update body: plain or json"
    )]
    pub(crate) post_encoding: PostEncoding,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render records"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "VISOR_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "VISOR_LOG_FORMAT",
        value_parser = parse_log_format,
        help = "pretty or json; inferred from the build when omitted"
    )]
    pub(crate) log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// List records, newest first.
    Ls(ListArgs),
    /// Replace the summary note of one record.
    Note(NoteArgs),
    /// Print the transcript linked to one record.
    Read(ReadArgs),
    /// Interactive session over the record list.
    Shell,
}

#[derive(Args, Default)]
pub(crate) struct ListArgs {
    #[arg(long, help = "Case-insensitive match on id, contact, or note")]
    pub(crate) search: Option<String>,
}

#[derive(Args)]
pub(crate) struct NoteArgs {
    #[arg(help = "Record identifier")]
    pub(crate) id: String,
    #[arg(help = "New note text; an empty string clears the note")]
    pub(crate) text: String,
}

#[derive(Args)]
pub(crate) struct ReadArgs {
    #[arg(help = "Record identifier")]
    pub(crate) id: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Ls(_) => "ls",
        Command::Note(_) => "note",
        Command::Read(_) => "read",
        Command::Shell => "shell",
    }
}

fn parse_post_encoding(input: &str) -> Result<PostEncoding, String> {
    input.parse()
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse().map_err(|err| format!("{err}"))
}
