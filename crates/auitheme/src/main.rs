mod cmd;
mod exit;
mod logging;
mod output;

use auitheme_section::{LoadConfig, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_RECORDS};
use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "auitheme", version, about = "Theme template project tool")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "AUITHEME_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    /// Refuse to load project files larger than this many bytes.
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_FILE_SIZE,
        env = "AUITHEME_MAX_FILE_SIZE",
        global = true
    )]
    max_file_size: usize,

    /// Stop decoding after this many records across all collections.
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_RECORDS,
        env = "AUITHEME_MAX_RECORDS",
        global = true
    )]
    max_records: usize,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let load = LoadConfig::default()
        .with_max_file_size(cli.max_file_size)
        .with_max_records(cli.max_records);
    let result = cmd::run(cli.command, format, &load);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
