use clap::{Args, Subcommand};
use std::path::PathBuf;

use auitheme_project::TemplateKind;
use auitheme_section::LoadConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod dump;
pub mod info;
pub mod inspect;
pub mod list;
pub mod new;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty project file.
    New(NewArgs),
    /// Summarize a project: asset directory and record counts.
    Info(InfoArgs),
    /// List the records of a project.
    List(ListArgs),
    /// Print a whole project as JSON.
    Dump(DumpArgs),
    /// Show the section layout of a project file.
    Inspect(InspectArgs),
    /// Check framing and cross-record references.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, load: &LoadConfig) -> CliResult<i32> {
    match command {
        Command::New(args) => new::run(args, format),
        Command::Info(args) => info::run(args, format, load),
        Command::List(args) => list::run(args, format, load),
        Command::Dump(args) => dump::run(args, load),
        Command::Inspect(args) => inspect::run(args, format, load),
        Command::Check(args) => check::run(args, format, load),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project file to create (".tui" is added when there is no extension).
    pub path: PathBuf,
    /// Directory holding the project's SVG assets.
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Project file to read.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project file to read.
    pub path: PathBuf,
    /// Only list records of this kind (e.g. color, icon-button).
    #[arg(long, short = 'k')]
    pub kind: Option<TemplateKind>,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Project file to read.
    pub path: PathBuf,
    /// Indent the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Project file to read.
    pub path: PathBuf,
    /// Also list every element section.
    #[arg(long)]
    pub elements: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project file to read.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
