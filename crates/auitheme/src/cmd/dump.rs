use auitheme_project::ProjectFile;
use auitheme_section::LoadConfig;

use crate::cmd::DumpArgs;
use crate::exit::{project_error, CliError, CliResult, INTERNAL, SUCCESS};

/// Dump always emits JSON; `--format` does not apply.
pub fn run(args: DumpArgs, load: &LoadConfig) -> CliResult<i32> {
    let file =
        ProjectFile::load(&args.path, load).map_err(|err| project_error("load failed", err))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(file.project())
    } else {
        serde_json::to_string(file.project())
    }
    .map_err(|err| CliError::new(INTERNAL, format!("failed to encode project: {err}")))?;

    println!("{json}");
    Ok(SUCCESS)
}
