use serde::Serialize;

use auitheme_project::ProjectFile;

use crate::cmd::NewArgs;
use crate::exit::{io_error, project_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct NewOutput<'a> {
    path: String,
    name: &'a str,
    asset_directory: &'a str,
}

pub fn run(args: NewArgs, format: OutputFormat) -> CliResult<i32> {
    let path = std::path::absolute(&args.path)
        .map_err(|err| io_error("failed to resolve project path", &err))?;
    let mut file = ProjectFile::create(path);

    if file.path().exists() && !args.force {
        return Err(CliError::new(
            FAILURE,
            format!(
                "{} already exists (use --force to overwrite)",
                file.path().display()
            ),
        ));
    }

    if let Some(assets) = &args.assets {
        let assets = std::path::absolute(assets)
            .map_err(|err| io_error("failed to resolve asset directory", &err))?;
        file.set_asset_directory(&assets);
    }

    file.save().map_err(|err| project_error("save failed", err))?;
    tracing::info!(path = %file.path().display(), "created project");

    let out = NewOutput {
        path: file.path().display().to_string(),
        name: file.name(),
        asset_directory: &file.project().asset_directory,
    };
    match format {
        OutputFormat::Json => crate::output::print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Created {} ({})", out.name, out.path);
            println!(
                "  Asset directory: {}",
                if out.asset_directory.is_empty() {
                    "[project directory]"
                } else {
                    out.asset_directory
                }
            );
        }
    }
    Ok(SUCCESS)
}
