use serde::Serialize;

use auitheme_section::{DEFAULT_MAX_FILE_SIZE, LENGTH_PREFIX_SIZE};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    target: &'static str,
    rustc: &'static str,
    git_hash: &'static str,
    project_extension: &'static str,
    length_prefix_bytes: usize,
    default_max_file_size: usize,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            name: "auitheme",
            version: env!("CARGO_PKG_VERSION"),
            target: option_env!("AUITHEME_BUILD_TARGET").unwrap_or("unknown"),
            rustc: option_env!("RUSTC_VERSION").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            project_extension: auitheme_project::PROJECT_EXTENSION,
            length_prefix_bytes: LENGTH_PREFIX_SIZE,
            default_max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    let info = BuildInfo::current();
    if !args.extended {
        println!("{} {}", info.name, info.version);
        return Ok(SUCCESS);
    }

    match format {
        OutputFormat::Json => crate::output::print_json(&info),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("name: {}", info.name);
            println!("version: {}", info.version);
            println!("target: {}", info.target);
            println!("rustc: {}", info.rustc);
            println!("git_hash: {}", info.git_hash);
            println!("project_extension: .{}", info.project_extension);
            println!("length_prefix: {} bytes, little-endian", info.length_prefix_bytes);
            println!("default_max_file_size: {}", info.default_max_file_size);
        }
    }

    Ok(SUCCESS)
}
