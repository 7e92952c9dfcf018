use serde::Serialize;

use auitheme_project::{
    decode_with_config, describe_layout_with_config, read_project_bytes, DanglingReference,
};
use auitheme_section::LoadConfig;

use crate::cmd::CheckArgs;
use crate::exit::{project_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{new_table, stats_summary, OutputFormat, StatsOutput};

#[derive(Serialize)]
struct CheckOutput {
    ok: bool,
    well_formed: bool,
    trailing_bytes: usize,
    stats: StatsOutput,
    dangling: Vec<DanglingReference>,
}

pub fn run(args: CheckArgs, format: OutputFormat, load: &LoadConfig) -> CliResult<i32> {
    let bytes =
        read_project_bytes(&args.path, load).map_err(|err| project_error("load failed", err))?;
    let layout = describe_layout_with_config(&bytes, load);
    let (project, stats) = decode_with_config(&bytes, load);
    let dangling = project.validate();

    let ok = layout.is_well_formed() && stats.is_clean() && dangling.is_empty();
    if !ok {
        tracing::warn!(
            path = %args.path.display(),
            well_formed = layout.is_well_formed(),
            dangling = dangling.len(),
            "project check failed"
        );
    }

    match format {
        OutputFormat::Json => {
            let out = CheckOutput {
                ok,
                well_formed: layout.is_well_formed(),
                trailing_bytes: layout.trailing_bytes,
                stats: stats.into(),
                dangling,
            };
            crate::output::print_json(&out);
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Framing: {}", if layout.is_well_formed() { "ok" } else { "damaged" });
            if layout.trailing_bytes > 0 {
                println!("Trailing bytes: {}", layout.trailing_bytes);
            }
            println!("Read: {}", stats_summary(&stats));
            if dangling.is_empty() {
                println!("References: ok");
            } else {
                let mut table = new_table(vec!["Kind", "Index", "Field", "Target", "Value"]);
                for reference in &dangling {
                    table.add_row(vec![
                        reference.kind.name().to_string(),
                        reference.index.to_string(),
                        reference.field.clone(),
                        reference.target.to_string(),
                        reference.value.to_string(),
                    ]);
                }
                println!("Dangling references: {}", dangling.len());
                println!("{table}");
            }
        }
    }

    Ok(if ok { SUCCESS } else { DATA_INVALID })
}
