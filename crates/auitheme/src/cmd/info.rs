use serde::Serialize;

use auitheme_project::{ProjectFile, TemplateKind};
use auitheme_section::LoadConfig;

use crate::cmd::InfoArgs;
use crate::exit::{project_error, CliResult, SUCCESS};
use crate::output::{new_table, stats_summary, OutputFormat, StatsOutput};

#[derive(Serialize)]
struct KindCount {
    kind: TemplateKind,
    count: usize,
}

#[derive(Serialize)]
struct InfoOutput {
    name: String,
    path: String,
    asset_directory: String,
    asset_root: String,
    records: usize,
    collections: Vec<KindCount>,
    stats: StatsOutput,
}

pub fn run(args: InfoArgs, format: OutputFormat, load: &LoadConfig) -> CliResult<i32> {
    let (file, stats) = ProjectFile::load_with_stats(&args.path, load)
        .map_err(|err| project_error("load failed", err))?;
    let project = file.project();

    let collections: Vec<KindCount> = TemplateKind::ALL
        .iter()
        .map(|&kind| KindCount {
            kind,
            count: project.len(kind),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let out = InfoOutput {
                name: file.name().to_string(),
                path: file.path().display().to_string(),
                asset_directory: project.asset_directory.clone(),
                asset_root: file.asset_root().display().to_string(),
                records: project.record_count(),
                collections,
                stats: stats.into(),
            };
            crate::output::print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["Collection", "Records"]);
            for entry in &collections {
                table.add_row(vec![entry.kind.name().to_string(), entry.count.to_string()]);
            }
            println!("{} ({})", file.name(), file.path().display());
            println!("Assets: {}", file.asset_root().display());
            println!("{table}");
            println!("Read: {}", stats_summary(&stats));
        }
        OutputFormat::Pretty => {
            println!("Project: {}", file.name());
            println!("  Path: {}", file.path().display());
            println!("  Asset directory: {}", file.asset_root().display());
            println!("  Records: {}", project.record_count());
            for entry in collections.iter().filter(|e| e.count > 0) {
                println!("    {}: {}", entry.kind, entry.count);
            }
            println!("  Read: {}", stats_summary(&stats));
        }
    }

    Ok(SUCCESS)
}
