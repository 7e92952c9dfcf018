use serde::Serialize;

use auitheme_project::{ProjectFile, TemplateKind};
use auitheme_section::LoadConfig;

use crate::cmd::ListArgs;
use crate::exit::{project_error, CliResult, SUCCESS};
use crate::output::{display_name, new_table, OutputFormat};

#[derive(Serialize)]
struct ListEntry<'a> {
    kind: TemplateKind,
    index: usize,
    name: &'a str,
}

pub fn run(args: ListArgs, format: OutputFormat, load: &LoadConfig) -> CliResult<i32> {
    let file =
        ProjectFile::load(&args.path, load).map_err(|err| project_error("load failed", err))?;
    let project = file.project();

    let kinds: Vec<TemplateKind> = match args.kind {
        Some(kind) => vec![kind],
        None => TemplateKind::ALL.to_vec(),
    };
    let entries: Vec<ListEntry<'_>> = kinds
        .into_iter()
        .flat_map(|kind| {
            project
                .iter(kind)
                .enumerate()
                .map(move |(index, record)| ListEntry {
                    kind,
                    index,
                    name: record.name(),
                })
        })
        .collect();

    match format {
        OutputFormat::Json => crate::output::print_json(&entries),
        OutputFormat::Table => {
            let mut table = new_table(vec!["Kind", "Index", "Name"]);
            for entry in &entries {
                table.add_row(vec![
                    entry.kind.name().to_string(),
                    entry.index.to_string(),
                    display_name(entry.name).to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if entries.is_empty() {
                println!("No records.");
            }
            for entry in &entries {
                println!("{}[{}] {}", entry.kind, entry.index, display_name(entry.name));
            }
        }
    }

    Ok(SUCCESS)
}
