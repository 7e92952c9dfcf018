use auitheme_project::{
    describe_layout_with_config, read_project_bytes, SectionSpan, StreamLayout,
};
use auitheme_section::LoadConfig;

use crate::cmd::InspectArgs;
use crate::exit::{project_error, CliResult, SUCCESS};
use crate::output::{new_table, stats_summary, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat, load: &LoadConfig) -> CliResult<i32> {
    let bytes =
        read_project_bytes(&args.path, load).map_err(|err| project_error("load failed", err))?;
    let layout = describe_layout_with_config(&bytes, load);

    match format {
        OutputFormat::Json => crate::output::print_json(&layout),
        OutputFormat::Table => print_table(&layout, args.elements),
        OutputFormat::Pretty => print_pretty(&layout, args.elements),
    }

    Ok(SUCCESS)
}

fn declared(span: &SectionSpan) -> String {
    span.declared_len
        .map(|len| len.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(layout: &StreamLayout, elements: bool) {
    let mut table = new_table(vec!["Section", "Offset", "Declared", "Length", "Elements"]);
    for section in &layout.sections {
        table.add_row(vec![
            section.name.to_string(),
            section.span.offset.to_string(),
            declared(&section.span),
            section.span.len.to_string(),
            section.elements.len().to_string(),
        ]);
        if elements {
            for (index, element) in section.elements.iter().enumerate() {
                table.add_row(vec![
                    format!("  [{index}]"),
                    element.offset.to_string(),
                    declared(element),
                    element.len.to_string(),
                    String::new(),
                ]);
            }
        }
    }
    println!("{table}");
    println!(
        "Total: {} bytes, trailing: {}, well-formed: {}",
        layout.total_len,
        layout.trailing_bytes,
        layout.is_well_formed()
    );
    println!("Read: {}", stats_summary(&layout.stats));
}

fn print_pretty(layout: &StreamLayout, elements: bool) {
    println!("Stream: {} bytes", layout.total_len);
    for section in &layout.sections {
        let marker = if section.span.is_intact() { "" } else { " (clamped)" };
        println!(
            "  {:<16} @{:<8} {} bytes, {} elements{}",
            section.name,
            section.span.offset,
            section.span.len,
            section.elements.len(),
            marker
        );
        if elements {
            for (index, element) in section.elements.iter().enumerate() {
                println!("    [{index}] @{} {} bytes", element.offset, element.len);
            }
        }
    }
    if layout.trailing_bytes > 0 {
        println!("  Trailing: {} bytes", layout.trailing_bytes);
    }
    println!("  Well-formed: {}", layout.is_well_formed());
    println!("  Read: {}", stats_summary(&layout.stats));
}
