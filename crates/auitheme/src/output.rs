use std::io::IsTerminal;

use auitheme_section::ReadStats;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Read anomalies in a serializable form.
#[derive(Serialize)]
pub struct StatsOutput {
    pub short_reads: u32,
    pub clamped_sections: u32,
    pub unknown_discriminants: u32,
    pub lossy_text: u32,
    pub clean: bool,
}

impl From<ReadStats> for StatsOutput {
    fn from(stats: ReadStats) -> Self {
        Self {
            short_reads: stats.short_reads,
            clamped_sections: stats.clamped_sections,
            unknown_discriminants: stats.unknown_discriminants,
            lossy_text: stats.lossy_text,
            clean: stats.is_clean(),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn stats_summary(stats: &ReadStats) -> String {
    if stats.is_clean() {
        return "clean".to_string();
    }
    format!(
        "short_reads={} clamped_sections={} unknown_discriminants={} lossy_text={}",
        stats.short_reads, stats.clamped_sections, stats.unknown_discriminants, stats.lossy_text
    )
}

pub fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "[unnamed]"
    } else {
        name
    }
}
