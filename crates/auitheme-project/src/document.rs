//! The project file format.
//!
//! ```text
//! ┌─────────────────────┐
//! │ header section      │  asset directory (text)
//! ├─────────────────────┤
//! │ colors section      │  ┌ element section ┐ ┌ element section ┐ ...
//! │ icons section       │
//! │ ...                 │  one collection per kind, in TemplateKind::ALL order
//! │ toggle buttons      │
//! └─────────────────────┘
//! ```
//!
//! Collections carry no element count: a reader pulls element sections until
//! the collection is exhausted. Record fields are inlined in declaration
//! order inside their element section. Unread trailing fields are skipped
//! and missing ones decode as defaults, so older and newer files load
//! without error. The number of decoded records is capped by
//! [`LoadConfig::max_records`]; element sections past the cap are skipped.

use auitheme_section::{
    Decode, Encode, LoadConfig, ReadStats, SectionReader, SectionWriter, DEFAULT_MAX_RECORDS,
};
use bytes::Bytes;

use crate::error::Result;
use crate::kind::{with_record, Record, TemplateKind};
use crate::project::Project;

impl Encode for Project {
    fn encode(&self, writer: &mut SectionWriter) {
        writer.section(|w| w.write(&self.asset_directory));
        for kind in TemplateKind::ALL {
            with_record!(kind, R => write_collection(writer, R::collection(self)));
        }
    }
}

impl Decode for Project {
    fn decode(reader: &mut SectionReader<'_>) -> Self {
        read_project(reader, &LoadConfig::default())
    }
}

fn read_project(reader: &mut SectionReader<'_>, config: &LoadConfig) -> Project {
    let mut project = Project::new();
    let mut header = reader.read_section();
    project.asset_directory = header.read();
    for kind in TemplateKind::ALL {
        let budget = config.max_records.saturating_sub(project.record_count());
        with_record!(kind, R => {
            *R::collection_mut(&mut project) = read_collection_bounded(reader, budget)
        });
    }
    project
}

/// Write one collection section holding an element section per record.
pub fn write_collection<R: Record>(writer: &mut SectionWriter, records: &[R]) {
    writer.section(|w| {
        for record in records {
            w.section(|w| w.write(record));
        }
    });
    tracing::debug!(kind = %R::KIND, count = records.len(), "wrote collection");
}

/// Read one collection section, decoding each element section as an `R`.
///
/// At most [`DEFAULT_MAX_RECORDS`] records are decoded.
pub fn read_collection<R: Record>(reader: &mut SectionReader<'_>) -> Vec<R> {
    read_collection_bounded(reader, DEFAULT_MAX_RECORDS)
}

/// Read one collection section, decoding at most `max_records` elements.
///
/// Element sections past the limit are skipped and counted as clamped.
pub fn read_collection_bounded<R: Record>(
    reader: &mut SectionReader<'_>,
    max_records: usize,
) -> Vec<R> {
    let mut collection = reader.read_section();
    let records: Vec<R> = collection
        .sections()
        .take(max_records)
        .map(|mut element| element.read())
        .collect();
    if collection.has_remaining() {
        collection.truncate_sequence(records.len());
    }
    tracing::debug!(kind = %R::KIND, count = records.len(), "read collection");
    records
}

/// Encode a project into its file representation.
pub fn to_bytes(project: &Project) -> Result<Bytes> {
    let mut writer = SectionWriter::new();
    writer.write(project);
    let bytes = writer.finish()?;
    tracing::debug!(
        bytes = bytes.len(),
        records = project.record_count(),
        "encoded project"
    );
    Ok(bytes)
}

/// Decode a project from its file representation.
///
/// Never fails: truncated or malformed input yields a project whose missing
/// parts hold default values.
pub fn from_bytes(bytes: &[u8]) -> Project {
    decode_with_stats(bytes).0
}

/// Decode a project and report how much of the input had to be clamped or defaulted.
pub fn decode_with_stats(bytes: &[u8]) -> (Project, ReadStats) {
    decode_with_config(bytes, &LoadConfig::default())
}

/// Like [`decode_with_stats`], with an explicit record limit.
///
/// `config.max_file_size` is not consulted; it applies when reading files.
pub fn decode_with_config(bytes: &[u8], config: &LoadConfig) -> (Project, ReadStats) {
    let mut reader = SectionReader::new(bytes);
    let project = read_project(&mut reader, config);
    let trailing = reader.remaining();
    let stats = reader.stats();
    if trailing > 0 {
        tracing::warn!(trailing, "ignoring bytes after the last collection");
    }
    if !stats.is_clean() {
        tracing::warn!(
            short_reads = stats.short_reads,
            clamped_sections = stats.clamped_sections,
            unknown_discriminants = stats.unknown_discriminants,
            lossy_text = stats.lossy_text,
            "project decoded with defaults"
        );
    }
    tracing::debug!(
        bytes = bytes.len(),
        records = project.record_count(),
        "decoded project"
    );
    (project, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Icon};

    #[test]
    fn empty_project_layout() {
        let bytes = to_bytes(&Project::new()).unwrap();
        // header (prefix + empty text) then eleven empty collections
        assert_eq!(bytes.len(), 8 + 11 * 4);
        assert_eq!(&bytes[..4], &4u32.to_le_bytes());
        assert!(bytes[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn collection_elements_are_sections() {
        let mut project = Project::new();
        project.push(Icon {
            file_name: "a".into(),
        });
        project.push(Icon {
            file_name: "bc".into(),
        });
        let bytes = to_bytes(&project).unwrap();

        let mut reader = SectionReader::new(&bytes);
        reader.read_section(); // header
        reader.read_section(); // colors
        let mut icons = reader.read_section();
        let sizes: Vec<usize> = icons.sections().map(|e| e.remaining()).collect();
        assert_eq!(sizes, vec![4 + 1, 4 + 2]);
    }

    #[test]
    fn round_trip_keeps_colors() {
        let mut project = Project::new();
        project.asset_directory = "../assets/".into();
        project.push(Color::new("red", 1.0, 0.0, 0.0, 1.0));

        let bytes = to_bytes(&project).unwrap();
        let (decoded, stats) = decode_with_stats(&bytes);
        assert_eq!(decoded, project);
        assert!(stats.is_clean());
    }

    #[test]
    fn record_limit_spans_collections() {
        let mut project = Project::new();
        project.push(Color::new("red", 1.0, 0.0, 0.0, 1.0));
        project.push(Color::new("blue", 0.0, 0.0, 1.0, 1.0));
        project.push(Icon {
            file_name: "a".into(),
        });
        let bytes = to_bytes(&project).unwrap();

        let config = LoadConfig::default().with_max_records(2);
        let (decoded, stats) = decode_with_config(&bytes, &config);
        assert_eq!(decoded.colors, project.colors);
        assert!(decoded.icons.is_empty());
        assert_eq!(stats.clamped_sections, 1);
    }

    #[test]
    fn garbage_input_does_not_panic() {
        let junk: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let (_, stats) = decode_with_stats(&junk);
        assert!(stats.clamped_sections > 0);
    }
}
