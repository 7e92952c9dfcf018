//! Structural view of a project file, without decoding record fields.

use auitheme_section::{LoadConfig, ReadStats, SectionReader, LENGTH_PREFIX_SIZE};

use crate::kind::TemplateKind;

/// Where one section sits in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SectionSpan {
    /// Offset of the length prefix.
    pub offset: usize,
    /// Length stored in the prefix, if the prefix was complete.
    pub declared_len: Option<u32>,
    /// Payload length after clamping to the enclosing section.
    pub len: usize,
}

impl SectionSpan {
    /// True if the declared length fit inside the enclosing section.
    pub fn is_intact(&self) -> bool {
        self.declared_len.map(|d| d as usize) == Some(self.len)
    }
}

/// A top-level section: the header or one record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TopLevelSection {
    /// `"header"` or the collection's kind name.
    pub name: &'static str,
    pub span: SectionSpan,
    /// Element sections of a collection; empty for the header.
    pub elements: Vec<SectionSpan>,
}

/// The section structure of a whole project file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreamLayout {
    pub total_len: usize,
    pub sections: Vec<TopLevelSection>,
    /// Bytes after the last collection.
    pub trailing_bytes: usize,
    pub stats: ReadStats,
}

impl StreamLayout {
    /// True if every section is intact, nothing trails the last collection,
    /// the spans account for every byte, and nothing was clamped.
    pub fn is_well_formed(&self) -> bool {
        let spans_intact = self
            .sections
            .iter()
            .all(|s| s.span.is_intact() && s.elements.iter().all(SectionSpan::is_intact));
        let covered: usize = self
            .sections
            .iter()
            .map(|s| LENGTH_PREFIX_SIZE + s.span.len)
            .sum();
        spans_intact
            && self.trailing_bytes == 0
            && covered == self.total_len
            && self.stats.clamped_sections == 0
    }
}

/// Describe the header and collection sections of a project file.
pub fn describe_layout(bytes: &[u8]) -> StreamLayout {
    describe_layout_with_config(bytes, &LoadConfig::default())
}

/// Like [`describe_layout`], listing at most `config.max_records` element
/// sections in total. Elements past the limit are skipped and counted as
/// clamped, which makes the layout not well-formed.
pub fn describe_layout_with_config(bytes: &[u8], config: &LoadConfig) -> StreamLayout {
    let mut root = SectionReader::new(bytes);
    let mut listed = 0usize;
    let mut sections = Vec::with_capacity(TemplateKind::ALL.len() + 1);

    let (span, _) = next_span(bytes, &mut root);
    sections.push(TopLevelSection {
        name: "header",
        span,
        elements: Vec::new(),
    });

    for kind in TemplateKind::ALL {
        let (span, mut collection) = next_span(bytes, &mut root);
        let mut elements = Vec::new();
        while collection.has_remaining() {
            if listed == config.max_records {
                collection.truncate_sequence(elements.len());
                break;
            }
            let (element, _) = next_span(bytes, &mut collection);
            elements.push(element);
            listed += 1;
        }
        sections.push(TopLevelSection {
            name: kind.name(),
            span,
            elements,
        });
    }

    StreamLayout {
        total_len: bytes.len(),
        sections,
        trailing_bytes: root.remaining(),
        stats: root.stats(),
    }
}

fn next_span<'a>(bytes: &[u8], parent: &mut SectionReader<'a>) -> (SectionSpan, SectionReader<'a>) {
    let offset = parent.position();
    let declared_len = (parent.remaining() >= LENGTH_PREFIX_SIZE).then(|| {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        prefix.copy_from_slice(&bytes[offset..offset + LENGTH_PREFIX_SIZE]);
        u32::from_le_bytes(prefix)
    });
    let child = parent.read_section();
    let span = SectionSpan {
        offset,
        declared_len,
        len: child.remaining(),
    };
    (span, child)
}
