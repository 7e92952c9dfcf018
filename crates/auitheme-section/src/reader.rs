use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use bytes::Buf;

use crate::codec::{Decode, LENGTH_PREFIX_SIZE};

/// Counters for every place a read was clamped or defaulted.
///
/// Shared by a root view and every view derived from it.
/// Counters saturate at `u32::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadStats {
    /// Primitive reads that found fewer bytes than their width.
    pub short_reads: u32,
    /// Sections whose declared length ran past the parent's end.
    pub clamped_sections: u32,
    /// Enumeration discriminants outside the known range.
    pub unknown_discriminants: u32,
    /// Text fields that were not valid UTF-8.
    pub lossy_text: u32,
}

impl ReadStats {
    /// True if nothing was clamped or defaulted.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Total number of recorded anomalies.
    pub fn total(&self) -> u32 {
        self.short_reads
            .saturating_add(self.clamped_sections)
            .saturating_add(self.unknown_discriminants)
            .saturating_add(self.lossy_text)
    }
}

/// A bounded view `[start, end)` over an immutable byte range, with its own cursor.
///
/// All reads are clamped to the view: a read that needs more bytes than
/// remain exhausts the view and yields a default value. A view only moves
/// forward and is never rewound.
pub struct SectionReader<'a> {
    data: &'a [u8],
    start: usize,
    end: usize,
    cursor: usize,
    stats: Rc<Cell<ReadStats>>,
}

impl<'a> SectionReader<'a> {
    /// Create the root view over a whole byte range.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            start: 0,
            end: data.len(),
            cursor: 0,
            stats: Rc::default(),
        }
    }

    /// Decode the next value of type `T`.
    pub fn read<T: Decode>(&mut self) -> T {
        T::decode(self)
    }

    /// Read the next nested section and advance past all of its bytes.
    ///
    /// The returned view covers exactly the section's payload. The parent
    /// skips the whole payload regardless of how much of the child is read,
    /// so trailing fields unknown to the caller are ignored. A declared
    /// length running past this view's end is clamped to what remains.
    pub fn read_section(&mut self) -> SectionReader<'a> {
        let available = self.remaining();
        if available < LENGTH_PREFIX_SIZE {
            self.bump(|s| &mut s.clamped_sections);
            tracing::warn!(
                offset = self.cursor,
                available,
                "section length prefix truncated"
            );
            self.cursor = self.end;
            return self.child(self.end, self.end);
        }

        let mut prefix = &self.data[self.cursor..self.cursor + LENGTH_PREFIX_SIZE];
        let declared = prefix.get_u32_le() as usize;
        let payload_start = self.cursor + LENGTH_PREFIX_SIZE;
        let room = self.end - payload_start;

        let len = if declared > room {
            self.bump(|s| &mut s.clamped_sections);
            tracing::warn!(
                offset = self.cursor,
                declared,
                available = room,
                "section length clamped to parent"
            );
            room
        } else {
            declared
        };

        self.cursor = payload_start + len;
        self.child(payload_start, payload_start + len)
    }

    /// Iterate over the remaining child sections of this view.
    pub fn sections(&mut self) -> Sections<'_, 'a> {
        Sections { parent: self }
    }

    /// True while unread bytes remain in the view.
    pub fn has_remaining(&self) -> bool {
        self.cursor < self.end
    }

    /// True once the cursor has reached the end of the view.
    pub fn is_exhausted(&self) -> bool {
        !self.has_remaining()
    }

    /// Number of unread bytes in the view.
    pub fn remaining(&self) -> usize {
        self.end - self.cursor
    }

    /// Absolute offset of the cursor within the root byte range.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Absolute offset of the first byte of the view.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Absolute offset one past the last byte of the view.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Skip everything left in the view.
    pub fn skip_remaining(&mut self) {
        self.cursor = self.end;
    }

    /// Snapshot of the anomaly counters shared with the root view.
    pub fn stats(&self) -> ReadStats {
        self.stats.get()
    }

    /// Stop reading child sections after `kept` of them: skip the rest of
    /// the view and count it as clamped.
    pub fn truncate_sequence(&mut self, kept: usize) {
        self.bump(|s| &mut s.clamped_sections);
        tracing::warn!(
            offset = self.cursor,
            kept,
            skipped_bytes = self.remaining(),
            "section sequence cut at limit"
        );
        self.cursor = self.end;
    }

    /// Record an enumeration discriminant that has no known variant.
    pub fn note_unknown_discriminant(&self, type_name: &'static str, value: u64) {
        self.bump(|s| &mut s.unknown_discriminants);
        tracing::warn!(
            offset = self.cursor,
            type_name,
            value,
            "unknown discriminant, using default"
        );
    }

    /// Take the next `len` bytes, or exhaust the view if fewer remain.
    pub(crate) fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.remaining() < len {
            self.bump(|s| &mut s.short_reads);
            tracing::warn!(
                offset = self.cursor,
                needed = len,
                available = self.remaining(),
                "short read, using default"
            );
            self.cursor = self.end;
            return None;
        }
        let bytes = &self.data[self.cursor..self.cursor + len];
        self.cursor += len;
        Some(bytes)
    }

    pub(crate) fn note_lossy_text(&self, len: usize) {
        self.bump(|s| &mut s.lossy_text);
        tracing::warn!(offset = self.cursor, len, "text is not valid UTF-8");
    }

    fn child(&self, start: usize, end: usize) -> SectionReader<'a> {
        SectionReader {
            data: self.data,
            start,
            end,
            cursor: start,
            stats: Rc::clone(&self.stats),
        }
    }

    fn bump(&self, counter: impl FnOnce(&mut ReadStats) -> &mut u32) {
        let mut stats = self.stats.get();
        let value = counter(&mut stats);
        *value = value.saturating_add(1);
        self.stats.set(stats);
    }
}

impl fmt::Debug for SectionReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionReader")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// Iterator over the child sections of a view, in stream order.
///
/// Ends exactly when the parent view is exhausted.
pub struct Sections<'r, 'a> {
    parent: &'r mut SectionReader<'a>,
}

impl<'a> Iterator for Sections<'_, 'a> {
    type Item = SectionReader<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.parent.has_remaining() {
            Some(self.parent.read_section())
        } else {
            None
        }
    }
}

impl std::iter::FusedIterator for Sections<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::SectionWriter;

    fn sample() -> Vec<u8> {
        let mut writer = SectionWriter::new();
        writer.section(|w| w.write("header"));
        writer.section(|w| {
            for value in [10i32, 20, 30] {
                w.section(|w| {
                    w.write(&value);
                    w.write(&(value > 15));
                });
            }
        });
        writer.finish().unwrap().to_vec()
    }

    #[test]
    fn read_sections_in_order() {
        let wire = sample();
        let mut root = SectionReader::new(&wire);

        let mut header = root.read_section();
        assert_eq!(header.read::<String>(), "header");
        assert!(header.is_exhausted());

        let mut list = root.read_section();
        let values: Vec<(i32, bool)> = list
            .sections()
            .map(|mut element| (element.read(), element.read()))
            .collect();
        assert_eq!(values, vec![(10, false), (20, true), (30, true)]);

        assert!(root.is_exhausted());
        assert!(root.stats().is_clean());
    }

    #[test]
    fn child_view_is_bounded_by_declared_length() {
        let wire = sample();
        let mut root = SectionReader::new(&wire);

        let header = root.read_section();
        assert_eq!(header.start(), 4);
        assert_eq!(header.end(), 4 + 4 + "header".len());
        assert_eq!(root.position(), header.end());
    }

    #[test]
    fn unread_fields_are_skipped() {
        let wire = sample();
        let mut root = SectionReader::new(&wire);
        root.read_section();

        let mut list = root.read_section();
        let mut firsts = Vec::new();
        while list.has_remaining() {
            let mut element = list.read_section();
            firsts.push(element.read::<i32>());
        }
        assert_eq!(firsts, vec![10, 20, 30]);
    }

    #[test]
    fn declared_length_past_end_is_clamped() {
        let mut wire = 100u32.to_le_bytes().to_vec();
        wire.extend_from_slice(&[1, 2, 3]);

        let mut root = SectionReader::new(&wire);
        let mut child = root.read_section();
        assert_eq!(child.remaining(), 3);
        assert!(root.is_exhausted());
        assert_eq!(child.read::<u32>(), 0);
        assert!(child.is_exhausted());

        let stats = root.stats();
        assert_eq!(stats.clamped_sections, 1);
        assert_eq!(stats.short_reads, 1);
    }

    #[test]
    fn short_length_prefix_yields_empty_view() {
        let wire = [5, 0];
        let mut root = SectionReader::new(&wire);

        let child = root.read_section();
        assert!(child.is_exhausted());
        assert_eq!(child.start(), 2);
        assert!(root.is_exhausted());
    }

    #[test]
    fn exhausted_view_keeps_returning_defaults() {
        let mut root = SectionReader::new(&[]);
        assert!(root.is_exhausted());
        assert_eq!(root.read::<String>(), "");
        assert_eq!(root.read::<i64>(), 0);
        assert!(root.read_section().is_exhausted());
        assert_eq!(root.sections().count(), 0);
        assert_eq!(root.position(), 0);
    }

    #[test]
    fn nested_view_never_exceeds_parent() {
        // outer declares 6 bytes, inner declares 50
        let mut wire = 6u32.to_le_bytes().to_vec();
        wire.extend_from_slice(&50u32.to_le_bytes());
        wire.extend_from_slice(&[9, 9]);
        wire.extend_from_slice(&[7, 7, 7, 7]);

        let mut root = SectionReader::new(&wire);
        let mut outer = root.read_section();
        let inner = outer.read_section();
        assert_eq!(inner.end(), outer.end());
        assert_eq!(inner.remaining(), 2);
        assert_eq!(root.read::<u32>(), u32::from_le_bytes([7, 7, 7, 7]));
    }

    #[test]
    fn counters_saturate() {
        let root = SectionReader::new(&[]);
        root.stats.set(ReadStats {
            short_reads: u32::MAX,
            clamped_sections: u32::MAX,
            ..ReadStats::default()
        });
        root.bump(|s| &mut s.short_reads);

        let stats = root.stats();
        assert_eq!(stats.short_reads, u32::MAX);
        assert_eq!(stats.total(), u32::MAX);
    }

    #[test]
    fn truncate_sequence_skips_rest() {
        let wire = sample();
        let mut root = SectionReader::new(&wire);
        root.read_section();

        let mut list = root.read_section();
        let kept: Vec<SectionReader<'_>> = list.sections().take(1).collect();
        assert_eq!(kept.len(), 1);
        assert!(list.has_remaining());

        list.truncate_sequence(kept.len());
        assert!(list.is_exhausted());
        assert!(root.is_exhausted());
        assert_eq!(root.stats().clamped_sections, 1);
    }

    #[test]
    fn skip_remaining_exhausts() {
        let wire = sample();
        let mut root = SectionReader::new(&wire);
        root.skip_remaining();
        assert!(root.is_exhausted());
        assert_eq!(root.remaining(), 0);
    }
}
