use std::ops::{Deref, DerefMut};

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{Encode, LENGTH_PREFIX_SIZE, MAX_SECTION_LEN};
use crate::error::{Result, SectionError};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Append-only byte buffer with a stack of open sections.
///
/// Opening a section reserves a zeroed 4-byte length prefix. Closing it
/// patches the prefix with the number of payload bytes written since, so
/// sections nest freely:
/// ```text
/// ┌────────────┬──────────────────────────────────────────┐
/// │ Length     │ Payload                                  │
/// │ (4B LE)    │ primitives and nested sections           │
/// └────────────┴──────────────────────────────────────────┘
/// ```
///
/// Prefer [`section`](Self::section) or [`open_section`](Self::open_section),
/// which close the section on every exit path.
pub struct SectionWriter {
    buf: BytesMut,
    open: Vec<usize>,
    oversize: Option<usize>,
}

impl Default for SectionWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BUFFER_CAPACITY)
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            open: Vec::new(),
            oversize: None,
        }
    }

    /// Encode `value` at the current position, inside the innermost open section.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) {
        value.encode(self);
    }

    /// Open a new section and reserve its length prefix.
    pub fn start_section(&mut self) {
        let prefix_at = self.buf.len();
        self.buf.put_u32_le(0);
        self.open.push(prefix_at);
    }

    /// Close the innermost open section and patch its length prefix.
    ///
    /// # Panics
    ///
    /// Panics if no section is open. Every `start_section` must be paired
    /// with exactly one `finish_section`.
    pub fn finish_section(&mut self) {
        let Some(prefix_at) = self.open.pop() else {
            panic!("finish_section called with no open section");
        };
        let payload_start = prefix_at + LENGTH_PREFIX_SIZE;
        let payload_len = self.buf.len() - payload_start;
        let declared = match u32::try_from(payload_len) {
            Ok(len) => len,
            Err(_) => {
                self.note_oversize(payload_len);
                0
            }
        };
        self.buf[prefix_at..payload_start].copy_from_slice(&declared.to_le_bytes());
    }

    /// Run `f` inside a new section. The section is closed when `f` returns
    /// or unwinds.
    pub fn section<R>(&mut self, f: impl FnOnce(&mut SectionWriter) -> R) -> R {
        let mut guard = self.open_section();
        f(&mut *guard)
    }

    /// Open a new section that closes when the returned guard is dropped.
    pub fn open_section(&mut self) -> SectionGuard<'_> {
        self.start_section();
        let depth = self.open.len();
        SectionGuard {
            writer: self,
            depth,
        }
    }

    /// Number of currently open sections.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Number of bytes written so far, prefixes included.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the finished stream.
    ///
    /// Fails if any section is still open or if any section or text field
    /// outgrew its 32-bit length prefix.
    pub fn finish(self) -> Result<Bytes> {
        if !self.open.is_empty() {
            return Err(SectionError::Unbalanced {
                open: self.open.len(),
            });
        }
        if let Some(size) = self.oversize {
            return Err(SectionError::TooLarge {
                size,
                max: MAX_SECTION_LEN,
            });
        }
        Ok(self.buf.freeze())
    }

    pub(crate) fn buf_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    pub(crate) fn note_oversize(&mut self, size: usize) {
        tracing::warn!(size, max = MAX_SECTION_LEN, "length exceeds 32-bit prefix");
        self.oversize.get_or_insert(size);
    }
}

/// An open section that is closed when dropped.
///
/// Derefs to the [`SectionWriter`], so fields and nested sections are written
/// through the guard.
pub struct SectionGuard<'w> {
    writer: &'w mut SectionWriter,
    depth: usize,
}

impl Deref for SectionGuard<'_> {
    type Target = SectionWriter;

    fn deref(&self) -> &SectionWriter {
        self.writer
    }
}

impl DerefMut for SectionGuard<'_> {
    fn deref_mut(&mut self) -> &mut SectionWriter {
        self.writer
    }
}

impl Drop for SectionGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            // The stream is being abandoned; unwind the frames opened inside.
            while self.writer.depth() >= self.depth {
                self.writer.finish_section();
            }
            return;
        }
        assert_eq!(
            self.writer.depth(),
            self.depth,
            "section closed with unbalanced nested sections"
        );
        self.writer.finish_section();
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    #[test]
    fn empty_section_is_zero_prefix() {
        let mut writer = SectionWriter::new();
        writer.start_section();
        writer.finish_section();

        assert_eq!(writer.finish().unwrap().as_ref(), &[0, 0, 0, 0]);
    }

    #[test]
    fn length_excludes_prefix() {
        let mut writer = SectionWriter::new();
        writer.start_section();
        writer.write(&7u32);
        writer.write(&true);
        writer.finish_section();

        let wire = writer.finish().unwrap();
        assert_eq!(&wire[..4], &5u32.to_le_bytes());
        assert_eq!(wire.len(), 9);
    }

    #[test]
    fn nested_lengths_include_child_prefixes() {
        let mut writer = SectionWriter::new();
        writer.section(|w| {
            w.section(|w| w.write(&1u8));
            w.section(|w| w.write(&2u16));
        });

        let wire = writer.finish().unwrap();
        // outer: (4 + 1) + (4 + 2)
        assert_eq!(&wire[..4], &11u32.to_le_bytes());
        assert_eq!(&wire[4..8], &1u32.to_le_bytes());
        assert_eq!(wire[8], 1);
        assert_eq!(&wire[9..13], &2u32.to_le_bytes());
        assert_eq!(wire.len(), 15);
    }

    #[test]
    fn guard_closes_on_drop() {
        let mut writer = SectionWriter::new();
        {
            let mut guard = writer.open_section();
            guard.write("ab");
            assert_eq!(guard.depth(), 1);
        }
        assert_eq!(writer.depth(), 0);

        let wire = writer.finish().unwrap();
        assert_eq!(&wire[..4], &6u32.to_le_bytes());
    }

    #[test]
    fn section_closes_on_early_return() {
        fn write_until_negative(w: &mut SectionWriter, values: &[i32]) -> Option<()> {
            w.section(|w| {
                for v in values {
                    if *v < 0 {
                        return None;
                    }
                    w.write(v);
                }
                Some(())
            })
        }

        let mut writer = SectionWriter::new();
        assert!(write_until_negative(&mut writer, &[1, -1, 3]).is_none());
        assert_eq!(writer.depth(), 0);
        assert_eq!(&writer.finish().unwrap()[..4], &4u32.to_le_bytes());
    }

    #[test]
    fn section_closes_on_unwind() {
        let mut writer = SectionWriter::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            writer.section(|w| {
                w.start_section();
                panic!("boom");
            })
        }));
        assert!(result.is_err());
        assert_eq!(writer.depth(), 0);
    }

    #[test]
    #[should_panic(expected = "no open section")]
    fn finish_without_start_panics() {
        let mut writer = SectionWriter::new();
        writer.finish_section();
    }

    #[test]
    #[should_panic(expected = "unbalanced nested sections")]
    fn guard_rejects_leaked_inner_section() {
        let mut writer = SectionWriter::new();
        writer.section(|w| w.start_section());
    }

    #[test]
    fn finish_rejects_open_sections() {
        let mut writer = SectionWriter::new();
        writer.start_section();
        writer.start_section();
        writer.finish_section();

        let err = writer.finish().unwrap_err();
        assert!(matches!(err, SectionError::Unbalanced { open: 1 }));
    }
}
