use bytes::{Buf, BufMut};

use crate::reader::SectionReader;
use crate::writer::SectionWriter;

/// Width of a section length prefix and of a text length prefix: 4 bytes, little-endian.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Largest payload a single length prefix can describe.
pub const MAX_SECTION_LEN: usize = u32::MAX as usize;

/// A value with a fixed on-disk encoding.
///
/// Wire layout per primitive:
/// ```text
/// bool          1 byte   0 = false, anything else = true
/// u8 / i8       1 byte
/// u16 / i16     2 bytes  little-endian
/// u32 / i32     4 bytes  little-endian
/// u64 / i64     8 bytes  little-endian
/// f32 / f64     4/8      IEEE-754 bits, little-endian
/// text          4 + n    u32 LE byte count, then n UTF-8 bytes
/// ```
pub trait Encode {
    /// Append the encoded value at the writer's current position.
    fn encode(&self, writer: &mut SectionWriter);
}

/// A value that can be decoded from a bounded section view.
///
/// Decoding is total: when the view runs out of bytes the implementation
/// returns a default value and the shortfall is recorded in the view's
/// [`ReadStats`](crate::ReadStats).
pub trait Decode: Sized {
    /// Decode the next value at the reader's cursor.
    fn decode(reader: &mut SectionReader<'_>) -> Self;
}

macro_rules! fixed_width {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, writer: &mut SectionWriter) {
                    writer.buf_mut().$put(*self);
                }
            }

            impl Decode for $ty {
                fn decode(reader: &mut SectionReader<'_>) -> Self {
                    match reader.take(std::mem::size_of::<$ty>()) {
                        Some(mut bytes) => bytes.$get(),
                        None => <$ty>::default(),
                    }
                }
            }
        )*
    };
}

fixed_width! {
    u8 => put_u8, get_u8;
    i8 => put_i8, get_i8;
    u16 => put_u16_le, get_u16_le;
    i16 => put_i16_le, get_i16_le;
    u32 => put_u32_le, get_u32_le;
    i32 => put_i32_le, get_i32_le;
    u64 => put_u64_le, get_u64_le;
    i64 => put_i64_le, get_i64_le;
    f32 => put_f32_le, get_f32_le;
    f64 => put_f64_le, get_f64_le;
}

impl Encode for bool {
    fn encode(&self, writer: &mut SectionWriter) {
        writer.buf_mut().put_u8(u8::from(*self));
    }
}

impl Decode for bool {
    fn decode(reader: &mut SectionReader<'_>) -> Self {
        reader.take(1).is_some_and(|bytes| bytes[0] != 0)
    }
}

impl Encode for str {
    fn encode(&self, writer: &mut SectionWriter) {
        let len = match u32::try_from(self.len()) {
            Ok(len) => len,
            Err(_) => {
                writer.note_oversize(self.len());
                return;
            }
        };
        let buf = writer.buf_mut();
        buf.reserve(LENGTH_PREFIX_SIZE + self.len());
        buf.put_u32_le(len);
        buf.put_slice(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut SectionWriter) {
        self.as_str().encode(writer);
    }
}

impl Decode for String {
    fn decode(reader: &mut SectionReader<'_>) -> Self {
        let Some(mut prefix) = reader.take(LENGTH_PREFIX_SIZE) else {
            return String::new();
        };
        let len = prefix.get_u32_le() as usize;
        let Some(bytes) = reader.take(len) else {
            return String::new();
        };
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_owned(),
            Err(_) => {
                reader.note_lossy_text(len);
                String::from_utf8_lossy(bytes).into_owned()
            }
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, writer: &mut SectionWriter) {
        (**self).encode(writer);
    }
}
