//! Length-prefixed, nested section framing for auitheme project files.
//!
//! A stream is a sequence of primitives and sections. Every section is:
//! - A 4-byte little-endian payload length
//! - The payload itself, which may contain further sections
//!
//! Writing goes through [`SectionWriter`], which keeps a stack of open
//! sections and patches each length prefix when the section closes. Reading
//! goes through [`SectionReader`], a bounded view with its own cursor. Reads
//! never leave the view: short input decodes to default values and is
//! counted in [`ReadStats`] instead of failing.

pub mod codec;
pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{Decode, Encode, LENGTH_PREFIX_SIZE, MAX_SECTION_LEN};
pub use config::{LoadConfig, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_RECORDS};
pub use error::{Result, SectionError};
pub use reader::{ReadStats, SectionReader, Sections};
pub use writer::{SectionGuard, SectionWriter};
