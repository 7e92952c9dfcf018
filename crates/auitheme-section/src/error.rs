/// Errors that can occur while finishing a section stream.
///
/// Reading never fails; see [`crate::ReadStats`] for how malformed input is
/// reported.
#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    /// The stream was finished while sections were still open.
    #[error("unbalanced sections ({open} still open)")]
    Unbalanced { open: usize },

    /// A section payload or text field does not fit the 32-bit length prefix.
    #[error("section too large ({size} bytes, max {max})")]
    TooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, SectionError>;
