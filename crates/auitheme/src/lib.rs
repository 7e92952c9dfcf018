//! Theme template projects for the auitheme UI toolkit.
//!
//! auitheme stores a theme as a project of colors, icons, backgrounds and
//! widget templates, saved in a compact, versioning-tolerant binary format.
//!
//! # Crate Structure
//!
//! - [`section`] — Length-prefixed nested sections and the primitive codec
//! - [`project`] — Project model, record mapping, file save/load

/// Re-export section framing types.
pub mod section {
    pub use auitheme_section::*;
}

/// Re-export project types.
pub mod project {
    pub use auitheme_project::*;
}

pub use auitheme_project::{from_bytes, to_bytes, Project, ProjectError, ProjectFile};
