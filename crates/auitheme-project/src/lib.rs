//! Theme template projects and their binary file format.
//!
//! A [`Project`] holds eleven collections of UI templates (colors, icons,
//! backgrounds, labels, buttons, progress bars, windows, icon buttons,
//! layout regions, mixed buttons, toggle buttons). It is saved as a tree of
//! length-prefixed sections built with [`auitheme_section`]:
//!
//! ```
//! use auitheme_project::{from_bytes, to_bytes, Color, Project};
//!
//! let mut project = Project::new();
//! project.push(Color::new("red", 1.0, 0.0, 0.0, 1.0));
//!
//! let bytes = to_bytes(&project).unwrap();
//! assert_eq!(from_bytes(&bytes), project);
//! ```

mod wire;

pub mod document;
pub mod error;
pub mod file;
pub mod kind;
pub mod layout;
pub mod model;
pub mod project;
pub mod refs;

pub use document::{
    decode_with_config, decode_with_stats, from_bytes, read_collection, read_collection_bounded,
    to_bytes, write_collection,
};
pub use error::{ProjectError, Result};
pub use file::{read_project_bytes, relative_asset_directory, ProjectFile, PROJECT_EXTENSION};
pub use kind::{Record, Template, TemplateKind, TemplateRef};
pub use layout::{
    describe_layout, describe_layout_with_config, SectionSpan, StreamLayout, TopLevelSection,
};
pub use model::*;
pub use project::Project;
pub use refs::{DanglingReference, RefTarget};

pub use auitheme_section::{LoadConfig, ReadStats};
