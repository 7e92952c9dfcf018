use crate::error::{ProjectError, Result};
use crate::kind::{with_record, Record, Template, TemplateKind, TemplateRef};
use crate::model::{
    Background, Button, Color, Icon, IconButton, Label, LayoutRegion, MixedButton, ProgressBar,
    ToggleButton, Window,
};
use crate::refs::{dangling_references, DanglingReference};

/// An in-memory theme template project.
///
/// Each collection keeps its records in insertion order; references between
/// records are indices into these collections.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    /// Directory holding the project's SVG assets, relative to the project file.
    pub asset_directory: String,
    pub colors: Vec<Color>,
    pub icons: Vec<Icon>,
    pub backgrounds: Vec<Background>,
    pub labels: Vec<Label>,
    pub buttons: Vec<Button>,
    pub progress_bars: Vec<ProgressBar>,
    pub windows: Vec<Window>,
    pub icon_buttons: Vec<IconButton>,
    pub layout_regions: Vec<LayoutRegion>,
    pub mixed_buttons: Vec<MixedButton>,
    pub toggle_buttons: Vec<ToggleButton>,
}

impl Project {
    /// Create an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records of `kind`.
    pub fn len(&self, kind: TemplateKind) -> usize {
        with_record!(kind, R => R::collection(self).len())
    }

    /// True if the project holds no records of any kind.
    pub fn is_empty(&self) -> bool {
        TemplateKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Total number of records across all kinds.
    pub fn record_count(&self) -> usize {
        TemplateKind::ALL.iter().map(|kind| self.len(*kind)).sum()
    }

    /// Borrow the record of `kind` at `index`.
    pub fn get(&self, kind: TemplateKind, index: usize) -> Option<TemplateRef<'_>> {
        with_record!(kind, R => R::collection(self).get(index).map(R::as_template_ref))
    }

    /// Iterate over the records of `kind` in insertion order.
    pub fn iter(&self, kind: TemplateKind) -> impl Iterator<Item = TemplateRef<'_>> + '_ {
        (0..self.len(kind)).filter_map(move |index| self.get(kind, index))
    }

    /// Append a record to its collection and return its index.
    pub fn push(&mut self, template: impl Into<Template>) -> usize {
        fn append<R: Record>(project: &mut Project, record: R) -> usize {
            let records = R::collection_mut(project);
            records.push(record);
            records.len() - 1
        }

        match template.into() {
            Template::Color(r) => append(self, r),
            Template::Icon(r) => append(self, r),
            Template::Background(r) => append(self, r),
            Template::Label(r) => append(self, r),
            Template::Button(r) => append(self, r),
            Template::ProgressBar(r) => append(self, r),
            Template::Window(r) => append(self, r),
            Template::IconButton(r) => append(self, r),
            Template::LayoutRegion(r) => append(self, r),
            Template::MixedButton(r) => append(self, r),
            Template::ToggleButton(r) => append(self, r),
        }
    }

    /// Remove and return the record of `kind` at `index`.
    ///
    /// Later records shift down by one; references to them are not rewritten.
    pub fn remove(&mut self, kind: TemplateKind, index: usize) -> Result<Template> {
        let len = self.len(kind);
        if index >= len {
            return Err(ProjectError::IndexOutOfRange { kind, index, len });
        }
        Ok(with_record!(kind, R => R::collection_mut(self).remove(index).into_template()))
    }

    /// The identifying name of a record (the file name for icons and backgrounds).
    pub fn display_name(&self, kind: TemplateKind, index: usize) -> Option<&str> {
        self.get(kind, index).map(|record| record.name())
    }

    /// Rename a record. Names must be non-empty and unique within a kind.
    pub fn rename(&mut self, kind: TemplateKind, index: usize, name: &str) -> Result<()> {
        fn apply<R: Record>(
            project: &mut Project,
            kind: TemplateKind,
            index: usize,
            name: &str,
        ) -> Result<()> {
            let records = R::collection_mut(project);
            let len = records.len();
            if index >= len {
                return Err(ProjectError::IndexOutOfRange { kind, index, len });
            }
            if records[index].name() == name {
                return Ok(());
            }
            if name.is_empty() {
                return Err(ProjectError::EmptyName { kind });
            }
            if records.iter().any(|record| record.name() == name) {
                return Err(ProjectError::DuplicateName {
                    kind,
                    name: name.to_string(),
                });
            }
            *records[index].name_mut() = name.to_string();
            Ok(())
        }

        with_record!(kind, R => apply::<R>(self, kind, index, name))
    }

    /// Report every reference that does not resolve to an existing record.
    pub fn validate(&self) -> Vec<DanglingReference> {
        dangling_references(self)
    }
}
