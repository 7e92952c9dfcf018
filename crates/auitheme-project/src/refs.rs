//! Cross-collection references and their validation.
//!
//! Records point at other records by index (`-1` for none). The file format
//! does not check these; [`Project::validate`](crate::Project::validate)
//! reports the ones that do not resolve.

use std::fmt;

use crate::kind::TemplateKind;
use crate::model::{
    Background, Button, Color, ColorRegion, Icon, IconButton, IconRegion, Label, LayoutRegion,
    MixedButton, MixedRegion, ProgressBar, TextRegion, ToggleButton, ToggleRegion, Window,
    resolve_ref, FONT_COUNT, NO_REF,
};
use crate::project::Project;

/// What a reference field points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RefTarget {
    /// An index into another record collection.
    Template(TemplateKind),
    /// A font slot.
    Font,
}

impl fmt::Display for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefTarget::Template(kind) => write!(f, "{kind}"),
            RefTarget::Font => f.write_str("font"),
        }
    }
}

/// A reference field whose value does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DanglingReference {
    /// Kind of the record holding the field.
    pub kind: TemplateKind,
    /// Index of the record within its collection.
    pub index: usize,
    /// Dotted path of the field, e.g. `primary.bg`.
    pub field: String,
    pub target: RefTarget,
    pub value: i32,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}].{} = {}: no such {}",
            self.kind, self.index, self.field, self.value, self.target
        )
    }
}

pub(crate) struct FieldRef {
    pub(crate) field: String,
    pub(crate) target: RefTarget,
    pub(crate) value: i32,
}

/// Collects reference fields, tracking the path of nested sub-structures.
pub(crate) struct RefSink<'a> {
    path: Vec<&'static str>,
    out: &'a mut Vec<FieldRef>,
}

impl<'a> RefSink<'a> {
    pub(crate) fn new(out: &'a mut Vec<FieldRef>) -> Self {
        Self {
            path: Vec::new(),
            out,
        }
    }

    fn field(&mut self, name: &'static str, target: RefTarget, value: i32) {
        let mut field = self.path.join(".");
        if !field.is_empty() {
            field.push('.');
        }
        field.push_str(name);
        self.out.push(FieldRef {
            field,
            target,
            value,
        });
    }

    fn template(&mut self, name: &'static str, kind: TemplateKind, value: i32) {
        self.field(name, RefTarget::Template(kind), value);
    }

    fn font(&mut self, name: &'static str, value: i32) {
        self.field(name, RefTarget::Font, value);
    }

    fn nested(&mut self, name: &'static str, inner: &impl References) {
        self.path.push(name);
        inner.references(self);
        self.path.pop();
    }
}

/// Reports every reference field of a record or sub-structure.
pub(crate) trait References {
    fn references(&self, sink: &mut RefSink<'_>);
}

impl References for TextRegion {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.template("bg", TemplateKind::Background, self.bg);
        sink.template("text_color", TemplateKind::Color, self.text_color);
        sink.font("font_choice", self.font_choice);
    }
}

impl References for IconRegion {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.template("bg", TemplateKind::Background, self.bg);
        sink.template("icon_color", TemplateKind::Color, self.icon_color);
    }
}

impl References for ColorRegion {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.template("bg", TemplateKind::Background, self.bg);
        sink.template("color", TemplateKind::Color, self.color);
    }
}

impl References for ToggleRegion {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.nested("primary", &self.primary);
        sink.nested("active", &self.active);
        sink.nested("disabled", &self.disabled);
        sink.font("font_choice", self.font_choice);
    }
}

impl References for MixedRegion {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.template("bg", TemplateKind::Background, self.bg);
        sink.template("shared_color", TemplateKind::Color, self.shared_color);
        sink.font("font_choice", self.font_choice);
    }
}

impl References for Color {
    fn references(&self, _sink: &mut RefSink<'_>) {}
}

impl References for Icon {
    fn references(&self, _sink: &mut RefSink<'_>) {}
}

impl References for Background {
    fn references(&self, _sink: &mut RefSink<'_>) {}
}

impl References for Label {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.nested("primary", &self.primary);
    }
}

impl References for Button {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.nested("primary", &self.primary);
        sink.nested("active", &self.active);
        sink.nested("disabled", &self.disabled);
    }
}

impl References for ProgressBar {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.template("bg_a", TemplateKind::Background, self.bg_a);
        sink.template("bg_b", TemplateKind::Background, self.bg_b);
        sink.template("text_color", TemplateKind::Color, self.text_color);
        sink.font("font_choice", self.font_choice);
    }
}

impl References for Window {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.template("bg", TemplateKind::Background, self.bg);
        sink.template(
            "layout_region_definition",
            TemplateKind::LayoutRegion,
            self.layout_region_definition,
        );
        sink.template(
            "close_button_definition",
            TemplateKind::IconButton,
            self.close_button_definition,
        );
        sink.template("close_button_icon", TemplateKind::Icon, self.close_button_icon);
    }
}

impl References for IconButton {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.nested("primary", &self.primary);
        sink.nested("active", &self.active);
        sink.nested("disabled", &self.disabled);
    }
}

impl References for LayoutRegion {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.nested("page_number_text", &self.page_number_text);
        sink.template("bg", TemplateKind::Background, self.bg);
        sink.template("left_button", TemplateKind::IconButton, self.left_button);
        sink.template("left_button_icon", TemplateKind::Icon, self.left_button_icon);
        sink.template("right_button", TemplateKind::IconButton, self.right_button);
        sink.template("right_button_icon", TemplateKind::Icon, self.right_button_icon);
    }
}

impl References for MixedButton {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.nested("primary", &self.primary);
        sink.nested("active", &self.active);
        sink.nested("disabled", &self.disabled);
    }
}

impl References for ToggleButton {
    fn references(&self, sink: &mut RefSink<'_>) {
        sink.nested("on_region", &self.on_region);
        sink.nested("off_region", &self.off_region);
    }
}

pub(crate) fn dangling_references(project: &Project) -> Vec<DanglingReference> {
    let mut dangling = Vec::new();
    let mut fields = Vec::new();
    for kind in TemplateKind::ALL {
        for (index, record) in project.iter(kind).enumerate() {
            fields.clear();
            record.references(&mut RefSink::new(&mut fields));
            for field in fields.drain(..) {
                let resolves = match field.target {
                    RefTarget::Template(target) => {
                        field.value == NO_REF
                            || resolve_ref(field.value, project.len(target)).is_some()
                    }
                    RefTarget::Font => (0..FONT_COUNT).contains(&field.value),
                };
                if !resolves {
                    dangling.push(DanglingReference {
                        kind,
                        index,
                        field: field.field,
                        target: field.target,
                        value: field.value,
                    });
                }
            }
        }
    }
    dangling
}
