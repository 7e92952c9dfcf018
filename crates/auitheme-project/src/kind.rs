//! The catalogue of record kinds and the tagged unions over it.

use std::fmt;
use std::str::FromStr;

use auitheme_section::{Decode, Encode};

use crate::error::ProjectError;
use crate::model::{
    Background, Button, Color, Icon, IconButton, Label, LayoutRegion, MixedButton, ProgressBar,
    ToggleButton, Window,
};
use crate::project::Project;
use crate::refs::{RefSink, References};

/// Every record kind a project holds, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TemplateKind {
    Color,
    Icon,
    Background,
    Label,
    Button,
    ProgressBar,
    Window,
    IconButton,
    LayoutRegion,
    MixedButton,
    ToggleButton,
}

impl TemplateKind {
    /// All kinds in the order their collections appear in a project file.
    pub const ALL: [TemplateKind; 11] = [
        TemplateKind::Color,
        TemplateKind::Icon,
        TemplateKind::Background,
        TemplateKind::Label,
        TemplateKind::Button,
        TemplateKind::ProgressBar,
        TemplateKind::Window,
        TemplateKind::IconButton,
        TemplateKind::LayoutRegion,
        TemplateKind::MixedButton,
        TemplateKind::ToggleButton,
    ];

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Color => "color",
            TemplateKind::Icon => "icon",
            TemplateKind::Background => "background",
            TemplateKind::Label => "label",
            TemplateKind::Button => "button",
            TemplateKind::ProgressBar => "progress_bar",
            TemplateKind::Window => "window",
            TemplateKind::IconButton => "icon_button",
            TemplateKind::LayoutRegion => "layout_region",
            TemplateKind::MixedButton => "mixed_button",
            TemplateKind::ToggleButton => "toggle_button",
        }
    }

    /// Position of this kind's collection in a project file.
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = ProjectError;

    /// Accepts the snake_case name, with `-` in place of `_`, or a trailing `s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized || kind.name() == singular)
            .ok_or_else(|| ProjectError::InvalidKind(s.to_string()))
    }
}

/// A record type stored in one of the project's collections.
///
/// The implementation of [`Encode`]/[`Decode`] is the record's element
/// section payload.
pub trait Record: Encode + Decode + Clone + Default {
    /// Which collection this record belongs to.
    const KIND: TemplateKind;

    /// The name that identifies this record within its collection.
    fn name(&self) -> &str;

    /// Mutable access to the identifying name.
    fn name_mut(&mut self) -> &mut String;

    /// The project's collection of this kind.
    fn collection(project: &Project) -> &Vec<Self>;

    /// Mutable access to the project's collection of this kind.
    fn collection_mut(project: &mut Project) -> &mut Vec<Self>;

    /// Wrap into the owning tagged union.
    fn into_template(self) -> Template;

    /// Borrow as the tagged union.
    fn as_template_ref(&self) -> TemplateRef<'_>;
}

macro_rules! templates {
    ($($variant:ident => $record:ident, $collection:ident, $name:ident;)*) => {
        /// One record of any kind.
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
        pub enum Template {
            $( $variant($record), )*
        }

        /// A borrowed record of any kind.
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
        pub enum TemplateRef<'a> {
            $( $variant(&'a $record), )*
        }

        impl Template {
            pub fn kind(&self) -> TemplateKind {
                match self {
                    $( Template::$variant(_) => TemplateKind::$variant, )*
                }
            }

            /// A fresh record of `kind` with every reference unset.
            pub fn new(kind: TemplateKind) -> Self {
                match kind {
                    $( TemplateKind::$variant => Template::$variant($record::default()), )*
                }
            }

            pub fn name(&self) -> &str {
                self.as_template_ref().name()
            }

            pub fn as_template_ref(&self) -> TemplateRef<'_> {
                match self {
                    $( Template::$variant(record) => TemplateRef::$variant(record), )*
                }
            }
        }

        impl<'a> TemplateRef<'a> {
            pub fn kind(&self) -> TemplateKind {
                match self {
                    $( TemplateRef::$variant(_) => TemplateKind::$variant, )*
                }
            }

            pub fn name(&self) -> &'a str {
                match *self {
                    $( TemplateRef::$variant(record) => &record.$name, )*
                }
            }

            pub fn to_template(&self) -> Template {
                match *self {
                    $( TemplateRef::$variant(record) => Template::$variant(record.clone()), )*
                }
            }

            pub(crate) fn references(&self, sink: &mut RefSink<'_>) {
                match *self {
                    $( TemplateRef::$variant(record) => record.references(sink), )*
                }
            }
        }

        $(
            impl Record for $record {
                const KIND: TemplateKind = TemplateKind::$variant;

                fn name(&self) -> &str {
                    &self.$name
                }

                fn name_mut(&mut self) -> &mut String {
                    &mut self.$name
                }

                fn collection(project: &Project) -> &Vec<Self> {
                    &project.$collection
                }

                fn collection_mut(project: &mut Project) -> &mut Vec<Self> {
                    &mut project.$collection
                }

                fn into_template(self) -> Template {
                    Template::$variant(self)
                }

                fn as_template_ref(&self) -> TemplateRef<'_> {
                    TemplateRef::$variant(self)
                }
            }

            impl From<$record> for Template {
                fn from(record: $record) -> Self {
                    Template::$variant(record)
                }
            }
        )*
    };
}

templates! {
    Color => Color, colors, display_name;
    Icon => Icon, icons, file_name;
    Background => Background, backgrounds, file_name;
    Label => Label, labels, display_name;
    Button => Button, buttons, display_name;
    ProgressBar => ProgressBar, progress_bars, display_name;
    Window => Window, windows, display_name;
    IconButton => IconButton, icon_buttons, display_name;
    LayoutRegion => LayoutRegion, layout_regions, display_name;
    MixedButton => MixedButton, mixed_buttons, display_name;
    ToggleButton => ToggleButton, toggle_buttons, display_name;
}

/// Run `$body` with `$record` bound to the record type of `$kind`.
macro_rules! with_record {
    ($kind:expr, $record:ident => $body:expr) => {
        match $kind {
            $crate::kind::TemplateKind::Color => {
                type $record = $crate::model::Color;
                $body
            }
            $crate::kind::TemplateKind::Icon => {
                type $record = $crate::model::Icon;
                $body
            }
            $crate::kind::TemplateKind::Background => {
                type $record = $crate::model::Background;
                $body
            }
            $crate::kind::TemplateKind::Label => {
                type $record = $crate::model::Label;
                $body
            }
            $crate::kind::TemplateKind::Button => {
                type $record = $crate::model::Button;
                $body
            }
            $crate::kind::TemplateKind::ProgressBar => {
                type $record = $crate::model::ProgressBar;
                $body
            }
            $crate::kind::TemplateKind::Window => {
                type $record = $crate::model::Window;
                $body
            }
            $crate::kind::TemplateKind::IconButton => {
                type $record = $crate::model::IconButton;
                $body
            }
            $crate::kind::TemplateKind::LayoutRegion => {
                type $record = $crate::model::LayoutRegion;
                $body
            }
            $crate::kind::TemplateKind::MixedButton => {
                type $record = $crate::model::MixedButton;
                $body
            }
            $crate::kind::TemplateKind::ToggleButton => {
                type $record = $crate::model::ToggleButton;
                $body
            }
        }
    };
}

pub(crate) use with_record;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_in_file_order() {
        for (i, kind) in TemplateKind::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
        }
        assert_eq!(TemplateKind::ALL[0], TemplateKind::Color);
        assert_eq!(TemplateKind::ALL[10], TemplateKind::ToggleButton);
    }

    #[test]
    fn parse_kind_names() {
        assert_eq!("color".parse::<TemplateKind>().unwrap(), TemplateKind::Color);
        assert_eq!("colors".parse::<TemplateKind>().unwrap(), TemplateKind::Color);
        assert_eq!(
            "icon-button".parse::<TemplateKind>().unwrap(),
            TemplateKind::IconButton
        );
        assert_eq!(
            "Progress_Bars".parse::<TemplateKind>().unwrap(),
            TemplateKind::ProgressBar
        );
        assert!(matches!(
            "slider".parse::<TemplateKind>(),
            Err(ProjectError::InvalidKind(_))
        ));
    }

    #[test]
    fn names_round_trip_through_parse() {
        for kind in TemplateKind::ALL {
            assert_eq!(kind.name().parse::<TemplateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn template_new_matches_kind() {
        for kind in TemplateKind::ALL {
            let template = Template::new(kind);
            assert_eq!(template.kind(), kind);
            assert_eq!(template.as_template_ref().kind(), kind);
            assert_eq!(template.as_template_ref().to_template(), template);
        }
    }

    #[test]
    fn template_name_uses_file_name_for_assets() {
        let icon = Template::from(Icon {
            file_name: "close.svg".into(),
        });
        assert_eq!(icon.name(), "close.svg");
    }
}
