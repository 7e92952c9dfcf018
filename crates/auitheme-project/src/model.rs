//! Record kinds and the shared visual sub-structures they are built from.
//!
//! Field order in every declaration below is the on-disk order.

use crate::wire::{wire_enum, wire_struct};

/// Reference value meaning "no record selected".
pub const NO_REF: i32 = -1;

/// Index of the body font.
pub const FONT_BODY: i32 = 0;

/// Index of the header font.
pub const FONT_HEADER: i32 = 1;

/// Number of selectable fonts.
pub const FONT_COUNT: i32 = 2;

/// Resolve a stored reference into an index into a collection of `len` records.
pub fn resolve_ref(value: i32, len: usize) -> Option<usize> {
    usize::try_from(value).ok().filter(|index| *index < len)
}

wire_enum! {
    /// Horizontal text placement.
    pub enum HorizontalAlignment {
        #[default]
        Left = 0,
        Right = 1,
        Center = 2,
    }
}

wire_enum! {
    /// Vertical text placement.
    pub enum VerticalAlignment {
        #[default]
        Top = 0,
        Bottom = 1,
        Center = 2,
    }
}

wire_enum! {
    /// Which dimension of the containing box an [`AffineTransform`] scales.
    pub enum DimensionRelative {
        #[default]
        Height = 0,
        Width = 1,
        Smallest = 2,
        Largest = 3,
        Diagonal = 4,
    }
}

wire_struct! {
    /// An edge position: `dimension * scale + offset` (offset in grid units).
    pub struct AffineTransform {
        pub dimension: DimensionRelative,
        pub scale: f32,
        pub offset: f32,
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self {
            dimension: DimensionRelative::Height,
            scale: 0.0,
            offset: 0.0,
        }
    }
}

wire_struct! {
    /// Background and text styling for a text-bearing area.
    pub struct TextRegion {
        pub bg: i32,
        pub text_color: i32,
        pub font_choice: i32,
        pub font_scale: f32,
        pub h_text_margins: f32,
        pub v_text_margins: f32,
        pub h_text_alignment: HorizontalAlignment,
        pub v_text_alignment: VerticalAlignment,
    }
}

impl Default for TextRegion {
    fn default() -> Self {
        Self {
            bg: NO_REF,
            text_color: NO_REF,
            font_choice: FONT_BODY,
            font_scale: 1.0,
            h_text_margins: 0.0,
            v_text_margins: 0.0,
            h_text_alignment: HorizontalAlignment::Left,
            v_text_alignment: VerticalAlignment::Top,
        }
    }
}

wire_struct! {
    /// Background, tint and placement of an icon.
    pub struct IconRegion {
        pub bg: i32,
        pub icon_color: i32,
        pub icon_top: AffineTransform,
        pub icon_left: AffineTransform,
        pub icon_bottom: AffineTransform,
        pub icon_right: AffineTransform,
    }
}

impl Default for IconRegion {
    fn default() -> Self {
        Self {
            bg: NO_REF,
            icon_color: NO_REF,
            icon_top: AffineTransform::default(),
            icon_left: AffineTransform::default(),
            icon_bottom: AffineTransform::default(),
            icon_right: AffineTransform::default(),
        }
    }
}

wire_struct! {
    /// A background paired with a foreground color.
    pub struct ColorRegion {
        pub bg: i32,
        pub color: i32,
    }
}

impl Default for ColorRegion {
    fn default() -> Self {
        Self {
            bg: NO_REF,
            color: NO_REF,
        }
    }
}

wire_struct! {
    /// One face ("on" or "off") of a toggle button.
    pub struct ToggleRegion {
        pub primary: ColorRegion,
        pub active: ColorRegion,
        pub disabled: ColorRegion,
        pub font_choice: i32,
        pub font_scale: f32,
        pub h_text_alignment: HorizontalAlignment,
        pub v_text_alignment: VerticalAlignment,
        pub text_margin_left: AffineTransform,
        pub text_margin_right: AffineTransform,
        pub text_margin_top: AffineTransform,
        pub text_margin_bottom: AffineTransform,
    }
}

impl Default for ToggleRegion {
    fn default() -> Self {
        Self {
            primary: ColorRegion::default(),
            active: ColorRegion::default(),
            disabled: ColorRegion::default(),
            font_choice: FONT_BODY,
            font_scale: 1.0,
            h_text_alignment: HorizontalAlignment::Left,
            v_text_alignment: VerticalAlignment::Top,
            text_margin_left: AffineTransform::default(),
            text_margin_right: AffineTransform::default(),
            text_margin_top: AffineTransform::default(),
            text_margin_bottom: AffineTransform::default(),
        }
    }
}

wire_struct! {
    /// Text and icon sharing one color, as used by mixed buttons.
    pub struct MixedRegion {
        pub bg: i32,
        pub shared_color: i32,
        pub font_choice: i32,
        pub font_scale: f32,
        pub h_text_margins: f32,
        pub v_text_margins: f32,
        pub h_text_alignment: HorizontalAlignment,
        pub v_text_alignment: VerticalAlignment,
        pub icon_top: AffineTransform,
        pub icon_left: AffineTransform,
        pub icon_bottom: AffineTransform,
        pub icon_right: AffineTransform,
    }
}

impl Default for MixedRegion {
    fn default() -> Self {
        Self {
            bg: NO_REF,
            shared_color: NO_REF,
            font_choice: FONT_BODY,
            font_scale: 1.0,
            h_text_margins: 0.0,
            v_text_margins: 0.0,
            h_text_alignment: HorizontalAlignment::Left,
            v_text_alignment: VerticalAlignment::Top,
            icon_top: AffineTransform::default(),
            icon_left: AffineTransform::default(),
            icon_bottom: AffineTransform::default(),
            icon_right: AffineTransform::default(),
        }
    }
}

wire_struct! {
    /// A named RGBA color.
    pub struct Color {
        pub display_name: String,
        pub r: f32,
        pub g: f32,
        pub b: f32,
        pub a: f32,
    }
}

impl Default for Color {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl Color {
    /// Create a named color.
    pub fn new(display_name: impl Into<String>, r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            display_name: display_name.into(),
            r,
            g,
            b,
            a,
        }
    }
}

wire_struct! {
    /// An icon image, by file name relative to the asset directory.
    #[derive(Default)]
    pub struct Icon {
        pub file_name: String,
    }
}

wire_struct! {
    /// A background image and the size it was designed at.
    #[derive(Default)]
    pub struct Background {
        pub file_name: String,
        pub base_x: i32,
        pub base_y: i32,
    }
}

wire_struct! {
    #[derive(Default)]
    pub struct Label {
        pub display_name: String,
        pub primary: TextRegion,
    }
}

wire_struct! {
    /// A text button with primary, active and disabled appearances.
    #[derive(Default)]
    pub struct Button {
        pub display_name: String,
        pub animate_active_transition: bool,
        pub primary: TextRegion,
        pub active: TextRegion,
        pub disabled: TextRegion,
    }
}

wire_struct! {
    pub struct ProgressBar {
        pub display_name: String,
        pub bg_a: i32,
        pub bg_b: i32,
        pub text_color: i32,
        pub font_choice: i32,
        pub h_text_margins: f32,
        pub v_text_margins: f32,
        pub h_text_alignment: HorizontalAlignment,
        pub v_text_alignment: VerticalAlignment,
        pub display_percentage_text: bool,
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            bg_a: NO_REF,
            bg_b: NO_REF,
            text_color: NO_REF,
            font_choice: FONT_BODY,
            h_text_margins: 0.0,
            v_text_margins: 0.0,
            h_text_alignment: HorizontalAlignment::Left,
            v_text_alignment: VerticalAlignment::Top,
            display_percentage_text: false,
        }
    }
}

wire_struct! {
    /// A window frame with an optional close button.
    pub struct Window {
        pub display_name: String,
        pub bg: i32,
        pub layout_region_definition: i32,
        pub close_button_definition: i32,
        pub close_button_icon: i32,
        pub h_close_button_margin: f32,
        pub v_close_button_margin: f32,
    }
}

impl Default for Window {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            bg: NO_REF,
            layout_region_definition: NO_REF,
            close_button_definition: NO_REF,
            close_button_icon: NO_REF,
            h_close_button_margin: 0.0,
            v_close_button_margin: 0.0,
        }
    }
}

wire_struct! {
    #[derive(Default)]
    pub struct IconButton {
        pub display_name: String,
        pub animate_active_transition: bool,
        pub primary: IconRegion,
        pub active: IconRegion,
        pub disabled: IconRegion,
    }
}

wire_struct! {
    /// A paged layout area with page-turn buttons.
    pub struct LayoutRegion {
        pub display_name: String,
        pub page_number_text: TextRegion,
        pub bg: i32,
        pub left_button: i32,
        pub left_button_icon: i32,
        pub right_button: i32,
        pub right_button_icon: i32,
    }
}

impl Default for LayoutRegion {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            page_number_text: TextRegion::default(),
            bg: NO_REF,
            left_button: NO_REF,
            left_button_icon: NO_REF,
            right_button: NO_REF,
            right_button_icon: NO_REF,
        }
    }
}

wire_struct! {
    /// A button showing both text and an icon.
    #[derive(Default)]
    pub struct MixedButton {
        pub display_name: String,
        pub primary: MixedRegion,
        pub active: MixedRegion,
        pub disabled: MixedRegion,
        pub animate_active_transition: bool,
    }
}

wire_struct! {
    #[derive(Default)]
    pub struct ToggleButton {
        pub display_name: String,
        pub on_region: ToggleRegion,
        pub off_region: ToggleRegion,
        pub animate_active_transition: bool,
    }
}
