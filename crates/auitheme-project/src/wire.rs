//! Declarative wire mappings.
//!
//! A struct declared through [`wire_struct!`] is encoded as its fields in
//! declaration order, inlined into whatever section is open. The read path
//! is generated from the same field list, so the two can never drift apart.
//! Adding, removing or reordering a field changes the file format.

/// Declare a struct whose wire form is its fields, in order.
macro_rules! wire_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl auitheme_section::Encode for $name {
            fn encode(&self, writer: &mut auitheme_section::SectionWriter) {
                $( writer.write(&self.$field); )*
            }
        }

        impl auitheme_section::Decode for $name {
            fn decode(reader: &mut auitheme_section::SectionReader<'_>) -> Self {
                Self {
                    $( $field: reader.read(), )*
                }
            }
        }
    };
}

/// Declare a fieldless enum stored as a one-byte discriminant.
///
/// Unknown discriminants decode to the `#[default]` variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        #[repr(u8)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )*
        }

        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Look up a variant by its wire discriminant.
            pub fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }

        impl auitheme_section::Encode for $name {
            fn encode(&self, writer: &mut auitheme_section::SectionWriter) {
                writer.write(&(*self as u8));
            }
        }

        impl auitheme_section::Decode for $name {
            fn decode(reader: &mut auitheme_section::SectionReader<'_>) -> Self {
                let raw: u8 = reader.read();
                Self::from_u8(raw).unwrap_or_else(|| {
                    reader.note_unknown_discriminant(stringify!($name), u64::from(raw));
                    Self::default()
                })
            }
        }
    };
}

pub(crate) use wire_enum;
pub(crate) use wire_struct;
