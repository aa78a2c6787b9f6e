//!
//! # Enum-String Mapping Module
//!
//! Defines the [enumstr] macro and paired [EnumStr] trait,
//! for enums whose variants are each paired with a fixed string,
//! as Liberty keywords and node-kind names are.
//!
//! Example:
//!
//! ```rs
//! use liberty21utils::enumstr;
//!
//! enumstr!(
//! /// # Liberty Pin Directions
//! PinDirection {
//!     Input: "input",
//!     Output: "output",
//!     Inout: "inout",
//!  }
//! );
//! ```
//!

///
/// # String-Enumeration Trait
///
/// * `to_str(&self) -> &'static str` converts the enum to its string value.
/// * `from_str(&str) -> Option<Self>` does the opposite, returning `None` for unknown strings.
/// * `variants() -> &'static [Self]` lists every variant, in declaration order.
///
/// Primarily implemented by the [enumstr] macro.
///
pub trait EnumStr: std::marker::Sized + 'static {
    fn to_str(&self) -> &'static str;
    fn from_str(txt: &str) -> Option<Self>;
    fn variants() -> &'static [Self];
}

///
/// # Enum-String Pairing Macro
///
/// Creates a fieldless `enum` which:
/// * (a) Implements [EnumStr] for conversions to and from its paired strings
/// * (b) Implements [std::fmt::Display], writing the paired strings
/// * (c) Derives common traits, notably including `serde::{Serialize, Deserialize}`,
///   which must be in scope at the invocation site
///
/// Additional attributes (e.g. further derives) are passed through to the `enum`.
///
#[macro_export]
macro_rules! enumstr {
    (   $(#[$meta: meta])*
        $enum_name: ident {
        $( $variant: ident : $strval: literal ),* $(,)?
    }) => {
        $(#[$meta])*
        #[allow(dead_code)]
        #[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $( #[doc=$strval]
                $variant ),*
        }
        impl EnumStr for $enum_name {
            /// Convert a [$enum_name] variant to its paired (static) string value.
            fn to_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $strval),*,
                }
            }
            /// Create a [$enum_name] from one of its string-values.
            /// Matching is case *sensitive*, as Liberty keywords are.
            fn from_str(txt: &str) -> Option<Self> {
                match txt {
                    $( $strval => Some(Self::$variant)),*,
                    _ => None,
                }
            }
            /// All [$enum_name] variants, in declaration order
            fn variants() -> &'static [Self] {
                &[ $( Self::$variant ),* ]
            }
        }
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", self.to_str())
            }
        }
    }
}
