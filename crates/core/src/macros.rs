//! Declarative helpers shared by the domain modules.

/// Declare a closed set of string-valued states.
///
/// Generates the enum (serde-renamed to its wire/database text), an `ALL`
/// slice, `as_str`, a validating `from_str`, and `Display`. The label is
/// used in validation messages.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database string representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }

            /// Parse from a string, returning a validation error for unknown values.
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Result<Self, $crate::error::CoreError> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Unknown {}: '{other}'. Valid values: {}",
                        $label,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use text_enum;
