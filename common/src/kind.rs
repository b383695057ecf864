//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Variants are displayed, parsed and (with the `serde` feature)
/// serialized in `lowercase`, the way the LifeOps API spells them on the
/// wire and in URL paths.
///
/// # Example
///
/// ```rust
/// use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         #[label = "Cube"]
///         Cube,
///
///         #[doc = "A sphere"]
///         #[label = "Sphere"]
///         Sphere,
///     }
/// }
///
/// assert_eq!(Kind::Cube.to_string(), "cube");
/// assert_eq!("sphere".parse::<Kind>().unwrap(), Kind::Sphere);
/// assert_eq!(Kind::Sphere.label(), "Sphere");
/// assert_eq!(Kind::ALL.len(), 2);
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                #[label = $label:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $crate::__with_kind_serde! {
            #[derive(
                Clone,
                Copy,
                Debug,
                $crate::private::strum::AsRefStr,
                $crate::private::strum::Display,
                $crate::private::strum::EnumString,
                Eq,
                Hash,
                PartialEq,
            )]
            #[doc = $doc]
            #[strum(serialize_all = "lowercase")]
            pub enum $name {
                $(
                     #[doc = $variant_doc]
                     $variant,
                )*
            }
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the human-readable label of this variant.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                }
            }
        }
    };
}

/// Attaches [`serde`] derives to a kind enum when the `serde` feature is on.
///
/// [`serde`]: https://docs.rs/serde
#[cfg(feature = "serde")]
#[doc(hidden)]
#[macro_export]
macro_rules! __with_kind_serde {
    ($item:item) => {
        #[derive(
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[serde(rename_all = "lowercase")]
        $item
    };
}

/// Passes a kind enum through untouched when the `serde` feature is off.
#[cfg(not(feature = "serde"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __with_kind_serde {
    ($item:item) => {
        $item
    };
}
