//! Enum tokens as they appear on the wire.
//!
//! Enumerations are declared with UPPER_UNDERSCORE symbols (`READY_ROLE`) and
//! travel as UpperCamel tokens (`ReadyRole`). Decoding is forward compatible:
//! a token the client does not know maps onto the enum's fallback variant.

use azure_compute_core::{Error, Result};
use tracing::debug;

/// Convert an UPPER_UNDERSCORE symbol into its UpperCamel wire token.
///
/// `CREATING_V_M` becomes `CreatingVM`.
#[must_use]
pub fn to_upper_camel(symbol: &str) -> String {
    let mut out = String::with_capacity(symbol.len());
    for word in symbol.split('_').filter(|word| !word.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

/// Convert an UpperCamel wire token into an UPPER_UNDERSCORE symbol.
///
/// Every uppercase letter after the first character starts a new word, so
/// `CreatingVM` becomes `CREATING_V_M`.
#[must_use]
pub fn to_upper_underscore(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for (i, c) in value.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

/// A closed enumeration exchanged as UpperCamel tokens.
pub trait WireEnum: Copy + PartialEq + Sized + 'static {
    /// All variants, the fallback included.
    const VARIANTS: &'static [Self];

    /// Variant substituted for unrecognized tokens.
    const FALLBACK: Self;

    /// UPPER_UNDERSCORE symbol of the variant.
    fn symbol(self) -> &'static str;

    /// Wire token of the variant.
    fn value(self) -> String {
        to_upper_camel(self.symbol())
    }

    /// Decode a wire token, falling back to [`WireEnum::FALLBACK`] when it is unknown.
    fn from_value(value: &str) -> Self {
        let symbol = to_upper_underscore(value);
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.symbol() == symbol)
            .unwrap_or_else(|| {
                debug!(
                    value,
                    fallback = Self::FALLBACK.symbol(),
                    "unrecognized {} token",
                    std::any::type_name::<Self>()
                );
                Self::FALLBACK
            })
    }

    /// Decode an optional wire token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingValue`] when the token is absent. Unknown tokens
    /// never fail.
    fn try_from_value(value: Option<&str>) -> Result<Self> {
        value.map(Self::from_value).ok_or_else(|| {
            Error::MissingValue(format!(
                "{} token must not be null",
                std::any::type_name::<Self>()
            ))
        })
    }
}

/// Declare an enum together with its [`WireEnum`] symbols and its wire-form
/// `Display`, `FromStr` and serde implementations.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $symbol:literal,
            )+
        }
        fallback = $fallback:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::domain::wire::WireEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant,)+];
            const FALLBACK: Self = Self::$fallback;

            fn symbol(self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::domain::wire::WireEnum::value(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(<Self as $crate::domain::wire::WireEnum>::from_value(s))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(&$crate::domain::wire::WireEnum::value(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let token = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(<Self as $crate::domain::wire::WireEnum>::from_value(&token))
            }
        }
    };
}

pub(crate) use wire_enum;
