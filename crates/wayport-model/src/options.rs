// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Option Sets
//!
//! Closed sets of query options that hosts select with a string token.
//!
//! Every set implements `OptionToken`. Resolution is an exact, case-sensitive
//! match against the set's token table; there is no trimming or case folding.
//! A token that is absent resolves to `Default::default()`, and a token that
//! matches nothing resolves to `OptionToken::fallback()`. For every set in this
//! module the two coincide; `Algorithm` in `config` is the one set where they
//! differ.
//!
//! | Set                  | Tokens                            | Default        |
//! | :------------------- | :-------------------------------- | :------------- |
//! | `Approach`           | `curb`, `opposite`, `unrestricted`| `unrestricted` |
//! | `Snapping`           | `any`, `default`                  | `default`      |
//! | `Geometries`         | `polyline`, `polyline6`, `geojson`| `polyline`     |
//! | `Overview`           | `simplified`, `full`, `false`     | `simplified`   |
//! | `Gaps`               | `ignore`, `split`                 | `split`        |
//! | `FallbackCoordinate` | `snapped`, `input`                | `input`        |
//! | `TripSource`         | `first`, `any`                    | `any`          |
//! | `TripDestination`    | `last`, `any`                     | `any`          |

/// A closed option set selected by string token.
pub trait OptionToken: Copy + Default + 'static {
    /// The token table, in declaration order.
    const TOKENS: &'static [(&'static str, Self)];

    /// Returns the member selected by an unrecognized token.
    #[inline]
    fn fallback() -> Self {
        Self::default()
    }

    /// Looks up an exact token.
    fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, member)| *member)
    }

    /// Resolves a nullable token. Never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_model::options::{Geometries, OptionToken};
    /// assert_eq!(Geometries::resolve(Some("geojson")), Geometries::GeoJson);
    /// assert_eq!(Geometries::resolve(Some("GeoJSON")), Geometries::Polyline);
    /// assert_eq!(Geometries::resolve(None), Geometries::Polyline);
    /// ```
    fn resolve(token: Option<&str>) -> Self {
        match token {
            None => Self::default(),
            Some(token) => Self::from_token(token).unwrap_or_else(Self::fallback),
        }
    }
}

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
        default = $default:ident;
        $( fallback = $fallback:ident; )?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, ::serde::Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $token)] $variant ),+
        }

        impl $name {
            /// Returns the canonical token of this member.
            #[inline]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $token ),+
                }
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::$default
            }
        }

        impl $crate::options::OptionToken for $name {
            const TOKENS: &'static [(&'static str, Self)] = &[ $( ($token, Self::$variant) ),+ ];

            $(
                #[inline]
                fn fallback() -> Self {
                    Self::$fallback
                }
            )?
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use option_set;

option_set! {
    /// Side of the road a snapped point must lie on.
    pub enum Approach {
        Curb => "curb",
        Opposite => "opposite",
        Unrestricted => "unrestricted",
    }
    default = Unrestricted;
}

option_set! {
    /// How strictly a coordinate must match a road-network location.
    pub enum Snapping {
        /// Only snap to edges the engine considers routable from the start.
        Default => "default",
        /// Snap to any edge, including otherwise excluded ones.
        Any => "any",
    }
    default = Default;
}

option_set! {
    /// Encoding of returned route geometries.
    pub enum Geometries {
        Polyline => "polyline",
        Polyline6 => "polyline6",
        GeoJson => "geojson",
    }
    default = Polyline;
}

option_set! {
    /// Level of detail of the overview geometry.
    pub enum Overview {
        Simplified => "simplified",
        Full => "full",
        /// No overview geometry at all.
        False => "false",
    }
    default = Simplified;
}

option_set! {
    /// Treatment of large time gaps in a map-matching trace.
    pub enum Gaps {
        Split => "split",
        Ignore => "ignore",
    }
    default = Split;
}

option_set! {
    /// Coordinate used to estimate fallback table entries.
    pub enum FallbackCoordinate {
        Input => "input",
        Snapped => "snapped",
    }
    default = Input;
}

option_set! {
    /// Where a trip must start.
    pub enum TripSource {
        Any => "any",
        First => "first",
    }
    default = Any;
}

option_set! {
    /// Where a trip must end.
    pub enum TripDestination {
        Any => "any",
        Last => "last",
    }
    default = Any;
}
