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

//! # Annotation Flags
//!
//! Annotations are optional per-leg attributes an engine can attach to its
//! response. A host asks for them with a list of facet tokens, which this
//! module merges into a single `AnnotationFlags` set.
//!
//! ## Merge Rule
//!
//! Tokens are processed in order, starting from `NONE`:
//!
//! 1. `"true"` or `"all"` sets the result to `ALL` and **stops**. Tokens
//!    after it are never looked at.
//! 2. A facet name (`nodes`, `distance`, `duration`, `datasources`,
//!    `weight`, `speed`) adds that facet.
//! 3. Anything else is ignored.
//!
//! Whether annotations were requested at all is a separate question. Requests
//! carry `Option<AnnotationFlags>`: `None` means the response has no
//! annotation section, while `Some(NONE)` asks for an empty one.

use serde::{ser::SerializeSeq, Serialize, Serializer};

/// A set of annotation facets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AnnotationFlags(u8);

impl AnnotationFlags {
    pub const NONE: Self = Self(0);
    pub const NODES: Self = Self(1 << 0);
    pub const DISTANCE: Self = Self(1 << 1);
    pub const DURATION: Self = Self(1 << 2);
    pub const DATASOURCES: Self = Self(1 << 3);
    pub const WEIGHT: Self = Self(1 << 4);
    pub const SPEED: Self = Self(1 << 5);
    pub const ALL: Self = Self(0b0011_1111);

    const FACETS: [(&'static str, Self); 6] = [
        ("nodes", Self::NODES),
        ("distance", Self::DISTANCE),
        ("duration", Self::DURATION),
        ("datasources", Self::DATASOURCES),
        ("weight", Self::WEIGHT),
        ("speed", Self::SPEED),
    ];

    /// Returns the flag of a single facet token.
    pub fn facet(token: &str) -> Option<Self> {
        Self::FACETS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, flag)| *flag)
    }

    /// Merges tokens into a flag set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_model::annotations::AnnotationFlags;
    /// let flags = AnnotationFlags::merge(["distance", "duration"]);
    /// assert_eq!(flags, AnnotationFlags::DISTANCE | AnnotationFlags::DURATION);
    ///
    /// let all = AnnotationFlags::merge(["speed", "all", "bogus"]);
    /// assert!(all.is_all());
    /// ```
    pub fn merge<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::NONE;
        for token in tokens {
            let token = token.as_ref();
            if token == "true" || token == "all" {
                return Self::ALL;
            }
            if let Some(facet) = Self::facet(token) {
                flags |= facet;
            }
        }
        flags
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_all(&self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Returns `true` if every facet of `other` is set in `self`.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Iterates over the names of the set facets.
    pub fn facet_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        Self::FACETS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
    }
}

impl std::ops::BitOr for AnnotationFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for AnnotationFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Debug for AnnotationFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnnotationFlags({})", self)
    }
}

impl std::fmt::Display for AnnotationFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_all() {
            return f.write_str("all");
        }
        if self.is_none() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.facet_names().collect();
        f.write_str(&names.join(","))
    }
}

impl Serialize for AnnotationFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for name in self.facet_names() {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_and_duration_union() {
        let flags = AnnotationFlags::merge(["distance", "duration"]);
        assert_eq!(flags.bits(), 0b0000_0110);
        assert!(flags.contains(AnnotationFlags::DISTANCE));
        assert!(flags.contains(AnnotationFlags::DURATION));
        assert!(!flags.is_all());
    }

    #[test]
    fn test_true_short_circuits() {
        assert!(AnnotationFlags::merge(["true"]).is_all());
        assert!(AnnotationFlags::merge(["nodes", "true", "weight"]).is_all());
    }

    #[test]
    fn test_unrecognized_tokens_are_ignored() {
        let flags = AnnotationFlags::merge(["bogus", "speed", "Distance"]);
        assert_eq!(flags, AnnotationFlags::SPEED);
    }

    #[test]
    fn test_every_facet_makes_all() {
        let flags = AnnotationFlags::merge([
            "nodes",
            "distance",
            "duration",
            "datasources",
            "weight",
            "speed",
        ]);
        assert!(flags.is_all());
    }

    #[test]
    fn test_display() {
        assert_eq!(AnnotationFlags::NONE.to_string(), "none");
        assert_eq!(AnnotationFlags::ALL.to_string(), "all");
        assert_eq!(
            (AnnotationFlags::NODES | AnnotationFlags::SPEED).to_string(),
            "nodes,speed"
        );
    }

    #[test]
    fn test_serializes_as_facet_names() {
        let flags = AnnotationFlags::DURATION | AnnotationFlags::WEIGHT;
        assert_eq!(
            serde_json::to_string(&flags).unwrap(),
            r#"["duration","weight"]"#
        );
    }

    fn token() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("nodes".to_string()),
            Just("distance".to_string()),
            Just("duration".to_string()),
            Just("datasources".to_string()),
            Just("weight".to_string()),
            Just("speed".to_string()),
            "[a-z]{0,8}",
        ]
    }

    proptest! {
        #[test]
        fn prop_all_absorbs_later_tokens(
            before in proptest::collection::vec(token(), 0..6),
            after in proptest::collection::vec(token(), 0..6),
            marker in prop_oneof![Just("all"), Just("true")],
        ) {
            let mut tokens = before.clone();
            tokens.push(marker.to_string());
            tokens.extend(after);
            prop_assert!(AnnotationFlags::merge(&tokens).is_all());
        }
    }
}
