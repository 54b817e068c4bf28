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

//! # Strongly Typed Indices
//!
//! Phantom-typed wrappers around `usize`. A `TypedIndex<T>` carries a tag
//! type `T: TypedIndexTag` that names the index space it belongs to, while
//! compiling down to a transparent `usize`.
//!
//! Queries address their input points by position (table sources and
//! destinations, route and match waypoints). Those positions travel as
//! typed indices so they cannot be mixed up with counts or raw lengths.
//!
//! ## Usage
//!
//! ```rust
//! use wayport_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone)]
//! struct StopTag;
//! impl TypedIndexTag for StopTag { const NAME: &'static str = "StopIndex"; }
//!
//! type StopIndex = TypedIndex<StopTag>;
//! let s = StopIndex::new(3);
//! assert_eq!(s.get(), 3);
//! assert_eq!(format!("{}", s), "StopIndex(3)");
//! ```

use serde::{Serialize, Serializer};

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
///
/// Serializes as a plain unsigned integer, so a list of typed indices renders
/// the same way a list of `usize` would.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns `true` if the index addresses a slot of a sequence of length `len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # #[derive(Clone)]
    /// # struct StopTag;
    /// # impl TypedIndexTag for StopTag { const NAME: &'static str = "StopIndex"; }
    /// let idx = TypedIndex::<StopTag>::new(2);
    /// assert!(idx.is_within(3));
    /// assert!(!idx.is_within(2));
    /// ```
    #[inline(always)]
    pub const fn is_within(&self, len: usize) -> bool {
        self.index < len
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

impl<T> Serialize for TypedIndex<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.index as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIndex";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_and_get() {
        let idx = TestIndex::new(42);
        assert_eq!(idx.get(), 42);
    }

    #[test]
    fn test_conversions() {
        let idx: TestIndex = 7usize.into();
        assert_eq!(idx.get(), 7);

        let raw: usize = idx.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_debug_and_display() {
        let idx = TestIndex::new(5);
        assert_eq!(format!("{:?}", idx), "TestIndex(5)");
        assert_eq!(format!("{}", idx), "TestIndex(5)");
    }

    #[test]
    fn test_is_within() {
        let idx = TestIndex::new(0);
        assert!(idx.is_within(1));
        assert!(!idx.is_within(0));
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let indices = vec![TestIndex::new(0), TestIndex::new(4)];
        let json = serde_json::to_string(&indices).unwrap();
        assert_eq!(json, "[0,4]");
    }
}
