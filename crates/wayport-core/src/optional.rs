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

//! # Per-Point Optional Arrays
//!
//! Most query attributes are given *per input point*: one bearing, radius,
//! hint or approach for every coordinate. Each slot may be absent on its own,
//! and the array as a whole may be absent too. `OptionalArray<T>` models
//! both levels explicitly:
//!
//! * **Array level**: `None` means the attribute was not provided at all and
//!   the engine applies its own defaults to every point.
//! * **Slot level**: `Some(vec)` holds exactly one `Option<T>` per point.
//!
//! ## Cardinality
//!
//! A present array is only meaningful if it has one slot per coordinate.
//! `OptionalArray::conform` enforces this: when the slot count differs from
//! the coordinate count `N`, the *whole* array is dropped. It is never
//! truncated, padded or partially applied. An empty slot list is treated as
//! "not provided" as well.
//!
//! ```rust
//! use wayport_core::optional::OptionalArray;
//!
//! let radiuses = OptionalArray::from_slots(vec![Some(5.0), None]);
//! assert_eq!(radiuses.clone().conform(2).len(), 2);
//! assert!(radiuses.conform(3).is_absent());
//! ```

use serde::Serialize;
use std::iter::FusedIterator;

/// A sequence of per-point optional values that is present or absent as a whole.
///
/// Serializes as `null` when absent and as an array with `null` holes otherwise.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(transparent)]
pub struct OptionalArray<T> {
    slots: Option<Vec<Option<T>>>,
}

impl<T> Default for OptionalArray<T> {
    #[inline]
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> OptionalArray<T> {
    /// Creates an array that was not provided.
    #[inline]
    pub const fn absent() -> Self {
        Self { slots: None }
    }

    /// Creates an array from explicit slots.
    ///
    /// An empty slot list yields the absent array.
    #[inline]
    pub fn from_slots(slots: Vec<Option<T>>) -> Self {
        if slots.is_empty() {
            return Self::absent();
        }
        Self { slots: Some(slots) }
    }

    /// Creates an array in which every slot is present.
    #[inline]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_slots(values.into_iter().map(Some).collect())
    }

    /// Enforces the cardinality rule against `expected` points.
    ///
    /// Returns `self` unchanged if it is absent or has exactly `expected`
    /// slots; otherwise the entire array becomes absent.
    pub fn conform(self, expected: usize) -> Self {
        let received = self.len();
        if self.is_present() && received != expected {
            log::debug!(
                "discarding per-point array: expected {} slots, received {}",
                expected,
                received
            );
            return Self::absent();
        }
        self
    }

    /// Returns `true` if the attribute was not provided.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.slots.is_none()
    }

    /// Returns `true` if the attribute was provided.
    #[inline]
    pub fn is_present(&self) -> bool {
        self.slots.is_some()
    }

    /// Returns the number of slots, or `0` if the array is absent.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` if there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value at `index`, or `None` if the array, the slot,
    /// or the index is absent.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.as_ref()?.get(index)?.as_ref()
    }

    /// Returns the raw slots, or `None` if the array is absent.
    #[inline]
    pub fn slots(&self) -> Option<&[Option<T>]> {
        self.slots.as_deref()
    }

    /// Returns the number of slots that hold a value.
    pub fn present_count(&self) -> usize {
        self.iter().filter(Option::is_some).count()
    }

    /// Iterates over the slots. An absent array yields nothing.
    #[inline]
    pub fn iter(&self) -> Slots<'_, T> {
        Slots {
            inner: self.slots.as_ref().map(|s| s.iter()),
        }
    }

    /// Maps every present value, keeping the slot layout.
    pub fn map<U, F>(self, mut f: F) -> OptionalArray<U>
    where
        F: FnMut(T) -> U,
    {
        OptionalArray {
            slots: self
                .slots
                .map(|slots| slots.into_iter().map(|slot| slot.map(&mut f)).collect()),
        }
    }

    /// Consumes the array and returns its slots, if any.
    #[inline]
    pub fn into_slots(self) -> Option<Vec<Option<T>>> {
        self.slots
    }
}

impl<T> FromIterator<Option<T>> for OptionalArray<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self::from_slots(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a OptionalArray<T> {
    type Item = Option<&'a T>;
    type IntoIter = Slots<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the slots of an `OptionalArray`.
///
/// Behaves as an empty iterator when the array is absent.
#[derive(Debug, Clone)]
pub struct Slots<'a, T> {
    inner: Option<std::slice::Iter<'a, Option<T>>>,
}

impl<'a, T> Iterator for Slots<'a, T> {
    type Item = Option<&'a T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().map(Option::as_ref)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, Some(0)), |i| i.size_hint())
    }
}

impl<T> DoubleEndedIterator for Slots<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back().map(Option::as_ref)
    }
}

impl<T> ExactSizeIterator for Slots<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |i| i.len())
    }
}

impl<T> FusedIterator for Slots<'_, T> {}
