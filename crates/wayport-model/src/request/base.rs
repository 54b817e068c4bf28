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

//! Parameters shared by every query operation.

use crate::{hint::Hint, options::Approach, options::Snapping, point::Bearing};
use serde::Serialize;
use wayport_core::{geo::Coordinate, optional::OptionalArray};

/// The coordinate list and the per-point snapping attributes of a query.
///
/// Every per-point array is either absent or holds exactly one slot per
/// coordinate. The only way to obtain a `BaseParameters` is through a request
/// builder, which enforces that rule when it builds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaseParameters {
    pub(super) coordinates: Vec<Coordinate>,
    pub(super) bearings: OptionalArray<Bearing>,
    pub(super) radiuses: OptionalArray<f64>,
    pub(super) hints: OptionalArray<Hint>,
    pub(super) approaches: OptionalArray<Approach>,
    pub(super) generate_hints: bool,
    pub(super) snapping: Snapping,
    pub(super) exclude: Vec<String>,
}

impl BaseParameters {
    pub(crate) fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            coordinates,
            bearings: OptionalArray::absent(),
            radiuses: OptionalArray::absent(),
            hints: OptionalArray::absent(),
            approaches: OptionalArray::absent(),
            generate_hints: true,
            snapping: Snapping::default(),
            exclude: Vec::new(),
        }
    }

    /// Drops every per-point array whose length differs from the coordinate count.
    pub(crate) fn conform(self) -> Self {
        let n = self.coordinates.len();
        Self {
            bearings: self.bearings.conform(n),
            radiuses: self.radiuses.conform(n),
            hints: self.hints.conform(n),
            approaches: self.approaches.conform(n),
            ..self
        }
    }

    #[inline]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    #[inline]
    pub fn num_coordinates(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn bearings(&self) -> &OptionalArray<Bearing> {
        &self.bearings
    }

    #[inline]
    pub fn radiuses(&self) -> &OptionalArray<f64> {
        &self.radiuses
    }

    #[inline]
    pub fn hints(&self) -> &OptionalArray<Hint> {
        &self.hints
    }

    #[inline]
    pub fn approaches(&self) -> &OptionalArray<Approach> {
        &self.approaches
    }

    #[inline]
    pub fn generate_hints(&self) -> bool {
        self.generate_hints
    }

    #[inline]
    pub fn snapping(&self) -> Snapping {
        self.snapping
    }

    /// Road classes to avoid.
    #[inline]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }
}

/// Generates the setters for `BaseParameters` on a builder with a `base` field.
macro_rules! base_setters {
    () => {
        pub fn set_bearings(
            &mut self,
            bearings: wayport_core::optional::OptionalArray<$crate::point::Bearing>,
        ) -> &mut Self {
            self.base.bearings = bearings;
            self
        }

        /// Sets the snapping radius in meters per coordinate.
        pub fn set_radiuses(
            &mut self,
            radiuses: wayport_core::optional::OptionalArray<f64>,
        ) -> &mut Self {
            self.base.radiuses = radiuses;
            self
        }

        pub fn set_hints(
            &mut self,
            hints: wayport_core::optional::OptionalArray<$crate::hint::Hint>,
        ) -> &mut Self {
            self.base.hints = hints;
            self
        }

        pub fn set_approaches(
            &mut self,
            approaches: wayport_core::optional::OptionalArray<$crate::options::Approach>,
        ) -> &mut Self {
            self.base.approaches = approaches;
            self
        }

        pub fn set_generate_hints(&mut self, generate_hints: bool) -> &mut Self {
            self.base.generate_hints = generate_hints;
            self
        }

        pub fn set_snapping(&mut self, snapping: $crate::options::Snapping) -> &mut Self {
            self.base.snapping = snapping;
            self
        }

        pub fn set_exclude<I, S>(&mut self, classes: I) -> &mut Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.base.exclude = classes.into_iter().map(Into::into).collect();
            self
        }
    };
}

pub(crate) use base_setters;

/// Keeps `value` only if it is finite and strictly positive.
pub(crate) fn strictly_positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
