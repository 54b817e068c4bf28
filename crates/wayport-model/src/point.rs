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

use serde::Serialize;

/// A heading constraint for snapping a coordinate.
///
/// `value` is the preferred heading in degrees clockwise from north and
/// `range` the permitted deviation on either side of it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Bearing {
    value: i16,
    range: i16,
}

impl Bearing {
    #[inline]
    pub const fn new(value: i16, range: i16) -> Self {
        Self { value, range }
    }

    /// Builds a bearing from the raw pair handed over by a host.
    ///
    /// A negative `value` marks the bearing as absent. Fractions are
    /// truncated toward zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_model::point::Bearing;
    /// assert_eq!(Bearing::from_raw(90.7, 20.0), Some(Bearing::new(90, 20)));
    /// assert_eq!(Bearing::from_raw(-1.0, 20.0), None);
    /// ```
    #[inline]
    pub fn from_raw(value: f64, range: f64) -> Option<Self> {
        if value < 0.0 || value.is_nan() {
            return None;
        }
        Some(Self::new(value as i16, range as i16))
    }

    #[inline]
    pub const fn value(&self) -> i16 {
        self.value
    }

    #[inline]
    pub const fn range(&self) -> i16 {
        self.range
    }
}

impl std::fmt::Display for Bearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.value, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_keeps_zero() {
        assert_eq!(Bearing::from_raw(0.0, 0.0), Some(Bearing::new(0, 0)));
    }

    #[test]
    fn test_from_raw_negative_value_is_absent() {
        assert_eq!(Bearing::from_raw(-0.5, 10.0), None);
        assert_eq!(Bearing::from_raw(f64::NAN, 10.0), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Bearing::new(270, 45).to_string(), "270,45");
    }
}
