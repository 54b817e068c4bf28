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

//! Geographic coordinates.
//!
//! A `Coordinate` is the unit of addressability of every query: the number of
//! coordinates in a request fixes the cardinality `N` that each per-point
//! attribute must match. Hosts hand coordinates over as one flat, interleaved
//! buffer `[lon0, lat0, lon1, lat1, ...]`; `Coordinate::from_interleaved`
//! reads that layout.

use serde::{Serialize, Serializer};

/// A (longitude, latitude) pair in decimal degrees.
///
/// No range check is applied here; whether a coordinate can be snapped to the
/// road network is decided by the routing engine.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Coordinate {
    longitude: f64,
    latitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Reads `count` coordinates from an interleaved longitude/latitude buffer.
    ///
    /// Only complete pairs are read. If the buffer holds fewer than
    /// `2 * count` values, the trailing incomplete pair and any missing
    /// coordinates are not produced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_core::geo::Coordinate;
    /// let flat = [13.38, 52.51, 13.40, 52.52];
    /// let coords = Coordinate::from_interleaved(&flat, 2);
    /// assert_eq!(coords.len(), 2);
    /// assert_eq!(coords[1].latitude(), 52.52);
    /// ```
    pub fn from_interleaved(values: &[f64], count: usize) -> Vec<Coordinate> {
        values
            .chunks_exact(2)
            .take(count)
            .map(|pair| Coordinate::new(pair[0], pair[1]))
            .collect()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

impl Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.longitude, self.latitude].serialize(serializer)
    }
}
