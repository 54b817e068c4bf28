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

//! Distance and duration matrices between coordinates.

use super::base::{base_setters, strictly_positive, BaseParameters};
use crate::{index::CoordinateIndex, options::FallbackCoordinate};
use serde::Serialize;
use wayport_core::geo::Coordinate;

/// Which matrices a table query returns.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableAnnotations {
    None,
    #[default]
    Duration,
    Distance,
    DurationAndDistance,
}

impl TableAnnotations {
    /// Combines the two include switches hosts pass.
    pub const fn from_switches(include_duration: bool, include_distance: bool) -> Self {
        match (include_duration, include_distance) {
            (true, true) => Self::DurationAndDistance,
            (true, false) => Self::Duration,
            (false, true) => Self::Distance,
            (false, false) => Self::None,
        }
    }

    #[inline]
    pub const fn includes_duration(&self) -> bool {
        matches!(self, Self::Duration | Self::DurationAndDistance)
    }

    #[inline]
    pub const fn includes_distance(&self) -> bool {
        matches!(self, Self::Distance | Self::DurationAndDistance)
    }
}

/// A validated table request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRequest {
    #[serde(flatten)]
    base: BaseParameters,
    sources: Vec<CoordinateIndex>,
    destinations: Vec<CoordinateIndex>,
    annotations: TableAnnotations,
    fallback_speed: Option<f64>,
    fallback_coordinate: FallbackCoordinate,
    scale_factor: Option<f64>,
}

impl TableRequest {
    #[inline]
    pub fn base(&self) -> &BaseParameters {
        &self.base
    }

    /// Rows of the matrix. Empty means every coordinate.
    #[inline]
    pub fn sources(&self) -> &[CoordinateIndex] {
        &self.sources
    }

    /// Columns of the matrix. Empty means every coordinate.
    #[inline]
    pub fn destinations(&self) -> &[CoordinateIndex] {
        &self.destinations
    }

    #[inline]
    pub fn annotations(&self) -> TableAnnotations {
        self.annotations
    }

    /// Speed in m/s used to estimate unreachable pairs.
    #[inline]
    pub fn fallback_speed(&self) -> Option<f64> {
        self.fallback_speed
    }

    #[inline]
    pub fn fallback_coordinate(&self) -> FallbackCoordinate {
        self.fallback_coordinate
    }

    #[inline]
    pub fn scale_factor(&self) -> Option<f64> {
        self.scale_factor
    }
}

/// Builder for `TableRequest`.
#[derive(Clone, Debug)]
pub struct TableRequestBuilder {
    base: BaseParameters,
    sources: Vec<CoordinateIndex>,
    destinations: Vec<CoordinateIndex>,
    annotations: TableAnnotations,
    fallback_speed: Option<f64>,
    fallback_coordinate: FallbackCoordinate,
    scale_factor: Option<f64>,
}

impl TableRequestBuilder {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            base: BaseParameters::new(coordinates),
            sources: Vec::new(),
            destinations: Vec::new(),
            annotations: TableAnnotations::default(),
            fallback_speed: None,
            fallback_coordinate: FallbackCoordinate::default(),
            scale_factor: None,
        }
    }

    base_setters!();

    pub fn set_sources<I>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = CoordinateIndex>,
    {
        self.sources = sources.into_iter().collect();
        self
    }

    pub fn set_destinations<I>(&mut self, destinations: I) -> &mut Self
    where
        I: IntoIterator<Item = CoordinateIndex>,
    {
        self.destinations = destinations.into_iter().collect();
        self
    }

    pub fn set_annotations(&mut self, annotations: TableAnnotations) -> &mut Self {
        self.annotations = annotations;
        self
    }

    /// Sets the fallback speed. Non-positive values keep the engine default.
    pub fn set_fallback_speed(&mut self, speed: Option<f64>) -> &mut Self {
        self.fallback_speed = speed;
        self
    }

    pub fn set_fallback_coordinate(&mut self, coordinate: FallbackCoordinate) -> &mut Self {
        self.fallback_coordinate = coordinate;
        self
    }

    /// Sets the duration scale factor. Non-positive values keep the engine default.
    pub fn set_scale_factor(&mut self, factor: Option<f64>) -> &mut Self {
        self.scale_factor = factor;
        self
    }

    pub fn build(self) -> TableRequest {
        TableRequest {
            base: self.base.conform(),
            sources: self.sources,
            destinations: self.destinations,
            annotations: self.annotations,
            fallback_speed: strictly_positive(self.fallback_speed),
            fallback_coordinate: self.fallback_coordinate,
            scale_factor: strictly_positive(self.scale_factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayport_core::optional::OptionalArray;

    fn coords(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(i as f64, i as f64)).collect()
    }

    #[test]
    fn test_annotation_switches() {
        assert_eq!(
            TableAnnotations::from_switches(true, true),
            TableAnnotations::DurationAndDistance
        );
        assert_eq!(
            TableAnnotations::from_switches(false, true),
            TableAnnotations::Distance
        );
        assert_eq!(
            TableAnnotations::from_switches(false, false),
            TableAnnotations::None
        );
        assert!(TableAnnotations::Duration.includes_duration());
        assert!(!TableAnnotations::Duration.includes_distance());
    }

    #[test]
    fn test_non_positive_overrides_are_dropped() {
        let mut builder = TableRequestBuilder::new(coords(2));
        builder
            .set_fallback_speed(Some(0.0))
            .set_scale_factor(Some(-2.0));
        let request = builder.build();
        assert_eq!(request.fallback_speed(), None);
        assert_eq!(request.scale_factor(), None);
    }

    #[test]
    fn test_positive_overrides_are_kept() {
        let mut builder = TableRequestBuilder::new(coords(2));
        builder
            .set_fallback_speed(Some(13.9))
            .set_scale_factor(Some(1.5))
            .set_fallback_coordinate(FallbackCoordinate::Snapped);
        let request = builder.build();
        assert_eq!(request.fallback_speed(), Some(13.9));
        assert_eq!(request.scale_factor(), Some(1.5));
        assert_eq!(request.fallback_coordinate(), FallbackCoordinate::Snapped);
    }

    #[test]
    fn test_build_conforms_per_point_arrays() {
        let mut builder = TableRequestBuilder::new(coords(3));
        builder
            .set_radiuses(OptionalArray::from_values([10.0, 20.0]))
            .set_sources([CoordinateIndex::new(0)])
            .set_destinations([CoordinateIndex::new(1), CoordinateIndex::new(2)]);
        let request = builder.build();
        assert!(request.base().radiuses().is_absent());
        assert_eq!(request.sources(), &[CoordinateIndex::new(0)]);
        assert_eq!(request.destinations().len(), 2);
    }

    #[test]
    fn test_serializes_flat() {
        let mut builder = TableRequestBuilder::new(coords(1));
        builder.set_annotations(TableAnnotations::DurationAndDistance);
        let json = serde_json::to_value(builder.build()).unwrap();
        assert_eq!(json["annotations"], "duration_and_distance");
        assert_eq!(json["coordinates"][0][0], 0.0);
        assert!(json["radiuses"].is_null());
        assert!(json["fallback_speed"].is_null());
    }
}
