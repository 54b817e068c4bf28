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

//! Round trip visiting every coordinate (travelling salesman).

use super::base::{base_setters, BaseParameters};
use crate::{
    annotations::AnnotationFlags,
    options::{Geometries, Overview, TripDestination, TripSource},
};
use serde::Serialize;
use wayport_core::geo::Coordinate;

/// A validated trip request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripRequest {
    #[serde(flatten)]
    base: BaseParameters,
    roundtrip: bool,
    source: TripSource,
    destination: TripDestination,
    steps: bool,
    annotations: Option<AnnotationFlags>,
    geometries: Geometries,
    overview: Overview,
}

impl TripRequest {
    #[inline]
    pub fn base(&self) -> &BaseParameters {
        &self.base
    }

    #[inline]
    pub fn roundtrip(&self) -> bool {
        self.roundtrip
    }

    #[inline]
    pub fn source(&self) -> TripSource {
        self.source
    }

    #[inline]
    pub fn destination(&self) -> TripDestination {
        self.destination
    }

    #[inline]
    pub fn steps(&self) -> bool {
        self.steps
    }

    #[inline]
    pub fn annotations(&self) -> Option<AnnotationFlags> {
        self.annotations
    }

    #[inline]
    pub fn geometries(&self) -> Geometries {
        self.geometries
    }

    #[inline]
    pub fn overview(&self) -> Overview {
        self.overview
    }
}

/// Builder for `TripRequest`.
#[derive(Clone, Debug)]
pub struct TripRequestBuilder {
    base: BaseParameters,
    roundtrip: bool,
    source: TripSource,
    destination: TripDestination,
    steps: bool,
    annotations: Option<AnnotationFlags>,
    geometries: Geometries,
    overview: Overview,
}

impl TripRequestBuilder {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            base: BaseParameters::new(coordinates),
            roundtrip: true,
            source: TripSource::default(),
            destination: TripDestination::default(),
            steps: false,
            annotations: None,
            geometries: Geometries::default(),
            overview: Overview::default(),
        }
    }

    base_setters!();

    pub fn set_roundtrip(&mut self, roundtrip: bool) -> &mut Self {
        self.roundtrip = roundtrip;
        self
    }

    pub fn set_source(&mut self, source: TripSource) -> &mut Self {
        self.source = source;
        self
    }

    pub fn set_destination(&mut self, destination: TripDestination) -> &mut Self {
        self.destination = destination;
        self
    }

    pub fn set_steps(&mut self, steps: bool) -> &mut Self {
        self.steps = steps;
        self
    }

    pub fn set_annotations(&mut self, annotations: Option<AnnotationFlags>) -> &mut Self {
        self.annotations = annotations;
        self
    }

    pub fn set_geometries(&mut self, geometries: Geometries) -> &mut Self {
        self.geometries = geometries;
        self
    }

    pub fn set_overview(&mut self, overview: Overview) -> &mut Self {
        self.overview = overview;
        self
    }

    pub fn build(self) -> TripRequest {
        TripRequest {
            base: self.base.conform(),
            roundtrip: self.roundtrip,
            source: self.source,
            destination: self.destination,
            steps: self.steps,
            annotations: self.annotations,
            geometries: self.geometries,
            overview: self.overview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::Hint;
    use wayport_core::optional::OptionalArray;

    #[test]
    fn test_defaults() {
        let request = TripRequestBuilder::new(Vec::new()).build();
        assert!(request.roundtrip());
        assert_eq!(request.source(), TripSource::Any);
        assert_eq!(request.destination(), TripDestination::Any);
        assert!(request.base().generate_hints());
    }

    #[test]
    fn test_mismatched_hints_are_dropped() {
        let coords = vec![Coordinate::new(0.0, 0.0); 2];
        let mut builder = TripRequestBuilder::new(coords);
        builder
            .set_hints(OptionalArray::from_values([Hint::from_base64("AAEC")]))
            .set_source(TripSource::First)
            .set_destination(TripDestination::Last)
            .set_roundtrip(false);
        let request = builder.build();
        assert!(request.base().hints().is_absent());
        assert_eq!(request.source(), TripSource::First);
        assert_eq!(request.destination(), TripDestination::Last);
        assert!(!request.roundtrip());
    }
}
