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

//! Snapping a noisy GPS trace to the road network.

use super::base::{base_setters, BaseParameters};
use crate::{
    annotations::AnnotationFlags,
    index::CoordinateIndex,
    options::{Gaps, Geometries, Overview},
};
use serde::Serialize;
use wayport_core::{geo::Coordinate, optional::OptionalArray};

/// A validated map-matching request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchRequest {
    #[serde(flatten)]
    base: BaseParameters,
    timestamps: OptionalArray<u32>,
    gaps: Gaps,
    tidy: bool,
    waypoints: Vec<CoordinateIndex>,
    steps: bool,
    annotations: Option<AnnotationFlags>,
    geometries: Geometries,
    overview: Overview,
}

impl MatchRequest {
    #[inline]
    pub fn base(&self) -> &BaseParameters {
        &self.base
    }

    /// UNIX timestamps in seconds, one per trace point.
    #[inline]
    pub fn timestamps(&self) -> &OptionalArray<u32> {
        &self.timestamps
    }

    #[inline]
    pub fn gaps(&self) -> Gaps {
        self.gaps
    }

    #[inline]
    pub fn tidy(&self) -> bool {
        self.tidy
    }

    #[inline]
    pub fn waypoints(&self) -> &[CoordinateIndex] {
        &self.waypoints
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

/// Builder for `MatchRequest`.
#[derive(Clone, Debug)]
pub struct MatchRequestBuilder {
    base: BaseParameters,
    timestamps: OptionalArray<u32>,
    gaps: Gaps,
    tidy: bool,
    waypoints: Vec<CoordinateIndex>,
    steps: bool,
    annotations: Option<AnnotationFlags>,
    geometries: Geometries,
    overview: Overview,
}

impl MatchRequestBuilder {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            base: BaseParameters::new(coordinates),
            timestamps: OptionalArray::absent(),
            gaps: Gaps::default(),
            tidy: false,
            waypoints: Vec::new(),
            steps: false,
            annotations: None,
            geometries: Geometries::default(),
            overview: Overview::default(),
        }
    }

    base_setters!();

    pub fn set_timestamps(&mut self, timestamps: OptionalArray<u32>) -> &mut Self {
        self.timestamps = timestamps;
        self
    }

    pub fn set_gaps(&mut self, gaps: Gaps) -> &mut Self {
        self.gaps = gaps;
        self
    }

    pub fn set_tidy(&mut self, tidy: bool) -> &mut Self {
        self.tidy = tidy;
        self
    }

    pub fn set_waypoints<I>(&mut self, waypoints: I) -> &mut Self
    where
        I: IntoIterator<Item = CoordinateIndex>,
    {
        self.waypoints = waypoints.into_iter().collect();
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

    pub fn build(self) -> MatchRequest {
        let base = self.base.conform();
        let timestamps = self.timestamps.conform(base.num_coordinates());
        MatchRequest {
            base,
            timestamps,
            gaps: self.gaps,
            tidy: self.tidy,
            waypoints: self.waypoints,
            steps: self.steps,
            annotations: self.annotations,
            geometries: self.geometries,
            overview: self.overview,
        }
    }
}
