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

//! Fastest route through the coordinates in the given order.

use super::base::{base_setters, BaseParameters};
use crate::{
    annotations::AnnotationFlags,
    index::CoordinateIndex,
    options::{Geometries, Overview},
};
use serde::Serialize;
use wayport_core::geo::Coordinate;

/// A validated route request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteRequest {
    #[serde(flatten)]
    base: BaseParameters,
    steps: bool,
    alternatives: Option<u32>,
    annotations: Option<AnnotationFlags>,
    geometries: Geometries,
    overview: Overview,
    continue_straight: bool,
    waypoints: Vec<CoordinateIndex>,
    skip_waypoints: bool,
}

impl RouteRequest {
    #[inline]
    pub fn base(&self) -> &BaseParameters {
        &self.base
    }

    #[inline]
    pub fn steps(&self) -> bool {
        self.steps
    }

    /// Number of alternative routes requested, if any.
    #[inline]
    pub fn alternatives(&self) -> Option<u32> {
        self.alternatives
    }

    /// Requested annotation facets. `None` means no annotation section.
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

    #[inline]
    pub fn continue_straight(&self) -> bool {
        self.continue_straight
    }

    /// Coordinates that start or end a leg. Empty means every coordinate.
    #[inline]
    pub fn waypoints(&self) -> &[CoordinateIndex] {
        &self.waypoints
    }

    #[inline]
    pub fn skip_waypoints(&self) -> bool {
        self.skip_waypoints
    }
}

/// Builder for `RouteRequest`.
#[derive(Clone, Debug)]
pub struct RouteRequestBuilder {
    base: BaseParameters,
    steps: bool,
    alternatives: Option<u32>,
    annotations: Option<AnnotationFlags>,
    geometries: Geometries,
    overview: Overview,
    continue_straight: bool,
    waypoints: Vec<CoordinateIndex>,
    skip_waypoints: bool,
}

impl RouteRequestBuilder {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            base: BaseParameters::new(coordinates),
            steps: false,
            alternatives: None,
            annotations: None,
            geometries: Geometries::default(),
            overview: Overview::default(),
            continue_straight: false,
            waypoints: Vec::new(),
            skip_waypoints: false,
        }
    }

    base_setters!();

    pub fn set_steps(&mut self, steps: bool) -> &mut Self {
        self.steps = steps;
        self
    }

    /// Requests up to `alternatives` alternative routes. `Some(0)` requests none.
    pub fn set_alternatives(&mut self, alternatives: Option<u32>) -> &mut Self {
        self.alternatives = alternatives;
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

    pub fn set_continue_straight(&mut self, continue_straight: bool) -> &mut Self {
        self.continue_straight = continue_straight;
        self
    }

    pub fn set_waypoints<I>(&mut self, waypoints: I) -> &mut Self
    where
        I: IntoIterator<Item = CoordinateIndex>,
    {
        self.waypoints = waypoints.into_iter().collect();
        self
    }

    pub fn set_skip_waypoints(&mut self, skip_waypoints: bool) -> &mut Self {
        self.skip_waypoints = skip_waypoints;
        self
    }

    pub fn build(self) -> RouteRequest {
        RouteRequest {
            base: self.base.conform(),
            steps: self.steps,
            alternatives: self.alternatives.filter(|n| *n > 0),
            annotations: self.annotations,
            geometries: self.geometries,
            overview: self.overview,
            continue_straight: self.continue_straight,
            waypoints: self.waypoints,
            skip_waypoints: self.skip_waypoints,
        }
    }
}
