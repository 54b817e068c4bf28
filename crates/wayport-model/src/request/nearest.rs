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

//! Nearest road-network locations to a coordinate.

use super::base::{base_setters, BaseParameters};
use serde::Serialize;
use wayport_core::geo::Coordinate;

/// A validated nearest request.
///
/// The engine expects exactly one coordinate; that is not checked here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NearestRequest {
    #[serde(flatten)]
    base: BaseParameters,
    number: Option<u32>,
}

impl NearestRequest {
    #[inline]
    pub fn base(&self) -> &BaseParameters {
        &self.base
    }

    /// Number of candidates to return. `None` keeps the engine default.
    #[inline]
    pub fn number(&self) -> Option<u32> {
        self.number
    }
}

/// Builder for `NearestRequest`.
#[derive(Clone, Debug)]
pub struct NearestRequestBuilder {
    base: BaseParameters,
    number: Option<u32>,
}

impl NearestRequestBuilder {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            base: BaseParameters::new(coordinates),
            number: None,
        }
    }

    base_setters!();

    pub fn set_number(&mut self, number: Option<u32>) -> &mut Self {
        self.number = number;
        self
    }

    pub fn build(self) -> NearestRequest {
        NearestRequest {
            base: self.base.conform(),
            number: self.number.filter(|n| *n > 0),
        }
    }
}
