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

//! # Requests
//!
//! One validated request type per operation, each produced by its builder.
//!
//! Builders start from the coordinate list, accept every optional attribute
//! through `set_*` methods, and finish with `build()`. Building never fails:
//! per-point arrays whose length does not match the coordinate count are
//! dropped, and numeric overrides that are not strictly positive fall back to
//! the engine default.
//!
//! ```rust
//! use wayport_core::{geo::Coordinate, optional::OptionalArray};
//! use wayport_model::request::route::RouteRequestBuilder;
//!
//! let mut builder = RouteRequestBuilder::new(vec![
//!     Coordinate::new(13.38, 52.51),
//!     Coordinate::new(13.40, 52.52),
//! ]);
//! builder
//!     .set_radiuses(OptionalArray::from_slots(vec![Some(25.0), None]))
//!     .set_steps(true);
//! let request = builder.build();
//! assert_eq!(request.base().radiuses().present_count(), 1);
//! ```

pub mod base;
pub mod matching;
pub mod nearest;
pub mod route;
pub mod table;
pub mod trip;

use crate::pipeline::StageRequest;
use serde::Serialize;

/// The operations a host can invoke.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Table,
    Route,
    Trip,
    Match,
    Nearest,
    Extract,
    Partition,
    Customize,
    Contract,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Route => "route",
            Self::Trip => "trip",
            Self::Match => "match",
            Self::Nearest => "nearest",
            Self::Extract => "extract",
            Self::Partition => "partition",
            Self::Customize => "customize",
            Self::Contract => "contract",
        }
    }

    /// Returns `true` for the offline preprocessing stages.
    pub const fn is_stage(&self) -> bool {
        matches!(
            self,
            Self::Extract | Self::Partition | Self::Customize | Self::Contract
        )
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request for any operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Request {
    Table(table::TableRequest),
    Route(route::RouteRequest),
    Trip(trip::TripRequest),
    Match(matching::MatchRequest),
    Nearest(nearest::NearestRequest),
    Stage(StageRequest),
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Table(_) => Operation::Table,
            Self::Route(_) => Operation::Route,
            Self::Trip(_) => Operation::Trip,
            Self::Match(_) => Operation::Match,
            Self::Nearest(_) => Operation::Nearest,
            Self::Stage(StageRequest::Extract(_)) => Operation::Extract,
            Self::Stage(StageRequest::Partition(_)) => Operation::Partition,
            Self::Stage(StageRequest::Customize(_)) => Operation::Customize,
            Self::Stage(StageRequest::Contract(_)) => Operation::Contract,
        }
    }
}

macro_rules! impl_from_request {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Request {
                fn from(request: $ty) -> Self {
                    Self::$variant(request)
                }
            }
        )+
    };
}

impl_from_request!(
    Table(table::TableRequest),
    Route(route::RouteRequest),
    Trip(trip::TripRequest),
    Match(matching::MatchRequest),
    Nearest(nearest::NearestRequest),
    Stage(StageRequest),
);
