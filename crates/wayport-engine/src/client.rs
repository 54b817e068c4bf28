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

//! # Typed Client
//!
//! `Client` wraps an `Engine` for Rust callers. Each query returns the
//! decoded response document, or a `ClientError` that says whether the
//! engine rejected the query or answered with something unreadable.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = Client::open(config, &factory)?;
//! let summary = client.simple_route(from, to)?;
//! println!("{} m in {} s", summary.distance, summary.duration);
//! ```

use crate::{
    backend::EngineFactory,
    engine::{Engine, EngineError},
    outcome::{QueryOutcome, QueryStatus},
};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use wayport_core::geo::Coordinate;
use wayport_model::{
    config::EngineConfig,
    request::{
        matching::MatchRequest,
        nearest::NearestRequest,
        route::{RouteRequest, RouteRequestBuilder},
        table::TableRequest,
        trip::TripRequest,
        Operation,
    },
    response::{
        ErrorResponse, MatchResponse, NearestResponse, RouteResponse, SimpleRouteResponse,
        TableResponse, TripResponse,
    },
};

/// The error type for typed queries.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0} request has no coordinates")]
    NoCoordinates(Operation),
    #[error("{code}: {message}")]
    Rejected { code: String, message: String },
    #[error("malformed {operation} response: {source}")]
    Malformed {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("no route between the two points")]
    NoRoute,
}

impl ClientError {
    /// Returns the engine's error code if the engine rejected the query.
    pub fn rejection_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// An engine that answers with typed responses.
#[derive(Debug)]
pub struct Client {
    engine: Engine,
}

impl Client {
    /// Opens an engine and wraps it.
    ///
    /// # Errors
    ///
    /// See `Engine::open`.
    pub fn open(config: EngineConfig, factory: &dyn EngineFactory) -> Result<Self, ClientError> {
        Ok(Self::new(Engine::open(config, factory)?))
    }

    #[inline]
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    #[inline]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[inline]
    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn table(&self, request: &TableRequest) -> Result<TableResponse, ClientError> {
        decode(Operation::Table, self.engine.table(request))
    }

    pub fn route(&self, request: &RouteRequest) -> Result<RouteResponse, ClientError> {
        require_coordinates(Operation::Route, request.base().num_coordinates())?;
        decode(Operation::Route, self.engine.route(request))
    }

    pub fn trip(&self, request: &TripRequest) -> Result<TripResponse, ClientError> {
        require_coordinates(Operation::Trip, request.base().num_coordinates())?;
        decode(Operation::Trip, self.engine.trip(request))
    }

    pub fn match_trace(&self, request: &MatchRequest) -> Result<MatchResponse, ClientError> {
        require_coordinates(Operation::Match, request.base().num_coordinates())?;
        decode(Operation::Match, self.engine.match_trace(request))
    }

    pub fn nearest(&self, request: &NearestRequest) -> Result<NearestResponse, ClientError> {
        decode(Operation::Nearest, self.engine.nearest(request))
    }

    /// Routes from `from` to `to` with default options and returns the
    /// distance and duration of the first route.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NoRoute` if the engine answers without a route.
    pub fn simple_route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<SimpleRouteResponse, ClientError> {
        let request = RouteRequestBuilder::new(vec![from, to]).build();
        self.route(&request)?.summary().ok_or(ClientError::NoRoute)
    }
}

impl From<Engine> for Client {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}

fn require_coordinates(operation: Operation, count: usize) -> Result<(), ClientError> {
    if count == 0 {
        return Err(ClientError::NoCoordinates(operation));
    }
    Ok(())
}

fn decode<T>(operation: Operation, outcome: QueryOutcome) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let (status, payload) = outcome.into_parts();
    match status {
        QueryStatus::Ok => serde_json::from_value(payload)
            .map_err(|source| ClientError::Malformed { operation, source }),
        QueryStatus::Error => {
            let error = ErrorResponse::deserialize(&payload).unwrap_or_else(|_| ErrorResponse {
                code: QueryStatus::Error.as_str().to_owned(),
                message: payload.to_string(),
            });
            log::debug!("{} query rejected: {}", operation, error.code);
            Err(ClientError::Rejected {
                code: error.code,
                message: error.message,
            })
        }
    }
}
