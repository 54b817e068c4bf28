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

//! # Engine Instances
//!
//! `Engine` owns one routing backend, opened from an `EngineConfig`. It is
//! created once, queried any number of times from any number of threads,
//! and releases the backend when dropped.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let engine = Engine::open(config, &factory)?;
//! let outcome = engine.route(&request);
//! let response = Response::from_query(outcome);
//! ```

use crate::{
    backend::{EngineFactory, RoutingEngine},
    outcome::QueryOutcome,
    panic::panic_message,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use wayport_model::{
    config::{ConfigError, EngineConfig},
    request::{
        matching::MatchRequest, nearest::NearestRequest, route::RouteRequest,
        table::TableRequest, trip::TripRequest, Operation, Request,
    },
};

/// The error type for bringing up an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("backend refused to open the dataset: {0}")]
    Open(String),
    #[error("backend panicked while opening the dataset: {0}")]
    Panicked(String),
}

/// An open routing engine.
pub struct Engine {
    config: EngineConfig,
    backend: Box<dyn RoutingEngine>,
}

impl Engine {
    /// Validates `config` and opens a backend with `factory`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if the configuration is rejected before the
    /// backend is involved, or the backend's own error otherwise. A panic
    /// inside the factory is reported as `EngineError::Panicked`.
    pub fn open(config: EngineConfig, factory: &dyn EngineFactory) -> Result<Self, EngineError> {
        config.validate()?;

        let backend = catch_unwind(AssertUnwindSafe(|| factory.open(&config)))
            .map_err(|payload| EngineError::Panicked(panic_message(payload)))??;

        log::info!(
            "opened routing engine (algorithm: {}, storage: {:?})",
            config.algorithm(),
            config.storage()
        );

        Ok(Self { config, backend })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self, request: &TableRequest) -> QueryOutcome {
        self.guarded(Operation::Table, |backend| backend.table(request))
    }

    pub fn route(&self, request: &RouteRequest) -> QueryOutcome {
        self.guarded(Operation::Route, |backend| backend.route(request))
    }

    pub fn trip(&self, request: &TripRequest) -> QueryOutcome {
        self.guarded(Operation::Trip, |backend| backend.trip(request))
    }

    pub fn match_trace(&self, request: &MatchRequest) -> QueryOutcome {
        self.guarded(Operation::Match, |backend| backend.match_trace(request))
    }

    pub fn nearest(&self, request: &NearestRequest) -> QueryOutcome {
        self.guarded(Operation::Nearest, |backend| backend.nearest(request))
    }

    /// Routes a request to the matching query.
    ///
    /// Preprocessing stages are not served by an engine instance; passing one
    /// yields an error outcome without contacting the backend.
    pub fn dispatch(&self, request: &Request) -> QueryOutcome {
        match request {
            Request::Table(r) => self.table(r),
            Request::Route(r) => self.route(r),
            Request::Trip(r) => self.trip(r),
            Request::Match(r) => self.match_trace(r),
            Request::Nearest(r) => self.nearest(r),
            Request::Stage(stage) => QueryOutcome::error(
                "InvalidOperation",
                format!("`{}` is a preprocessing stage, not a query", stage.name()),
            ),
        }
    }

    fn guarded<F>(&self, operation: Operation, query: F) -> QueryOutcome
    where
        F: FnOnce(&dyn RoutingEngine) -> QueryOutcome,
    {
        log::debug!("dispatching {} query", operation);
        catch_unwind(AssertUnwindSafe(|| query(self.backend.as_ref()))).unwrap_or_else(
            |payload| {
                let message = panic_message(payload);
                log::error!("{} query panicked: {}", operation, message);
                QueryOutcome::error("InternalError", message)
            },
        )
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        log::info!("releasing routing engine");
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
