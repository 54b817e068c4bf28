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

//! # Backend Seams
//!
//! The routing engine and the preprocessing stages are external services.
//! These traits are the only contact surface: a backend receives a fully
//! validated request and returns a structured result. It never sees raw
//! host input.

use crate::{engine::EngineError, outcome::QueryOutcome};
use serde_json::Value;
use thiserror::Error;
use wayport_model::{
    config::EngineConfig,
    pipeline::{ContractConfig, CustomizeConfig, ExtractConfig, PartitionConfig},
    request::{
        matching::MatchRequest, nearest::NearestRequest, route::RouteRequest,
        table::TableRequest, trip::TripRequest,
    },
};

/// A loaded routing engine.
///
/// Implementations must tolerate concurrent queries from several threads.
pub trait RoutingEngine: Send + Sync {
    fn table(&self, request: &TableRequest) -> QueryOutcome;
    fn route(&self, request: &RouteRequest) -> QueryOutcome;
    fn trip(&self, request: &TripRequest) -> QueryOutcome;
    fn match_trace(&self, request: &MatchRequest) -> QueryOutcome;
    fn nearest(&self, request: &NearestRequest) -> QueryOutcome;
}

/// Brings up routing engines.
pub trait EngineFactory: Send + Sync {
    fn open(&self, config: &EngineConfig) -> Result<Box<dyn RoutingEngine>, EngineError>;
}

/// A failed preprocessing stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} (code {code})")]
pub struct StageError {
    pub code: i32,
    pub message: String,
}

impl StageError {
    pub fn new<M>(code: i32, message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The four offline preprocessing stages.
///
/// A successful stage may return any document describing its work, or
/// `Value::Null` if it has nothing to report.
pub trait PipelineStages: Send + Sync {
    fn extract(&self, config: &ExtractConfig) -> Result<Value, StageError>;
    fn partition(&self, config: &PartitionConfig) -> Result<Value, StageError>;
    fn customize(&self, config: &CustomizeConfig) -> Result<Value, StageError>;
    fn contract(&self, config: &ContractConfig) -> Result<Value, StageError>;
}
