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

//! A recording backend shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::ffi::{CStr, CString};
use std::sync::Once;
use wayport_engine::{
    backend::{EngineFactory, PipelineStages, RoutingEngine, StageError},
    engine::EngineError,
    outcome::QueryOutcome,
};
use wayport_ffi::{result::wayport_free_string, WayportResult};
use wayport_model::{
    config::EngineConfig,
    pipeline::{ContractConfig, CustomizeConfig, ExtractConfig, PartitionConfig},
    request::{
        matching::MatchRequest, nearest::NearestRequest, route::RouteRequest,
        table::TableRequest, trip::TripRequest,
    },
};

/// Answers every query with the request it received, tagged by operation.
pub struct Recorder;

fn record(operation: &str, request: serde_json::Result<Value>) -> QueryOutcome {
    QueryOutcome::ok(json!({
        "operation": operation,
        "request": request.unwrap(),
    }))
}

impl RoutingEngine for Recorder {
    fn table(&self, request: &TableRequest) -> QueryOutcome {
        record("table", serde_json::to_value(request))
    }

    fn route(&self, request: &RouteRequest) -> QueryOutcome {
        if request.base().num_coordinates() < 2 {
            return QueryOutcome::error("InvalidQuery", "Query string malformed close to position 0");
        }
        record("route", serde_json::to_value(request))
    }

    fn trip(&self, request: &TripRequest) -> QueryOutcome {
        record("trip", serde_json::to_value(request))
    }

    fn match_trace(&self, request: &MatchRequest) -> QueryOutcome {
        record("match", serde_json::to_value(request))
    }

    fn nearest(&self, request: &NearestRequest) -> QueryOutcome {
        record("nearest", serde_json::to_value(request))
    }
}

pub struct RecorderFactory;

impl EngineFactory for RecorderFactory {
    fn open(&self, config: &EngineConfig) -> Result<Box<dyn RoutingEngine>, EngineError> {
        if config.limits().max_results_nearest == Some(13) {
            return Err(EngineError::Open("dataset checksum mismatch".to_owned()));
        }
        Ok(Box::new(Recorder))
    }
}

/// Extract echoes its configuration, partition fails with the stage's own
/// code, customize panics and contract reports nothing.
pub struct RecorderStages;

impl PipelineStages for RecorderStages {
    fn extract(&self, config: &ExtractConfig) -> Result<Value, StageError> {
        Ok(serde_json::to_value(config).unwrap())
    }

    fn partition(&self, _: &PartitionConfig) -> Result<Value, StageError> {
        Err(StageError::new(3, "graph has no edges"))
    }

    fn customize(&self, _: &CustomizeConfig) -> Result<Value, StageError> {
        panic!("cell metrics overflowed")
    }

    fn contract(&self, _: &ContractConfig) -> Result<Value, StageError> {
        Ok(Value::Null)
    }
}

/// Installs the recording backend once per test binary.
pub fn install() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        wayport_ffi::install_engine_factory(RecorderFactory).unwrap();
        wayport_ffi::install_pipeline_stages(RecorderStages).unwrap();
    });
}

/// Reads and frees a result message.
pub fn take(result: WayportResult) -> (i32, String) {
    assert!(!result.message.is_null());
    let message = unsafe { CStr::from_ptr(result.message) }
        .to_str()
        .unwrap()
        .to_owned();
    unsafe { wayport_free_string(result.message) };
    (result.code, message)
}

/// Reads a successful result as JSON.
pub fn take_json(result: WayportResult) -> Value {
    let (code, message) = take(result);
    assert_eq!(code, 0, "unexpected failure: {}", message);
    serde_json::from_str(&message).unwrap()
}

pub fn c(text: &str) -> CString {
    CString::new(text).unwrap()
}
