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

//! Running the offline preprocessing stages.

use crate::{
    backend::{PipelineStages, StageError},
    panic::panic_message,
    response::Response,
};
use serde_json::{json, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use wayport_model::pipeline::StageRequest;

/// Runs one stage to completion on the calling thread and packages the result.
///
/// The stage's own failure code is preserved. A panic inside the stage is
/// reported with code `1` and the panic message.
pub fn run_stage(request: &StageRequest, stages: &dyn PipelineStages) -> Response {
    let name = request.name();
    let threads = request.threads();
    log::info!("starting {} stage with {} threads", name, threads);
    let started = Instant::now();

    let result = catch_unwind(AssertUnwindSafe(|| execute(request, stages)))
        .unwrap_or_else(|payload| Err(StageError::new(1, panic_message(payload))));

    match &result {
        Ok(_) => log::info!(
            "{} stage finished in {:.2?}",
            name,
            started.elapsed()
        ),
        Err(err) => log::error!("{} stage failed: {}", name, err),
    }

    let result = result.map(|report| match report {
        Value::Null => json!({
            "stage": name,
            "threads": threads.get(),
            "status": "ok",
        }),
        report => report,
    });
    Response::from_stage(result)
}

fn execute(request: &StageRequest, stages: &dyn PipelineStages) -> Result<Value, StageError> {
    match request {
        StageRequest::Extract(config) => stages.extract(config),
        StageRequest::Partition(config) => stages.partition(config),
        StageRequest::Customize(config) => stages.customize(config),
        StageRequest::Contract(config) => stages.contract(config),
    }
}
