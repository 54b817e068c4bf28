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

//! # Backend Installation
//!
//! The routing engine and the preprocessing stages are provided by the host
//! integration, not by this crate. Before any handle is created, the
//! integration installs them from Rust:
//!
//! ```rust,ignore
//! wayport_ffi::install_engine_factory(MyEngineFactory::new())?;
//! wayport_ffi::install_pipeline_stages(MyStages::new())?;
//! ```
//!
//! Each slot accepts one installation per process. Later attempts fail with
//! `BackendError::AlreadyInstalled` and leave the first backend in place.

use std::sync::OnceLock;
use thiserror::Error;
use wayport_engine::backend::{EngineFactory, PipelineStages};

static ENGINE_FACTORY: OnceLock<Box<dyn EngineFactory>> = OnceLock::new();
static PIPELINE_STAGES: OnceLock<Box<dyn PipelineStages>> = OnceLock::new();

/// The error type for backend installation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    /// The named slot was filled by an earlier call.
    #[error("{0} already installed")]
    AlreadyInstalled(&'static str),
}

/// Installs the factory used by `wayport_create_with_config` and `wayport_create`.
pub fn install_engine_factory<F>(factory: F) -> Result<(), BackendError>
where
    F: EngineFactory + 'static,
{
    ENGINE_FACTORY
        .set(Box::new(factory))
        .map_err(|_| BackendError::AlreadyInstalled("engine factory"))?;
    log::debug!("engine factory installed");
    Ok(())
}

/// Installs the stages used by the `wayport_run_*` functions.
pub fn install_pipeline_stages<S>(stages: S) -> Result<(), BackendError>
where
    S: PipelineStages + 'static,
{
    PIPELINE_STAGES
        .set(Box::new(stages))
        .map_err(|_| BackendError::AlreadyInstalled("pipeline stages"))?;
    log::debug!("pipeline stages installed");
    Ok(())
}

pub(crate) fn engine_factory() -> Option<&'static dyn EngineFactory> {
    ENGINE_FACTORY.get().map(Box::as_ref)
}

pub(crate) fn pipeline_stages() -> Option<&'static dyn PipelineStages> {
    PIPELINE_STAGES.get().map(Box::as_ref)
}
