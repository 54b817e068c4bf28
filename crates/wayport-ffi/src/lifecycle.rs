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

//! # Engine Lifecycle
//!
//! Construction and destruction of engine handles.
//!
//! A handle is a `*mut Engine` produced by `Box::into_raw`. The host treats it
//! as opaque and hands it back to `wayport_destroy` exactly once, which drops
//! the `Engine` and with it the backend.
//!
//! ## Exported API
//!
//! * `wayport_create_with_config`: Opens an engine from a `WayportEngineConfig`.
//! * `wayport_create`: Opens an engine from a dataset path, an algorithm token
//!   and a table size limit.
//! * `wayport_destroy`: Releases a handle.
//!
//! Construction never reports failure through a message: the reason is
//! logged and null is returned.

use crate::{backend::engine_factory, decode};
use libc::c_char;
use std::borrow::Cow;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr::null_mut;
use wayport_engine::{backend::EngineFactory, engine::Engine, panic::panic_message};
use wayport_model::config::{
    Algorithm, EngineConfig, EngineConfigBuilder, EngineLimits, FeatureDatasets,
};

/// Engine configuration as passed by the host.
///
/// Strings may be null. Numeric limits `<= 0` select the engine default.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WayportEngineConfig {
    /// `"CH"` or `"MLD"`. Null selects `CH`.
    pub algorithm: *const c_char,
    /// Serve from a shared-memory dataset instead of files.
    pub shared_memory: bool,
    /// Shared-memory dataset name. Null or empty selects the default region.
    pub dataset_name: *const c_char,
    /// Memory-map dataset files instead of loading them.
    pub mmap_memory: bool,
    /// Base path of the dataset files.
    pub path: *const c_char,
    /// Bitfield of `FeatureDatasets` to leave unloaded.
    pub disable_feature_dataset_flags: i32,
    pub max_locations_trip: i32,
    pub max_locations_viaroute: i32,
    pub max_locations_distance_table: i32,
    pub max_locations_map_matching: i32,
    pub max_radius_map_matching: f64,
    pub max_results_nearest: i32,
    pub max_alternatives: i32,
    pub default_radius: f64,
}

impl WayportEngineConfig {
    /// Decodes the record into an `EngineConfig`.
    ///
    /// # Safety
    ///
    /// Every non-null string field must point to a NUL-terminated string.
    unsafe fn decode(&self) -> EngineConfig {
        let mut builder = EngineConfigBuilder::new();
        builder.set_algorithm(decode::option::<Algorithm>(self.algorithm));

        if self.shared_memory {
            let dataset_name = decode::non_empty_text(self.dataset_name).map(Cow::into_owned);
            builder.set_shared_memory(dataset_name);
        } else {
            let path = decode::text(self.path).unwrap_or_default();
            builder.set_files(path.into_owned(), self.mmap_memory);
        }

        let bits = u32::try_from(self.disable_feature_dataset_flags).unwrap_or(0);
        builder.set_disabled_features(FeatureDatasets::from_bits_truncate(bits));

        builder.set_limits(EngineLimits {
            max_locations_trip: decode::positive_u32(self.max_locations_trip),
            max_locations_viaroute: decode::positive_u32(self.max_locations_viaroute),
            max_locations_distance_table: decode::positive_u32(self.max_locations_distance_table),
            max_locations_map_matching: decode::positive_u32(self.max_locations_map_matching),
            max_radius_map_matching: decode::positive_f64(self.max_radius_map_matching),
            max_results_nearest: decode::positive_u32(self.max_results_nearest),
            max_alternatives: decode::positive_u32(self.max_alternatives),
            default_radius: decode::positive_f64(self.default_radius),
        });

        builder.build()
    }
}

/// Opens an engine and leaks it into a handle. Failures are logged and
/// yield null.
pub(crate) fn open_handle(config: EngineConfig, factory: &dyn EngineFactory) -> *mut Engine {
    match Engine::open(config, factory) {
        Ok(engine) => Box::into_raw(Box::new(engine)),
        Err(err) => {
            log::error!("failed to create engine instance: {}", err);
            null_mut()
        }
    }
}

fn open_installed(config: EngineConfig) -> *mut Engine {
    let Some(factory) = engine_factory() else {
        log::error!("failed to create engine instance: no engine backend installed");
        return null_mut();
    };
    catch_unwind(AssertUnwindSafe(|| open_handle(config, factory))).unwrap_or_else(|payload| {
        log::error!("failed to create engine instance: {}", panic_message(payload));
        null_mut()
    })
}

/// Creates an engine from a configuration record.
///
/// Returns null if `config` is null, no engine backend is installed, the
/// configuration is rejected, or the backend fails to open.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that `config` is null or points to a valid
/// `WayportEngineConfig` whose string fields are null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn wayport_create_with_config(
    config: *const WayportEngineConfig,
) -> *mut Engine {
    let Some(config) = config.as_ref() else {
        log::error!("failed to create engine instance: configuration is null");
        return null_mut();
    };
    open_installed(config.decode())
}

/// Creates an engine from a dataset path.
///
/// Only the storage path, the algorithm and the distance table limit are
/// configured; everything else keeps its default. A `max_table_size <= 0`
/// leaves the table limit to the engine.
///
/// # Safety
///
/// This function is unsafe because it dereferences raw pointers.
/// `path` and `algorithm` must each be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn wayport_create(
    path: *const c_char,
    algorithm: *const c_char,
    max_table_size: i32,
) -> *mut Engine {
    let path = decode::text(path).unwrap_or_default();
    let config = EngineConfig::legacy(
        path.into_owned(),
        decode::option::<Algorithm>(algorithm),
        decode::positive_u32(max_table_size),
    );
    open_installed(config)
}

/// Destroys an engine handle.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that `handle` was returned by one of the create
/// functions and has not been destroyed before. Null is accepted and ignored.
#[no_mangle]
pub unsafe extern "C" fn wayport_destroy(handle: *mut Engine) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}
