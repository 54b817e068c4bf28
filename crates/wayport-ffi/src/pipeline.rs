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

//! # Preprocessing Pipeline
//!
//! Entry points for the four offline stages that prepare a dataset before it
//! can be served: extract, then partition and customize (MLD) or contract (CH).
//!
//! ## Exported API
//!
//! * `wayport_run_extract`: Builds the routing graph from map data and a profile.
//! * `wayport_run_partition`: Splits the graph into nested cells.
//! * `wayport_run_customize`: Computes cell metrics for a partitioned graph.
//! * `wayport_run_contract`: Builds the contraction hierarchy.
//!
//! Each call blocks until the stage has finished. A `threads <= 0` uses the
//! detected hardware parallelism. The stage's own failure code is returned
//! unchanged; a panic inside the stage becomes code `1`.

use crate::backend::pipeline_stages;
use crate::decode;
use crate::result::{boundary_raw, WayportResult};
use libc::c_char;
use wayport_engine::{response::Response, stage::run_stage};
use wayport_model::pipeline::{
    ContractConfig, CustomizeConfig, ExtractConfig, PartitionConfig, StageRequest,
};

const NO_BACKEND: &str = "no pipeline backend installed";

fn run(request: StageRequest) -> Response {
    match pipeline_stages() {
        Some(stages) => run_stage(&request, stages),
        None => {
            log::error!("cannot run {} stage: {}", request.name(), NO_BACKEND);
            Response::failure(Response::FAILURE, NO_BACKEND)
        }
    }
}

/// Reads a path argument; null reads as empty.
unsafe fn path(ptr: *const c_char) -> String {
    decode::text(ptr).unwrap_or_default().into_owned()
}

#[allow(clippy::too_many_arguments)]
unsafe fn extract_request(
    input_path: *const c_char,
    profile_path: *const c_char,
    threads: i32,
    parse_conditionals: bool,
    use_metadata: bool,
    use_locations_cache: bool,
    dump_nbg_graph: bool,
    small_component_size: i32,
) -> StageRequest {
    let mut config = ExtractConfig::new(path(input_path), path(profile_path), threads.into())
        .with_small_component_size(small_component_size.into());
    config.parse_conditionals = parse_conditionals;
    config.use_metadata = use_metadata;
    config.use_locations_cache = use_locations_cache;
    config.dump_nbg_graph = dump_nbg_graph;
    StageRequest::Extract(config)
}

#[allow(clippy::too_many_arguments)]
unsafe fn partition_request(
    base_path: *const c_char,
    threads: i32,
    balance: f64,
    boundary_factor: f64,
    num_optimizing_cuts: i32,
    small_component_size: i32,
    max_cell_sizes: *const i32,
    num_max_cell_sizes: usize,
) -> StageRequest {
    let cell_sizes: Vec<i64> = decode::slice(max_cell_sizes, num_max_cell_sizes)
        .iter()
        .map(|s| i64::from(*s))
        .collect();
    let config = PartitionConfig::new(path(base_path), threads.into()).with_tuning(
        balance,
        boundary_factor,
        num_optimizing_cuts.into(),
        small_component_size.into(),
        &cell_sizes,
    );
    StageRequest::Partition(config)
}

/// Runs the extraction stage.
///
/// # Safety
///
/// This function is unsafe because it dereferences raw pointers.
/// `input_path` and `profile_path` must each be null or NUL-terminated.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wayport_run_extract(
    input_path: *const c_char,
    profile_path: *const c_char,
    threads: i32,
    parse_conditionals: bool,
    use_metadata: bool,
    use_locations_cache: bool,
    dump_nbg_graph: bool,
    small_component_size: i32,
) -> WayportResult {
    boundary_raw("wayport_run_extract", || {
        run(extract_request(
            input_path,
            profile_path,
            threads,
            parse_conditionals,
            use_metadata,
            use_locations_cache,
            dump_nbg_graph,
            small_component_size,
        ))
    })
}

/// Runs the partitioning stage.
///
/// Non-positive tuning values keep their defaults. `max_cell_sizes` is used
/// only if it is non-empty and every entry is strictly positive.
///
/// # Safety
///
/// This function is unsafe because it dereferences raw pointers.
/// `base_path` must be null or NUL-terminated, and a non-null
/// `max_cell_sizes` must hold `num_max_cell_sizes` values.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wayport_run_partition(
    base_path: *const c_char,
    threads: i32,
    balance: f64,
    boundary_factor: f64,
    num_optimizing_cuts: i32,
    small_component_size: i32,
    max_cell_sizes: *const i32,
    num_max_cell_sizes: usize,
) -> WayportResult {
    boundary_raw("wayport_run_partition", || {
        run(partition_request(
            base_path,
            threads,
            balance,
            boundary_factor,
            num_optimizing_cuts,
            small_component_size,
            max_cell_sizes,
            num_max_cell_sizes,
        ))
    })
}

/// Runs the customization stage.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// `base_path` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn wayport_run_customize(
    base_path: *const c_char,
    threads: i32,
) -> WayportResult {
    boundary_raw("wayport_run_customize", || {
        let config = CustomizeConfig::new(path(base_path), threads.into());
        run(StageRequest::Customize(config))
    })
}

/// Runs the contraction stage.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// `base_path` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn wayport_run_contract(
    base_path: *const c_char,
    threads: i32,
) -> WayportResult {
    boundary_raw("wayport_run_contract", || {
        let config = ContractConfig::new(path(base_path), threads.into());
        run(StageRequest::Contract(config))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::path::Path;
    use std::ptr::null;
    use wayport_model::pipeline::Threads;

    #[test]
    fn test_extract_request_flags() {
        let input = CString::new("berlin.osm.pbf").unwrap();
        let profile = CString::new("car.lua").unwrap();
        let request = unsafe {
            extract_request(input.as_ptr(), profile.as_ptr(), 4, true, false, false, true, 0)
        };
        let StageRequest::Extract(config) = request else {
            panic!("expected an extract request");
        };
        assert_eq!(config.input_path, Path::new("berlin.osm.pbf"));
        assert_eq!(config.profile_path, Path::new("car.lua"));
        assert_eq!(config.threads.get(), 4);
        assert!(config.parse_conditionals);
        assert!(!config.use_metadata);
        assert!(!config.use_locations_cache);
        assert!(config.dump_nbg_graph);
        assert_eq!(config.small_component_size, 1000);
    }

    #[test]
    fn test_partition_request_cell_sizes() {
        let base = CString::new("berlin.osrm").unwrap();
        let sizes = [64, 1024];
        let request = unsafe {
            partition_request(base.as_ptr(), 0, -1.0, 0.5, 20, -3, sizes.as_ptr(), sizes.len())
        };
        let StageRequest::Partition(config) = request else {
            panic!("expected a partition request");
        };
        assert_eq!(config.threads, Threads::available());
        assert_eq!(config.balance, PartitionConfig::DEFAULT_BALANCE);
        assert_eq!(config.boundary_factor, 0.5);
        assert_eq!(config.num_optimizing_cuts, 20);
        assert_eq!(config.small_component_size, 1000);
        assert_eq!(config.max_cell_sizes, vec![64, 1024]);
    }

    #[test]
    fn test_partition_request_without_cell_sizes() {
        let request = unsafe { partition_request(null(), 1, 0.0, 0.0, 0, 0, null(), 0) };
        let StageRequest::Partition(config) = request else {
            panic!("expected a partition request");
        };
        assert_eq!(config.base_path, Path::new(""));
        assert_eq!(
            config.max_cell_sizes,
            PartitionConfig::DEFAULT_MAX_CELL_SIZES.to_vec()
        );
    }
}
