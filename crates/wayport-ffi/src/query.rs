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

//! # Queries
//!
//! The query entry points. Each one decodes the flat host arguments, builds
//! the request for its operation, hands it to the engine and packages the
//! outcome into a `WayportResult`.
//!
//! ## Exported API
//!
//! * `wayport_table`: Duration and distance matrices.
//! * `wayport_route`: Shortest path through coordinates in order.
//! * `wayport_trip`: Round trip through all coordinates.
//! * `wayport_match`: Snaps a trace to the road network.
//! * `wayport_nearest`: Closest road segments to a coordinate.
//!
//! ## Argument conventions
//!
//! * Arrays are passed as a pointer plus a length. Null or a zero length
//!   means "not provided".
//! * `coordinates` holds `num_coordinates` interleaved `(longitude, latitude)`
//!   pairs, `2 * num_coordinates` values in total.
//! * `bearings` holds `(value, range)` pairs; `num_bearings` counts values.
//! * Option tokens are NUL-terminated strings. Null or unknown tokens select
//!   the default of the field.
//!
//! A null handle yields code `1` with the message `"instance not found"`.

use crate::decode;
use crate::result::{boundary_raw, WayportResult};
use libc::c_char;
use wayport_engine::{engine::Engine, response::Response};
use wayport_model::options::{
    FallbackCoordinate, Gaps, Geometries, Overview, Snapping, TripDestination, TripSource,
};
use wayport_model::request::{
    matching::MatchRequestBuilder, nearest::NearestRequestBuilder, route::RouteRequestBuilder,
    table::{TableAnnotations, TableRequestBuilder},
    trip::TripRequestBuilder,
};

/// Computes duration and distance matrices.
///
/// Empty `sources` or `destinations` select every coordinate.
/// `fallback_speed` and `scale_factor` are only applied when strictly positive.
///
/// # Safety
///
/// This function is unsafe because it dereferences raw pointers.
/// `handle` must be null or a live handle. Every non-null array must hold at
/// least its stated number of elements, and every non-null string must be
/// NUL-terminated.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wayport_table(
    handle: *const Engine,
    coordinates: *const f64,
    num_coordinates: usize,
    sources: *const usize,
    num_sources: usize,
    destinations: *const usize,
    num_destinations: usize,
    include_duration: bool,
    include_distance: bool,
    bearings: *const f64,
    num_bearings: usize,
    radiuses: *const f64,
    num_radiuses: usize,
    hints: *const *const c_char,
    num_hints: usize,
    generate_hints: bool,
    approaches: *const *const c_char,
    num_approaches: usize,
    fallback_speed: f64,
    fallback_coordinate: *const c_char,
    scale_factor: f64,
    snapping: *const c_char,
) -> WayportResult {
    boundary_raw("wayport_table", || {
        let Some(engine) = handle.as_ref() else {
            return Response::instance_not_found();
        };

        let coordinates = decode::coordinates(coordinates, num_coordinates);
        let n = coordinates.len();
        let mut builder = TableRequestBuilder::new(coordinates);
        builder
            .set_bearings(decode::bearings(bearings, num_bearings, n))
            .set_radiuses(decode::radiuses(radiuses, num_radiuses, n))
            .set_hints(decode::hints(hints, num_hints, n))
            .set_approaches(decode::approaches(approaches, num_approaches, n))
            .set_generate_hints(generate_hints)
            .set_snapping(decode::option::<Snapping>(snapping))
            .set_sources(decode::indices(sources, num_sources))
            .set_destinations(decode::indices(destinations, num_destinations))
            .set_annotations(TableAnnotations::from_switches(
                include_duration,
                include_distance,
            ))
            .set_fallback_speed(decode::positive_f64(fallback_speed))
            .set_fallback_coordinate(decode::option::<FallbackCoordinate>(fallback_coordinate))
            .set_scale_factor(decode::positive_f64(scale_factor));

        Response::from_query(engine.table(&builder.build()))
    })
}

/// Computes a route through the coordinates in order.
///
/// `alternatives > 0` requests that many alternative routes. An empty
/// `annotations` list requests no annotation section; the token `"true"` or
/// `"all"` requests every facet.
///
/// # Safety
///
/// See `wayport_table`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wayport_route(
    handle: *const Engine,
    coordinates: *const f64,
    num_coordinates: usize,
    bearings: *const f64,
    num_bearings: usize,
    radiuses: *const f64,
    num_radiuses: usize,
    hints: *const *const c_char,
    num_hints: usize,
    generate_hints: bool,
    approaches: *const *const c_char,
    num_approaches: usize,
    snapping: *const c_char,
    steps: bool,
    alternatives: i32,
    annotations: *const *const c_char,
    num_annotations: usize,
    geometries: *const c_char,
    overview: *const c_char,
    continue_straight: bool,
    exclude: *const *const c_char,
    num_exclude: usize,
    waypoints: *const usize,
    num_waypoints: usize,
    skip_waypoints: bool,
) -> WayportResult {
    boundary_raw("wayport_route", || {
        let Some(engine) = handle.as_ref() else {
            return Response::instance_not_found();
        };

        let coordinates = decode::coordinates(coordinates, num_coordinates);
        let n = coordinates.len();
        let mut builder = RouteRequestBuilder::new(coordinates);
        builder
            .set_bearings(decode::bearings(bearings, num_bearings, n))
            .set_radiuses(decode::radiuses(radiuses, num_radiuses, n))
            .set_hints(decode::hints(hints, num_hints, n))
            .set_approaches(decode::approaches(approaches, num_approaches, n))
            .set_generate_hints(generate_hints)
            .set_snapping(decode::option::<Snapping>(snapping))
            .set_exclude(decode::strings(exclude, num_exclude))
            .set_steps(steps)
            .set_alternatives(decode::positive_u32(alternatives))
            .set_annotations(decode::annotations(annotations, num_annotations))
            .set_geometries(decode::option::<Geometries>(geometries))
            .set_overview(decode::option::<Overview>(overview))
            .set_continue_straight(continue_straight)
            .set_waypoints(decode::indices(waypoints, num_waypoints))
            .set_skip_waypoints(skip_waypoints);

        Response::from_query(engine.route(&builder.build()))
    })
}

/// Solves a trip through all coordinates.
///
/// `source` accepts `"first"`, `destination` accepts `"last"`; anything else
/// selects `"any"`.
///
/// # Safety
///
/// See `wayport_table`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wayport_trip(
    handle: *const Engine,
    coordinates: *const f64,
    num_coordinates: usize,
    bearings: *const f64,
    num_bearings: usize,
    radiuses: *const f64,
    num_radiuses: usize,
    hints: *const *const c_char,
    num_hints: usize,
    generate_hints: bool,
    approaches: *const *const c_char,
    num_approaches: usize,
    snapping: *const c_char,
    roundtrip: bool,
    source: *const c_char,
    destination: *const c_char,
    steps: bool,
    annotations: *const *const c_char,
    num_annotations: usize,
    geometries: *const c_char,
    overview: *const c_char,
    exclude: *const *const c_char,
    num_exclude: usize,
) -> WayportResult {
    boundary_raw("wayport_trip", || {
        let Some(engine) = handle.as_ref() else {
            return Response::instance_not_found();
        };

        let coordinates = decode::coordinates(coordinates, num_coordinates);
        let n = coordinates.len();
        let mut builder = TripRequestBuilder::new(coordinates);
        builder
            .set_bearings(decode::bearings(bearings, num_bearings, n))
            .set_radiuses(decode::radiuses(radiuses, num_radiuses, n))
            .set_hints(decode::hints(hints, num_hints, n))
            .set_approaches(decode::approaches(approaches, num_approaches, n))
            .set_generate_hints(generate_hints)
            .set_snapping(decode::option::<Snapping>(snapping))
            .set_exclude(decode::strings(exclude, num_exclude))
            .set_roundtrip(roundtrip)
            .set_source(decode::option::<TripSource>(source))
            .set_destination(decode::option::<TripDestination>(destination))
            .set_steps(steps)
            .set_annotations(decode::annotations(annotations, num_annotations))
            .set_geometries(decode::option::<Geometries>(geometries))
            .set_overview(decode::option::<Overview>(overview));

        Response::from_query(engine.trip(&builder.build()))
    })
}

/// Matches a GPS trace to the road network.
///
/// `timestamps` are seconds since the epoch, one per coordinate.
///
/// # Safety
///
/// See `wayport_table`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wayport_match(
    handle: *const Engine,
    coordinates: *const f64,
    num_coordinates: usize,
    timestamps: *const u32,
    num_timestamps: usize,
    radiuses: *const f64,
    num_radiuses: usize,
    bearings: *const f64,
    num_bearings: usize,
    hints: *const *const c_char,
    num_hints: usize,
    generate_hints: bool,
    approaches: *const *const c_char,
    num_approaches: usize,
    gaps: *const c_char,
    tidy: bool,
    waypoints: *const usize,
    num_waypoints: usize,
    snapping: *const c_char,
    steps: bool,
    annotations: *const *const c_char,
    num_annotations: usize,
    geometries: *const c_char,
    overview: *const c_char,
    exclude: *const *const c_char,
    num_exclude: usize,
) -> WayportResult {
    boundary_raw("wayport_match", || {
        let Some(engine) = handle.as_ref() else {
            return Response::instance_not_found();
        };

        let coordinates = decode::coordinates(coordinates, num_coordinates);
        let n = coordinates.len();
        let mut builder = MatchRequestBuilder::new(coordinates);
        builder
            .set_bearings(decode::bearings(bearings, num_bearings, n))
            .set_radiuses(decode::radiuses(radiuses, num_radiuses, n))
            .set_hints(decode::hints(hints, num_hints, n))
            .set_approaches(decode::approaches(approaches, num_approaches, n))
            .set_generate_hints(generate_hints)
            .set_snapping(decode::option::<Snapping>(snapping))
            .set_exclude(decode::strings(exclude, num_exclude))
            .set_timestamps(decode::timestamps(timestamps, num_timestamps, n))
            .set_gaps(decode::option::<Gaps>(gaps))
            .set_tidy(tidy)
            .set_waypoints(decode::indices(waypoints, num_waypoints))
            .set_steps(steps)
            .set_annotations(decode::annotations(annotations, num_annotations))
            .set_geometries(decode::option::<Geometries>(geometries))
            .set_overview(decode::option::<Overview>(overview));

        Response::from_query(engine.match_trace(&builder.build()))
    })
}

/// Finds the nearest road segments to a coordinate.
///
/// `number > 0` sets how many candidates are returned.
///
/// # Safety
///
/// See `wayport_table`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wayport_nearest(
    handle: *const Engine,
    coordinates: *const f64,
    num_coordinates: usize,
    bearings: *const f64,
    num_bearings: usize,
    radiuses: *const f64,
    num_radiuses: usize,
    hints: *const *const c_char,
    num_hints: usize,
    generate_hints: bool,
    number: i32,
    approaches: *const *const c_char,
    num_approaches: usize,
    snapping: *const c_char,
) -> WayportResult {
    boundary_raw("wayport_nearest", || {
        let Some(engine) = handle.as_ref() else {
            return Response::instance_not_found();
        };

        let coordinates = decode::coordinates(coordinates, num_coordinates);
        let n = coordinates.len();
        let mut builder = NearestRequestBuilder::new(coordinates);
        builder
            .set_bearings(decode::bearings(bearings, num_bearings, n))
            .set_radiuses(decode::radiuses(radiuses, num_radiuses, n))
            .set_hints(decode::hints(hints, num_hints, n))
            .set_approaches(decode::approaches(approaches, num_approaches, n))
            .set_generate_hints(generate_hints)
            .set_snapping(decode::option::<Snapping>(snapping))
            .set_number(decode::positive_u32(number));

        Response::from_query(engine.nearest(&builder.build()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{open_handle, wayport_destroy};
    use crate::result::wayport_free_string;
    use serde_json::{json, Value};
    use std::ffi::{CStr, CString};
    use std::ptr::{null, null_mut};
    use wayport_engine::{
        backend::{EngineFactory, RoutingEngine},
        engine::EngineError,
        outcome::QueryOutcome,
    };
    use wayport_model::config::EngineConfig;
    use wayport_model::request::{
        matching::MatchRequest, nearest::NearestRequest, route::RouteRequest,
        table::TableRequest, trip::TripRequest,
    };

    /// Answers every query with the request it received.
    struct Echo;

    fn echo(request: serde_json::Result<Value>) -> QueryOutcome {
        QueryOutcome::ok(request.unwrap())
    }

    impl RoutingEngine for Echo {
        fn table(&self, request: &TableRequest) -> QueryOutcome {
            echo(serde_json::to_value(request))
        }
        fn route(&self, request: &RouteRequest) -> QueryOutcome {
            echo(serde_json::to_value(request))
        }
        fn trip(&self, request: &TripRequest) -> QueryOutcome {
            echo(serde_json::to_value(request))
        }
        fn match_trace(&self, _: &MatchRequest) -> QueryOutcome {
            QueryOutcome::error("NoMatch", "Could not match the trace.")
        }
        fn nearest(&self, request: &NearestRequest) -> QueryOutcome {
            echo(serde_json::to_value(request))
        }
    }

    struct EchoFactory;

    impl EngineFactory for EchoFactory {
        fn open(&self, _: &EngineConfig) -> Result<Box<dyn RoutingEngine>, EngineError> {
            Ok(Box::new(Echo))
        }
    }

    fn handle() -> *mut Engine {
        let handle = open_handle(EngineConfig::default(), &EchoFactory);
        assert!(!handle.is_null());
        handle
    }

    fn take(result: WayportResult) -> (i32, String) {
        let message = unsafe { CStr::from_ptr(result.message) }
            .to_str()
            .unwrap()
            .to_owned();
        unsafe { wayport_free_string(result.message) };
        (result.code, message)
    }

    fn take_json(result: WayportResult) -> Value {
        let (code, message) = take(result);
        assert_eq!(code, 0, "unexpected failure: {}", message);
        serde_json::from_str(&message).unwrap()
    }

    const TWO_POINTS: [f64; 4] = [13.388, 52.517, 13.397, 52.529];

    unsafe fn route_with(
        handle: *const Engine,
        bearings: &[f64],
        annotations: &[*const c_char],
        alternatives: i32,
    ) -> WayportResult {
        wayport_route(
            handle,
            TWO_POINTS.as_ptr(),
            2,
            bearings.as_ptr(),
            bearings.len(),
            null(),
            0,
            null(),
            0,
            true,
            null(),
            0,
            null(),
            false,
            alternatives,
            annotations.as_ptr(),
            annotations.len(),
            null(),
            null(),
            false,
            null(),
            0,
            null(),
            0,
            false,
        )
    }

    #[test]
    fn test_null_handle_is_instance_not_found() {
        let result = unsafe { route_with(null(), &[], &[], 0) };
        assert_eq!(take(result), (1, "instance not found".to_owned()));

        let result = unsafe {
            wayport_nearest(
                null_mut(),
                null(),
                0,
                null(),
                0,
                null(),
                0,
                null(),
                0,
                true,
                1,
                null(),
                0,
                null(),
            )
        };
        assert_eq!(take(result), (1, "instance not found".to_owned()));
    }

    #[test]
    fn test_route_defaults() {
        let handle = handle();
        let request = take_json(unsafe { route_with(handle, &[], &[], 0) });

        assert_eq!(request["coordinates"], json!([[13.388, 52.517], [13.397, 52.529]]));
        assert_eq!(request["bearings"], Value::Null);
        assert_eq!(request["annotations"], Value::Null);
        assert_eq!(request["alternatives"], Value::Null);
        assert_eq!(request["geometries"], "polyline");
        assert_eq!(request["overview"], "simplified");
        assert_eq!(request["snapping"], "default");

        unsafe { wayport_destroy(handle) };
    }

    #[test]
    fn test_route_bearings_and_annotations() {
        let handle = handle();
        let distance = CString::new("distance").unwrap();
        let duration = CString::new("duration").unwrap();
        let request = take_json(unsafe {
            route_with(
                handle,
                &[90.0, 10.0, 180.0, 20.0],
                &[distance.as_ptr(), duration.as_ptr()],
                2,
            )
        });

        assert_eq!(
            request["bearings"],
            json!([{"value": 90, "range": 10}, {"value": 180, "range": 20}])
        );
        assert_eq!(request["annotations"], json!(["distance", "duration"]));
        assert_eq!(request["alternatives"], 2);

        unsafe { wayport_destroy(handle) };
    }

    #[test]
    fn test_route_mismatched_bearings_are_dropped() {
        let handle = handle();
        let request = take_json(unsafe { route_with(handle, &[90.0, 10.0], &[], 0) });
        assert_eq!(request["bearings"], Value::Null);
        unsafe { wayport_destroy(handle) };
    }

    #[test]
    fn test_table_switches_and_scalars() {
        let handle = handle();
        let snapped = CString::new("snapped").unwrap();
        let sources = [0usize];
        let result = unsafe {
            wayport_table(
                handle,
                TWO_POINTS.as_ptr(),
                2,
                sources.as_ptr(),
                sources.len(),
                null(),
                0,
                true,
                true,
                null(),
                0,
                [5.0, -1.0].as_ptr(),
                2,
                null(),
                0,
                false,
                null(),
                0,
                0.0,
                snapped.as_ptr(),
                1.5,
                null(),
            )
        };
        let request = take_json(result);

        assert_eq!(request["annotations"], "duration_and_distance");
        assert_eq!(request["sources"], json!([0]));
        assert_eq!(request["destinations"], json!([]));
        assert_eq!(request["radiuses"], json!([5.0, null]));
        assert_eq!(request["fallback_speed"], Value::Null);
        assert_eq!(request["fallback_coordinate"], "snapped");
        assert_eq!(request["scale_factor"], 1.5);
        assert_eq!(request["generate_hints"], false);

        unsafe { wayport_destroy(handle) };
    }

    #[test]
    fn test_trip_unknown_tokens_fall_back() {
        let handle = handle();
        let first = CString::new("first").unwrap();
        let sideways = CString::new("sideways").unwrap();
        let result = unsafe {
            wayport_trip(
                handle,
                TWO_POINTS.as_ptr(),
                2,
                null(),
                0,
                null(),
                0,
                null(),
                0,
                true,
                null(),
                0,
                null(),
                false,
                first.as_ptr(),
                sideways.as_ptr(),
                false,
                null(),
                0,
                sideways.as_ptr(),
                null(),
                null(),
                0,
            )
        };
        let request = take_json(result);

        assert_eq!(request["roundtrip"], false);
        assert_eq!(request["source"], "first");
        assert_eq!(request["destination"], "any");
        assert_eq!(request["geometries"], "polyline");

        unsafe { wayport_destroy(handle) };
    }

    #[test]
    fn test_match_error_message_is_relayed() {
        let handle = handle();
        let result = unsafe {
            wayport_match(
                handle,
                TWO_POINTS.as_ptr(),
                2,
                [1, 2].as_ptr(),
                2,
                null(),
                0,
                null(),
                0,
                null(),
                0,
                true,
                null(),
                0,
                null(),
                false,
                null(),
                0,
                null(),
                false,
                null(),
                0,
                null(),
                null(),
                null(),
                0,
            )
        };
        assert_eq!(take(result), (1, "Could not match the trace.".to_owned()));
        unsafe { wayport_destroy(handle) };
    }

    #[test]
    fn test_nearest_number() {
        let handle = handle();
        let result = unsafe {
            wayport_nearest(
                handle,
                TWO_POINTS.as_ptr(),
                1,
                null(),
                0,
                null(),
                0,
                null(),
                0,
                true,
                3,
                null(),
                0,
                null(),
            )
        };
        let request = take_json(result);
        assert_eq!(request["number"], 3);
        assert_eq!(request["coordinates"], json!([[13.388, 52.517]]));
        unsafe { wayport_destroy(handle) };
    }
}
