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

//! # Engine Responses
//!
//! Typed views of the JSON documents a routing engine answers with. They are
//! what a Rust caller gets back instead of raw text; the C interface keeps
//! handing out the text itself.
//!
//! Sections that depend on request options (`steps`, `annotations`,
//! `overview`, `generate_hints`) are optional or default to empty. Unknown
//! fields are ignored.
//!
//! ## Node Ids
//!
//! Some engines serialize large OSM node ids as floating-point numbers.
//! `nodes` lists accept both forms and truncate fractional ids.

use serde::{Deserialize, Deserializer, Serialize};

/// A snapped input coordinate.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Waypoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// `[longitude, latitude]` of the snapped location.
    pub location: [f64; 2],
    #[serde(default)]
    pub name: String,
    /// Distance in meters from the input coordinate to the snapped location.
    #[serde(default)]
    pub distance: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_nodes",
        skip_serializing_if = "Option::is_none"
    )]
    pub nodes: Option<Vec<u64>>,
}

/// A route geometry, either polyline-encoded or GeoJSON.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Geometry {
    Encoded(String),
    GeoJson(LineString),
}

/// A GeoJSON `LineString`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

/// A maneuver at the start of a step.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Maneuver {
    pub location: [f64; 2],
    #[serde(default)]
    pub bearing_before: f64,
    #[serde(default)]
    pub bearing_after: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<u32>,
}

/// One turn-by-turn instruction. Present only if steps were requested.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Step {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    pub maneuver: Maneuver,
}

/// Per-segment metadata of a leg. Each list is present only if its facet
/// was requested.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LegAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasources: Option<Vec<u32>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nodes",
        skip_serializing_if = "Option::is_none"
    )]
    pub nodes: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Vec<f64>>,
}

/// The part of a route between two consecutive waypoints.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Leg {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<LegAnnotation>,
}

/// A route through all waypoints.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Route {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub weight_name: String,
    /// Absent if the overview was disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// The answer to a route query.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl RouteResponse {
    /// Summarizes the first leg of the first route.
    ///
    /// Returns `None` if the response carries no route or the route has no
    /// legs.
    pub fn summary(&self) -> Option<SimpleRouteResponse> {
        let leg = self.routes.first()?.legs.first()?;
        Some(SimpleRouteResponse {
            code: self.code.clone(),
            distance: leg.distance,
            duration: leg.duration,
        })
    }
}

/// Distance and duration between two points.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SimpleRouteResponse {
    pub code: String,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

/// The answer to a table query.
///
/// Matrix rows follow `sources`, columns follow `destinations`. An
/// unreachable pair is `None`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TableResponse {
    pub code: String,
    #[serde(default)]
    pub sources: Vec<Waypoint>,
    #[serde(default)]
    pub destinations: Vec<Waypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durations: Option<Vec<Vec<Option<f64>>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
    /// `[row, column]` cells estimated with the fallback speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_speed_cells: Option<Vec<[usize; 2]>>,
}

/// A waypoint of a trip, with its position in the visiting order.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TripWaypoint {
    #[serde(flatten)]
    pub waypoint: Waypoint,
    pub trips_index: usize,
    pub waypoint_index: usize,
}

/// The answer to a trip query.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TripResponse {
    pub code: String,
    #[serde(default)]
    pub trips: Vec<Route>,
    #[serde(default)]
    pub waypoints: Vec<TripWaypoint>,
}

/// A matched sub-trace.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Matching {
    #[serde(flatten)]
    pub route: Route,
    /// Between `0` (low) and `1` (high).
    pub confidence: f64,
}

/// An input point of a trace, snapped onto a matching.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Tracepoint {
    #[serde(flatten)]
    pub waypoint: Waypoint,
    pub matchings_index: usize,
    pub waypoint_index: usize,
    #[serde(default)]
    pub alternatives_count: usize,
}

/// The answer to a match query.
///
/// A trace point that was dropped as an outlier is `None`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MatchResponse {
    pub code: String,
    #[serde(default)]
    pub matchings: Vec<Matching>,
    #[serde(default)]
    pub tracepoints: Vec<Option<Tracepoint>>,
}

/// The answer to a nearest query.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NearestResponse {
    pub code: String,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// The document an engine answers with when it rejects a query.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeId {
    Integer(u64),
    Float(f64),
}

impl NodeId {
    #[inline]
    fn truncate(self) -> u64 {
        match self {
            Self::Integer(id) => id,
            Self::Float(id) => id as u64,
        }
    }
}

/// Reads an optional list of node ids written as integers or floats.
///
/// `null` yields `None`; any entry that is not a number is an error.
fn deserialize_nodes<'de, D>(deserializer: D) -> Result<Option<Vec<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Option<Vec<NodeId>> = Option::deserialize(deserializer)?;
    Ok(ids.map(|ids| ids.into_iter().map(NodeId::truncate).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn waypoint(nodes: serde_json::Value) -> serde_json::Result<Waypoint> {
        serde_json::from_value(json!({
            "hint": "AAEC",
            "location": [13.388799, 52.517033],
            "name": "Friedrichstraße",
            "distance": 4.5,
            "nodes": nodes,
        }))
    }

    #[test]
    fn test_waypoint_integer_nodes() {
        let waypoint = waypoint(json!([2_264_199_819u64, 0])).unwrap();
        assert_eq!(waypoint.nodes, Some(vec![2_264_199_819, 0]));
        assert_eq!(waypoint.hint.as_deref(), Some("AAEC"));
        assert_eq!(waypoint.location, [13.388799, 52.517033]);
    }

    #[test]
    fn test_waypoint_float_nodes_are_truncated() {
        let waypoint = waypoint(json!([21_487_242.0, 1.5e10, 7.9])).unwrap();
        assert_eq!(waypoint.nodes, Some(vec![21_487_242, 15_000_000_000, 7]));
    }

    #[test]
    fn test_waypoint_null_or_missing_nodes() {
        assert_eq!(waypoint(json!(null)).unwrap().nodes, None);

        let bare: Waypoint = serde_json::from_value(json!({
            "location": [0.0, 0.0],
            "name": "",
            "distance": 0,
        }))
        .unwrap();
        assert_eq!(bare.nodes, None);
        assert_eq!(bare.hint, None);
    }

    #[test]
    fn test_waypoint_rejects_malformed_nodes() {
        assert!(waypoint(json!(["12"])).is_err());
        assert!(waypoint(json!(42)).is_err());
    }

    #[test]
    fn test_route_response() {
        let response: RouteResponse = serde_json::from_value(json!({
            "code": "Ok",
            "routes": [{
                "geometry": "mfp_I__vpAqJ`@wUrCa\\dCgGig@{DwW",
                "legs": [{
                    "steps": [],
                    "summary": "",
                    "weight": 264.1,
                    "duration": 264.1,
                    "distance": 1886.3,
                    "annotation": {
                        "distance": [5.3, 5.1],
                        "nodes": [49772551.0, 49772552],
                        "speed": [10.6, 10.2],
                    },
                }],
                "weight_name": "routability",
                "weight": 264.1,
                "duration": 264.1,
                "distance": 1886.3,
            }],
            "waypoints": [
                { "hint": "AAEC", "location": [13.388799, 52.517033], "name": "", "distance": 1.2 },
                { "location": [13.397631, 52.529432], "name": "Torstraße", "distance": 0.4 },
            ],
        }))
        .unwrap();

        assert_eq!(response.code, "Ok");
        assert_eq!(response.waypoints.len(), 2);
        let route = &response.routes[0];
        assert_eq!(
            route.geometry,
            Some(Geometry::Encoded("mfp_I__vpAqJ`@wUrCa\\dCgGig@{DwW".to_owned()))
        );
        let annotation = route.legs[0].annotation.as_ref().unwrap();
        assert_eq!(annotation.nodes, Some(vec![49_772_551, 49_772_552]));
        assert_eq!(annotation.duration, None);

        let summary = response.summary().unwrap();
        assert_eq!(summary.distance, 1886.3);
        assert_eq!(summary.duration, 264.1);
    }

    #[test]
    fn test_route_geojson_geometry_and_steps() {
        let route: Route = serde_json::from_value(json!({
            "distance": 10.0,
            "duration": 2.0,
            "geometry": { "type": "LineString", "coordinates": [[7.41, 43.73], [7.42, 43.74]] },
            "legs": [{
                "distance": 10.0,
                "duration": 2.0,
                "steps": [{
                    "distance": 10.0,
                    "duration": 2.0,
                    "name": "Boulevard du Larvotto",
                    "mode": "driving",
                    "maneuver": { "location": [7.41, 43.73], "bearing_after": 59, "type": "depart" },
                }],
            }],
        }))
        .unwrap();

        match route.geometry {
            Some(Geometry::GeoJson(ref line)) => {
                assert_eq!(line.kind, "LineString");
                assert_eq!(line.coordinates.len(), 2);
            }
            ref other => panic!("unexpected geometry: {:?}", other),
        }
        let step = &route.legs[0].steps[0];
        assert_eq!(step.maneuver.kind, "depart");
        assert_eq!(step.maneuver.bearing_after, 59.0);
        assert_eq!(step.maneuver.modifier, None);
    }

    #[test]
    fn test_summary_without_routes() {
        let response: RouteResponse =
            serde_json::from_value(json!({ "code": "Ok", "routes": [], "waypoints": [] })).unwrap();
        assert_eq!(response.summary(), None);
    }

    #[test]
    fn test_table_response_with_unreachable_cell() {
        let response: TableResponse = serde_json::from_value(json!({
            "code": "Ok",
            "sources": [{ "location": [6.1319, 49.6116], "name": "", "distance": 0.0 }],
            "destinations": [
                { "location": [6.1063, 49.7508], "name": "", "distance": 3.1 },
                { "location": [5.9675, 49.5009], "name": "", "distance": 1.0 },
            ],
            "durations": [[1210.5, null]],
        }))
        .unwrap();

        assert_eq!(response.durations, Some(vec![vec![Some(1210.5), None]]));
        assert_eq!(response.distances, None);
        assert_eq!(response.destinations.len(), 2);
        assert_eq!(response.fallback_speed_cells, None);
    }

    #[test]
    fn test_trip_response() {
        let response: TripResponse = serde_json::from_value(json!({
            "code": "Ok",
            "trips": [{ "distance": 53000.0, "duration": 3100.0, "legs": [] }],
            "waypoints": [
                { "location": [6.13, 49.61], "name": "", "distance": 0.0, "trips_index": 0, "waypoint_index": 0 },
                { "location": [6.10, 49.75], "name": "", "distance": 0.0, "trips_index": 0, "waypoint_index": 2 },
                { "location": [5.96, 49.50], "name": "", "distance": 0.0, "trips_index": 0, "waypoint_index": 1 },
            ],
        }))
        .unwrap();

        assert_eq!(response.trips.len(), 1);
        let order: Vec<usize> = response.waypoints.iter().map(|w| w.waypoint_index).collect();
        assert_eq!(order, vec![0, 2, 1]);
        assert_eq!(response.waypoints[1].waypoint.location, [6.10, 49.75]);
    }

    #[test]
    fn test_match_response_with_dropped_tracepoint() {
        let response: MatchResponse = serde_json::from_value(json!({
            "code": "Ok",
            "matchings": [{ "confidence": 0.87, "distance": 120.0, "duration": 14.0, "legs": [] }],
            "tracepoints": [
                { "location": [1.0, 2.0], "name": "", "distance": 2.0, "matchings_index": 0, "waypoint_index": 0, "alternatives_count": 1 },
                null,
                { "location": [1.1, 2.1], "name": "", "distance": 0.5, "matchings_index": 0, "waypoint_index": 1 },
            ],
        }))
        .unwrap();

        assert_eq!(response.matchings[0].confidence, 0.87);
        assert_eq!(response.matchings[0].route.distance, 120.0);
        assert!(response.tracepoints[1].is_none());
        let last = response.tracepoints[2].as_ref().unwrap();
        assert_eq!(last.alternatives_count, 0);
        assert_eq!(last.waypoint_index, 1);
    }

    #[test]
    fn test_nearest_response() {
        let response: NearestResponse = serde_json::from_value(json!({
            "code": "Ok",
            "waypoints": [{ "location": [13.38, 52.51], "name": "Unter den Linden", "distance": 3.3, "nodes": [0, 2.0] }],
        }))
        .unwrap();
        assert_eq!(response.waypoints[0].name, "Unter den Linden");
        assert_eq!(response.waypoints[0].nodes, Some(vec![0, 2]));
    }

    #[test]
    fn test_error_response() {
        let error: ErrorResponse =
            serde_json::from_value(json!({ "code": "NoSegment", "message": "Could not find a matching segment" }))
                .unwrap();
        assert_eq!(error.code, "NoSegment");
    }
}
