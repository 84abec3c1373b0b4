//! Graph construction from transit domain data
//!
//! Every committed edge models one boarded ride: board at `from`, stay on the
//! vehicle to `to`. Collapsing multi-hop rides into single edges lets the
//! shortest-path search pay the boarding wait exactly once per ride instead
//! of once per intermediate stop.

use hashbrown::HashMap;
use log::{debug, info, warn};

use super::dedup::reduce_cheapest;
use crate::model::{Line, RoutingSettings, TransitDataProvider, WeightedGraph};
use crate::{EdgeId, Error, LineId, Minutes, StopId, VertexId};

/// One candidate ride of a line: cumulative road distance and hop count
/// between an ordered stop pair of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    distance_m: u64,
    span_count: usize,
}

/// Transit metadata for one graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RideInfo {
    pub line: LineId,
    pub board: StopId,
    pub alight: StopId,
    /// Hops between boarding and alighting along the line.
    pub span_count: usize,
}

/// A built routing graph plus the metadata needed to turn shortest paths back
/// into rider-facing itineraries.
///
/// Vertex `i` is stop `i` of the provider the graph was built from; stops no
/// line serves are isolated vertices.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    graph: WeightedGraph,
    /// Ride metadata per edge id, built in lock-step with the edge list.
    rides: Vec<RideInfo>,
    stop_names: Vec<String>,
    line_names: Vec<String>,
    vertex_index: HashMap<String, VertexId>,
    settings: RoutingSettings,
}

impl TransitGraph {
    #[must_use]
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    /// # Errors
    ///
    /// Fails if the edge id is out of range.
    pub fn ride(&self, edge: EdgeId) -> Result<&RideInfo, Error> {
        self.rides.get(edge).ok_or(Error::InvalidEdge(edge))
    }

    #[must_use]
    pub fn vertex_id(&self, stop_name: &str) -> Option<VertexId> {
        self.vertex_index.get(stop_name).copied()
    }

    #[must_use]
    pub fn stop_name(&self, vertex: VertexId) -> Option<&str> {
        self.stop_names.get(vertex).map(String::as_str)
    }

    #[must_use]
    pub fn line_name(&self, line: LineId) -> Option<&str> {
        self.line_names.get(line).map(String::as_str)
    }

    #[must_use]
    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }
}

/// Builds the routing graph from provider data.
///
/// Candidate rides are generated for every reachable ordered stop pair of
/// every line traversal, reduced to the shortest per pair within each line,
/// and committed in ascending `(from, to)` order, so edge ids are
/// deterministic for a given provider.
///
/// # Errors
///
/// Fails if a line references a stop outside the provider's stop list, if the
/// settings are unusable (non-positive velocity, negative wait time), or if a
/// computed edge weight turns out negative.
pub fn build_transit_graph(
    provider: &impl TransitDataProvider,
    settings: RoutingSettings,
) -> Result<TransitGraph, Error> {
    validate_settings(settings)?;

    let stops = provider.stops();
    let mut graph = WeightedGraph::new(stops.len());
    let mut rides = Vec::new();

    for (line_id, line) in provider.lines().iter().enumerate() {
        for &stop in &line.stops {
            if stop >= stops.len() {
                return Err(Error::UnknownStop(format!(
                    "stop id {stop} referenced by line '{}'",
                    line.name
                )));
            }
        }

        let sequence = traversal_sequence(line);
        if sequence.len() < 2 {
            warn!("line '{}' serves fewer than two stops, skipped", line.name);
            continue;
        }

        let mut candidates = Vec::new();
        for start in 0..sequence.len() - 1 {
            let mut distance_m = 0u64;
            for end in start + 1..sequence.len() {
                distance_m += u64::from(provider.distance(sequence[end - 1], sequence[end]));
                candidates.push((
                    sequence[start],
                    sequence[end],
                    Candidate {
                        distance_m,
                        span_count: end - start,
                    },
                ));
            }
        }

        let before = graph.edge_count();
        #[allow(clippy::cast_precision_loss)]
        let rides_kept = reduce_cheapest(candidates, |candidate| candidate.distance_m as f64);
        for ((from, to), candidate) in rides_kept {
            let weight = ride_weight(settings, candidate.distance_m);
            graph.add_edge(from, to, weight)?;
            rides.push(RideInfo {
                line: line_id,
                board: from,
                alight: to,
                span_count: candidate.span_count,
            });
        }
        debug!(
            "line '{}': traversal of {} stops, {} edges",
            line.name,
            sequence.len(),
            graph.edge_count() - before
        );
    }

    info!(
        "transit graph built: {} stops, {} lines, {} edges",
        stops.len(),
        provider.lines().len(),
        graph.edge_count()
    );

    let stop_names: Vec<String> = stops.iter().map(|stop| stop.name.clone()).collect();
    let vertex_index = stop_names
        .iter()
        .enumerate()
        .map(|(vertex, name)| (name.clone(), vertex))
        .collect();

    Ok(TransitGraph {
        graph,
        rides,
        stop_names,
        line_names: provider.lines().iter().map(|line| line.name.clone()).collect(),
        vertex_index,
        settings,
    })
}

/// The stop sequence a vehicle actually drives: a circular line's list as
/// given, a linear line's list forward then back without repeating the far
/// endpoint.
fn traversal_sequence(line: &Line) -> Vec<StopId> {
    let mut sequence = line.stops.clone();
    if !line.is_circular {
        sequence.extend(line.stops.iter().rev().skip(1));
    }
    sequence
}

/// Ride time in minutes: boarding wait plus road time at cruising speed.
#[allow(clippy::cast_precision_loss)]
fn ride_weight(settings: RoutingSettings, distance_m: u64) -> Minutes {
    let speed_m_per_min = settings.bus_velocity * 1000.0 / 60.0;
    settings.bus_wait_time + distance_m as f64 / speed_m_per_min
}

fn validate_settings(settings: RoutingSettings) -> Result<(), Error> {
    if !settings.bus_velocity.is_finite() || settings.bus_velocity <= 0.0 {
        return Err(Error::InvalidData(format!(
            "bus velocity must be positive, got {}",
            settings.bus_velocity
        )));
    }
    if !settings.bus_wait_time.is_finite() || settings.bus_wait_time < 0.0 {
        return Err(Error::InvalidData(format!(
            "bus wait time must be non-negative, got {}",
            settings.bus_wait_time
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::*;
    use crate::model::Stop;
    use crate::{Edge, Meters};

    struct TestProvider {
        stops: Vec<Stop>,
        lines: Vec<Line>,
        distances: HashMap<(StopId, StopId), Meters>,
    }

    impl TestProvider {
        fn new(stop_names: &[&str]) -> Self {
            Self {
                stops: stop_names
                    .iter()
                    .map(|name| Stop {
                        name: (*name).to_string(),
                        location: geo::Point::new(0.0, 0.0),
                    })
                    .collect(),
                lines: Vec::new(),
                distances: HashMap::new(),
            }
        }

        fn line(mut self, name: &str, is_circular: bool, stops: &[StopId]) -> Self {
            self.lines.push(Line {
                name: name.to_string(),
                is_circular,
                stops: stops.to_vec(),
            });
            self
        }

        fn distance_m(mut self, from: StopId, to: StopId, meters: Meters) -> Self {
            self.distances.insert((from, to), meters);
            self
        }
    }

    impl TransitDataProvider for TestProvider {
        fn stops(&self) -> &[Stop] {
            &self.stops
        }

        fn lines(&self) -> &[Line] {
            &self.lines
        }

        fn distance(&self, from: StopId, to: StopId) -> Meters {
            self.distances
                .get(&(from, to))
                .or_else(|| self.distances.get(&(to, from)))
                .copied()
                .unwrap_or(0)
        }
    }

    // 60 km/h = 1000 m/min, so road minutes equal kilometers.
    fn settings() -> RoutingSettings {
        RoutingSettings {
            bus_wait_time: 5.0,
            bus_velocity: 60.0,
        }
    }

    fn edges_between(transit: &TransitGraph, from: &str, to: &str) -> Vec<(Edge, RideInfo)> {
        let from = transit.vertex_id(from).unwrap();
        let to = transit.vertex_id(to).unwrap();
        (0..transit.graph().edge_count())
            .map(|id| (*transit.graph().edge(id).unwrap(), *transit.ride(id).unwrap()))
            .filter(|(edge, _)| edge.from == from && edge.to == to)
            .collect()
    }

    #[test]
    fn circular_line_collapses_multi_hop_rides() {
        let provider = TestProvider::new(&["A", "B", "C"])
            .distance_m(0, 1, 1000)
            .distance_m(1, 2, 1000)
            .distance_m(2, 0, 1000)
            .line("14", true, &[0, 1, 2, 0]);
        let transit = build_transit_graph(&provider, settings()).unwrap();

        let [(ab, ab_ride)] = edges_between(&transit, "A", "B")[..] else {
            panic!("expected exactly one A -> B edge");
        };
        assert!((ab.weight - 6.0).abs() < 1e-9);
        assert_eq!(ab_ride.span_count, 1);

        // The direct two-hop ride pays the wait once: 5 + 2, not 2 * 6.
        let [(ac, ac_ride)] = edges_between(&transit, "A", "C")[..] else {
            panic!("expected exactly one A -> C edge");
        };
        assert!((ac.weight - 7.0).abs() < 1e-9);
        assert_eq!(ac_ride.span_count, 2);

        let [(ca, _)] = edges_between(&transit, "C", "A")[..] else {
            panic!("expected exactly one C -> A edge");
        };
        assert!((ca.weight - 6.0).abs() < 1e-9);
    }

    #[test]
    fn linear_line_generates_return_direction() {
        let provider = TestProvider::new(&["X", "Y", "Z"])
            .distance_m(0, 1, 1000)
            .distance_m(1, 2, 1000)
            .line("9", false, &[0, 1, 2]);
        let transit = build_transit_graph(&provider, settings()).unwrap();

        for (from, to) in [("Z", "Y"), ("Z", "X"), ("Y", "X")] {
            assert_eq!(edges_between(&transit, from, to).len(), 1, "{from} -> {to}");
        }
        let [(zx, zx_ride)] = edges_between(&transit, "Z", "X")[..] else {
            panic!("expected exactly one Z -> X edge");
        };
        assert!((zx.weight - 7.0).abs() < 1e-9);
        assert_eq!(zx_ride.span_count, 2);
    }

    #[test]
    fn repeated_pair_keeps_the_shorter_ride() {
        // On the doubled traversal X Y Z Y X the pair (X, Y) is covered both
        // by the direct hop (1000 m) and by the ride around the far end
        // (1000 + 800 + 800 m); only the direct hop may survive.
        let provider = TestProvider::new(&["X", "Y", "Z"])
            .distance_m(0, 1, 1000)
            .distance_m(1, 2, 800)
            .line("9", false, &[0, 1, 2]);
        let transit = build_transit_graph(&provider, settings()).unwrap();

        let [(xy, xy_ride)] = edges_between(&transit, "X", "Y")[..] else {
            panic!("expected exactly one X -> Y edge");
        };
        assert!((xy.weight - 6.0).abs() < 1e-9);
        assert_eq!(xy_ride.span_count, 1);
    }

    #[test]
    fn distances_are_looked_up_directionally() {
        let provider = TestProvider::new(&["X", "Y"])
            .distance_m(0, 1, 1000)
            .distance_m(1, 0, 3000)
            .line("9", false, &[0, 1]);
        let transit = build_transit_graph(&provider, settings()).unwrap();

        let [(xy, _)] = edges_between(&transit, "X", "Y")[..] else {
            panic!("expected exactly one X -> Y edge");
        };
        let [(yx, _)] = edges_between(&transit, "Y", "X")[..] else {
            panic!("expected exactly one Y -> X edge");
        };
        assert!((xy.weight - 6.0).abs() < 1e-9);
        assert!((yx.weight - 8.0).abs() < 1e-9);
    }

    #[test]
    fn short_lines_contribute_nothing() {
        let provider = TestProvider::new(&["X", "Y"])
            .line("empty", true, &[])
            .line("lonely", false, &[0]);
        let transit = build_transit_graph(&provider, settings()).unwrap();
        assert_eq!(transit.graph().edge_count(), 0);
        assert_eq!(transit.graph().vertex_count(), 2);
    }

    #[test]
    fn out_of_range_stop_fails_construction() {
        let provider = TestProvider::new(&["X"]).line("9", false, &[0, 7]);
        assert!(matches!(
            build_transit_graph(&provider, settings()),
            Err(Error::UnknownStop(_))
        ));
    }

    #[test]
    fn unusable_settings_fail_construction() {
        let provider = TestProvider::new(&["X", "Y"]).line("9", false, &[0, 1]);
        for bad in [
            RoutingSettings { bus_wait_time: 5.0, bus_velocity: 0.0 },
            RoutingSettings { bus_wait_time: 5.0, bus_velocity: -10.0 },
            RoutingSettings { bus_wait_time: -1.0, bus_velocity: 60.0 },
        ] {
            assert!(matches!(
                build_transit_graph(&provider, bad),
                Err(Error::InvalidData(_))
            ));
        }
    }

    #[test]
    fn parallel_lines_keep_their_own_edges() {
        // Dedup is per line: two lines covering the same pair both commit an
        // edge, and the router later picks the cheaper one.
        let provider = TestProvider::new(&["X", "Y"])
            .distance_m(0, 1, 1000)
            .line("fast", true, &[0, 1])
            .line("slow", true, &[0, 1]);
        let transit = build_transit_graph(&provider, settings()).unwrap();
        assert_eq!(edges_between(&transit, "X", "Y").len(), 2);
    }

    #[test]
    fn metadata_is_indexed_by_edge_id() {
        let provider = TestProvider::new(&["X", "Y", "Z"])
            .distance_m(0, 1, 1000)
            .distance_m(1, 2, 1000)
            .line("9", false, &[0, 1, 2]);
        let transit = build_transit_graph(&provider, settings()).unwrap();

        for id in 0..transit.graph().edge_count() {
            let edge = transit.graph().edge(id).unwrap();
            let ride = transit.ride(id).unwrap();
            assert_eq!(ride.board, edge.from);
            assert_eq!(ride.alight, edge.to);
            assert!(ride.span_count >= 1);
            assert_eq!(transit.line_name(ride.line), Some("9"));
        }
        assert!(transit.ride(transit.graph().edge_count()).is_err());
    }
}
