use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{Meters, Minutes, StopId};

/// A named stop with a geographic location.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub location: Point<f64>,
}

/// A bus line over catalogue stops.
///
/// For a circular line `stops` is the loop exactly as driven, closing stop
/// included by the caller. For a linear line it is one direction of travel;
/// the vehicle drives the sequence forward and then back.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub name: String,
    pub is_circular: bool,
    pub stops: Vec<StopId>,
}

/// Vehicle timing model used to weight graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Boarding delay in minutes, paid once per ride regardless of length.
    pub bus_wait_time: Minutes,
    /// Cruising speed in km/h.
    pub bus_velocity: f64,
}

/// Source of network data consumed by the graph builder.
///
/// Stop order is significant: stop `i` of the provider becomes vertex `i` of
/// the built graph, so implementations must keep the order stable.
pub trait TransitDataProvider {
    fn stops(&self) -> &[Stop];
    fn lines(&self) -> &[Line];

    /// Directional road distance in meters. Distances may be asymmetric;
    /// an unset pair is 0.
    fn distance(&self, from: StopId, to: StopId) -> Meters;
}
