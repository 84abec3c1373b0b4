//! Shortest-travel-time routing over a static public transit network.
//!
//! The crate takes a fixed set of named stops, bus lines (circular or
//! linear), directional road distances and a vehicle timing model, and
//! answers minimum-time itinerary queries between any two stops:
//!
//! 1. [`model::TransitCatalogue`] stores the raw network data,
//! 2. [`building::build_transit_graph`] translates it into a weighted
//!    directed graph where every edge is one boarded ride,
//! 3. [`routing::AllPairsRouter`] precomputes all-pairs shortest paths once,
//! 4. [`routing::TransitRouter`] answers per-query requests and assembles
//!    rider-facing itineraries of alternating wait and ride segments.
//!
//! The network is immutable after construction; queries never mutate shared
//! state and may be served from multiple threads without coordination.

pub mod building;
pub mod error;
pub mod model;
pub mod prelude;
pub mod routing;

pub use crate::building::{RideInfo, TransitGraph, build_transit_graph};
pub use crate::error::Error;
pub use crate::model::{
    Edge, Line, LineStats, RoutingSettings, Stop, TransitCatalogue, TransitDataProvider,
    WeightedGraph,
};
pub use crate::routing::{
    AllPairsRouter, Itinerary, RouteInfo, Segment, TransitRouter, assemble_itinerary,
};

/// Index of a stop in a catalogue. Coincides with the vertex id of that stop
/// in a graph built from the same catalogue.
pub type StopId = usize;

/// Index of a line in a catalogue.
pub type LineId = usize;

/// Graph vertex identifier.
pub type VertexId = usize;

/// Graph edge identifier, assigned at insertion starting from 0.
pub type EdgeId = usize;

/// Travel or wait time in minutes.
pub type Minutes = f64;

/// Road distance in meters.
pub type Meters = u32;
