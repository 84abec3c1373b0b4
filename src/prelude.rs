// Re-export key components
pub use crate::building::{RideInfo, TransitGraph, build_transit_graph};
pub use crate::error::Error;
pub use crate::model::{
    Edge, Line, LineStats, RoutingSettings, Stop, TransitCatalogue, TransitDataProvider,
    WeightedGraph,
};
pub use crate::routing::{
    AllPairsRouter, Itinerary, RouteInfo, Segment, TransitRouter, assemble_itinerary,
};

// Core identifier and unit types
pub use crate::EdgeId;
pub use crate::LineId;
pub use crate::Meters;
pub use crate::Minutes;
pub use crate::StopId;
pub use crate::VertexId;
