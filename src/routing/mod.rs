//! All-pairs shortest-path routing over the built transit graph
//!
//! [`AllPairsRouter`] precomputes the full distance matrix once;
//! [`TransitRouter`] wraps building, precomputation and per-query itinerary
//! assembly behind stop-name queries.

mod engine;
mod itinerary;
mod router;

pub use engine::TransitRouter;
pub use itinerary::{Itinerary, Segment, assemble_itinerary};
pub use router::{AllPairsRouter, RouteInfo};
