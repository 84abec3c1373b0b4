//! Translation of transit domain data into the weighted routing graph

mod builder;
pub(crate) mod dedup;

pub use builder::{RideInfo, TransitGraph, build_transit_graph};
