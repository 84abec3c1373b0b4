//! Data model for the transit network
//!
//! Contains the domain entities (stops, lines, routing settings), the
//! catalogue that stores them, and the weighted graph they are translated
//! into.

pub mod catalogue;
pub mod graph;
pub mod types;

pub use catalogue::{LineStats, TransitCatalogue};
pub use graph::{Edge, WeightedGraph};
pub use types::{Line, RoutingSettings, Stop, TransitDataProvider};
