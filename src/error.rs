use thiserror::Error;

use crate::{EdgeId, Minutes, VertexId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A line references a stop the catalogue does not know. Construction
    /// fails immediately; a malformed network is a configuration bug.
    #[error("unknown stop: {0}")]
    UnknownStop(String),
    /// A query named a stop that is not a vertex of the built graph. Distinct
    /// from a missing route, which is a valid `None` result.
    #[error("stop not found: {0}")]
    StopNotFound(String),
    #[error("vertex id {0} is out of range")]
    InvalidVertex(VertexId),
    #[error("edge id {0} is out of range")]
    InvalidEdge(EdgeId),
    /// The relaxation algorithm assumes non-negative weights; a negative one
    /// fails construction rather than silently producing wrong routes.
    #[error("negative weight {weight} on edge {from} -> {to}")]
    NegativeWeight {
        from: VertexId,
        to: VertexId,
        weight: Minutes,
    },
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// The precomputed matrix violated its own invariants during path
    /// reconstruction.
    #[error("route matrix corrupt: {0}")]
    CorruptMatrix(String),
}
