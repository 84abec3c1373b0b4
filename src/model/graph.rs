//! Build-once directed weighted graph

use crate::{EdgeId, Error, Minutes, VertexId};

/// A directed edge weighted with travel time in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Minutes,
}

/// Directed weighted graph with a fixed vertex count and an append-only edge
/// list.
///
/// Vertices are plain indices `0..vertex_count`. Edge ids are assigned
/// monotonically at insertion, starting at 0, and stay valid for the life of
/// the graph: no removal or weight mutation is exposed.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    edges: Vec<Edge>,
    /// Outgoing edge ids per vertex, in insertion order.
    incidence: Vec<Vec<EdgeId>>,
}

impl WeightedGraph {
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Appends an edge and returns its id.
    ///
    /// # Errors
    ///
    /// Fails if either endpoint is out of range or the weight is negative.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Minutes) -> Result<EdgeId, Error> {
        if from >= self.vertex_count() {
            return Err(Error::InvalidVertex(from));
        }
        if to >= self.vertex_count() {
            return Err(Error::InvalidVertex(to));
        }
        if weight < 0.0 {
            return Err(Error::NegativeWeight { from, to, weight });
        }

        let id = self.edges.len();
        self.edges.push(Edge { from, to, weight });
        self.incidence[from].push(id);
        Ok(id)
    }

    /// # Errors
    ///
    /// Fails if the id was never assigned by [`WeightedGraph::add_edge`].
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, Error> {
        self.edges.get(id).ok_or(Error::InvalidEdge(id))
    }

    /// Ids of all edges leaving `vertex`, in insertion order.
    ///
    /// # Errors
    ///
    /// Fails if the vertex is out of range.
    pub fn incident_edges(&self, vertex: VertexId) -> Result<&[EdgeId], Error> {
        self.incidence
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or(Error::InvalidVertex(vertex))
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
