//! All-pairs shortest paths with predecessor-edge reconstruction

use log::info;

use crate::building::dedup::reduce_cheapest;
use crate::model::WeightedGraph;
use crate::{EdgeId, Error, Minutes, VertexId};

/// One matrix cell: best known weight for the pair and the last edge of the
/// best known path. `prev_edge` is `None` only on the diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RouteEntry {
    weight: Minutes,
    prev_edge: Option<EdgeId>,
}

/// A point-to-point query result: total weight and the path's edge ids in
/// travel order. Empty `edges` means source equals destination.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub weight: Minutes,
    pub edges: Vec<EdgeId>,
}

/// All-pairs shortest-path router over a [`WeightedGraph`].
///
/// Precomputed once by triangle relaxation (Floyd–Warshall, O(V³) time,
/// O(V²) memory); afterwards [`AllPairsRouter::build_route`] answers any pair
/// in O(path length) without mutating anything, so queries are safe to serve
/// from multiple threads.
#[derive(Debug, Clone)]
pub struct AllPairsRouter {
    vertex_count: usize,
    /// Row-major `vertex_count * vertex_count` matrix; `None` means no path
    /// is known for the pair.
    matrix: Vec<Option<RouteEntry>>,
    /// Source vertex per edge id, for walking predecessor chains.
    edge_tails: Vec<VertexId>,
}

impl AllPairsRouter {
    /// Runs the one-time precomputation for `graph`.
    ///
    /// # Errors
    ///
    /// Fails if an edge with negative weight is encountered; the relaxation
    /// is only correct for non-negative weights, so construction fails fast
    /// instead of producing silently wrong routes.
    pub fn precompute(graph: &WeightedGraph) -> Result<Self, Error> {
        let vertex_count = graph.vertex_count();
        let mut router = Self {
            vertex_count,
            matrix: vec![None; vertex_count * vertex_count],
            edge_tails: (0..graph.edge_count())
                .map(|id| graph.edge(id).map(|edge| edge.from))
                .collect::<Result<_, _>>()?,
        };

        router.initialize(graph)?;
        for via in 0..vertex_count {
            router.relax_through(via);
        }

        info!(
            "all-pairs matrix ready: {} vertices, {} reachable pairs",
            vertex_count,
            router.matrix.iter().filter(|cell| cell.is_some()).count()
        );
        Ok(router)
    }

    /// Cheapest path from `from` to `to`, or `Ok(None)` if the vertices are
    /// not connected. `build_route(v, v)` is weight 0 with no edges.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range vertex, or if the matrix turns out to violate
    /// its invariants while the predecessor chain is walked.
    pub fn build_route(&self, from: VertexId, to: VertexId) -> Result<Option<RouteInfo>, Error> {
        if from >= self.vertex_count {
            return Err(Error::InvalidVertex(from));
        }
        if to >= self.vertex_count {
            return Err(Error::InvalidVertex(to));
        }
        let Some(entry) = self.get(from, to) else {
            return Ok(None);
        };

        // Walk predecessor edges backwards from `to`. A well-formed matrix
        // chains at most vertex_count edges; the bound turns a corrupt matrix
        // into an error instead of an infinite loop.
        let mut edges = Vec::new();
        let mut prev = entry.prev_edge;
        while let Some(edge_id) = prev {
            if edges.len() >= self.vertex_count {
                return Err(Error::CorruptMatrix(format!(
                    "predecessor chain for ({from}, {to}) exceeds {} edges",
                    self.vertex_count
                )));
            }
            edges.push(edge_id);

            let tail = *self
                .edge_tails
                .get(edge_id)
                .ok_or(Error::InvalidEdge(edge_id))?;
            prev = self
                .get(from, tail)
                .ok_or_else(|| {
                    Error::CorruptMatrix(format!("missing intermediate entry ({from}, {tail})"))
                })?
                .prev_edge;
        }
        edges.reverse();

        Ok(Some(RouteInfo {
            weight: entry.weight,
            edges,
        }))
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// One entry per outgoing edge, reduced to the cheapest of parallel
    /// edges (different lines may cover the same stop pair), plus the zero
    /// diagonal.
    fn initialize(&mut self, graph: &WeightedGraph) -> Result<(), Error> {
        let mut candidates = Vec::with_capacity(graph.edge_count());
        for from in 0..self.vertex_count {
            for &edge_id in graph.incident_edges(from)? {
                let edge = graph.edge(edge_id)?;
                if edge.weight < 0.0 {
                    return Err(Error::NegativeWeight {
                        from: edge.from,
                        to: edge.to,
                        weight: edge.weight,
                    });
                }
                candidates.push((
                    edge.from,
                    edge.to,
                    RouteEntry {
                        weight: edge.weight,
                        prev_edge: Some(edge_id),
                    },
                ));
            }
        }
        for ((from, to), entry) in reduce_cheapest(candidates, |entry| entry.weight) {
            self.set(from, to, entry);
        }

        // The diagonal goes in last so a positive-weight self-edge (a line
        // looping back to its first stop) can never occupy a (v, v) cell.
        for vertex in 0..self.vertex_count {
            self.set(
                vertex,
                vertex,
                RouteEntry {
                    weight: 0.0,
                    prev_edge: None,
                },
            );
        }
        Ok(())
    }

    /// One triangle-relaxation pass: improve every `(from, to)` pair that is
    /// cheaper when routed through `via`. The predecessor chains forward from
    /// the half closest to `to`.
    fn relax_through(&mut self, via: VertexId) {
        for from in 0..self.vertex_count {
            let Some(first) = self.get(from, via) else {
                continue;
            };
            for to in 0..self.vertex_count {
                let Some(second) = self.get(via, to) else {
                    continue;
                };
                let candidate = RouteEntry {
                    weight: first.weight + second.weight,
                    prev_edge: second.prev_edge.or(first.prev_edge),
                };
                let known = self.get(from, to);
                if known.is_none_or(|entry| candidate.weight < entry.weight) {
                    self.set(from, to, candidate);
                }
            }
        }
    }

    fn get(&self, from: VertexId, to: VertexId) -> Option<RouteEntry> {
        self.matrix[from * self.vertex_count + to]
    }

    fn set(&mut self, from: VertexId, to: VertexId, entry: RouteEntry) {
        self.matrix[from * self.vertex_count + to] = Some(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(vertex_count: usize, edges: &[(VertexId, VertexId, Minutes)]) -> WeightedGraph {
        let mut graph = WeightedGraph::new(vertex_count);
        for &(from, to, weight) in edges {
            graph.add_edge(from, to, weight).unwrap();
        }
        graph
    }

    #[test]
    fn trivial_route_to_self_is_empty() {
        let router = AllPairsRouter::precompute(&graph(3, &[(0, 1, 2.0)])).unwrap();
        for vertex in 0..3 {
            let route = router.build_route(vertex, vertex).unwrap().unwrap();
            assert_eq!(route.weight, 0.0);
            assert!(route.edges.is_empty());
        }
    }

    #[test]
    fn picks_direct_edge_over_costlier_chain() {
        // 0 -> 1 -> 2 costs 12, the collapsed direct edge costs 7.
        let router = AllPairsRouter::precompute(&graph(
            3,
            &[(0, 1, 6.0), (1, 2, 6.0), (0, 2, 7.0)],
        ))
        .unwrap();
        let route = router.build_route(0, 2).unwrap().unwrap();
        assert_eq!(route.weight, 7.0);
        assert_eq!(route.edges, vec![2]);
    }

    #[test]
    fn chains_edges_when_cheaper() {
        let router = AllPairsRouter::precompute(&graph(
            3,
            &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 7.0)],
        ))
        .unwrap();
        let route = router.build_route(0, 2).unwrap().unwrap();
        assert_eq!(route.weight, 2.0);
        assert_eq!(route.edges, vec![0, 1]);
    }

    #[test]
    fn keeps_cheapest_of_parallel_edges() {
        let router =
            AllPairsRouter::precompute(&graph(2, &[(0, 1, 6.0), (0, 1, 4.0)])).unwrap();
        let route = router.build_route(0, 1).unwrap().unwrap();
        assert_eq!(route.weight, 4.0);
        assert_eq!(route.edges, vec![1]);
    }

    #[test]
    fn disconnected_pair_is_none() {
        let router = AllPairsRouter::precompute(&graph(3, &[(0, 1, 2.0)])).unwrap();
        assert_eq!(router.build_route(1, 0).unwrap(), None);
        assert_eq!(router.build_route(2, 0).unwrap(), None);
        assert_eq!(router.build_route(0, 2).unwrap(), None);
    }

    #[test]
    fn out_of_range_vertex_is_an_error() {
        let router = AllPairsRouter::precompute(&graph(2, &[(0, 1, 2.0)])).unwrap();
        assert_eq!(router.build_route(2, 0).unwrap_err(), Error::InvalidVertex(2));
        assert_eq!(router.build_route(0, 9).unwrap_err(), Error::InvalidVertex(9));
    }

    #[test]
    fn reconstructed_paths_are_contiguous() {
        let graph = graph(
            5,
            &[
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 3, 1.0),
                (3, 4, 1.0),
                (0, 2, 5.0),
                (1, 4, 9.0),
            ],
        );
        let router = AllPairsRouter::precompute(&graph).unwrap();
        let route = router.build_route(0, 4).unwrap().unwrap();
        assert_eq!(route.weight, 4.0);

        assert_eq!(graph.edge(route.edges[0]).unwrap().from, 0);
        for pair in route.edges.windows(2) {
            let [a, b] = pair else { unreachable!() };
            assert_eq!(
                graph.edge(*a).unwrap().to,
                graph.edge(*b).unwrap().from,
                "consecutive edges must share a vertex"
            );
        }
        assert_eq!(graph.edge(*route.edges.last().unwrap()).unwrap().to, 4);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let router = AllPairsRouter::precompute(&graph(
            4,
            &[(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 1.0)],
        ))
        .unwrap();
        let first = router.build_route(0, 3).unwrap();
        let second = router.build_route(0, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_graph_has_no_routes() {
        let router = AllPairsRouter::precompute(&WeightedGraph::new(0)).unwrap();
        assert_eq!(router.vertex_count(), 0);
        assert!(router.build_route(0, 0).is_err());
    }
}
