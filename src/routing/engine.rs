//! End-to-end query engine

use log::info;

use crate::building::{TransitGraph, build_transit_graph};
use crate::model::{RoutingSettings, TransitDataProvider};
use crate::routing::itinerary::{Itinerary, assemble_itinerary};
use crate::routing::router::AllPairsRouter;
use crate::{Error, VertexId};

/// Builds the transit graph and the all-pairs matrix once, then answers
/// stop-name queries for the rest of its lifetime.
///
/// Construction is the whole startup cost; queries are read-only and may run
/// concurrently without coordination.
#[derive(Debug, Clone)]
pub struct TransitRouter {
    transit: TransitGraph,
    router: AllPairsRouter,
}

impl TransitRouter {
    /// # Errors
    ///
    /// Surfaces construction-time domain errors: a line referencing an
    /// unknown stop, unusable settings, or a negative computed weight.
    pub fn new(
        provider: &impl TransitDataProvider,
        settings: RoutingSettings,
    ) -> Result<Self, Error> {
        let transit = build_transit_graph(provider, settings)?;
        let router = AllPairsRouter::precompute(transit.graph())?;
        info!("transit router ready for queries");
        Ok(Self { transit, router })
    }

    /// Minimum-time itinerary between two named stops.
    ///
    /// `Ok(None)` means the stops are valid but not connected — an expected
    /// outcome, not an error. An unknown name is [`Error::StopNotFound`].
    pub fn route(&self, from: &str, to: &str) -> Result<Option<Itinerary>, Error> {
        let from = self.vertex(from)?;
        let to = self.vertex(to)?;
        match self.router.build_route(from, to)? {
            Some(route) => Ok(Some(assemble_itinerary(&self.transit, &route)?)),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn transit(&self) -> &TransitGraph {
        &self.transit
    }

    #[must_use]
    pub fn router(&self) -> &AllPairsRouter {
        &self.router
    }

    fn vertex(&self, name: &str) -> Result<VertexId, Error> {
        self.transit
            .vertex_id(name)
            .ok_or_else(|| Error::StopNotFound(name.to_string()))
    }
}
