//! Itinerary assembly: shortest-path edges to rider-facing segments

use serde::Serialize;

use crate::building::TransitGraph;
use crate::routing::router::RouteInfo;
use crate::{Error, Minutes};

/// One rider-facing step of an itinerary.
///
/// Serializes in the shape the external response layer emits:
/// `{"type": "Wait", ...}` for waiting at a stop, `{"type": "Bus", ...}` for
/// riding a line without re-boarding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Segment {
    Wait {
        stop_name: String,
        time: Minutes,
    },
    #[serde(rename = "Bus")]
    Ride {
        bus: String,
        stop_from: String,
        stop_to: String,
        span_count: usize,
        time: Minutes,
    },
}

/// Ordered wait/ride segments plus total travel time in minutes.
///
/// Built fresh per query; owns no state shared with the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Itinerary {
    pub items: Vec<Segment>,
    pub total_time: Minutes,
}

impl Itinerary {
    /// The itinerary as a JSON value, for callers assembling larger response
    /// documents.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "total_time": self.total_time,
            "items": self.items,
        })
    }
}

/// Expands a shortest-path result into alternating wait and ride segments.
///
/// Every edge becomes one `Wait` at its boarding stop followed by one `Ride`;
/// the ride duration is the edge weight minus the boarding wait. An empty
/// edge list (source equals destination) yields an empty itinerary.
///
/// # Errors
///
/// Fails if the route references edges or ids unknown to `transit` — a
/// mismatched graph/route pairing, not a property of the network.
pub fn assemble_itinerary(transit: &TransitGraph, route: &RouteInfo) -> Result<Itinerary, Error> {
    let settings = transit.settings();
    let mut items = Vec::with_capacity(route.edges.len() * 2);
    let mut total_time = 0.0;

    for &edge_id in &route.edges {
        let edge = transit.graph().edge(edge_id)?;
        let ride = transit.ride(edge_id)?;
        let board = transit
            .stop_name(ride.board)
            .ok_or(Error::InvalidVertex(ride.board))?;
        let alight = transit
            .stop_name(ride.alight)
            .ok_or(Error::InvalidVertex(ride.alight))?;
        let bus = transit
            .line_name(ride.line)
            .ok_or_else(|| Error::InvalidData(format!("edge {edge_id} references line {}", ride.line)))?;

        items.push(Segment::Wait {
            stop_name: board.to_string(),
            time: settings.bus_wait_time,
        });
        items.push(Segment::Ride {
            bus: bus.to_string(),
            stop_from: board.to_string(),
            stop_to: alight.to_string(),
            span_count: ride.span_count,
            time: edge.weight - settings.bus_wait_time,
        });
        total_time += edge.weight;
    }

    Ok(Itinerary { items, total_time })
}
