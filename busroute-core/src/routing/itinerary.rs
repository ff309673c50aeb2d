//! Rider-facing itinerary built from a path of routing graph edges

use petgraph::graph::EdgeIndex;
use serde::{Deserialize, Serialize};

use super::graph::{EdgeKind, TransitGraph};
use crate::{BusId, Minutes};

/// One segment of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    /// Waiting for a bus at a stop
    Wait { stop_name: String, time: Minutes },
    /// Riding one bus for `span_count` consecutive hops
    #[serde(rename = "Bus")]
    Ride {
        #[serde(rename = "bus")]
        bus_name: String,
        span_count: usize,
        time: Minutes,
    },
}

impl RouteItem {
    pub fn time(&self) -> Minutes {
        match self {
            RouteItem::Wait { time, .. } | RouteItem::Ride { time, .. } => *time,
        }
    }
}

/// Fastest way between two stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    /// Minutes
    pub total_time: Minutes,
    pub items: Vec<RouteItem>,
}

impl RoutingResult {
    /// Route from a stop to itself
    pub fn empty() -> Self {
        Self {
            total_time: 0.0,
            items: Vec::new(),
        }
    }
}

/// Ride being accumulated while walking the path
#[derive(Debug, Clone, Copy)]
struct RideSpan {
    bus: BusId,
    span_count: usize,
    time: Minutes,
}

/// Turns a path of edges into wait and ride segments.
///
/// Every bus edge adds one hop to the current ride. A boarding edge closes
/// the current ride, if any, and starts a wait at its stop.
pub(crate) fn decode_path(
    graph: &TransitGraph,
    edges: &[EdgeIndex],
    stop_names: &[String],
    bus_names: &[String],
    wait_time: Minutes,
) -> Vec<RouteItem> {
    let ride_item = |span: RideSpan| RouteItem::Ride {
        bus_name: bus_names[span.bus].clone(),
        span_count: span.span_count,
        time: span.time,
    };

    let mut items = Vec::new();
    let mut ride: Option<RideSpan> = None;

    for &edge_id in edges {
        let edge = graph
            .edge(edge_id)
            .unwrap_or_else(|| panic!("edge {} is not in the routing graph", edge_id.index()));

        match edge.kind {
            EdgeKind::Board => {
                if let Some(span) = ride.take() {
                    items.push(ride_item(span));
                }
                let (from, _) = graph
                    .edge_endpoints(edge_id)
                    .unwrap_or_else(|| panic!("edge {} has no endpoints", edge_id.index()));
                let stop = graph
                    .vertex(from)
                    .map(|vertex| vertex.stop())
                    .unwrap_or_else(|| panic!("vertex {} is not in the graph", from.index()));
                items.push(RouteItem::Wait {
                    stop_name: stop_names[stop].clone(),
                    time: wait_time,
                });
            }
            EdgeKind::Ride { bus } | EdgeKind::Alight { bus } => {
                let span = ride.unwrap_or(RideSpan {
                    bus,
                    span_count: 0,
                    time: 0.0,
                });
                ride = Some(RideSpan {
                    bus,
                    span_count: span.span_count + 1,
                    time: span.time + edge.weight,
                });
            }
        }
    }

    if let Some(span) = ride {
        items.push(ride_item(span));
    }

    items
}
