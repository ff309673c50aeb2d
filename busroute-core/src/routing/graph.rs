//! Routing graph built from the bus network
//!
//! Every stop gets one *boarding* vertex (standing at the stop, not on a
//! bus). Every stop occurrence of every bus traversal gets its own *ride*
//! vertex (sitting on that bus at that point of that traversal). Two
//! traversals never share a ride vertex, so changing buses always goes
//! through a boarding vertex and pays the wait time.
//!
//! ```text
//!  Boarding(A)        Boarding(B)         Boarding(C)
//!      |               ^      |            ^
//!    board       alight/    board    alight/
//!      v             /        v          /
//!   Ride(A,0) ---ride---> Ride(B,1) ---ride---> Ride(C,2)
//! ```

use itertools::Itertools;
use log::{debug, info};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::{BusId, Error, Meters, Minutes, RoutingSettings, StopId, TransitNetwork};

/// Routing graph vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vertex {
    /// Standing at a stop
    Boarding { stop: StopId },
    /// Aboard a bus at the given occurrence of a stop
    Ride { stop: StopId, occurrence: usize },
}

impl Vertex {
    pub fn stop(&self) -> StopId {
        match *self {
            Vertex::Boarding { stop } | Vertex::Ride { stop, .. } => stop,
        }
    }
}

/// What a rider does when following an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Wait at the stop and get on a bus
    Board,
    /// Stay aboard for one more hop
    Ride { bus: BusId },
    /// Travel one more hop and get off
    Alight { bus: BusId },
}

impl EdgeKind {
    /// Bus the edge travels on, `None` for boarding
    pub fn bus(&self) -> Option<BusId> {
        match *self {
            EdgeKind::Board => None,
            EdgeKind::Ride { bus } | EdgeKind::Alight { bus } => Some(bus),
        }
    }
}

/// Routing graph edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge {
    pub kind: EdgeKind,
    /// Minutes
    pub weight: Minutes,
}

/// Travel time of one hop in minutes
pub fn travel_time(meters: Meters, velocity_kmh: f64) -> Minutes {
    f64::from(meters) * 60.0 / (velocity_kmh * 1000.0)
}

/// Immutable routing graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitGraph {
    pub(crate) graph: DiGraph<Vertex, RouteEdge>,
    /// Boarding vertex of every stop, indexed by stop id
    boarding: Vec<NodeIndex>,
    /// Ride vertex of every occurrence, indexed by occurrence
    rides: Vec<NodeIndex>,
}

impl TransitGraph {
    /// Builds the graph for all buses of the network.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidSettings`] for unusable settings,
    /// [`Error::UnknownStop`] if a bus refers to a stop the network does not
    /// have and [`Error::MissingDistance`] if two consecutive stops of a bus
    /// have no road distance in either direction. Nothing is returned on
    /// failure.
    pub fn build(network: &TransitNetwork, settings: &RoutingSettings) -> Result<Self, Error> {
        settings.validate()?;

        let mut builder = GraphBuilder::new(network.stop_count());
        for stop in 0..network.stop_count() {
            builder.boarding_vertex(stop);
        }

        for (bus_id, bus) in network.buses().iter().enumerate() {
            if let Some(&stop) = bus.stops.iter().find(|&&stop| stop >= network.stop_count()) {
                return Err(Error::UnknownStop {
                    bus: bus.name.clone(),
                    stop: format!("#{stop}"),
                });
            }

            let rides = bus
                .stops
                .iter()
                .map(|&stop| builder.ride_vertex(stop, settings.bus_wait_time))
                .collect_vec();

            for ((&from_stop, &from_ride), (&to_stop, &to_ride)) in
                bus.stops.iter().zip(&rides).tuple_windows()
            {
                let meters = network.require_distance(from_stop, to_stop)?;
                let weight = travel_time(meters, settings.bus_velocity);
                let alight_to = builder.boarding_vertex(to_stop);

                builder.add_edge(from_ride, to_ride, EdgeKind::Ride { bus: bus_id }, weight);
                builder.add_edge(from_ride, alight_to, EdgeKind::Alight { bus: bus_id }, weight);
            }

            debug!(
                "Bus {} added with {} ride vertices and {} hops",
                bus.name,
                rides.len(),
                bus.hop_count()
            );
        }

        let graph = builder.finish();
        info!(
            "Routing graph built: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Boarding vertex of a stop
    pub fn boarding_vertex(&self, stop: StopId) -> Option<NodeIndex> {
        self.boarding.get(stop).copied()
    }

    /// Ride vertex of the given stop occurrence
    pub fn ride_vertex(&self, stop: StopId, occurrence: usize) -> Option<NodeIndex> {
        self.rides
            .get(occurrence)
            .copied()
            .filter(|&vertex| self.graph[vertex].stop() == stop)
    }

    pub fn vertex(&self, id: NodeIndex) -> Option<&Vertex> {
        self.graph.node_weight(id)
    }

    pub fn edge(&self, id: EdgeIndex) -> Option<&RouteEdge> {
        self.graph.edge_weight(id)
    }

    /// Source and target vertex of an edge
    pub fn edge_endpoints(&self, id: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks that a deserialized graph only refers to known stops, buses
    /// and vertices
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] describing the first inconsistency found
    pub(crate) fn validate(&self, stop_count: usize, bus_count: usize) -> Result<(), Error> {
        if self.boarding.len() < stop_count {
            return Err(Error::InvalidData(format!(
                "graph has {} boarding vertices for {stop_count} stops",
                self.boarding.len()
            )));
        }
        if let Some(vertex) = self
            .boarding
            .iter()
            .chain(&self.rides)
            .find(|vertex| vertex.index() >= self.vertex_count())
        {
            return Err(Error::InvalidData(format!(
                "vertex {} is out of range for a graph of {} vertices",
                vertex.index(),
                self.vertex_count()
            )));
        }
        if let Some(vertex) = self
            .graph
            .node_weights()
            .find(|vertex| vertex.stop() >= stop_count)
        {
            return Err(Error::InvalidData(format!(
                "graph refers to unknown stop #{}",
                vertex.stop()
            )));
        }
        if let Some(bus) = self
            .graph
            .edge_weights()
            .filter_map(|edge| edge.kind.bus())
            .find(|&bus| bus >= bus_count)
        {
            return Err(Error::InvalidData(format!(
                "graph refers to unknown bus #{bus}"
            )));
        }
        Ok(())
    }
}

/// Mutable state used only while the graph is assembled
struct GraphBuilder {
    graph: DiGraph<Vertex, RouteEdge>,
    boarding: Vec<Option<NodeIndex>>,
    rides: Vec<NodeIndex>,
}

impl GraphBuilder {
    fn new(stop_count: usize) -> Self {
        Self {
            graph: DiGraph::new(),
            boarding: vec![None; stop_count],
            rides: Vec::new(),
        }
    }

    fn boarding_vertex(&mut self, stop: StopId) -> NodeIndex {
        if let Some(vertex) = self.boarding[stop] {
            return vertex;
        }
        let vertex = self.graph.add_node(Vertex::Boarding { stop });
        self.boarding[stop] = Some(vertex);
        vertex
    }

    /// Creates a fresh ride vertex together with its boarding edge
    fn ride_vertex(&mut self, stop: StopId, wait_time: Minutes) -> NodeIndex {
        // never reused, even for the same stop on the same bus
        let occurrence = self.rides.len();

        let boarding = self.boarding_vertex(stop);
        let ride = self.graph.add_node(Vertex::Ride { stop, occurrence });
        self.rides.push(ride);
        self.add_edge(boarding, ride, EdgeKind::Board, wait_time);
        ride
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: EdgeKind, weight: Minutes) {
        self.graph.add_edge(from, to, RouteEdge { kind, weight });
    }

    fn finish(self) -> TransitGraph {
        TransitGraph {
            graph: self.graph,
            boarding: self.boarding.into_iter().flatten().collect(),
            rides: self.rides,
        }
    }
}
