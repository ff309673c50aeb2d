//! Route queries between named stops

use hashbrown::HashMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::graph::TransitGraph;
use super::index::ShortestPathIndex;
use super::itinerary::{RoutingResult, decode_path};
use crate::{Error, RoutingSettings, StopId, TransitNetwork};

/// Answers fastest-route queries over a fixed bus network.
///
/// Built once from a network snapshot and read-only afterwards. A changed
/// network needs a new router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportRouter {
    settings: RoutingSettings,
    graph: TransitGraph,
    index: ShortestPathIndex,
    /// Stop names, indexed by stop id
    stop_names: Vec<String>,
    /// Bus names, indexed by bus id
    bus_names: Vec<String>,
    #[serde(skip)]
    stop_lookup: HashMap<String, StopId>,
}

impl TransportRouter {
    /// Builds the routing graph and the shortest path index.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the network lacks a
    /// stop or a road distance needed by one of its buses.
    pub fn new(network: &TransitNetwork, settings: RoutingSettings) -> Result<Self, Error> {
        let graph = TransitGraph::build(network, &settings)?;
        let index = ShortestPathIndex::build(&graph);

        let stop_names = network
            .stops()
            .iter()
            .map(|stop| stop.name.clone())
            .collect();
        let bus_names = network.buses().iter().map(|bus| bus.name.clone()).collect();

        Ok(Self::from_parts(settings, graph, index, stop_names, bus_names))
    }

    fn from_parts(
        settings: RoutingSettings,
        graph: TransitGraph,
        index: ShortestPathIndex,
        stop_names: Vec<String>,
        bus_names: Vec<String>,
    ) -> Self {
        let stop_lookup = stop_lookup(&stop_names);
        Self {
            settings,
            graph,
            index,
            stop_names,
            bus_names,
            stop_lookup,
        }
    }

    /// Fastest route between two stops.
    ///
    /// Returns `None` if either stop is unknown or no route exists. A route
    /// from a stop to itself takes no time and has no items.
    pub fn build_route(&self, from: &str, to: &str) -> Option<RoutingResult> {
        let from_stop = self.stop_lookup.get(from).copied()?;
        let to_stop = self.stop_lookup.get(to).copied()?;

        if from_stop == to_stop {
            return Some(RoutingResult::empty());
        }

        let from_vertex = self.graph.boarding_vertex(from_stop)?;
        let to_vertex = self.graph.boarding_vertex(to_stop)?;

        let Some(route) = self.index.find_path(from_vertex, to_vertex) else {
            trace!("No route from {from} to {to}");
            return None;
        };

        let items = decode_path(
            &self.graph,
            &route.edges,
            &self.stop_names,
            &self.bus_names,
            self.settings.bus_wait_time,
        );
        debug!(
            "Route from {from} to {to}: {:.3} min, {} items",
            route.weight,
            items.len()
        );

        Some(RoutingResult {
            total_time: route.weight,
            items,
        })
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    pub fn index(&self) -> &ShortestPathIndex {
        &self.index
    }

    /// Serializes the router with its graph and index
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Restores a router produced by [`Self::to_bytes`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input and [`Error::InvalidData`]
    /// if the graph, the index and the stop and bus names do not agree.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let router: Self = serde_json::from_slice(bytes)?;
        router.settings.validate()?;

        router
            .graph
            .validate(router.stop_names.len(), router.bus_names.len())?;
        router.index.validate(&router.graph)?;

        Ok(Self::from_parts(
            router.settings,
            router.graph,
            router.index,
            router.stop_names,
            router.bus_names,
        ))
    }
}

fn stop_lookup(stop_names: &[String]) -> HashMap<String, StopId> {
    stop_names
        .iter()
        .enumerate()
        .map(|(id, name)| (name.clone(), id))
        .collect()
}
