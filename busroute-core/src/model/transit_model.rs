//! Bus network bundled with its router

use crate::{BusInfo, Error, RoutingResult, StopInfo, TransitNetwork, TransportRouter};

/// Loaded bus network together with the router built over it
#[derive(Debug, Clone)]
pub struct TransitModel {
    pub network: TransitNetwork,
    pub router: TransportRouter,
}

impl TransitModel {
    pub fn new(network: TransitNetwork, router: TransportRouter) -> Self {
        Self { network, router }
    }

    /// Fastest route between two stops, see [`TransportRouter::build_route`]
    pub fn build_route(&self, from: &str, to: &str) -> Option<RoutingResult> {
        self.router.build_route(from, to)
    }

    /// See [`TransitNetwork::bus_info`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDistance`] for a bus with an unmeasured hop
    pub fn bus_info(&self, name: &str) -> Result<Option<BusInfo>, Error> {
        self.network.bus_info(name)
    }

    pub fn stop_info(&self, name: &str) -> Option<StopInfo> {
        self.network.stop_info(name)
    }

    pub fn stop_count(&self) -> usize {
        self.network.stop_count()
    }

    pub fn bus_count(&self) -> usize {
        self.network.bus_count()
    }
}
