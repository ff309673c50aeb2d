//! Per-bus and per-stop statistics

use geo::{Distance, Haversine};
use hashbrown::HashSet;
use itertools::Itertools;
use serde::Serialize;

use super::TransitNetwork;
use crate::Error;

/// Summary of a single bus route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusInfo {
    /// Stops in one traversal, counting repeats
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length of one traversal, meters
    pub route_length: u64,
    /// Road length divided by the straight-line (haversine) length
    pub curvature: f64,
}

/// Buses calling at a stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopInfo {
    pub buses: Vec<String>,
}

impl TransitNetwork {
    /// Statistics of a bus, `None` if the bus is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDistance`] when a hop of the bus has no road distance
    pub fn bus_info(&self, name: &str) -> Result<Option<BusInfo>, Error> {
        let Some(bus) = self.bus_id(name).and_then(|id| self.bus(id)) else {
            return Ok(None);
        };

        let mut route_length = 0u64;
        let mut geo_length = 0.0;
        for (&from, &to) in bus.stops.iter().tuple_windows() {
            route_length += u64::from(self.require_distance(from, to)?);
            geo_length += Haversine.distance(self.stops()[from].geometry, self.stops()[to].geometry);
        }

        let unique_stop_count = bus.stops.iter().collect::<HashSet<_>>().len();
        #[allow(clippy::cast_precision_loss)]
        let curvature = if geo_length > 0.0 {
            route_length as f64 / geo_length
        } else {
            0.0
        };

        Ok(Some(BusInfo {
            stop_count: bus.stops.len(),
            unique_stop_count,
            route_length,
            curvature,
        }))
    }

    /// Buses calling at a stop, `None` if the stop is unknown
    pub fn stop_info(&self, name: &str) -> Option<StopInfo> {
        let id = self.stop_id(name)?;
        let buses = self
            .buses_for_stop(id)
            .into_iter()
            .map(str::to_string)
            .collect();
        Some(StopInfo { buses })
    }
}
