//! Bus network structure and methods to work with it

use geo::Point;
use hashbrown::HashMap;
use itertools::Itertools;

use super::types::{Bus, Stop};
use crate::{BusId, Error, Meters, StopId};

/// Stops, buses and road distances of a city bus network
#[derive(Debug, Clone, Default)]
pub struct TransitNetwork {
    /// All stops
    stops: Vec<Stop>,
    /// All buses
    buses: Vec<Bus>,
    /// Stop name to stop index
    stop_index: HashMap<String, StopId>,
    /// Bus name to bus index
    bus_index: HashMap<String, BusId>,
    /// Directed road distances in meters
    distances: HashMap<(StopId, StopId), Meters>,
}

impl TransitNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stop and returns its id.
    ///
    /// Adding a stop with a known name updates its coordinates.
    pub fn add_stop(&mut self, name: &str, geometry: Point<f64>) -> StopId {
        if let Some(&id) = self.stop_index.get(name) {
            self.stops[id].geometry = geometry;
            return id;
        }

        let id = self.stops.len();
        self.stops.push(Stop {
            name: name.to_string(),
            geometry,
        });
        self.stop_index.insert(name.to_string(), id);
        id
    }

    /// Sets the road distance from one stop to another.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if either stop is unknown
    pub fn set_distance(&mut self, from: &str, to: &str, meters: Meters) -> Result<(), Error> {
        let from_id = self.require_stop(from)?;
        let to_id = self.require_stop(to)?;
        self.distances.insert((from_id, to_id), meters);
        Ok(())
    }

    /// Registers a bus over the given stops.
    ///
    /// A non-roundtrip bus travels to its last stop and back, so its stored
    /// traversal is the declared stops followed by the same stops in reverse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStop`] if any of the stops is not registered and
    /// [`Error::InvalidData`] if a bus with the same name already exists.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stop_names: &[S],
        is_roundtrip: bool,
    ) -> Result<BusId, Error> {
        if self.bus_index.contains_key(name) {
            return Err(Error::InvalidData(format!("Duplicate bus {name}")));
        }

        let mut stops = stop_names
            .iter()
            .map(|stop| {
                self.stop_id(stop.as_ref()).ok_or_else(|| Error::UnknownStop {
                    bus: name.to_string(),
                    stop: stop.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if !is_roundtrip && stops.len() > 1 {
            let return_leg = stops.iter().rev().skip(1).copied().collect_vec();
            stops.extend(return_leg);
        }

        let id = self.buses.len();
        self.buses.push(Bus {
            name: name.to_string(),
            stops,
            is_roundtrip,
        });
        self.bus_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Road distance in meters, falling back to the reverse direction
    pub fn distance(&self, from: StopId, to: StopId) -> Option<Meters> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    /// Same as [`Self::distance`] but fails with a readable error
    pub(crate) fn require_distance(&self, from: StopId, to: StopId) -> Result<Meters, Error> {
        self.distance(from, to).ok_or_else(|| Error::MissingDistance {
            from: self.stop_name(from).to_string(),
            to: self.stop_name(to).to_string(),
        })
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Names of the buses calling at a stop, sorted and without duplicates
    pub fn buses_for_stop(&self, stop: StopId) -> Vec<&str> {
        self.buses
            .iter()
            .filter(|bus| bus.stops.contains(&stop))
            .map(|bus| bus.name.as_str())
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Name of a stop known to exist
    pub(crate) fn stop_name(&self, id: StopId) -> &str {
        self.stops.get(id).map_or("<unknown>", |stop| stop.name.as_str())
    }

    fn require_stop(&self, name: &str) -> Result<StopId, Error> {
        self.stop_id(name)
            .ok_or_else(|| Error::InvalidData(format!("Unknown stop {name}")))
    }
}
