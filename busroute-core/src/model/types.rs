//! Basic network entities

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{Error, Minutes, StopId};

/// Bus stop
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Unique stop name
    pub name: String,
    /// Stop coordinates, x is longitude and y is latitude
    pub geometry: Point<f64>,
}

/// Bus route as a single traversal of its stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    /// Unique bus name, e.g. "297"
    pub name: String,
    /// Full traversal. For a non-roundtrip bus the mirrored
    /// return leg is already appended.
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}

impl Bus {
    /// Number of hops the bus travels in one traversal
    pub fn hop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

/// Parameters of the travel time model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Time spent waiting for any bus at a stop, minutes
    pub bus_wait_time: Minutes,
    /// Bus velocity, km/h
    pub bus_velocity: f64,
}

impl RoutingSettings {
    pub fn new(bus_wait_time: Minutes, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Checks that the settings produce non-negative, finite edge weights
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] for a negative wait time or a
    /// non-positive velocity.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "bus_wait_time must be a non-negative number of minutes, got {}",
                self.bus_wait_time
            )));
        }
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "bus_velocity must be positive, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}
