//! Data model of the bus network
//!
//! Stops, buses and the directed road distances between stops.

pub mod network;
pub mod stats;
pub mod transit_model;
pub mod types;

pub use network::TransitNetwork;
pub use stats::{BusInfo, StopInfo};
pub use transit_model::TransitModel;
pub use types::{Bus, RoutingSettings, Stop};
