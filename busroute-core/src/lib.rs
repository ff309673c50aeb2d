//! Bus network routing core.
//!
//! Turns a catalogue of bus routes and road distances into a weighted graph,
//! precomputes shortest paths over it and answers "fastest way from stop A to
//! stop B" queries as a sequence of wait and ride segments.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{TransitModelConfig, create_transit_model, transit_model_from_str};
pub use model::{BusInfo, RoutingSettings, StopInfo, TransitModel, TransitNetwork};
pub use routing::{RouteItem, RoutingResult, TransportRouter};

/// Index of a stop in [`TransitNetwork`]
pub type StopId = usize;
/// Index of a bus in [`TransitNetwork`]
pub type BusId = usize;
/// Duration in minutes
pub type Minutes = f64;
/// Road distance in meters
pub type Meters = u32;
