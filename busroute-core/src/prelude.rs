// Re-export key components
pub use crate::loading::{TransitModelConfig, create_transit_model, transit_model_from_str};
pub use crate::model::{BusInfo, RoutingSettings, StopInfo, TransitModel, TransitNetwork};
pub use crate::routing::{RouteItem, RoutingResult, TransportRouter};

pub use crate::Error;

// Core identifiers and units
pub use crate::BusId;
pub use crate::Meters;
pub use crate::Minutes; // minutes
pub use crate::StopId;
