//! This module is responsible for loading a bus catalogue
//! and building a routing model from it.

mod builder;
mod config;
pub mod raw_types;

pub use builder::{create_transit_model, transit_model_from_str};
pub use config::TransitModelConfig;
