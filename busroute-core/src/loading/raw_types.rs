//! Catalogue document as stored on disk

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::RoutingSettings;

#[derive(Debug, Deserialize)]
pub struct RawCatalogue {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    pub routing_settings: RoutingSettings,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(RawStop),
    Bus(RawBus),
}

#[derive(Debug, Deserialize)]
pub struct RawStop {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Neighbour stop name -> meters
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
pub struct RawBus {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}
