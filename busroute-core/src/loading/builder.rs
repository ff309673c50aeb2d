use std::fs;

use geo::Point;
use log::info;

use super::config::TransitModelConfig;
use super::raw_types::{BaseRequest, RawBus, RawCatalogue, RawStop};
use crate::{Error, TransitModel, TransitNetwork, TransportRouter};

/// Creates a transit model from the catalogue file named in the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the network it
/// describes cannot be routed (unknown stops, missing distances, bad settings)
pub fn create_transit_model(config: &TransitModelConfig) -> Result<TransitModel, Error> {
    validate_config(config)?;

    info!(
        "Reading bus catalogue: {}",
        config.catalogue_path.display()
    );
    let document = fs::read_to_string(&config.catalogue_path)?;
    let model = transit_model_from_str(&document)?;

    // Parsing the document and running one search per vertex allocates a
    // lot of short-lived memory. Hand the free tail of the heap back to
    // the system.
    //
    // # Safety
    //
    // This call is safe to use on linux with glibc implementation
    // which is checked by the cfg attribute in compile time.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::debug!("Nothing to trim after building the transit model");
        } else {
            log::debug!("Successfully trimmed unused heap memory");
        }
    }
    Ok(model)
}

/// Creates a transit model from an in-memory catalogue document
///
/// # Errors
///
/// Same as [`create_transit_model`], minus file errors
pub fn transit_model_from_str(document: &str) -> Result<TransitModel, Error> {
    let catalogue: RawCatalogue = serde_json::from_str(document)?;
    let network = network_from_requests(catalogue.base_requests)?;
    info!(
        "Bus network loaded: {} stops, {} buses",
        network.stop_count(),
        network.bus_count()
    );

    let router = TransportRouter::new(&network, catalogue.routing_settings)?;
    info!("Transit model created successfully");
    Ok(TransitModel::new(network, router))
}

/// Stops first, then distances, then buses, so requests may refer to stops
/// described further down the document
fn network_from_requests(requests: Vec<BaseRequest>) -> Result<TransitNetwork, Error> {
    let mut stops: Vec<RawStop> = Vec::new();
    let mut buses: Vec<RawBus> = Vec::new();
    for request in requests {
        match request {
            BaseRequest::Stop(stop) => stops.push(stop),
            BaseRequest::Bus(bus) => buses.push(bus),
        }
    }

    let mut network = TransitNetwork::new();
    for stop in &stops {
        network.add_stop(&stop.name, Point::new(stop.longitude, stop.latitude));
    }

    for stop in &stops {
        for (neighbour, &meters) in &stop.road_distances {
            network
                .set_distance(&stop.name, neighbour, meters)
                .map_err(|_| {
                    Error::InvalidData(format!(
                        "Stop {} has a road distance to unknown stop {neighbour}",
                        stop.name
                    ))
                })?;
        }
    }

    for bus in &buses {
        network.add_bus(&bus.name, &bus.stops, bus.is_roundtrip)?;
    }

    Ok(network)
}

fn validate_config(config: &TransitModelConfig) -> Result<(), Error> {
    if !config.catalogue_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Catalogue file not found: {}",
                config.catalogue_path.display()
            ),
        )));
    }
    Ok(())
}
