use busroute_core::prelude::*;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::routing::PyRoutingResult;

/// TransitModel
///
/// A bus network loaded from a catalogue together with the router built
/// over it. Every pair of stops is precomputed when the model is created,
/// so route queries only walk the stored path.
///
/// Example:
///
/// .. code-block:: python
///
///     model = create_transit_model("path/to/catalogue.json")
///     route = model.build_route("Biryulyovo Zapadnoye", "Universam")
///     if route is not None:
///         print(route.total_time, [item.kind for item in route.items])
#[pyclass(name = "TransitModel", frozen)]
pub struct PyTransitModel {
    pub(crate) model: TransitModel,
}

#[pymethods]
impl PyTransitModel {
    pub fn stop_count(&self) -> usize {
        self.model.stop_count()
    }

    pub fn bus_count(&self) -> usize {
        self.model.bus_count()
    }

    /// Fastest route between two stops
    ///
    /// Parameters
    /// ----------
    /// from_stop : str
    ///     Name of the origin stop
    /// to_stop : str
    ///     Name of the destination stop
    ///
    /// Returns
    /// -------
    /// RoutingResult or None
    ///     None if either stop is unknown or the destination cannot be reached
    pub fn build_route(&self, from_stop: &str, to_stop: &str) -> Option<PyRoutingResult> {
        self.model
            .build_route(from_stop, to_stop)
            .map(PyRoutingResult::from)
    }

    fn __repr__(&self) -> String {
        format!(
            "TransitModel with {} stops, {} buses and {} routing vertices",
            self.model.stop_count(),
            self.model.bus_count(),
            self.model.router.graph().vertex_count()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Create a transit model from a JSON bus catalogue
///
/// The catalogue holds ``base_requests`` (stops with coordinates and road
/// distances, buses with their stops) and ``routing_settings``
/// (``bus_wait_time`` in minutes, ``bus_velocity`` in km/h).
///
/// Parameters
/// ----------
/// catalogue_path : str
///     Path to the catalogue JSON file
///
/// Returns
/// -------
/// TransitModel
///
/// Raises
/// ------
/// RuntimeError
///     If the file cannot be read, or describes a network that cannot be
///     routed (unknown stops, missing road distances, invalid settings)
#[pyfunction(name = "create_transit_model")]
pub fn py_create_transit_model(catalogue_path: &str) -> PyResult<PyTransitModel> {
    let config = TransitModelConfig::new(catalogue_path);
    let model = busroute_core::create_transit_model(&config)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to create transit model: {e}")))?;
    log::info!(
        "Transit model ready: {} stops, {} buses",
        model.stop_count(),
        model.bus_count()
    );

    Ok(PyTransitModel { model })
}
