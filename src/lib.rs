use pyo3::prelude::*;

use model::{PyTransitModel, py_create_transit_model};
use routing::{PyRouteItem, PyRoutingResult};

pub mod model;
pub mod routing;

/// A Python module implemented in Rust.
#[pymodule]
fn busroute(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyTransitModel>()?;
    m.add_function(wrap_pyfunction!(py_create_transit_model, m)?)?;

    m.add_class::<PyRoutingResult>()?;
    m.add_class::<PyRouteItem>()?;
    Ok(())
}
