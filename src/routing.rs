use busroute_core::prelude::*;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

/// Fastest route between two stops
#[pyclass(name = "RoutingResult", frozen)]
#[derive(Clone)]
pub struct PyRoutingResult {
    pub inner: RoutingResult,
}

impl From<RoutingResult> for PyRoutingResult {
    fn from(inner: RoutingResult) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyRoutingResult {
    /// Total travel time in minutes
    #[getter]
    pub fn total_time(&self) -> Minutes {
        self.inner.total_time
    }

    /// Wait and ride segments, starting with a wait
    #[getter]
    pub fn items(&self) -> Vec<PyRouteItem> {
        self.inner
            .items
            .iter()
            .cloned()
            .map(|inner| PyRouteItem { inner })
            .collect()
    }

    pub fn as_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| {
            PyRuntimeError::new_err(format!("Failed to serialize RoutingResult to JSON: {e}"))
        })
    }

    fn __len__(&self) -> usize {
        self.inner.items.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "RoutingResult(total_time={:.3}, items={})",
            self.inner.total_time,
            self.inner.items.len()
        )
    }
}

/// One itinerary segment: a wait at a stop or a ride on a bus
#[pyclass(name = "RouteItem", frozen)]
#[derive(Clone)]
pub struct PyRouteItem {
    pub inner: RouteItem,
}

#[pymethods]
impl PyRouteItem {
    /// ``"Wait"`` or ``"Bus"``
    #[getter]
    pub fn kind(&self) -> &'static str {
        match self.inner {
            RouteItem::Wait { .. } => "Wait",
            RouteItem::Ride { .. } => "Bus",
        }
    }

    /// Stop name for a wait, bus name for a ride
    #[getter]
    pub fn name(&self) -> &str {
        match &self.inner {
            RouteItem::Wait { stop_name, .. } => stop_name,
            RouteItem::Ride { bus_name, .. } => bus_name,
        }
    }

    /// Number of hops ridden, None for a wait
    #[getter]
    pub fn span_count(&self) -> Option<usize> {
        match self.inner {
            RouteItem::Wait { .. } => None,
            RouteItem::Ride { span_count, .. } => Some(span_count),
        }
    }

    /// Minutes
    #[getter]
    pub fn time(&self) -> Minutes {
        self.inner.time()
    }

    fn __repr__(&self) -> String {
        match &self.inner {
            RouteItem::Wait { stop_name, time } => {
                format!("RouteItem(kind='Wait', name='{stop_name}', time={time:.3})")
            }
            RouteItem::Ride {
                bus_name,
                span_count,
                time,
            } => format!(
                "RouteItem(kind='Bus', name='{bus_name}', span_count={span_count}, time={time:.3})"
            ),
        }
    }
}
