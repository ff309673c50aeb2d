use std::sync::Arc;

use busroute_core::TransitModel;

/// Shared application state
///
/// The model is immutable once loaded, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<TransitModel>,
}

impl AppState {
    pub fn new(model: TransitModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}
