use std::path::PathBuf;

/// Where to load the transit model from
#[derive(Debug, Clone)]
pub struct TransitModelConfig {
    /// JSON catalogue with stops, buses and routing settings
    pub catalogue_path: PathBuf,
}

impl TransitModelConfig {
    pub fn new(catalogue_path: impl Into<PathBuf>) -> Self {
        Self {
            catalogue_path: catalogue_path.into(),
        }
    }
}
