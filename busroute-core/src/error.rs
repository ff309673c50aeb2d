use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Bus {bus} references unknown stop {stop}")]
    UnknownStop { bus: String, stop: String },
    #[error("No road distance between {from} and {to}")]
    MissingDistance { from: String, to: String },
    #[error("Invalid routing settings: {0}")]
    InvalidSettings(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
