use thiserror::Error;

/// Failure of a persistence backend call. The week sync layer never recovers
/// from these; they are logged and handed back to the caller.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(Box<figment::Error>),

    #[error("Could not find app data directory")]
    NoDataDir,

    #[error("Backend rejected the request: {0}")]
    Rejected(String),
}

impl From<figment::Error> for BackendError {
    fn from(error: figment::Error) -> Self {
        BackendError::Config(Box::new(error))
    }
}
