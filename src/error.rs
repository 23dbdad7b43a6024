use thiserror::Error;

/// Configuration errors returned from [`Monitor::init`](crate::Monitor::init).
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    #[error("unsupported report method `{0}` (expected GET or POST)")]
    InvalidMethod(String),

    #[error("invalid monitor options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("monitor already initialized")]
    AlreadyInitialized,
}

/// A failed report delivery. Logged by the reporter, never surfaced to the page.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("client error: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("collector responded with HTTP {0}")]
    Status(u16),
}
