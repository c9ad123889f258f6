use thiserror::Error;

/// Every way a calendar run can fail. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Network failure, timeout or a body that could not be read.
    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The forecast API answered with a non-success status.
    #[error("Forecast API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse forecast JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response parsed but breaks the shape we rely on (e.g. ragged hourly columns).
    #[error("Malformed forecast response: {0}")]
    MalformedResponse(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
