use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a structured error; message verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    /// A 401 that cannot be recovered by refreshing; the caller signs out.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Unexpected response ({status}): {body}")]
    Http { status: u16, body: String },
}
