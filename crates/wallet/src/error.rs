use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// One or more field-level validation failures, collected together.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// The backend rejected the call; message passed through verbatim.
    #[error("{0}")]
    Backend(String),
}
