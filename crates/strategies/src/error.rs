use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("{0}")]
    InvalidParameters(String),

    #[error("Strategy catalog unavailable: {0}")]
    CatalogUnavailable(String),
}
