use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// `config.toml` (or an env override) could not be read or parsed.
    #[error("Failed to load client configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The file parsed, but the resulting settings cannot drive a client.
    #[error("Invalid client configuration: {0}")]
    Validation(String),
}
