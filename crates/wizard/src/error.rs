use strategies::StrategyError;
use thiserror::Error;

/// The error a gateway implementation maps backend failures into.
///
/// The message is the backend's own wording; the wizard surfaces it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct GatewayError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// A client-side validation failure; shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Strategy(#[from] StrategyError),

    /// The backend rejected the submission; message passed through verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("The bot has already been submitted")]
    AlreadySubmitted,

    #[error("The wizard is not at the configuration step yet")]
    NotAtFinalStep,

    #[error("The configuration step completes via submit, not advance")]
    AtFinalStep,
}

impl From<GatewayError> for WizardError {
    fn from(e: GatewayError) -> Self {
        WizardError::Backend(e.0)
    }
}
