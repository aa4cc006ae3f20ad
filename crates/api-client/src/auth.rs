//! Session token state and 401 classification.

use crate::responses::TokenPair;
use configuration::AuthConfig;
use tokio::sync::RwLock;

/// The bearer/refresh token pair attached to every request.
///
/// Guarded by an `RwLock` because a transparent refresh can race with other
/// in-flight requests reading the access token.
pub struct SessionTokens {
    access: RwLock<String>,
    refresh: RwLock<String>,
}

impl SessionTokens {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            access: RwLock::new(auth.access_token.clone()),
            refresh: RwLock::new(auth.refresh_token.clone()),
        }
    }

    pub async fn access_token(&self) -> String {
        self.access.read().await.clone()
    }

    pub async fn refresh_token(&self) -> String {
        self.refresh.read().await.clone()
    }

    /// Installs a freshly issued token pair.
    pub async fn install(&self, pair: TokenPair) {
        *self.access.write().await = pair.access_token;
        *self.refresh.write().await = pair.refresh_token;
    }
}

/// Whether a 401 body means the session is beyond refreshing.
///
/// The backend signals forced sign-out with "user not registered" or a plain
/// "unauthorized". Anything else, including a 401 with no envelope message at
/// all (the usual expired-access-token shape), is worth one silent
/// refresh-and-retry.
pub fn is_sign_out_message(message: Option<&str>) -> bool {
    let Some(message) = message else {
        return false;
    };
    let message = message.to_lowercase();
    message.contains("user not registered") || message.contains("unauthorized")
}
