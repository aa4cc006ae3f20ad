use crate::error::ApiError;
use chrono::{DateTime, Utc};
use core_types::StrategyDefinition;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The envelope every backend endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The backend's error wording, preferring `error` over `message`.
    pub fn error_message(&self) -> Option<String> {
        self.error.clone().or_else(|| self.message.clone())
    }

    /// Unwraps the payload or surfaces the backend message verbatim.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            self.data.ok_or_else(|| {
                ApiError::Deserialization("successful response carried no data".to_string())
            })
        } else {
            Err(ApiError::Backend(
                self.error_message()
                    .unwrap_or_else(|| "Unknown backend error".to_string()),
            ))
        }
    }
}

/// Payload of `GET /trading-strategies/supported`.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategiesPayload {
    pub strategies: Vec<StrategyDefinition>,
}

/// A bot as the backend reports it after create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct TradingBotResponse {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// One currency's balance from `GET /wallet/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletBalance {
    pub currency: String,
    pub available: Decimal,
    pub locked: Decimal,
}

/// Payload of `GET /wallet/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletSummaryResponse {
    pub balances: Vec<WalletBalance>,
}

/// Payload of `POST /withdrawals`.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalReceipt {
    pub id: String,
}

/// Payload of `POST /withdrawals/validate-address`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressValidity {
    pub valid: bool,
}

/// Payload of `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_the_payload() {
        let envelope: ApiResponse<WithdrawalReceipt> =
            serde_json::from_str(r#"{"success":true,"data":{"id":"wd-1"}}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap().id, "wd-1");
    }

    #[test]
    fn failure_envelope_yields_the_backend_message_verbatim() {
        let envelope: ApiResponse<WithdrawalReceipt> =
            serde_json::from_str(r#"{"success":false,"error":"Withdrawal suspended for USDT"}"#)
                .unwrap();
        match envelope.into_result() {
            Err(ApiError::Backend(msg)) => assert_eq!(msg, "Withdrawal suspended for USDT"),
            other => panic!("unexpected: {:?}", other.map(|r| r.id)),
        }
    }

    #[test]
    fn message_field_is_the_fallback_wording() {
        let envelope: ApiResponse<WithdrawalReceipt> =
            serde_json::from_str(r#"{"success":false,"message":"Try again later"}"#).unwrap();
        assert_eq!(envelope.error_message().as_deref(), Some("Try again later"));
    }

    #[test]
    fn wallet_summary_decodes_decimal_balances() {
        let envelope: ApiResponse<WalletSummaryResponse> = serde_json::from_str(
            r#"{"success":true,"data":{"balances":[{"currency":"USDT","available":"1250.50","locked":"10"}]}}"#,
        )
        .unwrap();
        let summary = envelope.into_result().unwrap();
        assert_eq!(summary.balances[0].available.to_string(), "1250.50");
    }
}
