//! # Meridian API Client
//!
//! The one place that talks HTTP. Every call goes to the marketplace backend
//! as JSON over HTTPS with a bearer token; a 401 triggers at most one
//! transparent token refresh and retry before the session is declared
//! expired. Domain crates never see any of this: they consume the client
//! through the gateway traits they define (`strategies::CatalogSource`,
//! `wizard::BotGateway`, `wallet::WalletGateway`).

use crate::auth::SessionTokens;
use crate::error::ApiError;
use async_trait::async_trait;
use configuration::settings::{ApiConfig, AuthConfig};
use core_types::{AddressBookEntry, BotRequest, StrategyDefinition, WithdrawalLimits, WithdrawalRequest};
use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

mod auth;
pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{
    AddressValidity, ApiResponse, StrategiesPayload, TokenPair, TradingBotResponse, WalletBalance,
    WalletSummaryResponse, WithdrawalReceipt,
};

/// A concrete client for the marketplace REST backend.
pub struct MarketplaceClient {
    client: reqwest::Client,
    base_url: String,
    tokens: SessionTokens,
}

impl MarketplaceClient {
    pub fn new(api: &ApiConfig, auth_config: &AuthConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            tokens: SessionTokens::new(auth_config),
        })
    }

    /// Sends one authenticated request and decodes the response envelope.
    ///
    /// On a 401 the body message decides: a sign-out pattern fails
    /// immediately with `SessionExpired`, anything else earns a single
    /// refresh-and-retry. A second 401 always expires the session.
    async fn request_envelope<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut refreshed = false;

        loop {
            let token = self.tokens.access_token().await;
            let mut request = self.client.request(method.clone(), &url).bearer_auth(token);
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;

            if status == StatusCode::UNAUTHORIZED {
                let message = backend_message(&text);
                if refreshed || auth::is_sign_out_message(message.as_deref()) {
                    return Err(ApiError::SessionExpired(
                        message.unwrap_or_else(|| "unauthorized".to_string()),
                    ));
                }
                tracing::debug!(%path, "Got 401; refreshing the session token once");
                self.refresh_session().await?;
                refreshed = true;
                continue;
            }

            if !status.is_success() {
                if let Some(message) = backend_message(&text) {
                    return Err(ApiError::Backend(message));
                }
                return Err(ApiError::Http {
                    status: status.as_u16(),
                    body: text,
                });
            }

            let envelope: ApiResponse<T> = serde_json::from_str(&text)
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;
            return envelope.into_result();
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_envelope::<T, ()>(Method::GET, path, None).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_envelope(Method::POST, path, Some(body)).await
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_envelope(Method::PUT, path, Some(body)).await
    }

    /// Exchanges the refresh token for a new pair and installs it.
    async fn refresh_session(&self) -> Result<(), ApiError> {
        let refresh_token = self.tokens.refresh_token().await;
        let response = self
            .client
            .post(format!("{}/auth/refresh", self.base_url))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message =
                backend_message(&text).unwrap_or_else(|| "session refresh rejected".to_string());
            return Err(ApiError::SessionExpired(message));
        }
        let envelope: ApiResponse<TokenPair> =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        self.tokens.install(envelope.into_result()?).await;
        Ok(())
    }

    // --- Endpoint wrappers ---

    pub async fn supported_strategies(&self) -> Result<Vec<StrategyDefinition>, ApiError> {
        let payload: StrategiesPayload = self.get_json("/trading-strategies/supported").await?;
        Ok(payload.strategies)
    }

    pub async fn create_bot(&self, request: &BotRequest) -> Result<TradingBotResponse, ApiError> {
        self.post_json("/trading-bots", request).await
    }

    pub async fn update_bot_config(
        &self,
        bot_id: &str,
        request: &BotRequest,
    ) -> Result<TradingBotResponse, ApiError> {
        self.put_json(&format!("/trading-bots/{}/config", bot_id), request)
            .await
    }

    pub async fn wallet_summary(&self) -> Result<WalletSummaryResponse, ApiError> {
        self.get_json("/wallet/summary").await
    }

    pub async fn withdrawal_limits(&self, currency: &str) -> Result<WithdrawalLimits, ApiError> {
        self.get_json(&format!("/withdrawals/limits?currency={}", currency))
            .await
    }

    pub async fn create_withdrawal(
        &self,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt, ApiError> {
        self.post_json("/withdrawals", request).await
    }

    pub async fn validate_address(
        &self,
        currency: &str,
        network: &str,
        address: &str,
    ) -> Result<AddressValidity, ApiError> {
        self.post_json(
            "/withdrawals/validate-address",
            &json!({ "currency": currency, "network": network, "address": address }),
        )
        .await
    }

    pub async fn save_address(&self, entry: &AddressBookEntry) -> Result<AddressBookEntry, ApiError> {
        self.post_json("/withdrawals/address-book", entry).await
    }

    pub async fn list_addresses(&self, currency: &str) -> Result<Vec<AddressBookEntry>, ApiError> {
        self.get_json(&format!("/withdrawals/address-book?currency={}", currency))
            .await
    }
}

/// Pulls the backend's error wording out of a raw body, if it is an envelope.
fn backend_message(text: &str) -> Option<String> {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(text)
        .ok()
        .and_then(|envelope| envelope.error_message())
}

// --- Gateway seam implementations ---

#[async_trait]
impl strategies::CatalogSource for MarketplaceClient {
    async fn fetch_catalog(&self) -> Result<Vec<StrategyDefinition>, strategies::StrategyError> {
        self.supported_strategies()
            .await
            .map_err(|e| strategies::StrategyError::CatalogUnavailable(e.to_string()))
    }
}

#[async_trait]
impl wizard::BotGateway for MarketplaceClient {
    async fn create_bot(&self, request: &BotRequest) -> Result<String, wizard::GatewayError> {
        MarketplaceClient::create_bot(self, request)
            .await
            .map(|bot| bot.id)
            .map_err(|e| wizard::GatewayError(e.to_string()))
    }

    async fn update_bot_config(
        &self,
        bot_id: &str,
        request: &BotRequest,
    ) -> Result<String, wizard::GatewayError> {
        MarketplaceClient::update_bot_config(self, bot_id, request)
            .await
            .map(|bot| bot.id)
            .map_err(|e| wizard::GatewayError(e.to_string()))
    }
}

#[async_trait]
impl wallet::WalletGateway for MarketplaceClient {
    async fn fetch_limits(&self, currency: &str) -> Result<WithdrawalLimits, wallet::WalletError> {
        self.withdrawal_limits(currency)
            .await
            .map_err(|e| wallet::WalletError::Backend(e.to_string()))
    }

    async fn available_balance(&self, currency: &str) -> Result<Decimal, wallet::WalletError> {
        let summary = self
            .wallet_summary()
            .await
            .map_err(|e| wallet::WalletError::Backend(e.to_string()))?;
        Ok(summary
            .balances
            .iter()
            .find(|b| b.currency == currency)
            .map(|b| b.available)
            .unwrap_or(Decimal::ZERO))
    }

    async fn validate_address(
        &self,
        currency: &str,
        network: &str,
        address: &str,
    ) -> Result<bool, wallet::WalletError> {
        MarketplaceClient::validate_address(self, currency, network, address)
            .await
            .map(|v| v.valid)
            .map_err(|e| wallet::WalletError::Backend(e.to_string()))
    }

    async fn create_withdrawal(
        &self,
        request: &WithdrawalRequest,
    ) -> Result<String, wallet::WalletError> {
        MarketplaceClient::create_withdrawal(self, request)
            .await
            .map(|receipt| receipt.id)
            .map_err(|e| wallet::WalletError::Backend(e.to_string()))
    }

    async fn save_address(&self, entry: &AddressBookEntry) -> Result<(), wallet::WalletError> {
        MarketplaceClient::save_address(self, entry)
            .await
            .map(|_| ())
            .map_err(|e| wallet::WalletError::Backend(e.to_string()))
    }

    async fn list_addresses(
        &self,
        currency: &str,
    ) -> Result<Vec<AddressBookEntry>, wallet::WalletError> {
        MarketplaceClient::list_addresses(self, currency)
            .await
            .map_err(|e| wallet::WalletError::Backend(e.to_string()))
    }
}
