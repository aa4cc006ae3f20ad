//! # Meridian Wallet Flows
//!
//! The withdrawal form, its collect-all validator, and the submit
//! orchestration. Limits, balances, and address validity all come from the
//! backend through the [`WalletGateway`] seam; this crate only decides
//! whether a submission may leave the client.

pub mod error;
pub mod validator;

pub use error::WalletError;
pub use validator::validate;

use async_trait::async_trait;
use core_types::{AddressBookEntry, WithdrawalLimits, WithdrawalRequest};
use rust_decimal::Decimal;

/// The client-local withdrawal form state.
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalForm {
    pub currency: String,
    pub network: String,
    pub amount: Decimal,
    pub address: String,
    pub description: Option<String>,
    pub save_to_address_book: bool,
    pub label: String,
}

impl WithdrawalForm {
    /// The wire payload for `POST /withdrawals`.
    pub fn to_request(&self) -> WithdrawalRequest {
        WithdrawalRequest {
            currency: self.currency.clone(),
            network: self.network.clone(),
            amount: self.amount,
            address: self.address.clone(),
            description: self.description.clone(),
        }
    }

    /// The address-book entry to persist when saving was requested.
    pub fn address_book_entry(&self) -> AddressBookEntry {
        AddressBookEntry {
            label: self.label.clone(),
            currency: self.currency.clone(),
            network: self.network.clone(),
            address: self.address.clone(),
        }
    }
}

/// The backend seam for everything wallet-related.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    async fn fetch_limits(&self, currency: &str) -> Result<WithdrawalLimits, WalletError>;

    async fn available_balance(&self, currency: &str) -> Result<Decimal, WalletError>;

    /// Asks the backend whether the address is well-formed for the network.
    async fn validate_address(
        &self,
        currency: &str,
        network: &str,
        address: &str,
    ) -> Result<bool, WalletError>;

    /// Creates the withdrawal; returns its backend-assigned id.
    async fn create_withdrawal(&self, request: &WithdrawalRequest) -> Result<String, WalletError>;

    async fn save_address(&self, entry: &AddressBookEntry) -> Result<(), WalletError>;

    async fn list_addresses(&self, currency: &str) -> Result<Vec<AddressBookEntry>, WalletError>;
}

/// Validates and submits a withdrawal.
///
/// Limits, balance, and address validity are re-fetched here rather than
/// cached, so a stale form never passes on outdated constraints. The
/// address-book save is best-effort: the withdrawal has already succeeded, so
/// a save failure is logged and swallowed.
pub async fn submit_withdrawal<G>(gateway: &G, form: &WithdrawalForm) -> Result<String, WalletError>
where
    G: WalletGateway + ?Sized,
{
    let limits = gateway.fetch_limits(&form.currency).await?;
    let available = gateway.available_balance(&form.currency).await?;
    let address_ok = if form.address.trim().is_empty() {
        false
    } else {
        gateway
            .validate_address(&form.currency, &form.network, &form.address)
            .await?
    };

    validate(form, &limits, available, address_ok).map_err(WalletError::Validation)?;

    let withdrawal_id = gateway.create_withdrawal(&form.to_request()).await?;
    tracing::info!(%withdrawal_id, currency = %form.currency, "Withdrawal created");

    if form.save_to_address_book {
        if let Err(e) = gateway.save_address(&form.address_book_entry()).await {
            tracing::warn!(error = %e, "Failed to save the address book entry; withdrawal unaffected");
        }
    }

    Ok(withdrawal_id)
}
