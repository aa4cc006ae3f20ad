//! Catalog retrieval with an explicit fallback.

use crate::catalog;
use crate::error::StrategyError;
use async_trait::async_trait;
use core_types::StrategyDefinition;

/// The seam through which the catalog is fetched from the backend.
///
/// The API client implements this; tests substitute a mock.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<StrategyDefinition>, StrategyError>;
}

/// Returns the supported strategies, preferring the backend catalog.
///
/// A transport failure or an empty catalog both fall back to the embedded
/// default set, so the wizard is always usable. The fallback is logged at
/// `warn` because it usually means the catalog endpoint is down.
pub async fn supported_strategies<S>(source: &S) -> Vec<StrategyDefinition>
where
    S: CatalogSource + ?Sized,
{
    match source.fetch_catalog().await {
        Ok(strategies) if !strategies.is_empty() => strategies,
        Ok(_) => {
            tracing::warn!("Backend strategy catalog is empty; using the embedded catalog");
            catalog::default_strategies()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch the strategy catalog; using the embedded catalog");
            catalog::default_strategies()
        }
    }
}
