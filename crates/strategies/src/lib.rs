//! # Meridian Strategy Library
//!
//! This crate owns everything the client knows about trading strategies: the
//! catalog of supported strategy variants, the embedded fallback used when the
//! backend catalog is unreachable, and one configuration handler per variant.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   HTTP or the wizard UI flow. It depends only on `core-types`.
//! - **Variant Dispatch:** Per-strategy field sets and rules live behind the
//!   `ConfigHandler` trait, selected by an exhaustive `match` in `factory`.
//!   Adding a strategy means adding one variant and one handler.
//! - **Explicit Fallback:** `registry::supported_strategies` falls back to the
//!   embedded catalog as a documented value, never by silently swallowing an
//!   error.
//!
//! ## Public API
//!
//! - `ConfigHandler`: the per-variant defaults/validation interface.
//! - `factory::handler_for`: maps a `StrategyType` to its handler.
//! - `CatalogSource` / `registry::supported_strategies`: catalog retrieval
//!   with fallback.
//! - `catalog::default_strategies`: the embedded definitions.

// Declare all the modules that constitute this crate.
pub mod ai_signal;
pub mod alpha_compounder;
pub mod catalog;
pub mod dca;
pub mod error;
pub mod factory;
pub mod grid_trading;
pub mod mean_reversion;
pub mod registry;
pub mod schema;
pub mod trend_following;

// Re-export the key components to create a clean, public-facing API.
pub use alpha_compounder::SymbolParams;
pub use catalog::default_strategies;
pub use error::StrategyError;
pub use factory::handler_for;
pub use registry::{supported_strategies, CatalogSource};

use core_types::{FieldSpec, StrategyType};
use serde_json::Value;
use std::collections::BTreeMap;

/// A borrowed view of the wizard draft that strategy validation runs against.
///
/// The wizard owns the mutable draft; handlers only ever need to read the
/// selected symbols, the config value map, the per-symbol overrides, and the
/// definition's schema.
#[derive(Debug, Clone, Copy)]
pub struct DraftConfig<'a> {
    pub symbols: &'a [String],
    pub values: &'a BTreeMap<String, Value>,
    pub symbol_overrides: &'a BTreeMap<String, SymbolParams>,
    pub schema: &'a BTreeMap<String, FieldSpec>,
}

/// The per-variant configuration interface.
///
/// Validation is fail-fast: the first violation is returned and nothing else
/// is checked, matching the one-toast-per-click wizard semantics.
pub trait ConfigHandler: Send + Sync {
    /// The variant this handler serves.
    fn strategy_type(&self) -> StrategyType;

    /// The documented default value map, used to seed the config form.
    fn defaults(&self) -> BTreeMap<String, Value>;

    /// Checks the draft's config against this variant's rules.
    fn validate(&self, draft: &DraftConfig<'_>) -> Result<(), StrategyError>;
}
