//! The Alpha Compounder configuration handler.
//!
//! Alpha Compounder is the one variant configured per symbol: every selected
//! symbol carries its own take-profit / pull-back pair, seeded from the
//! top-level defaults and overridable individually.

use crate::error::StrategyError;
use crate::schema::decimal_field;
use crate::{ConfigHandler, DraftConfig};
use core_types::StrategyType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-symbol Alpha Compounder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolParams {
    pub take_profit_percentage: Decimal,
    pub pull_back_percentage: Decimal,
}

impl Default for SymbolParams {
    fn default() -> Self {
        Self {
            take_profit_percentage: dec!(5.0),
            pull_back_percentage: dec!(1.0),
        }
    }
}

pub struct AlphaCompounderHandler;

impl AlphaCompounderHandler {
    /// The effective parameters for one symbol: its explicit override, else
    /// the top-level config values, else the documented defaults.
    fn params_for(draft: &DraftConfig<'_>, symbol: &str) -> SymbolParams {
        if let Some(params) = draft.symbol_overrides.get(symbol) {
            return *params;
        }
        let fallback = SymbolParams::default();
        SymbolParams {
            take_profit_percentage: decimal_field(draft.values, "take_profit_percentage")
                .unwrap_or(fallback.take_profit_percentage),
            pull_back_percentage: decimal_field(draft.values, "pull_back_percentage")
                .unwrap_or(fallback.pull_back_percentage),
        }
    }
}

impl ConfigHandler for AlphaCompounderHandler {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::AlphaCompounder
    }

    fn defaults(&self) -> BTreeMap<String, Value> {
        let mut values = BTreeMap::new();
        values.insert("take_profit_percentage".to_string(), serde_json::json!(5.0));
        values.insert("pull_back_percentage".to_string(), serde_json::json!(1.0));
        values
    }

    /// Checks every selected symbol's pair, failing on the first bad symbol.
    ///
    /// Take-profit must be in (0, 100], pull-back in (0, 50], and take-profit
    /// must strictly exceed pull-back; every message names the symbol.
    fn validate(&self, draft: &DraftConfig<'_>) -> Result<(), StrategyError> {
        for symbol in draft.symbols {
            let params = Self::params_for(draft, symbol);
            if params.take_profit_percentage <= Decimal::ZERO
                || params.take_profit_percentage > dec!(100)
            {
                return Err(StrategyError::InvalidParameters(format!(
                    "{}: take_profit_percentage must be greater than 0 and at most 100",
                    symbol
                )));
            }
            if params.pull_back_percentage <= Decimal::ZERO
                || params.pull_back_percentage > dec!(50)
            {
                return Err(StrategyError::InvalidParameters(format!(
                    "{}: pull_back_percentage must be greater than 0 and at most 50",
                    symbol
                )));
            }
            if params.take_profit_percentage <= params.pull_back_percentage {
                return Err(StrategyError::InvalidParameters(format!(
                    "{}: take_profit_percentage must be greater than pull_back_percentage",
                    symbol
                )));
            }
        }
        Ok(())
    }
}
