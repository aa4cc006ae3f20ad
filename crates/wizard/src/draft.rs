//! The in-progress bot configuration.
//!
//! A draft lives only as long as the open wizard: created empty, mutated step
//! by step, converted into a [`BotRequest`] on submit, and dropped on cancel.

use crate::error::WizardError;
use core_types::{BotRequest, PositionSizing, StrategyDefinition, StrategyType, TradingMode};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use strategies::{handler_for, SymbolParams};
use uuid::Uuid;

/// The strategy picked in step 2, together with its config state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedStrategy {
    pub definition: StrategyDefinition,
    /// The generic field → value map driven by the definition's schema.
    pub config: BTreeMap<String, Value>,
    /// Per-symbol overrides; only meaningful for Alpha Compounder.
    pub symbol_overrides: BTreeMap<String, SymbolParams>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfigDraft {
    pub name: String,
    pub description: Option<String>,
    pub credential_id: String,
    symbols: Vec<String>,
    pub trading_mode: TradingMode,
    pub starting_balance: Decimal,
    pub max_active_positions: u32,
    pub leverage: Option<u32>,
    pub use_auto_leverage: bool,
    pub max_position_size: Option<Decimal>,
    pub position_sizing: PositionSizing,
    pub strategy: Option<SelectedStrategy>,
}

impl BotConfigDraft {
    /// An empty draft, as created when the wizard opens.
    pub fn new(trading_mode: TradingMode) -> Self {
        Self {
            name: String::new(),
            description: None,
            credential_id: String::new(),
            symbols: Vec::new(),
            trading_mode,
            starting_balance: Decimal::ZERO,
            max_active_positions: 1,
            leverage: None,
            use_auto_leverage: false,
            max_position_size: None,
            position_sizing: PositionSizing::StrategyDefault,
            strategy: None,
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Adds a symbol, keeping the list unique. Returns whether it was new.
    pub fn add_symbol(&mut self, symbol: impl Into<String>) -> bool {
        let symbol = symbol.into();
        if self.symbols.contains(&symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    pub fn remove_symbol(&mut self, symbol: &str) {
        self.symbols.retain(|s| s != symbol);
        if let Some(strategy) = &mut self.strategy {
            strategy.symbol_overrides.remove(symbol);
        }
    }

    pub fn clear_symbols(&mut self) {
        self.symbols.clear();
        if let Some(strategy) = &mut self.strategy {
            strategy.symbol_overrides.clear();
        }
    }

    /// Selects (or re-selects) a strategy, seeding its config with the
    /// handler's defaults without clobbering values the user already edited.
    pub fn select_strategy(&mut self, definition: StrategyDefinition) {
        let previous = self
            .strategy
            .take()
            .filter(|s| s.definition.strategy_type == definition.strategy_type);
        let (mut config, symbol_overrides) = match previous {
            Some(s) => (s.config, s.symbol_overrides),
            None => (BTreeMap::new(), BTreeMap::new()),
        };
        if let Some(handler) = handler_for(&definition.strategy_type) {
            for (name, value) in handler.defaults() {
                config.entry(name).or_insert(value);
            }
        }
        self.strategy = Some(SelectedStrategy {
            definition,
            config,
            symbol_overrides,
        });
    }

    /// Sets one config field, producing the usual immutable-update semantics
    /// at the map level (a fresh value replaces the old one).
    pub fn set_config_value(&mut self, name: impl Into<String>, value: Value) {
        if let Some(strategy) = &mut self.strategy {
            strategy.config.insert(name.into(), value);
        }
    }

    /// Sets the per-symbol parameters for an Alpha Compounder symbol.
    pub fn set_symbol_params(&mut self, symbol: impl Into<String>, params: SymbolParams) {
        if let Some(strategy) = &mut self.strategy {
            strategy.symbol_overrides.insert(symbol.into(), params);
        }
    }

    /// Assembles the final request payload.
    ///
    /// Alpha Compounder per-symbol overrides are flattened into the config map
    /// under `symbol_overrides`; position sizing flattens to at most one of
    /// the two wire fields.
    pub fn build_request(&self) -> Result<BotRequest, WizardError> {
        let strategy = self
            .strategy
            .as_ref()
            .ok_or_else(|| WizardError::Validation("Select a strategy to continue".to_string()))?;

        let mut config = strategy.config.clone();
        if strategy.definition.strategy_type == StrategyType::AlphaCompounder
            && !strategy.symbol_overrides.is_empty()
        {
            let overrides = serde_json::to_value(&strategy.symbol_overrides)
                .map_err(|e| WizardError::Validation(e.to_string()))?;
            config.insert("symbol_overrides".to_string(), overrides);
        }

        Ok(BotRequest {
            client_request_id: Uuid::new_v4(),
            name: self.name.clone(),
            description: self.description.clone(),
            credential_id: self.credential_id.clone(),
            symbols: self.symbols.clone(),
            strategy_type: strategy.definition.strategy_type.clone(),
            config,
            trading_mode: self.trading_mode,
            starting_balance: self.starting_balance,
            max_active_positions: self.max_active_positions,
            leverage: self.leverage,
            use_auto_leverage: self.use_auto_leverage,
            max_position_size: self.max_position_size,
            risk_per_trade: self.position_sizing.risk_per_trade(),
            position_size_percent: self.position_sizing.position_size_percent(),
        })
    }
}
