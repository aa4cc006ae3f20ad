//! The embedded strategy catalog.
//!
//! This is the documented fallback used whenever the backend catalog endpoint
//! is down or returns nothing. The wizard must stay usable without it, so the
//! definitions here are complete: schema, bounds, risk levels, and minimum
//! balances all match what the backend would have served.

use core_types::{FieldSpec, FieldType, RiskLevel, StrategyDefinition, StrategyType, TradingMode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn number(min: Decimal, max: Decimal) -> FieldSpec {
    FieldSpec {
        required: true,
        field_type: FieldType::Number,
        min: Some(min),
        max: Some(max),
    }
}

fn integer(min: Decimal, max: Decimal) -> FieldSpec {
    FieldSpec {
        required: true,
        field_type: FieldType::Integer,
        min: Some(min),
        max: Some(max),
    }
}

fn amount(min: Decimal) -> FieldSpec {
    FieldSpec {
        required: true,
        field_type: FieldType::Number,
        min: Some(min),
        max: None,
    }
}

fn boolean(required: bool) -> FieldSpec {
    FieldSpec {
        required,
        field_type: FieldType::Boolean,
        min: None,
        max: None,
    }
}

/// Returns the full embedded catalog, one definition per implemented variant.
pub fn default_strategies() -> Vec<StrategyDefinition> {
    vec![
        alpha_compounder(),
        grid_trading(),
        dca(),
        mean_reversion(),
        trend_following(),
        ai_signal(),
    ]
}

fn alpha_compounder() -> StrategyDefinition {
    let mut schema = BTreeMap::new();
    schema.insert("take_profit_percentage".to_string(), number(dec!(0.1), dec!(100)));
    schema.insert("pull_back_percentage".to_string(), number(dec!(0.1), dec!(50)));
    StrategyDefinition {
        strategy_type: StrategyType::AlphaCompounder,
        name: "Alpha Compounder".to_string(),
        description: "Takes profit at a fixed percentage and re-enters after a pullback, \
                      compounding gains per symbol."
            .to_string(),
        risk_level: RiskLevel::Medium,
        supported_modes: vec![TradingMode::Spot, TradingMode::Futures],
        config_schema: schema,
        min_starting_balance: dec!(100),
        recommended_symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
    }
}

fn grid_trading() -> StrategyDefinition {
    let mut schema = BTreeMap::new();
    schema.insert("grid_size".to_string(), integer(dec!(3), dec!(50)));
    schema.insert("grid_spacing".to_string(), number(dec!(0.1), dec!(10)));
    schema.insert("investment_per_order".to_string(), amount(dec!(1)));
    schema.insert("profit_per_grid".to_string(), number(dec!(0.1), dec!(5)));
    StrategyDefinition {
        strategy_type: StrategyType::GridTrading,
        name: "Grid Trading".to_string(),
        description: "Places a ladder of buy and sell orders at fixed spacing and harvests \
                      the oscillation between grid levels."
            .to_string(),
        risk_level: RiskLevel::Low,
        supported_modes: vec![TradingMode::Spot, TradingMode::Futures],
        config_schema: schema,
        min_starting_balance: dec!(50),
        recommended_symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string(), "SOLUSDT".to_string()],
    }
}

fn dca() -> StrategyDefinition {
    let mut schema = BTreeMap::new();
    schema.insert("buy_interval_hours".to_string(), integer(dec!(1), dec!(168)));
    schema.insert("buy_amount".to_string(), amount(dec!(1)));
    schema.insert("max_orders".to_string(), integer(dec!(1), dec!(100)));
    schema.insert("safety_orders".to_string(), integer(dec!(0), dec!(20)));
    schema.insert("volume_scale".to_string(), number(dec!(1), dec!(10)));
    schema.insert("step_scale".to_string(), number(dec!(1), dec!(10)));
    StrategyDefinition {
        strategy_type: StrategyType::Dca,
        name: "DCA".to_string(),
        description: "Buys on a fixed schedule with optional scaled safety orders to average \
                      down the entry price."
            .to_string(),
        risk_level: RiskLevel::Low,
        supported_modes: vec![TradingMode::Spot],
        config_schema: schema,
        min_starting_balance: dec!(25),
        recommended_symbols: vec!["BTCUSDT".to_string()],
    }
}

fn mean_reversion() -> StrategyDefinition {
    let mut schema = BTreeMap::new();
    schema.insert("lookback_period".to_string(), integer(dec!(5), dec!(200)));
    schema.insert("entry_threshold".to_string(), number(dec!(0.5), dec!(5)));
    schema.insert("exit_threshold".to_string(), number(dec!(0.1), dec!(3)));
    StrategyDefinition {
        strategy_type: StrategyType::MeanReversion,
        name: "Mean Reversion".to_string(),
        description: "Enters when price deviates a configurable number of standard deviations \
                      from its rolling mean and exits on reversion."
            .to_string(),
        risk_level: RiskLevel::Medium,
        supported_modes: vec![TradingMode::Spot, TradingMode::Futures],
        config_schema: schema,
        min_starting_balance: dec!(100),
        recommended_symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
    }
}

fn trend_following() -> StrategyDefinition {
    let mut schema = BTreeMap::new();
    schema.insert("fast_period".to_string(), integer(dec!(2), dec!(100)));
    schema.insert("slow_period".to_string(), integer(dec!(5), dec!(400)));
    schema.insert("stop_loss_percentage".to_string(), number(dec!(0.1), dec!(20)));
    StrategyDefinition {
        strategy_type: StrategyType::TrendFollowing,
        name: "Trend Following".to_string(),
        description: "Rides established trends using a fast/slow moving average pair with a \
                      percentage stop."
            .to_string(),
        risk_level: RiskLevel::High,
        supported_modes: vec![TradingMode::Futures],
        config_schema: schema,
        min_starting_balance: dec!(200),
        recommended_symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
    }
}

fn ai_signal() -> StrategyDefinition {
    let mut schema = BTreeMap::new();
    schema.insert("enable_long_signals".to_string(), boolean(true));
    schema.insert("enable_short_signals".to_string(), boolean(true));
    schema.insert("use_trailing_stop".to_string(), boolean(false));
    schema.insert("trailing_trigger_percentage".to_string(), number(dec!(0), dec!(50)));
    schema.insert("trailing_stop_percentage".to_string(), number(dec!(0), dec!(20)));
    StrategyDefinition {
        strategy_type: StrategyType::AiSignal,
        name: "AI Signal".to_string(),
        description: "Trades long/short signals produced by the backend signal service, with \
                      an optional trailing stop."
            .to_string(),
        risk_level: RiskLevel::High,
        supported_modes: vec![TradingMode::Futures],
        config_schema: schema,
        min_starting_balance: dec!(500),
        recommended_symbols: vec!["BTCUSDT".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_implemented_variants() {
        let types: Vec<_> = default_strategies()
            .into_iter()
            .map(|d| d.strategy_type)
            .collect();
        assert_eq!(
            types,
            vec![
                StrategyType::AlphaCompounder,
                StrategyType::GridTrading,
                StrategyType::Dca,
                StrategyType::MeanReversion,
                StrategyType::TrendFollowing,
                StrategyType::AiSignal,
            ]
        );
    }

    #[test]
    fn grid_trading_schema_bounds_are_documented_values() {
        let grid = grid_trading();
        let size = &grid.config_schema["grid_size"];
        assert_eq!(size.min, Some(dec!(3)));
        assert_eq!(size.max, Some(dec!(50)));
        let spacing = &grid.config_schema["grid_spacing"];
        assert_eq!(spacing.min, Some(dec!(0.1)));
        assert_eq!(spacing.max, Some(dec!(10)));
    }
}
