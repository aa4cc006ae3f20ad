//! The Grid Trading configuration handler.

use crate::error::StrategyError;
use crate::schema::validate_against_schema;
use crate::{ConfigHandler, DraftConfig};
use core_types::StrategyType;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct GridTradingHandler;

impl ConfigHandler for GridTradingHandler {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::GridTrading
    }

    fn defaults(&self) -> BTreeMap<String, Value> {
        let mut values = BTreeMap::new();
        values.insert("grid_size".to_string(), serde_json::json!(10));
        values.insert("grid_spacing".to_string(), serde_json::json!(1.0));
        values.insert("investment_per_order".to_string(), serde_json::json!(10));
        values.insert("profit_per_grid".to_string(), serde_json::json!(0.5));
        values
    }

    fn validate(&self, draft: &DraftConfig<'_>) -> Result<(), StrategyError> {
        validate_against_schema(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_documented_values() {
        let defaults = GridTradingHandler.defaults();
        assert_eq!(defaults["grid_size"], serde_json::json!(10));
        assert_eq!(defaults["grid_spacing"], serde_json::json!(1.0));
        assert_eq!(defaults["investment_per_order"], serde_json::json!(10));
        assert_eq!(defaults["profit_per_grid"], serde_json::json!(0.5));
    }
}
