//! The DCA (dollar-cost averaging) configuration handler.

use crate::error::StrategyError;
use crate::schema::validate_against_schema;
use crate::{ConfigHandler, DraftConfig};
use core_types::StrategyType;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct DcaHandler;

impl ConfigHandler for DcaHandler {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Dca
    }

    fn defaults(&self) -> BTreeMap<String, Value> {
        let mut values = BTreeMap::new();
        values.insert("buy_interval_hours".to_string(), serde_json::json!(24));
        values.insert("buy_amount".to_string(), serde_json::json!(10));
        values.insert("max_orders".to_string(), serde_json::json!(10));
        values.insert("safety_orders".to_string(), serde_json::json!(3));
        values.insert("volume_scale".to_string(), serde_json::json!(1.5));
        values.insert("step_scale".to_string(), serde_json::json!(1.2));
        values
    }

    fn validate(&self, draft: &DraftConfig<'_>) -> Result<(), StrategyError> {
        validate_against_schema(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn fractional_buy_interval_is_rejected() {
        let definition = catalog::default_strategies()
            .into_iter()
            .find(|d| d.strategy_type == StrategyType::Dca)
            .unwrap();
        let mut values = DcaHandler.defaults();
        values.insert("buy_interval_hours".to_string(), serde_json::json!(1.5));
        let symbols = vec!["BTCUSDT".to_string()];
        let overrides = BTreeMap::new();
        let draft = DraftConfig {
            symbols: &symbols,
            values: &values,
            symbol_overrides: &overrides,
            schema: &definition.config_schema,
        };

        let err = DcaHandler.validate(&draft).unwrap_err();
        assert_eq!(
            err,
            StrategyError::InvalidParameters(
                "Invalid input for buy_interval_hours: must be a whole number".to_string()
            )
        );
    }
}
