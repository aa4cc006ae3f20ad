//! Generic, schema-driven config validation.
//!
//! Strategies without bespoke cross-field rules (grid, DCA, mean reversion,
//! trend following) are validated purely against the definition's
//! `config_schema`: required fields present and non-null, values within the
//! declared type and bounds.

use crate::error::StrategyError;
use crate::DraftConfig;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;

/// Validates the draft's value map against the definition schema, fail-fast.
///
/// Schema iteration order is the `BTreeMap` key order, so the first reported
/// violation is deterministic for a given schema.
pub fn validate_against_schema(draft: &DraftConfig<'_>) -> Result<(), StrategyError> {
    for (name, spec) in draft.schema {
        match draft.values.get(name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(StrategyError::InvalidParameters(format!(
                        "{} is required",
                        name
                    )));
                }
            }
            Some(value) => {
                spec.validate_value(name, value)
                    .map_err(|e| StrategyError::InvalidParameters(e.to_string()))?;
            }
        }
    }
    Ok(())
}

/// Reads a numeric config value as a `Decimal`, if present and numeric.
pub fn decimal_field(values: &BTreeMap<String, Value>, name: &str) -> Option<Decimal> {
    values.get(name).and_then(Value::as_f64).and_then(Decimal::from_f64)
}

/// Reads a boolean config value, falling back to `default` when absent.
pub fn bool_field(values: &BTreeMap<String, Value>, name: &str, default: bool) -> bool {
    values.get(name).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::factory::handler_for;
    use core_types::StrategyType;
    use std::collections::BTreeMap;

    fn draft_for<'a>(
        schema: &'a BTreeMap<String, core_types::FieldSpec>,
        values: &'a BTreeMap<String, Value>,
        symbols: &'a [String],
        overrides: &'a BTreeMap<String, crate::SymbolParams>,
    ) -> DraftConfig<'a> {
        DraftConfig {
            symbols,
            values,
            symbol_overrides: overrides,
            schema,
        }
    }

    #[test]
    fn missing_required_field_is_first_error() {
        let definition = catalog::default_strategies()
            .into_iter()
            .find(|d| d.strategy_type == StrategyType::GridTrading)
            .unwrap();
        let values = BTreeMap::new();
        let symbols = vec!["BTCUSDT".to_string()];
        let overrides = BTreeMap::new();
        let draft = draft_for(&definition.config_schema, &values, &symbols, &overrides);

        let err = validate_against_schema(&draft).unwrap_err();
        // BTreeMap order: grid_size sorts before grid_spacing.
        assert_eq!(
            err,
            StrategyError::InvalidParameters("grid_size is required".to_string())
        );
    }

    #[test]
    fn defaults_satisfy_every_schema() {
        for definition in catalog::default_strategies() {
            let handler = handler_for(&definition.strategy_type)
                .unwrap_or_else(|| panic!("no handler for {}", definition.strategy_type));
            let values = handler.defaults();
            let symbols = vec!["BTCUSDT".to_string()];
            let overrides = BTreeMap::new();
            let draft = draft_for(&definition.config_schema, &values, &symbols, &overrides);
            assert!(
                validate_against_schema(&draft).is_ok(),
                "defaults for {} violate their own schema",
                definition.strategy_type
            );
        }
    }

    #[test]
    fn out_of_bounds_value_is_reported_with_field_name() {
        let definition = catalog::default_strategies()
            .into_iter()
            .find(|d| d.strategy_type == StrategyType::Dca)
            .unwrap();
        let handler = handler_for(&StrategyType::Dca).unwrap();
        let mut values = handler.defaults();
        values.insert("safety_orders".to_string(), serde_json::json!(25));
        let symbols = vec!["BTCUSDT".to_string()];
        let overrides = BTreeMap::new();
        let draft = draft_for(&definition.config_schema, &values, &symbols, &overrides);

        let err = validate_against_schema(&draft).unwrap_err();
        assert_eq!(
            err,
            StrategyError::InvalidParameters(
                "Invalid input for safety_orders: must be at most 20".to_string()
            )
        );
    }
}
