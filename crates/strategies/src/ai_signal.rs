//! The AI Signal configuration handler.
//!
//! On top of the schema check, this variant has two cross-field rules: at
//! least one signal direction must be enabled, and an enabled trailing stop
//! must have a stop percentage strictly below its trigger percentage.

use crate::error::StrategyError;
use crate::schema::{bool_field, decimal_field, validate_against_schema};
use crate::{ConfigHandler, DraftConfig};
use core_types::StrategyType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct AiSignalHandler;

impl ConfigHandler for AiSignalHandler {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::AiSignal
    }

    fn defaults(&self) -> BTreeMap<String, Value> {
        let mut values = BTreeMap::new();
        values.insert("enable_long_signals".to_string(), serde_json::json!(true));
        values.insert("enable_short_signals".to_string(), serde_json::json!(false));
        values.insert("use_trailing_stop".to_string(), serde_json::json!(false));
        values.insert("trailing_trigger_percentage".to_string(), serde_json::json!(3.0));
        values.insert("trailing_stop_percentage".to_string(), serde_json::json!(1.0));
        values
    }

    fn validate(&self, draft: &DraftConfig<'_>) -> Result<(), StrategyError> {
        validate_against_schema(draft)?;

        let long = bool_field(draft.values, "enable_long_signals", false);
        let short = bool_field(draft.values, "enable_short_signals", false);
        if !long && !short {
            return Err(StrategyError::InvalidParameters(
                "At least one of long or short signals must be enabled".to_string(),
            ));
        }

        if bool_field(draft.values, "use_trailing_stop", false) {
            let trigger =
                decimal_field(draft.values, "trailing_trigger_percentage").unwrap_or(Decimal::ZERO);
            let stop =
                decimal_field(draft.values, "trailing_stop_percentage").unwrap_or(Decimal::ZERO);
            if trigger <= Decimal::ZERO || trigger > dec!(50) {
                return Err(StrategyError::InvalidParameters(
                    "trailing_trigger_percentage must be greater than 0 and at most 50".to_string(),
                ));
            }
            if stop <= Decimal::ZERO || stop > dec!(20) {
                return Err(StrategyError::InvalidParameters(
                    "trailing_stop_percentage must be greater than 0 and at most 20".to_string(),
                ));
            }
            if stop >= trigger {
                return Err(StrategyError::InvalidParameters(
                    "trailing_stop_percentage must be less than trailing_trigger_percentage"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}
