//! The Mean Reversion configuration handler.
//!
//! Validated purely against the definition schema; the interesting thresholds
//! live server-side.

use crate::error::StrategyError;
use crate::schema::validate_against_schema;
use crate::{ConfigHandler, DraftConfig};
use core_types::StrategyType;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct MeanReversionHandler;

impl ConfigHandler for MeanReversionHandler {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::MeanReversion
    }

    fn defaults(&self) -> BTreeMap<String, Value> {
        let mut values = BTreeMap::new();
        values.insert("lookback_period".to_string(), serde_json::json!(20));
        values.insert("entry_threshold".to_string(), serde_json::json!(2.0));
        values.insert("exit_threshold".to_string(), serde_json::json!(0.5));
        values
    }

    fn validate(&self, draft: &DraftConfig<'_>) -> Result<(), StrategyError> {
        validate_against_schema(draft)
    }
}
