//! The Trend Following configuration handler.

use crate::error::StrategyError;
use crate::schema::validate_against_schema;
use crate::{ConfigHandler, DraftConfig};
use core_types::StrategyType;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct TrendFollowingHandler;

impl ConfigHandler for TrendFollowingHandler {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::TrendFollowing
    }

    fn defaults(&self) -> BTreeMap<String, Value> {
        let mut values = BTreeMap::new();
        values.insert("fast_period".to_string(), serde_json::json!(12));
        values.insert("slow_period".to_string(), serde_json::json!(26));
        values.insert("stop_loss_percentage".to_string(), serde_json::json!(2.0));
        values
    }

    fn validate(&self, draft: &DraftConfig<'_>) -> Result<(), StrategyError> {
        validate_against_schema(draft)
    }
}
