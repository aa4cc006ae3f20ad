use crate::enums::{FieldType, RiskLevel, StrategyType, TradingMode};
use crate::error::CoreError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The schema of a single strategy configuration field.
///
/// `min`/`max` bound numeric fields; both are `None` for booleans and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub required: bool,
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

impl FieldSpec {
    /// Checks a config value against this field's type and bounds.
    ///
    /// Presence of required fields is the caller's concern; this only judges a
    /// value that is actually there.
    pub fn validate_value(&self, name: &str, value: &serde_json::Value) -> Result<(), CoreError> {
        match self.field_type {
            FieldType::Boolean => {
                if !value.is_boolean() {
                    return Err(CoreError::InvalidInput(
                        name.to_string(),
                        "must be true or false".to_string(),
                    ));
                }
            }
            FieldType::Text => {
                match value.as_str() {
                    Some(s) if !s.trim().is_empty() => {}
                    Some(_) => {
                        return Err(CoreError::InvalidInput(
                            name.to_string(),
                            "must not be empty".to_string(),
                        ));
                    }
                    None => {
                        return Err(CoreError::InvalidInput(
                            name.to_string(),
                            "must be text".to_string(),
                        ));
                    }
                }
            }
            FieldType::Integer | FieldType::Number => {
                let number = value.as_f64().and_then(Decimal::from_f64).ok_or_else(|| {
                    CoreError::InvalidInput(name.to_string(), "must be a number".to_string())
                })?;
                if self.field_type == FieldType::Integer && !number.is_integer() {
                    return Err(CoreError::InvalidInput(
                        name.to_string(),
                        "must be a whole number".to_string(),
                    ));
                }
                if let Some(min) = self.min {
                    if number < min {
                        return Err(CoreError::InvalidInput(
                            name.to_string(),
                            format!("must be at least {}", min),
                        ));
                    }
                }
                if let Some(max) = self.max {
                    if number > max {
                        return Err(CoreError::InvalidInput(
                            name.to_string(),
                            format!("must be at most {}", max),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A catalog entry describing one strategy variant and its configuration schema.
///
/// Definitions are immutable from the client's perspective: they come either
/// from the backend catalog endpoint or from the embedded fallback set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub strategy_type: StrategyType,
    pub name: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub supported_modes: Vec<TradingMode>,
    pub config_schema: BTreeMap<String, FieldSpec>,
    pub min_starting_balance: Decimal,
    #[serde(default)]
    pub recommended_symbols: Vec<String>,
}

impl StrategyDefinition {
    /// Whether this strategy may run in the given market.
    pub fn supports_mode(&self, mode: TradingMode) -> bool {
        self.supported_modes.contains(&mode)
    }
}

/// How a bot sizes its positions.
///
/// `risk_per_trade` and `position_size_percent` are mutually exclusive on the
/// wire, so we encode the choice as a sum type rather than two optional
/// fields. The wire form is produced by [`PositionSizing::risk_per_trade`] and
/// [`PositionSizing::position_size_percent`] at request-assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionSizing {
    /// Defer to the strategy's own sizing.
    #[default]
    StrategyDefault,
    /// Risk a fixed percentage of equity per trade.
    RiskBased(Decimal),
    /// Allocate a fixed percentage of balance per position.
    FixedPercent(Decimal),
}

impl PositionSizing {
    pub fn risk_per_trade(&self) -> Option<Decimal> {
        match self {
            PositionSizing::RiskBased(pct) => Some(*pct),
            _ => None,
        }
    }

    pub fn position_size_percent(&self) -> Option<Decimal> {
        match self {
            PositionSizing::FixedPercent(pct) => Some(*pct),
            _ => None,
        }
    }
}

/// The assembled payload for `POST /trading-bots` and
/// `PUT /trading-bots/{id}/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotRequest {
    /// Client-generated id so the backend can deduplicate a resubmitted form.
    pub client_request_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub credential_id: String,
    pub symbols: Vec<String>,
    pub strategy_type: StrategyType,
    pub config: BTreeMap<String, serde_json::Value>,
    pub trading_mode: TradingMode,
    pub starting_balance: Decimal,
    pub max_active_positions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<u32>,
    pub use_auto_leverage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_position_size: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_per_trade: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_size_percent: Option<Decimal>,
}

/// The payload for `POST /withdrawals`. Built transiently per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub currency: String,
    pub network: String,
    pub amount: Decimal,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Backend-supplied withdrawal constraints for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalLimits {
    pub minimum_amount: Decimal,
    pub maximum_amount: Decimal,
    pub remaining_today: Decimal,
}

/// A labeled withdrawal destination, persisted by the backend address book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressBookEntry {
    pub label: String,
    pub currency: String,
    pub network: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn number_spec(min: Decimal, max: Decimal) -> FieldSpec {
        FieldSpec {
            required: true,
            field_type: FieldType::Number,
            min: Some(min),
            max: Some(max),
        }
    }

    #[test]
    fn field_spec_enforces_numeric_bounds() {
        let spec = number_spec(dec!(0.1), dec!(10));
        assert!(spec.validate_value("grid_spacing", &serde_json::json!(1.0)).is_ok());
        let err = spec
            .validate_value("grid_spacing", &serde_json::json!(0.05))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input for grid_spacing: must be at least 0.1"
        );
        assert!(spec.validate_value("grid_spacing", &serde_json::json!(11)).is_err());
    }

    #[test]
    fn field_spec_rejects_fractional_integers() {
        let spec = FieldSpec {
            required: true,
            field_type: FieldType::Integer,
            min: Some(dec!(3)),
            max: Some(dec!(50)),
        };
        assert!(spec.validate_value("grid_size", &serde_json::json!(10)).is_ok());
        let err = spec
            .validate_value("grid_size", &serde_json::json!(10.5))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input for grid_size: must be a whole number"
        );
    }

    #[test]
    fn position_sizing_flattens_to_at_most_one_field() {
        for sizing in [
            PositionSizing::StrategyDefault,
            PositionSizing::RiskBased(dec!(2)),
            PositionSizing::FixedPercent(dec!(25)),
        ] {
            let both = sizing.risk_per_trade().is_some() && sizing.position_size_percent().is_some();
            assert!(!both);
        }
    }

    #[test]
    fn bot_request_omits_unset_sizing_fields() {
        let request = BotRequest {
            client_request_id: Uuid::new_v4(),
            name: "grid-eth".to_string(),
            description: None,
            credential_id: "cred-1".to_string(),
            symbols: vec!["ETHUSDT".to_string()],
            strategy_type: StrategyType::GridTrading,
            config: BTreeMap::new(),
            trading_mode: TradingMode::Spot,
            starting_balance: dec!(500),
            max_active_positions: 3,
            leverage: None,
            use_auto_leverage: false,
            max_position_size: None,
            risk_per_trade: None,
            position_size_percent: Some(dec!(25)),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("risk_per_trade").is_none());
        assert_eq!(json["position_size_percent"], serde_json::json!("25"));
        assert_eq!(json["strategy_type"], serde_json::json!("grid_trading"));
    }
}
