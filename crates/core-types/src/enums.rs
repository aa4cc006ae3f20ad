use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a strategy variant in the catalog.
///
/// The backend catalog is open-ended, so unknown identifiers are preserved in
/// `Other` rather than failing deserialization. Known variants round-trip
/// through their snake_case wire names (e.g. `"alpha_compounder"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StrategyType {
    AlphaCompounder,
    GridTrading,
    Dca,
    MeanReversion,
    TrendFollowing,
    AiSignal,
    /// A catalog entry this client has no handler for.
    Other(String),
}

impl StrategyType {
    /// Returns the wire name of this strategy type.
    pub fn as_str(&self) -> &str {
        match self {
            StrategyType::AlphaCompounder => "alpha_compounder",
            StrategyType::GridTrading => "grid_trading",
            StrategyType::Dca => "dca",
            StrategyType::MeanReversion => "mean_reversion",
            StrategyType::TrendFollowing => "trend_following",
            StrategyType::AiSignal => "ai_signal",
            StrategyType::Other(name) => name,
        }
    }
}

impl From<String> for StrategyType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "alpha_compounder" => StrategyType::AlphaCompounder,
            "grid_trading" => StrategyType::GridTrading,
            "dca" => StrategyType::Dca,
            "mean_reversion" => StrategyType::MeanReversion,
            "trend_following" => StrategyType::TrendFollowing,
            "ai_signal" => StrategyType::AiSignal,
            _ => StrategyType::Other(s),
        }
    }
}

impl From<StrategyType> for String {
    fn from(t: StrategyType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The market a bot trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingMode {
    Spot,
    Futures,
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingMode::Spot => f.write_str("spot"),
            TradingMode::Futures => f.write_str("futures"),
        }
    }
}

/// Advisory risk classification a strategy carries in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The primitive type of a single strategy configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Number,
    Integer,
    Boolean,
    Text,
}
