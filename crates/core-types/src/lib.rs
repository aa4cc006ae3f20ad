pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{FieldType, RiskLevel, StrategyType, TradingMode};
pub use error::CoreError;
pub use structs::{
    AddressBookEntry, BotRequest, FieldSpec, PositionSizing, StrategyDefinition,
    WithdrawalLimits, WithdrawalRequest,
};
