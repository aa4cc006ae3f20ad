use crate::ai_signal::AiSignalHandler;
use crate::alpha_compounder::AlphaCompounderHandler;
use crate::dca::DcaHandler;
use crate::grid_trading::GridTradingHandler;
use crate::mean_reversion::MeanReversionHandler;
use crate::trend_following::TrendFollowingHandler;
use crate::ConfigHandler;
use core_types::StrategyType;

/// Returns the configuration handler for the given strategy type.
///
/// The match is exhaustive: the compiler errors if a new `StrategyType`
/// variant is added without a handler decision here. `Other` is the explicit
/// "not yet implemented" state; the wizard renders it as such instead of
/// failing.
pub fn handler_for(strategy_type: &StrategyType) -> Option<Box<dyn ConfigHandler>> {
    match strategy_type {
        StrategyType::AlphaCompounder => Some(Box::new(AlphaCompounderHandler)),
        StrategyType::GridTrading => Some(Box::new(GridTradingHandler)),
        StrategyType::Dca => Some(Box::new(DcaHandler)),
        StrategyType::MeanReversion => Some(Box::new(MeanReversionHandler)),
        StrategyType::TrendFollowing => Some(Box::new(TrendFollowingHandler)),
        StrategyType::AiSignal => Some(Box::new(AiSignalHandler)),
        StrategyType::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_entry_has_a_handler() {
        for definition in crate::catalog::default_strategies() {
            let handler = handler_for(&definition.strategy_type);
            assert!(handler.is_some(), "missing handler for {}", definition.strategy_type);
            assert_eq!(
                handler.unwrap().strategy_type(),
                definition.strategy_type
            );
        }
    }

    #[test]
    fn unknown_types_have_no_handler() {
        assert!(handler_for(&StrategyType::Other("momentum_x".to_string())).is_none());
    }
}
