//! # Meridian Bot Wizard
//!
//! The create/configure flow for trading bots: a fixed linear sequence of
//! steps (`BasicInfo → StrategySelect → StrategyConfig → Submitted`) over a
//! mutable [`BotConfigDraft`], with fail-fast validation at every transition
//! and a single network call on submit.
//!
//! The wizard never talks HTTP itself; submission goes through the
//! [`BotGateway`] trait, implemented by the API client and mocked in tests.

pub mod draft;
pub mod error;

pub use draft::{BotConfigDraft, SelectedStrategy};
pub use error::{GatewayError, WizardError};

use async_trait::async_trait;
use core_types::{BotRequest, PositionSizing, TradingMode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strategies::{handler_for, DraftConfig};

/// The wizard's position in the flow. Transitions move one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BasicInfo,
    StrategySelect,
    StrategyConfig,
    Submitted,
}

/// Whether the wizard creates a new bot or reconfigures an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Reconfigure { bot_id: String },
}

/// The submit seam. Implementations map backend failures into a
/// [`GatewayError`] carrying the backend message verbatim.
#[async_trait]
pub trait BotGateway: Send + Sync {
    /// Creates a bot; returns the backend-assigned bot id.
    async fn create_bot(&self, request: &BotRequest) -> Result<String, GatewayError>;

    /// Replaces an existing bot's configuration; returns the bot id.
    async fn update_bot_config(
        &self,
        bot_id: &str,
        request: &BotRequest,
    ) -> Result<String, GatewayError>;
}

pub struct Wizard {
    step: WizardStep,
    mode: WizardMode,
    draft: BotConfigDraft,
}

impl Wizard {
    /// Opens the wizard on an empty draft for a new bot.
    pub fn create(default_mode: TradingMode) -> Self {
        Self {
            step: WizardStep::BasicInfo,
            mode: WizardMode::Create,
            draft: BotConfigDraft::new(default_mode),
        }
    }

    /// Opens the wizard pre-populated with an existing bot's draft.
    pub fn reconfigure(bot_id: impl Into<String>, draft: BotConfigDraft) -> Self {
        Self {
            step: WizardStep::BasicInfo,
            mode: WizardMode::Reconfigure {
                bot_id: bot_id.into(),
            },
            draft,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BotConfigDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BotConfigDraft {
        &mut self.draft
    }

    /// Validates the current step and moves forward on success.
    ///
    /// Fail-fast: the first violation is returned and the step does not
    /// change, so repeated calls with an unchanged draft repeat the same
    /// error instead of advancing.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::BasicInfo => {
                validate_basic_info(&self.draft)?;
                self.step = WizardStep::StrategySelect;
            }
            WizardStep::StrategySelect => {
                validate_strategy_selection(&self.draft)?;
                self.step = WizardStep::StrategyConfig;
            }
            WizardStep::StrategyConfig => return Err(WizardError::AtFinalStep),
            WizardStep::Submitted => return Err(WizardError::AlreadySubmitted),
        }
        tracing::debug!(step = ?self.step, "Wizard advanced");
        Ok(self.step)
    }

    /// Moves one step backward; a no-op at the first step and after submit.
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::BasicInfo => WizardStep::BasicInfo,
            WizardStep::StrategySelect => WizardStep::BasicInfo,
            WizardStep::StrategyConfig => WizardStep::StrategySelect,
            WizardStep::Submitted => WizardStep::Submitted,
        };
        self.step
    }

    /// Runs the full submit-time validation and, only if everything passes,
    /// makes the one network call. Backend errors come back verbatim.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<String, WizardError>
    where
        G: BotGateway + ?Sized,
    {
        match self.step {
            WizardStep::Submitted => return Err(WizardError::AlreadySubmitted),
            WizardStep::StrategyConfig => {}
            _ => return Err(WizardError::NotAtFinalStep),
        }

        // Earlier steps may have been edited through `draft_mut` since they
        // were validated, so the whole chain runs again before any request.
        validate_basic_info(&self.draft)?;
        validate_strategy_selection(&self.draft)?;
        validate_strategy_config(&self.draft)?;

        let request = self.draft.build_request()?;
        let bot_id = match &self.mode {
            WizardMode::Create => gateway.create_bot(&request).await?,
            WizardMode::Reconfigure { bot_id } => {
                gateway.update_bot_config(bot_id, &request).await?
            }
        };

        self.step = WizardStep::Submitted;
        tracing::info!(%bot_id, "Bot submitted");
        Ok(bot_id)
    }
}

/// Step 1 gate: identity, symbols, balance, and override bounds.
fn validate_basic_info(draft: &BotConfigDraft) -> Result<(), WizardError> {
    if draft.name.trim().is_empty() {
        return Err(WizardError::Validation("Bot name is required".to_string()));
    }
    if draft.symbols().is_empty() {
        return Err(WizardError::Validation(
            "At least one trading symbol is required".to_string(),
        ));
    }
    if draft.starting_balance <= Decimal::ZERO {
        return Err(WizardError::Validation(
            "Starting balance must be greater than zero".to_string(),
        ));
    }
    if draft.max_active_positions == 0 {
        return Err(WizardError::Validation(
            "Max active positions must be greater than zero".to_string(),
        ));
    }
    if let Some(leverage) = draft.leverage {
        if !(1..=125).contains(&leverage) {
            return Err(WizardError::Validation(
                "Leverage must be between 1 and 125".to_string(),
            ));
        }
    }
    match draft.position_sizing {
        PositionSizing::StrategyDefault => {}
        PositionSizing::RiskBased(pct) => {
            if pct <= Decimal::ZERO || pct > dec!(10) {
                return Err(WizardError::Validation(
                    "Risk per trade must be greater than 0 and at most 10 percent".to_string(),
                ));
            }
        }
        PositionSizing::FixedPercent(pct) => {
            if pct <= Decimal::ZERO || pct > dec!(100) {
                return Err(WizardError::Validation(
                    "Position size must be greater than 0 and at most 100 percent".to_string(),
                ));
            }
        }
    }
    if let Some(max_size) = draft.max_position_size {
        if max_size <= Decimal::ZERO {
            return Err(WizardError::Validation(
                "Max position size must be greater than zero".to_string(),
            ));
        }
    }
    Ok(())
}

/// Step 2 gate: a strategy is selected, implemented, and compatible.
fn validate_strategy_selection(draft: &BotConfigDraft) -> Result<(), WizardError> {
    let strategy = draft
        .strategy
        .as_ref()
        .ok_or_else(|| WizardError::Validation("Select a strategy to continue".to_string()))?;
    let definition = &strategy.definition;

    if handler_for(&definition.strategy_type).is_none() {
        return Err(WizardError::Validation(format!(
            "Strategy '{}' is not yet implemented",
            definition.strategy_type
        )));
    }
    if !definition.supports_mode(draft.trading_mode) {
        return Err(WizardError::Validation(format!(
            "{} does not support {} trading",
            definition.name, draft.trading_mode
        )));
    }
    if draft.starting_balance < definition.min_starting_balance {
        return Err(WizardError::Validation(format!(
            "{} requires a starting balance of at least {}",
            definition.name, definition.min_starting_balance
        )));
    }
    Ok(())
}

/// Step 3 gate: delegate to the variant's config handler.
fn validate_strategy_config(draft: &BotConfigDraft) -> Result<(), WizardError> {
    let strategy = draft
        .strategy
        .as_ref()
        .ok_or_else(|| WizardError::Validation("Select a strategy to continue".to_string()))?;
    let handler = handler_for(&strategy.definition.strategy_type).ok_or_else(|| {
        WizardError::Validation(format!(
            "Strategy '{}' is not yet implemented",
            strategy.definition.strategy_type
        ))
    })?;
    let view = DraftConfig {
        symbols: draft.symbols(),
        values: &strategy.config,
        symbol_overrides: &strategy.symbol_overrides,
        schema: &strategy.definition.config_schema,
    };
    handler.validate(&view)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{StrategyType, TradingMode};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use strategies::default_strategies;

    /// Counts calls and either returns a fixed id or a backend error.
    struct MockGateway {
        calls: AtomicUsize,
        fail_with: Option<String>,
    }

    impl MockGateway {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(message.to_string()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BotGateway for MockGateway {
        async fn create_bot(&self, _request: &core_types::BotRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(msg) => Err(GatewayError(msg.clone())),
                None => Ok("bot-123".to_string()),
            }
        }

        async fn update_bot_config(
            &self,
            bot_id: &str,
            _request: &core_types::BotRequest,
        ) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(msg) => Err(GatewayError(msg.clone())),
                None => Ok(bot_id.to_string()),
            }
        }
    }

    fn definition(t: StrategyType) -> core_types::StrategyDefinition {
        default_strategies()
            .into_iter()
            .find(|d| d.strategy_type == t)
            .unwrap()
    }

    fn valid_wizard() -> Wizard {
        let mut wizard = Wizard::create(TradingMode::Spot);
        let draft = wizard.draft_mut();
        draft.name = "grid-btc".to_string();
        draft.credential_id = "cred-1".to_string();
        draft.add_symbol("BTCUSDT");
        draft.starting_balance = dec!(500);
        draft.max_active_positions = 3;
        wizard
    }

    #[test]
    fn advance_is_idempotent_on_a_failing_draft() {
        let mut wizard = Wizard::create(TradingMode::Spot);
        wizard.draft_mut().name = "bot".to_string();
        // No symbols selected.
        for _ in 0..3 {
            let err = wizard.advance().unwrap_err();
            assert_eq!(
                err,
                WizardError::Validation("At least one trading symbol is required".to_string())
            );
            assert_eq!(wizard.step(), WizardStep::BasicInfo);
        }
    }

    #[test]
    fn steps_move_forward_and_backward_one_at_a_time() {
        let mut wizard = valid_wizard();
        assert_eq!(wizard.advance().unwrap(), WizardStep::StrategySelect);
        wizard
            .draft_mut()
            .select_strategy(definition(StrategyType::GridTrading));
        assert_eq!(wizard.advance().unwrap(), WizardStep::StrategyConfig);
        assert_eq!(wizard.back(), WizardStep::StrategySelect);
        assert_eq!(wizard.back(), WizardStep::BasicInfo);
        assert_eq!(wizard.back(), WizardStep::BasicInfo);
    }

    #[test]
    fn unsupported_mode_is_rejected_at_selection() {
        let mut wizard = valid_wizard();
        wizard.advance().unwrap();
        // Trend following is futures-only; the draft is spot.
        wizard
            .draft_mut()
            .select_strategy(definition(StrategyType::TrendFollowing));
        let err = wizard.advance().unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation("Trend Following does not support spot trading".to_string())
        );
    }

    #[test]
    fn unimplemented_strategy_blocks_selection() {
        let mut wizard = valid_wizard();
        wizard.advance().unwrap();
        let mut unknown = definition(StrategyType::GridTrading);
        unknown.strategy_type = StrategyType::Other("momentum_x".to_string());
        wizard.draft_mut().select_strategy(unknown);
        let err = wizard.advance().unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation("Strategy 'momentum_x' is not yet implemented".to_string())
        );
    }

    #[tokio::test]
    async fn empty_symbols_fail_before_any_network_call() {
        let mut wizard = valid_wizard();
        wizard.advance().unwrap();
        wizard
            .draft_mut()
            .select_strategy(definition(StrategyType::GridTrading));
        wizard.advance().unwrap();

        // Symbols were edited away after step 1 passed.
        wizard.draft_mut().clear_symbols();

        let gateway = MockGateway::ok();
        let err = wizard.submit(&gateway).await.unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation("At least one trading symbol is required".to_string())
        );
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn successful_submit_makes_exactly_one_call() {
        let mut wizard = valid_wizard();
        wizard.advance().unwrap();
        wizard
            .draft_mut()
            .select_strategy(definition(StrategyType::GridTrading));
        wizard.advance().unwrap();

        let gateway = MockGateway::ok();
        let bot_id = wizard.submit(&gateway).await.unwrap();
        assert_eq!(bot_id, "bot-123");
        assert_eq!(gateway.calls(), 1);
        assert_eq!(wizard.step(), WizardStep::Submitted);

        // A second submit is rejected without another call.
        let err = wizard.submit(&gateway).await.unwrap_err();
        assert_eq!(err, WizardError::AlreadySubmitted);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn backend_message_is_surfaced_verbatim() {
        let mut wizard = valid_wizard();
        wizard.advance().unwrap();
        wizard
            .draft_mut()
            .select_strategy(definition(StrategyType::GridTrading));
        wizard.advance().unwrap();

        let gateway = MockGateway::failing("Exchange credential has expired");
        let err = wizard.submit(&gateway).await.unwrap_err();
        assert_eq!(
            err,
            WizardError::Backend("Exchange credential has expired".to_string())
        );
        // The wizard stays on the current step for the user to retry.
        assert_eq!(wizard.step(), WizardStep::StrategyConfig);
    }

    #[tokio::test]
    async fn alpha_compounder_bad_symbol_fails_submit() {
        let mut wizard = valid_wizard();
        wizard.advance().unwrap();
        wizard
            .draft_mut()
            .select_strategy(definition(StrategyType::AlphaCompounder));
        wizard.advance().unwrap();
        wizard.draft_mut().set_symbol_params(
            "BTCUSDT",
            strategies::SymbolParams {
                take_profit_percentage: dec!(1),
                pull_back_percentage: dec!(3),
            },
        );

        let gateway = MockGateway::ok();
        let err = wizard.submit(&gateway).await.unwrap_err();
        assert_eq!(
            err,
            WizardError::Strategy(strategies::StrategyError::InvalidParameters(
                "BTCUSDT: take_profit_percentage must be greater than pull_back_percentage"
                    .to_string()
            ))
        );
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn reconfigure_uses_the_update_endpoint() {
        let draft = valid_wizard().draft().clone();
        let mut wizard = Wizard::reconfigure("bot-77", draft);
        wizard.advance().unwrap();
        wizard
            .draft_mut()
            .select_strategy(definition(StrategyType::GridTrading));
        wizard.advance().unwrap();

        let gateway = MockGateway::ok();
        let bot_id = wizard.submit(&gateway).await.unwrap();
        assert_eq!(bot_id, "bot-77");
    }
}
