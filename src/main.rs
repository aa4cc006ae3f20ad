use anyhow::{bail, Context};
use api_client::MarketplaceClient;
use clap::{Parser, Subcommand};
use core_types::{PositionSizing, StrategyType, TradingMode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use strategies::SymbolParams;
use tracing_subscriber::EnvFilter;
use wallet::WithdrawalForm;
use wizard::Wizard;

/// The main entry point for the Meridian marketplace client.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Session tokens usually arrive through the .env file.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = configuration::load_config().context("Failed to load config.toml")?;
    let client = MarketplaceClient::new(&config.api, &config.auth)
        .context("Failed to build the API client")?;

    match cli.command {
        Commands::Strategies => handle_strategies(&client).await,
        Commands::CreateBot(args) => handle_create_bot(args, &config, &client).await,
        Commands::Wallet => handle_wallet(&client).await,
        Commands::Limits(args) => handle_limits(args, &config, &client).await,
        Commands::Addresses(args) => handle_addresses(args, &config, &client).await,
        Commands::Withdraw(args) => handle_withdraw(args, &client).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Command-line client for the Meridian marketplace: trading bots and wallet.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported trading strategies and their config schemas.
    Strategies,
    /// Create (or reconfigure) a trading bot from a draft file.
    CreateBot(CreateBotArgs),
    /// Show wallet balances per currency.
    Wallet,
    /// Show the withdrawal limits for a currency.
    Limits(LimitsArgs),
    /// List the saved address-book entries for a currency.
    Addresses(LimitsArgs),
    /// Validate and submit a withdrawal.
    Withdraw(WithdrawArgs),
}

#[derive(Parser)]
struct CreateBotArgs {
    /// Path to the TOML draft describing the bot.
    #[arg(long)]
    file: PathBuf,

    /// Reconfigure this existing bot instead of creating a new one.
    #[arg(long)]
    bot_id: Option<String>,
}

#[derive(Parser)]
struct LimitsArgs {
    /// Currency to look up; defaults to the configured default currency.
    #[arg(long)]
    currency: Option<String>,
}

#[derive(Parser)]
struct WithdrawArgs {
    #[arg(long)]
    currency: String,

    #[arg(long)]
    network: String,

    #[arg(long)]
    amount: Decimal,

    #[arg(long)]
    address: String,

    #[arg(long)]
    description: Option<String>,

    /// Also save the address to the address book (requires --label).
    #[arg(long)]
    save_address: bool,

    #[arg(long, default_value = "")]
    label: String,
}

// ==============================================================================
// Bot draft file
// ==============================================================================

/// The on-disk shape of a bot draft, mirroring the wizard steps.
#[derive(Debug, Deserialize)]
struct DraftFile {
    name: String,
    #[serde(default)]
    description: Option<String>,
    credential_id: String,
    symbols: Vec<String>,
    strategy: String,
    #[serde(default)]
    config: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    trading_mode: Option<TradingMode>,
    starting_balance: Decimal,
    #[serde(default)]
    max_active_positions: Option<u32>,
    #[serde(default)]
    leverage: Option<u32>,
    #[serde(default)]
    use_auto_leverage: bool,
    #[serde(default)]
    max_position_size: Option<Decimal>,
    #[serde(default)]
    risk_per_trade: Option<Decimal>,
    #[serde(default)]
    position_size_percent: Option<Decimal>,
    #[serde(default)]
    symbol_overrides: BTreeMap<String, SymbolParams>,
}

impl DraftFile {
    /// The file allows both sizing keys syntactically; reject that early so
    /// the sum type never has to pick one.
    fn position_sizing(&self) -> anyhow::Result<PositionSizing> {
        match (self.risk_per_trade, self.position_size_percent) {
            (Some(_), Some(_)) => {
                bail!("set either risk_per_trade or position_size_percent, not both")
            }
            (Some(pct), None) => Ok(PositionSizing::RiskBased(pct)),
            (None, Some(pct)) => Ok(PositionSizing::FixedPercent(pct)),
            (None, None) => Ok(PositionSizing::StrategyDefault),
        }
    }
}

// ==============================================================================
// Command handlers
// ==============================================================================

async fn handle_strategies(client: &MarketplaceClient) -> anyhow::Result<()> {
    let catalog = strategies::supported_strategies(client).await;
    for definition in catalog {
        println!(
            "{} ({}) - risk: {:?}, min balance: {}",
            definition.name,
            definition.strategy_type,
            definition.risk_level,
            definition.min_starting_balance
        );
        println!("  {}", definition.description);
        for (field, spec) in &definition.config_schema {
            let bounds = match (spec.min, spec.max) {
                (Some(min), Some(max)) => format!(" [{}..{}]", min, max),
                (Some(min), None) => format!(" [>= {}]", min),
                _ => String::new(),
            };
            let required = if spec.required { "required" } else { "optional" };
            println!("  - {} ({:?}, {}){}", field, spec.field_type, required, bounds);
        }
    }
    Ok(())
}

async fn handle_create_bot(
    args: CreateBotArgs,
    config: &configuration::Config,
    client: &MarketplaceClient,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read draft file {}", args.file.display()))?;
    let file: DraftFile = toml::from_str(&raw).context("Invalid bot draft file")?;

    let strategy_type = StrategyType::from(file.strategy.clone());
    let catalog = strategies::supported_strategies(client).await;
    let definition = catalog
        .into_iter()
        .find(|d| d.strategy_type == strategy_type)
        .with_context(|| format!("Strategy '{}' is not in the catalog", file.strategy))?;

    let mut wizard = match &args.bot_id {
        Some(bot_id) => Wizard::reconfigure(
            bot_id.clone(),
            wizard::BotConfigDraft::new(config.defaults.trading_mode),
        ),
        None => Wizard::create(config.defaults.trading_mode),
    };

    let sizing = file.position_sizing()?;
    {
        let draft = wizard.draft_mut();
        draft.name = file.name.clone();
        draft.description = file.description.clone();
        draft.credential_id = file.credential_id.clone();
        for symbol in &file.symbols {
            draft.add_symbol(symbol.clone());
        }
        if let Some(mode) = file.trading_mode {
            draft.trading_mode = mode;
        }
        draft.starting_balance = file.starting_balance;
        if let Some(max) = file.max_active_positions {
            draft.max_active_positions = max;
        }
        draft.leverage = file.leverage;
        draft.use_auto_leverage = file.use_auto_leverage;
        draft.max_position_size = file.max_position_size;
        draft.position_sizing = sizing;
    }

    // Walk the wizard the same way the UI does: one validated step at a time.
    wizard.advance().map_err(|e| anyhow::anyhow!("{}", e))?;
    wizard.draft_mut().select_strategy(definition);
    {
        let draft = wizard.draft_mut();
        for (name, value) in file.config {
            draft.set_config_value(name, value);
        }
        for (symbol, params) in file.symbol_overrides {
            draft.set_symbol_params(symbol, params);
        }
    }
    wizard.advance().map_err(|e| anyhow::anyhow!("{}", e))?;

    let bot_id = wizard
        .submit(client)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    tracing::info!(%bot_id, file = %args.file.display(), "Bot draft submitted");
    println!("Bot submitted: {}", bot_id);
    Ok(())
}

async fn handle_wallet(client: &MarketplaceClient) -> anyhow::Result<()> {
    let summary = client.wallet_summary().await?;
    for balance in summary.balances {
        println!(
            "{}: available {}, locked {}",
            balance.currency, balance.available, balance.locked
        );
    }
    Ok(())
}

async fn handle_limits(
    args: LimitsArgs,
    config: &configuration::Config,
    client: &MarketplaceClient,
) -> anyhow::Result<()> {
    let currency = args.currency.unwrap_or_else(|| config.defaults.currency.clone());
    let limits = client.withdrawal_limits(&currency).await?;
    println!(
        "{}: min {}, max {}, remaining today {}",
        currency, limits.minimum_amount, limits.maximum_amount, limits.remaining_today
    );
    Ok(())
}

async fn handle_addresses(
    args: LimitsArgs,
    config: &configuration::Config,
    client: &MarketplaceClient,
) -> anyhow::Result<()> {
    let currency = args.currency.unwrap_or_else(|| config.defaults.currency.clone());
    let entries = client.list_addresses(&currency).await?;
    if entries.is_empty() {
        println!("No saved addresses for {}", currency);
    }
    for entry in entries {
        println!("{} ({}): {}", entry.label, entry.network, entry.address);
    }
    Ok(())
}

async fn handle_withdraw(args: WithdrawArgs, client: &MarketplaceClient) -> anyhow::Result<()> {
    let form = WithdrawalForm {
        currency: args.currency,
        network: args.network,
        amount: args.amount,
        address: args.address,
        description: args.description,
        save_to_address_book: args.save_address,
        label: args.label,
    };

    match wallet::submit_withdrawal(client, &form).await {
        Ok(id) => {
            println!("Withdrawal created: {}", id);
            Ok(())
        }
        Err(wallet::WalletError::Validation(violations)) => {
            tracing::error!(count = violations.len(), "Withdrawal rejected client-side");
            for violation in &violations {
                eprintln!("error: {}", violation);
            }
            bail!("withdrawal rejected by client-side validation");
        }
        Err(e) => Err(e.into()),
    }
}
