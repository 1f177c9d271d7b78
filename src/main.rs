//! Cross-exchange arbitrage executor entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal_macros::dec;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use xemm_arb::arbitrage::validator::reference_asset;
use xemm_arb::arbitrage::XemmExecutor;
use xemm_arb::config::AppConfig;
use xemm_arb::market::mock::{FixedRateOracle, MockVenue, MockVenueConfig};
use xemm_arb::market::types::VenueKind;
use xemm_arb::metrics;
use xemm_arb::runtime::Runner;

/// Cross-exchange market-making arbitrage executor.
#[derive(Parser, Debug)]
#[command(name = "xemm-arb")]
#[command(about = "Maker/taker cross-exchange arbitrage executor")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one executor in paper mode against simulated venues (default).
    Run,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("xemm_arb=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    metrics::init_metrics();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Run) | None => cmd_run().await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    match config.validate() {
        Ok(()) => {
            println!("configuration OK");
            println!("  buying leg:   {} {}", config.buying_venue, config.buying_pair);
            println!("  selling leg:  {} {}", config.selling_venue, config.selling_pair);
            println!("  maker side:   {}", config.maker_side);
            println!("  order amount: {}", config.order_amount);
            println!(
                "  profitability: target {} / min {}",
                config.target_profitability, config.min_profitability
            );
            Ok(())
        }
        Err(reason) => {
            anyhow::bail!("invalid configuration: {reason}");
        }
    }
}

/// Run one executor against two simulated venues.
///
/// Paper mode: venue quotes and fees are synthetic, but the executor runs
/// the exact lifecycle it would against real connectors.
async fn cmd_run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config
        .validate()
        .map_err(|reason| anyhow::anyhow!("invalid configuration: {reason}"))?;
    let arb_config = config.arbitrage_config()?;

    if let Err(error) = PrometheusBuilder::new().install() {
        warn!(%error, "metrics exporter not started");
    }

    info!(
        buying = %arb_config.buying_leg,
        selling = %arb_config.selling_leg,
        maker_side = %arb_config.maker_side,
        amount = %arb_config.order_amount,
        "starting executor (paper mode)"
    );

    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();

    // Synthetic market: both venues quote around 100 with the maker leg
    // filling instantly so the full lifecycle plays out.
    let buying = Arc::new(
        MockVenue::new(
            config.buying_venue.as_str(),
            MockVenueConfig {
                kind: config.buying_venue_kind,
                buy_quote: dec!(100.05),
                sell_quote: dec!(99.95),
                mid_quote: dec!(100),
                fee_in_asset: dec!(0.0005) * arb_config.order_amount,
                gas_amount: dec!(0.02),
                gas_token: "MATIC".to_string(),
                fill_limit_orders: true,
                fill_market_orders: true,
                ..Default::default()
            },
        )
        .with_events(events_tx.clone()),
    );
    let selling = Arc::new(
        MockVenue::new(
            config.selling_venue.as_str(),
            MockVenueConfig {
                kind: config.selling_venue_kind,
                buy_quote: dec!(100.05),
                sell_quote: dec!(99.95),
                mid_quote: dec!(100),
                fee_in_asset: dec!(0.0005) * arb_config.order_amount,
                gas_amount: dec!(0.02),
                gas_token: "MATIC".to_string(),
                fill_limit_orders: true,
                fill_market_orders: true,
                ..Default::default()
            },
        )
        .with_events(events_tx),
    );

    // Rates for gas conversion on AMM legs.
    let reference = reference_asset(&arb_config.buying_leg.pair.base).to_string();
    let rates = FixedRateOracle::default()
        .with_rate(&reference, "MATIC", dec!(2000))
        .with_rate(
            reference_asset(&arb_config.selling_leg.pair.base),
            "MATIC",
            dec!(2000),
        );
    if config.buying_venue_kind == VenueKind::Amm || config.selling_venue_kind == VenueKind::Amm {
        info!(%reference, "AMM leg present, gas costed through the rate oracle");
    }

    let tick_interval = arb_config.tick_interval;
    let executor = XemmExecutor::new(arb_config, buying, selling, Arc::new(rates))?;
    let runner = Runner::new(executor, events_rx, tick_interval);

    let executor = tokio::select! {
        executor = runner.run() => executor,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted before the executor reached a terminal state");
            return Ok(());
        }
    };

    let stats = executor.stats();
    info!(
        status = %stats.status,
        close_reason = ?stats.close_reason.map(|r| r.to_string()),
        failed_orders = stats.failed_orders,
        retries = stats.retries,
        "executor finished"
    );
    Ok(())
}
