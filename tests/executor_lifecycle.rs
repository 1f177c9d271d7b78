//! End-to-end executor lifecycle through the runner with mock venues.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use xemm_arb::arbitrage::{CloseReason, XemmExecutor};
use xemm_arb::config::ArbitrageConfig;
use xemm_arb::market::mock::{FixedRateOracle, MockVenue, MockVenueConfig};
use xemm_arb::market::types::{Leg, OrderType, Side, VenueKind};
use xemm_arb::runtime::{ExecutorStatus, Runner};

fn lifecycle_config() -> ArbitrageConfig {
    ArbitrageConfig {
        buying_leg: Leg::new("dex_amm", "WETH-USDC".parse().unwrap()),
        selling_leg: Leg::new("cex_clob", "ETH-USDT".parse().unwrap()),
        maker_side: Side::Sell,
        order_amount: dec!(1),
        target_profitability: dec!(0.002),
        min_profitability: dec!(0.001),
        tick_interval: Duration::from_millis(10),
        max_retries: 10,
    }
}

fn venue_config(kind: VenueKind) -> MockVenueConfig {
    MockVenueConfig {
        kind,
        buy_quote: dec!(100),
        sell_quote: dec!(100),
        mid_quote: dec!(100),
        fee_in_asset: dec!(0.0005),
        fill_limit_orders: true,
        fill_market_orders: true,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn full_lifecycle_completes_both_legs() {
    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();

    // Maker side SELL: the maker rests on the selling venue, the hedge
    // buys on the buying venue.
    let buying = Arc::new(
        MockVenue::new("dex_amm", venue_config(VenueKind::Clob)).with_events(events_tx.clone()),
    );
    let selling = Arc::new(
        MockVenue::new("cex_clob", venue_config(VenueKind::Clob)).with_events(events_tx),
    );

    let executor = XemmExecutor::new(
        lifecycle_config(),
        buying.clone(),
        selling.clone(),
        Arc::new(FixedRateOracle::default()),
    )
    .unwrap();

    let executor = Runner::new(executor, events_rx, Duration::from_millis(10))
        .run()
        .await;

    assert_eq!(executor.status(), ExecutorStatus::Stopped);
    assert_eq!(executor.close_reason(), Some(CloseReason::Completed));

    // Exactly one maker limit order on the selling venue.
    let maker_orders = selling.placed_orders();
    assert_eq!(maker_orders.len(), 1);
    assert_eq!(maker_orders[0].order_type, OrderType::Limit);
    assert_eq!(maker_orders[0].side, Side::Sell);
    assert_eq!(maker_orders[0].price, Some(dec!(100.3)));

    // Exactly one taker hedge on the buying venue.
    let taker_orders = buying.placed_orders();
    assert_eq!(taker_orders.len(), 1);
    assert_eq!(taker_orders[0].order_type, OrderType::Market);
    assert_eq!(taker_orders[0].side, Side::Buy);
    assert_eq!(taker_orders[0].amount, maker_orders[0].amount);

    assert!(executor.failed_orders().is_empty());
    assert_eq!(executor.retries(), 0);
}

#[tokio::test(start_paused = true)]
async fn insufficient_balance_stops_without_placing_orders() {
    let (_events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();

    let mut starving = venue_config(VenueKind::Clob);
    starving.adjusted_amount = Some(Decimal::ZERO);
    let buying = Arc::new(MockVenue::new("dex_amm", starving));
    let selling = Arc::new(MockVenue::new("cex_clob", venue_config(VenueKind::Clob)));

    let executor = XemmExecutor::new(
        lifecycle_config(),
        buying.clone(),
        selling.clone(),
        Arc::new(FixedRateOracle::default()),
    )
    .unwrap();

    let executor = Runner::new(executor, events_rx, Duration::from_millis(10))
        .run()
        .await;

    assert_eq!(executor.status(), ExecutorStatus::Stopped);
    assert_eq!(
        executor.close_reason(),
        Some(CloseReason::InsufficientBalance)
    );
    assert_eq!(buying.order_count(), 0);
    assert_eq!(selling.order_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn amm_taker_leg_prices_gas_into_the_maker_quote() {
    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();

    let mut amm = venue_config(VenueKind::Amm);
    amm.gas_amount = dec!(2); // 2 MATIC per transaction
    amm.gas_token = "MATIC".to_string();
    let buying = Arc::new(MockVenue::new("dex_amm", amm).with_events(events_tx.clone()));
    let selling = Arc::new(
        MockVenue::new("cex_clob", venue_config(VenueKind::Clob)).with_events(events_tx),
    );

    let executor = XemmExecutor::new(
        lifecycle_config(),
        buying,
        selling.clone(),
        // 1 ETH = 2000 MATIC, so the gas leg costs 0.001 ETH.
        Arc::new(FixedRateOracle::default().with_rate("ETH", "MATIC", dec!(2000))),
    )
    .unwrap();

    let executor = Runner::new(executor, events_rx, Duration::from_millis(10))
        .run()
        .await;

    assert_eq!(executor.close_reason(), Some(CloseReason::Completed));
    // tx_cost_pct = gas 0.001 + clob fee 0.0005 = 0.0015
    // maker target = 100 * (1 + 0.002 + 0.0015)
    let maker_orders = selling.placed_orders();
    assert_eq!(maker_orders[0].price, Some(dec!(100.35)));
}
