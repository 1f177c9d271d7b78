//! Mock venue connector for unit testing and paper trading.
//!
//! This module provides a configurable in-memory venue that can be used in
//! tests and in the binary's paper-trading mode without touching a real
//! exchange.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::ConnectorError;
use crate::market::connector::{
    GasFee, OrderCandidate, OrderId, OrderRequest, OrderSnapshot, RateOracle, VenueConnector,
};
use crate::market::types::{OrderType, Side, TradingPair, VenueId, VenueKind};
use crate::trading::events::OrderEvent;
use crate::trading::order::OrderStatus;

/// Configuration for mock venue behavior.
#[derive(Debug, Clone)]
pub struct MockVenueConfig {
    /// Venue execution model.
    pub kind: VenueKind,
    /// Execution price returned for buy quotes.
    pub buy_quote: Decimal,
    /// Execution price returned for sell quotes.
    pub sell_quote: Decimal,
    /// Mid price.
    pub mid_quote: Decimal,
    /// Flat fee returned by `fee_in_asset` (CLOB venues).
    pub fee_in_asset: Decimal,
    /// Gas amount per transaction (AMM venues).
    pub gas_amount: Decimal,
    /// Gas token symbol (AMM venues).
    pub gas_token: String,
    /// Amount returned by balance-aware sizing; `None` passes the candidate
    /// amount through unchanged.
    pub adjusted_amount: Option<Decimal>,
    /// Whether order placement fails outright.
    pub fail_placement: bool,
    /// Whether quote requests fail.
    pub fail_quotes: bool,
    /// Immediately fill market orders and emit a fill event.
    pub fill_market_orders: bool,
    /// Immediately fill limit orders and emit a fill event.
    pub fill_limit_orders: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for MockVenueConfig {
    fn default() -> Self {
        Self {
            kind: VenueKind::Clob,
            buy_quote: Decimal::ONE,
            sell_quote: Decimal::ONE,
            mid_quote: Decimal::ONE,
            fee_in_asset: Decimal::ZERO,
            gas_amount: Decimal::ZERO,
            gas_token: "ETH".to_string(),
            adjusted_amount: None,
            fail_placement: false,
            fail_quotes: false,
            fill_market_orders: false,
            fill_limit_orders: false,
            latency_ms: 0,
        }
    }
}

#[derive(Debug, Default)]
struct MockVenueState {
    next_id: u64,
    placed: Vec<OrderRequest>,
    cancelled: Vec<OrderId>,
    orders: HashMap<String, OrderSnapshot>,
    buy_quote: Option<Decimal>,
    sell_quote: Option<Decimal>,
}

/// Mock venue connector for testing.
#[derive(Clone)]
pub struct MockVenue {
    venue: VenueId,
    config: MockVenueConfig,
    state: Arc<Mutex<MockVenueState>>,
    events: Option<UnboundedSender<OrderEvent>>,
}

impl MockVenue {
    /// Create a mock venue with the given behavior.
    pub fn new(name: impl Into<VenueId>, config: MockVenueConfig) -> Self {
        Self {
            venue: name.into(),
            config,
            state: Arc::new(Mutex::new(MockVenueState::default())),
            events: None,
        }
    }

    /// Attach an event sender; fills emitted by this venue are pushed to it.
    pub fn with_events(mut self, events: UnboundedSender<OrderEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Override the quotes after construction.
    pub fn set_quotes(&self, buy: Decimal, sell: Decimal) {
        let mut state = self.state.lock().unwrap();
        state.buy_quote = Some(buy);
        state.sell_quote = Some(sell);
    }

    /// All orders placed on this venue, in placement order.
    pub fn placed_orders(&self) -> Vec<OrderRequest> {
        self.state.lock().unwrap().placed.clone()
    }

    /// Number of orders placed on this venue.
    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().placed.len()
    }

    /// Order ids cancellation was requested for.
    pub fn cancelled_orders(&self) -> Vec<OrderId> {
        self.state.lock().unwrap().cancelled.clone()
    }

    /// Force the status of a tracked order (simulating venue-side progress).
    pub fn set_order_status(&self, order_id: &OrderId, status: OrderStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(snapshot) = state.orders.get_mut(&order_id.0) {
            snapshot.status = status;
        }
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    fn emit(&self, event: OrderEvent) {
        if let Some(sender) = &self.events {
            let _ = sender.send(event);
        }
    }
}

#[async_trait]
impl VenueConnector for MockVenue {
    fn venue(&self) -> &VenueId {
        &self.venue
    }

    fn kind(&self) -> VenueKind {
        self.config.kind
    }

    async fn quote_price(
        &self,
        pair: &TradingPair,
        side: Side,
        _amount: Decimal,
    ) -> Result<Decimal, ConnectorError> {
        self.simulate_latency().await;
        if self.config.fail_quotes {
            return Err(ConnectorError::QuoteFailed {
                venue: self.venue.to_string(),
                pair: pair.to_string(),
                reason: "mock quote failure".to_string(),
            });
        }
        let state = self.state.lock().unwrap();
        Ok(match side {
            Side::Buy => state.buy_quote.unwrap_or(self.config.buy_quote),
            Side::Sell => state.sell_quote.unwrap_or(self.config.sell_quote),
        })
    }

    async fn mid_price(&self, _pair: &TradingPair) -> Result<Decimal, ConnectorError> {
        self.simulate_latency().await;
        Ok(self.config.mid_quote)
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderId, ConnectorError> {
        self.simulate_latency().await;
        if self.config.fail_placement {
            return Err(ConnectorError::PlacementFailed {
                venue: self.venue.to_string(),
                reason: "mock placement failure".to_string(),
            });
        }

        let fill = match request.order_type {
            OrderType::Market => self.config.fill_market_orders,
            OrderType::Limit => self.config.fill_limit_orders,
        };
        let price = match request.price {
            Some(price) => price,
            None => match request.side {
                Side::Buy => self.config.buy_quote,
                Side::Sell => self.config.sell_quote,
            },
        };

        let order_id = {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let order_id = OrderId::new(format!("{}-{}", self.venue, state.next_id));
            state.placed.push(request.clone());
            state.orders.insert(
                order_id.0.clone(),
                OrderSnapshot {
                    order_id: order_id.clone(),
                    price,
                    amount: request.amount,
                    status: if fill {
                        OrderStatus::Filled
                    } else {
                        OrderStatus::Live
                    },
                },
            );
            order_id
        };

        if fill {
            self.emit(OrderEvent::filled(order_id.clone()));
        }
        Ok(order_id)
    }

    async fn cancel_order(
        &self,
        _pair: &TradingPair,
        order_id: &OrderId,
    ) -> Result<(), ConnectorError> {
        self.simulate_latency().await;
        let mut state = self.state.lock().unwrap();
        state.cancelled.push(order_id.clone());
        if let Some(snapshot) = state.orders.get_mut(&order_id.0) {
            if snapshot.status.is_open() {
                snapshot.status = OrderStatus::Cancelled;
            }
        }
        Ok(())
    }

    async fn order_snapshot(&self, order_id: &OrderId) -> Result<OrderSnapshot, ConnectorError> {
        self.simulate_latency().await;
        let state = self.state.lock().unwrap();
        state
            .orders
            .get(&order_id.0)
            .cloned()
            .ok_or_else(|| ConnectorError::SnapshotFailed {
                order_id: order_id.to_string(),
                reason: "unknown order".to_string(),
            })
    }

    fn gas_fee(&self) -> GasFee {
        GasFee {
            amount: self.config.gas_amount,
            token: self.config.gas_token.clone(),
        }
    }

    async fn fee_in_asset(
        &self,
        _pair: &TradingPair,
        _order_type: OrderType,
        _side: Side,
        _amount: Decimal,
        _price: Decimal,
        _asset: &str,
    ) -> Result<Decimal, ConnectorError> {
        self.simulate_latency().await;
        Ok(self.config.fee_in_asset)
    }

    async fn adjusted_amount(&self, candidate: &OrderCandidate) -> Result<Decimal, ConnectorError> {
        self.simulate_latency().await;
        Ok(self.config.adjusted_amount.unwrap_or(candidate.amount))
    }
}

/// Rate oracle backed by a fixed rate table.
#[derive(Debug, Clone, Default)]
pub struct FixedRateOracle {
    rates: HashMap<(String, String), Decimal>,
}

impl FixedRateOracle {
    /// Add a rate for the `base-quote` pair.
    pub fn with_rate(mut self, base: &str, quote: &str, rate: Decimal) -> Self {
        self.rates.insert((base.to_string(), quote.to_string()), rate);
        self
    }
}

#[async_trait]
impl RateOracle for FixedRateOracle {
    async fn pair_rate(&self, base: &str, quote: &str) -> Result<Decimal, ConnectorError> {
        self.rates
            .get(&(base.to_string(), quote.to_string()))
            .copied()
            .ok_or_else(|| ConnectorError::RateUnavailable {
                base: base.to_string(),
                quote: quote.to_string(),
            })
    }
}
