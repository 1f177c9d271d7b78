//! Connector traits for venue access.
//!
//! These are the integration seams the executor consumes. Real exchange
//! connectivity lives behind [`VenueConnector`]; the crate ships only the
//! trait plus a configurable mock (see [`super::mock`]).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::ConnectorError;
use crate::market::types::{OrderType, Side, TradingPair, VenueId, VenueKind};

/// Unique order identifier assigned by a venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(pub String);

impl OrderId {
    /// Create an order id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters for placing an order on a venue.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Trading pair.
    pub pair: TradingPair,
    /// Limit or market.
    pub order_type: OrderType,
    /// Buy or sell.
    pub side: Side,
    /// Order quantity in base asset.
    pub amount: Decimal,
    /// Limit price; `None` for market orders.
    pub price: Option<Decimal>,
}

impl OrderRequest {
    /// A resting limit order.
    pub fn limit(pair: TradingPair, side: Side, amount: Decimal, price: Decimal) -> Self {
        Self {
            pair,
            order_type: OrderType::Limit,
            side,
            amount,
            price: Some(price),
        }
    }

    /// An immediate market order.
    pub fn market(pair: TradingPair, side: Side, amount: Decimal) -> Self {
        Self {
            pair,
            order_type: OrderType::Market,
            side,
            amount,
            price: None,
        }
    }
}

/// A candidate order run through balance-aware sizing before placement.
#[derive(Debug, Clone)]
pub struct OrderCandidate {
    /// Trading pair.
    pub pair: TradingPair,
    /// Whether the order would rest on the book.
    pub is_maker: bool,
    /// Limit or market.
    pub order_type: OrderType,
    /// Buy or sell.
    pub side: Side,
    /// Requested quantity.
    pub amount: Decimal,
    /// Reference price used for sizing.
    pub price: Decimal,
}

/// Live order snapshot as reported by a venue.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    /// Order id.
    pub order_id: OrderId,
    /// Price the order rests at (fill price for market orders once known).
    pub price: Decimal,
    /// Order quantity.
    pub amount: Decimal,
    /// Current status.
    pub status: crate::trading::order::OrderStatus,
}

/// Fixed network fee charged by an AMM venue, denominated in a gas token.
#[derive(Debug, Clone)]
pub struct GasFee {
    /// Gas amount per transaction.
    pub amount: Decimal,
    /// Gas token symbol (e.g. "ETH", "MATIC").
    pub token: String,
}

/// Capability surface of one trading venue.
///
/// Implementations must be shareable across executor instances, hence
/// `Send + Sync`; all mutation is interior.
#[async_trait]
pub trait VenueConnector: Send + Sync {
    /// Venue identifier.
    fn venue(&self) -> &VenueId;

    /// Execution model; selects the fee computation path.
    fn kind(&self) -> VenueKind;

    /// Size-aware execution price for `amount` of `pair` on `side`.
    ///
    /// Captures slippage across the full order amount, not just top of book.
    async fn quote_price(
        &self,
        pair: &TradingPair,
        side: Side,
        amount: Decimal,
    ) -> Result<Decimal, ConnectorError>;

    /// Current mid price of `pair`.
    async fn mid_price(&self, pair: &TradingPair) -> Result<Decimal, ConnectorError>;

    /// Place an order, returning the venue-assigned id.
    ///
    /// Fill, failure and cancellation notifications arrive asynchronously
    /// through the event layer, not through this call.
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderId, ConnectorError>;

    /// Request cancellation of a resting order. Best effort.
    async fn cancel_order(
        &self,
        pair: &TradingPair,
        order_id: &OrderId,
    ) -> Result<(), ConnectorError>;

    /// Query the current snapshot of a previously placed order.
    async fn order_snapshot(&self, order_id: &OrderId) -> Result<OrderSnapshot, ConnectorError>;

    /// Fixed gas fee for AMM venues.
    ///
    /// Only meaningful when [`kind`](Self::kind) is [`VenueKind::Amm`].
    fn gas_fee(&self) -> GasFee;

    /// Trading fee for an order, already converted into `asset` terms.
    ///
    /// Only meaningful when [`kind`](Self::kind) is [`VenueKind::Clob`]; the
    /// connector owns the percentage/fixed fee schedule and the conversion.
    async fn fee_in_asset(
        &self,
        pair: &TradingPair,
        order_type: OrderType,
        side: Side,
        amount: Decimal,
        price: Decimal,
        asset: &str,
    ) -> Result<Decimal, ConnectorError>;

    /// Adjust a candidate order's amount for available balance.
    ///
    /// Returns zero when the venue cannot fund the candidate at all.
    async fn adjusted_amount(&self, candidate: &OrderCandidate) -> Result<Decimal, ConnectorError>;
}

/// Asset exchange-rate reference, used to convert gas costs into the
/// arbitrage reference asset.
#[async_trait]
pub trait RateOracle: Send + Sync {
    /// Rate of the `base-quote` pair: how many `quote` one `base` buys.
    async fn pair_rate(&self, base: &str, quote: &str) -> Result<Decimal, ConnectorError>;
}
