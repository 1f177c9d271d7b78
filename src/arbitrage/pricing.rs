//! Per-tick pricing: taker execution price, two-leg transaction cost and
//! the derived maker target price.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::arbitrage::validator::reference_asset;
use crate::error::ConnectorError;
use crate::market::connector::{RateOracle, VenueConnector};
use crate::market::types::{OrderType, Side, TradingPair, VenueKind};

/// One leg after maker/taker resolution: the connector it trades through,
/// the pair and the side it executes on.
#[derive(Clone)]
pub struct ResolvedLeg {
    /// Connector for the leg's venue.
    pub connector: Arc<dyn VenueConnector>,
    /// Pair traded on the leg.
    pub pair: TradingPair,
    /// Side the leg executes on.
    pub side: Side,
}

impl std::fmt::Debug for ResolvedLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedLeg")
            .field("venue", self.connector.venue())
            .field("pair", &self.pair)
            .field("side", &self.side)
            .finish()
    }
}

/// Ephemeral pricing result, recomputed every tick and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingSnapshot {
    /// Taker-side execution price for the full order amount.
    pub taker_result_price: Decimal,
    /// Combined fee + gas cost of both legs, in the reference asset.
    pub tx_cost: Decimal,
    /// Transaction cost as a fraction of the order amount.
    pub tx_cost_pct: Decimal,
    /// Maker price embedding the profitability margin and costs.
    pub maker_target_price: Decimal,
}

/// Computes taker pricing and transaction costs for one executor instance.
pub struct PricingEngine {
    rates: Arc<dyn RateOracle>,
    order_amount: Decimal,
    target_profitability: Decimal,
}

impl PricingEngine {
    /// Create an engine for a fixed order amount and profitability target.
    pub fn new(
        rates: Arc<dyn RateOracle>,
        order_amount: Decimal,
        target_profitability: Decimal,
    ) -> Self {
        Self {
            rates,
            order_amount,
            target_profitability,
        }
    }

    /// Size-aware execution price for the full order amount on a leg.
    ///
    /// Pure pass-through to the connector quote; slippage handling is the
    /// connector's concern.
    pub async fn resulting_price(
        &self,
        leg: &ResolvedLeg,
        side: Side,
    ) -> Result<Decimal, ConnectorError> {
        leg.connector
            .quote_price(&leg.pair, side, self.order_amount)
            .await
    }

    /// Combined transaction cost of hedging through both legs, in the
    /// common reference asset (taker-leg base, unwrapped).
    ///
    /// Taker side is costed as a market buy of the full amount, maker side
    /// as a limit order at a non-maker-priced quote.
    pub async fn transaction_cost(
        &self,
        maker: &ResolvedLeg,
        taker: &ResolvedLeg,
    ) -> Result<Decimal, ConnectorError> {
        let asset = reference_asset(&taker.pair.base);
        let taker_fee = self
            .leg_fee(taker, OrderType::Market, Side::Buy, asset)
            .await?;
        let maker_fee = self
            .leg_fee(maker, OrderType::Limit, Side::Sell, asset)
            .await?;
        debug!(%taker_fee, %maker_fee, asset, "computed leg fees");
        Ok(taker_fee + maker_fee)
    }

    /// Fee for one leg, denominated in `asset`. Dispatches on the venue
    /// kind: AMM venues charge a fixed gas amount, CLOB venues quote a fee
    /// and convert it themselves.
    async fn leg_fee(
        &self,
        leg: &ResolvedLeg,
        order_type: OrderType,
        side: Side,
        asset: &str,
    ) -> Result<Decimal, ConnectorError> {
        match leg.connector.kind() {
            VenueKind::Amm => {
                let gas = leg.connector.gas_fee();
                let rate = self.rates.pair_rate(asset, &gas.token).await?;
                Ok(gas.amount / rate)
            }
            VenueKind::Clob => {
                let price = leg
                    .connector
                    .quote_price(&leg.pair, side, self.order_amount)
                    .await?;
                leg.connector
                    .fee_in_asset(&leg.pair, order_type, side, self.order_amount, price, asset)
                    .await
            }
        }
    }

    /// Maker price that stays profitable net of both legs' costs.
    ///
    /// When the taker leg buys, the maker leg sells above the hedge price;
    /// when the taker leg sells, the maker leg buys below it.
    pub fn target_maker_price(
        &self,
        taker_side: Side,
        taker_result_price: Decimal,
        tx_cost_pct: Decimal,
    ) -> Decimal {
        match taker_side {
            Side::Buy => {
                taker_result_price * (Decimal::ONE + self.target_profitability + tx_cost_pct)
            }
            Side::Sell => {
                taker_result_price * (Decimal::ONE - self.target_profitability - tx_cost_pct)
            }
        }
    }

    /// Recompute the full pricing snapshot for the current tick.
    pub async fn snapshot(
        &self,
        maker: &ResolvedLeg,
        taker: &ResolvedLeg,
    ) -> Result<PricingSnapshot, ConnectorError> {
        let taker_result_price = self.resulting_price(taker, taker.side).await?;
        let tx_cost = self.transaction_cost(maker, taker).await?;
        let tx_cost_pct = tx_cost / self.order_amount;
        let maker_target_price =
            self.target_maker_price(taker.side, taker_result_price, tx_cost_pct);
        Ok(PricingSnapshot {
            taker_result_price,
            tx_cost,
            tx_cost_pct,
            maker_target_price,
        })
    }
}
