//! Cross-exchange arbitrage executor.
//!
//! Rests a limit order on the maker leg and hedges a fill immediately with
//! a market order on the taker leg, repricing the maker order every tick so
//! the hedge stays profitable net of both legs' fees.
//!
//! The executor is a single-owner state machine: all mutation runs on the
//! driving [`Runner`](crate::runtime::Runner) task, whether it originates
//! from a tick or from a pushed order event.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::arbitrage::pricing::{PricingEngine, PricingSnapshot, ResolvedLeg};
use crate::arbitrage::validator::is_arbitrage_valid;
use crate::config::ArbitrageConfig;
use crate::error::ExecutorError;
use crate::market::connector::{
    OrderCandidate, OrderId, OrderRequest, RateOracle, VenueConnector,
};
use crate::market::types::{OrderType, Side};
use crate::metrics::{
    METRIC_EXECUTORS_STOPPED, METRIC_ORDERS_CANCELLED, METRIC_ORDERS_FAILED,
    METRIC_ORDERS_FILLED, METRIC_ORDERS_SUBMITTED, METRIC_ORDER_RETRIES,
};
use crate::runtime::{ExecutorStatus, Strategy};
use crate::trading::order::{OrderStatus, TrackedOrder};

/// Terminal classification of why an executor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CloseReason {
    /// Both legs filled; the arbitrage completed normally.
    #[strum(serialize = "completed")]
    Completed,
    /// Pre-flight sizing resolved to zero on a leg.
    #[strum(serialize = "insufficient_balance")]
    InsufficientBalance,
    /// Maker placement retries exhausted before a fill.
    #[strum(serialize = "failed")]
    Failed,
}

/// Summary of an executor's terminal state.
#[derive(Debug, Clone)]
pub struct ExecutorStats {
    /// Lifecycle status at the time of the snapshot.
    pub status: ExecutorStatus,
    /// Close reason, set only at termination.
    pub close_reason: Option<CloseReason>,
    /// Orders that failed at a venue.
    pub failed_orders: usize,
    /// Retry counter.
    pub retries: u32,
}

/// Cross-exchange market-making executor over one maker and one taker leg.
pub struct XemmExecutor {
    config: ArbitrageConfig,
    maker: ResolvedLeg,
    taker: ResolvedLeg,
    pricing: PricingEngine,
    status: ExecutorStatus,
    close_reason: Option<CloseReason>,
    /// Last computed pricing; refreshed at the top of every RUNNING tick.
    snapshot: Option<PricingSnapshot>,
    maker_order: Option<TrackedOrder>,
    taker_order: Option<TrackedOrder>,
    failed_orders: Vec<TrackedOrder>,
    current_retries: u32,
}

impl XemmExecutor {
    /// Construct an executor, failing closed when the two legs are not
    /// economically interchangeable.
    ///
    /// `buying` and `selling` are the connectors for the configured buying
    /// and selling legs; which one quotes maker and which hedges taker is
    /// resolved here from `config.maker_side`.
    pub fn new(
        config: ArbitrageConfig,
        buying: Arc<dyn VenueConnector>,
        selling: Arc<dyn VenueConnector>,
        rates: Arc<dyn RateOracle>,
    ) -> Result<Self, ExecutorError> {
        if !is_arbitrage_valid(&config.buying_leg.pair, &config.selling_leg.pair) {
            return Err(ExecutorError::InvalidArbitrage {
                buying_pair: config.buying_leg.pair.to_string(),
                selling_pair: config.selling_leg.pair.to_string(),
            });
        }
        if config.order_amount <= Decimal::ZERO {
            return Err(ExecutorError::InvalidAmount(config.order_amount));
        }

        let buying_leg = ResolvedLeg {
            connector: buying,
            pair: config.buying_leg.pair.clone(),
            side: Side::Buy,
        };
        let selling_leg = ResolvedLeg {
            connector: selling,
            pair: config.selling_leg.pair.clone(),
            side: Side::Sell,
        };
        let (maker, taker) = match config.maker_side {
            Side::Buy => (buying_leg, selling_leg),
            Side::Sell => (selling_leg, buying_leg),
        };

        let pricing = PricingEngine::new(rates, config.order_amount, config.target_profitability);

        Ok(Self {
            config,
            maker,
            taker,
            pricing,
            status: ExecutorStatus::Running,
            close_reason: None,
            snapshot: None,
            maker_order: None,
            taker_order: None,
            failed_orders: Vec::new(),
            current_retries: 0,
        })
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ExecutorStatus {
        self.status
    }

    /// Close reason, set only once the executor stopped.
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    /// The tracked maker order, if one is live.
    pub fn maker_order(&self) -> Option<&TrackedOrder> {
        self.maker_order.as_ref()
    }

    /// The tracked taker order, if one was placed.
    pub fn taker_order(&self) -> Option<&TrackedOrder> {
        self.taker_order.as_ref()
    }

    /// Orders that failed at a venue.
    pub fn failed_orders(&self) -> &[TrackedOrder] {
        &self.failed_orders
    }

    /// Retry counter, monotonically non-decreasing.
    pub fn retries(&self) -> u32 {
        self.current_retries
    }

    /// Snapshot of the executor's bookkeeping.
    pub fn stats(&self) -> ExecutorStats {
        ExecutorStats {
            status: self.status,
            close_reason: self.close_reason,
            failed_orders: self.failed_orders.len(),
            retries: self.current_retries,
        }
    }

    /// Pre-flight sizing check: both legs must fund the configured amount.
    ///
    /// Runs once before the first tick; a zero adjusted amount on either
    /// leg stops the executor immediately, bypassing RUNNING entirely.
    pub async fn validate_sufficient_balance(&mut self) -> Result<(), ExecutorError> {
        let mid_price = self.maker.connector.mid_price(&self.maker.pair).await?;
        let maker_candidate = OrderCandidate {
            pair: self.maker.pair.clone(),
            is_maker: true,
            order_type: OrderType::Limit,
            side: self.maker.side,
            amount: self.config.order_amount,
            price: mid_price,
        };
        let taker_candidate = OrderCandidate {
            pair: self.taker.pair.clone(),
            is_maker: false,
            order_type: OrderType::Limit,
            side: self.taker.side,
            amount: self.config.order_amount,
            price: mid_price,
        };

        let maker_adjusted = self.maker.connector.adjusted_amount(&maker_candidate).await?;
        let taker_adjusted = self.taker.connector.adjusted_amount(&taker_candidate).await?;
        if maker_adjusted.is_zero() || taker_adjusted.is_zero() {
            error!(
                maker_adjusted = %maker_adjusted,
                taker_adjusted = %taker_adjusted,
                "not enough budget to open position"
            );
            self.close(CloseReason::InsufficientBalance);
        }
        Ok(())
    }

    /// One control-loop tick.
    pub async fn tick(&mut self) -> Result<(), ExecutorError> {
        match self.status {
            ExecutorStatus::Running => {
                let snapshot = self.pricing.snapshot(&self.maker, &self.taker).await?;
                self.snapshot = Some(snapshot);
                self.control_maker_order(&snapshot).await;
                Ok(())
            }
            ExecutorStatus::ShuttingDown => self.control_shutdown().await,
            ExecutorStatus::Stopped => Ok(()),
        }
    }

    async fn control_maker_order(&mut self, snapshot: &PricingSnapshot) {
        if self.maker_order.is_none() {
            self.create_maker_order(snapshot).await;
        } else {
            self.control_update_maker_order(snapshot).await;
        }
    }

    /// Place the resting maker order at the target price.
    async fn create_maker_order(&mut self, snapshot: &PricingSnapshot) {
        let request = OrderRequest::limit(
            self.maker.pair.clone(),
            self.maker.side,
            self.config.order_amount,
            snapshot.maker_target_price,
        );
        match self.maker.connector.place_order(&request).await {
            Ok(order_id) => {
                counter!(METRIC_ORDERS_SUBMITTED).increment(1);
                info!(
                    order_id = %order_id,
                    price = %snapshot.maker_target_price,
                    venue = %self.maker.connector.venue(),
                    "created maker order"
                );
                self.maker_order = Some(TrackedOrder::new(
                    order_id,
                    snapshot.maker_target_price,
                    self.config.order_amount,
                ));
            }
            Err(error) => {
                warn!(%error, "maker order placement failed");
                self.register_retry();
                if self.current_retries > self.config.max_retries {
                    error!(
                        retries = self.current_retries,
                        "maker placement retries exhausted"
                    );
                    self.close(CloseReason::Failed);
                }
            }
        }
    }

    /// Reprice check: cancel the maker order once its realized
    /// profitability net of costs drops below the configured floor.
    async fn control_update_maker_order(&mut self, snapshot: &PricingSnapshot) {
        let Some(order) = &self.maker_order else {
            return;
        };
        if !order.is_open() {
            return;
        }

        let maker_price = order.price;
        let trade_profitability = match self.maker.side {
            Side::Buy => (snapshot.taker_result_price - maker_price) / maker_price,
            Side::Sell => (maker_price - snapshot.taker_result_price) / maker_price,
        };
        if trade_profitability - snapshot.tx_cost_pct < self.config.min_profitability {
            info!(
                profitability = %trade_profitability,
                tx_cost_pct = %snapshot.tx_cost_pct,
                "trade profitability below minimum, cancelling maker order"
            );
            counter!(METRIC_ORDERS_CANCELLED).increment(1);
            if let Some(order) = self.maker_order.take() {
                self.cancel_fire_and_forget(order);
            }
        }
    }

    /// Best-effort cancellation: the slot is already cleared, the venue
    /// request runs detached. A late fill for this id is treated as stale.
    fn cancel_fire_and_forget(&self, order: TrackedOrder) {
        let connector = Arc::clone(&self.maker.connector);
        let pair = self.maker.pair.clone();
        tokio::spawn(async move {
            if let Err(error) = connector.cancel_order(&pair, &order.order_id).await {
                warn!(%error, order_id = %order.order_id, "maker cancellation failed");
            }
        });
    }

    /// Hedge the filled maker leg with a market order on the taker leg.
    ///
    /// An unhedged fill is open risk: on placement failure the retry is
    /// picked up by the next SHUTTING_DOWN tick, and venue-side failures
    /// re-issue immediately via [`Self::on_order_failed`].
    async fn place_taker_order(&mut self) {
        let request = OrderRequest::market(
            self.taker.pair.clone(),
            self.taker.side,
            self.config.order_amount,
        );
        match self.taker.connector.place_order(&request).await {
            Ok(order_id) => {
                counter!(METRIC_ORDERS_SUBMITTED).increment(1);
                info!(
                    order_id = %order_id,
                    venue = %self.taker.connector.venue(),
                    "placed taker hedge order"
                );
                let reference_price = self
                    .snapshot
                    .map(|s| s.taker_result_price)
                    .unwrap_or(Decimal::ZERO);
                self.taker_order = Some(TrackedOrder::new(
                    order_id,
                    reference_price,
                    self.config.order_amount,
                ));
            }
            Err(error) => {
                error!(%error, "taker hedge placement failed, will retry");
                self.register_retry();
            }
        }
    }

    /// SHUTTING_DOWN tick: refresh both slots and stop once both orders
    /// are terminal. Re-issues the taker hedge if its slot is empty.
    async fn control_shutdown(&mut self) -> Result<(), ExecutorError> {
        if self.taker_order.is_none() {
            self.place_taker_order().await;
        }
        self.refresh_order_slots().await;

        let maker_done = self.maker_order.as_ref().map_or(true, TrackedOrder::is_done);
        let taker_done = self.taker_order.as_ref().map_or(false, TrackedOrder::is_done);
        if maker_done && taker_done {
            info!("both orders are done, executor terminated");
            self.close(CloseReason::Completed);
        }
        Ok(())
    }

    /// Pull fresh snapshots for both tracked orders. Query failures are
    /// tolerated; the next tick retries.
    async fn refresh_order_slots(&mut self) {
        for (leg, slot) in [
            (&self.maker, &mut self.maker_order),
            (&self.taker, &mut self.taker_order),
        ] {
            if let Some(order) = slot {
                if order.is_done() {
                    continue;
                }
                match leg.connector.order_snapshot(&order.order_id).await {
                    Ok(snapshot) => order.apply_snapshot(&snapshot),
                    Err(error) => {
                        debug!(%error, order_id = %order.order_id, "order snapshot query failed");
                    }
                }
            }
        }
    }

    fn register_retry(&mut self) {
        self.current_retries += 1;
        counter!(METRIC_ORDER_RETRIES).increment(1);
    }

    fn close(&mut self, reason: CloseReason) {
        if self.status == ExecutorStatus::Stopped {
            return;
        }
        self.status = ExecutorStatus::Stopped;
        self.close_reason = Some(reason);
        counter!(METRIC_EXECUTORS_STOPPED).increment(1);
        info!(close_reason = %reason, "executor stopped");
    }

    fn is_tracked_maker(&self, order_id: &OrderId) -> bool {
        self.maker_order
            .as_ref()
            .is_some_and(|o| &o.order_id == order_id)
    }

    fn is_tracked_taker(&self, order_id: &OrderId) -> bool {
        self.taker_order
            .as_ref()
            .is_some_and(|o| &o.order_id == order_id)
    }

    /// Handle a fill notification.
    ///
    /// A maker fill hedges synchronously with the event; deferring to the
    /// next tick would leave the fill unhedged.
    pub async fn process_order_filled(&mut self, order_id: &OrderId) {
        if self.is_tracked_maker(order_id) {
            counter!(METRIC_ORDERS_FILLED).increment(1);
            if let Some(order) = self.maker_order.as_mut() {
                order.status = OrderStatus::Filled;
            }
            info!(order_id = %order_id, "maker order completed, executing taker order");
            self.place_taker_order().await;
            self.status = ExecutorStatus::ShuttingDown;
        } else if self.is_tracked_taker(order_id) {
            counter!(METRIC_ORDERS_FILLED).increment(1);
            if let Some(order) = self.taker_order.as_mut() {
                order.status = OrderStatus::Filled;
            }
            info!(order_id = %order_id, "taker order completed");
        } else {
            // Stale: fill for a cancelled/cleared order id.
            debug!(order_id = %order_id, "ignoring fill for untracked order");
        }
    }

    /// Handle a failure notification.
    ///
    /// Maker failures retry on the next RUNNING tick (cap enforced); taker
    /// failures re-issue the hedge immediately and unconditionally.
    pub async fn process_order_failed(&mut self, order_id: &OrderId, reason: &str) {
        if self.is_tracked_maker(order_id) {
            counter!(METRIC_ORDERS_FAILED).increment(1);
            warn!(order_id = %order_id, reason, "maker order failed");
            if let Some(mut order) = self.maker_order.take() {
                order.status = OrderStatus::Failed;
                self.failed_orders.push(order);
            }
            self.register_retry();
            if self.current_retries > self.config.max_retries {
                error!(retries = self.current_retries, "maker retries exhausted");
                self.close(CloseReason::Failed);
            }
        } else if self.is_tracked_taker(order_id) {
            counter!(METRIC_ORDERS_FAILED).increment(1);
            warn!(order_id = %order_id, reason, "taker order failed, re-issuing hedge");
            if let Some(mut order) = self.taker_order.take() {
                order.status = OrderStatus::Failed;
                self.failed_orders.push(order);
            }
            self.register_retry();
            // A filled maker leg with no surviving hedge is open risk; the
            // retry cap never applies here.
            self.place_taker_order().await;
        } else {
            debug!(order_id = %order_id, "ignoring failure for untracked order");
        }
    }

    /// Handle a cancellation confirmation.
    ///
    /// Normally the slot was already cleared when cancellation was
    /// requested, making this stale; a venue-initiated cancel clears the
    /// slot so the next tick can re-quote.
    pub async fn process_order_cancelled(&mut self, order_id: &OrderId) {
        if self.is_tracked_maker(order_id) {
            info!(order_id = %order_id, "maker order cancelled by venue");
            self.maker_order = None;
        } else {
            debug!(order_id = %order_id, "ignoring cancellation for untracked order");
        }
    }
}

#[async_trait]
impl Strategy for XemmExecutor {
    fn status(&self) -> ExecutorStatus {
        self.status
    }

    async fn on_start(&mut self) {
        if let Err(error) = self.validate_sufficient_balance().await {
            // Sizing could not be validated at all; fail closed.
            error!(%error, "balance validation failed");
            self.close(CloseReason::InsufficientBalance);
        }
    }

    async fn on_tick(&mut self) {
        if let Err(error) = self.tick().await {
            // Quote or fee lookups failing aborts this tick only.
            warn!(%error, "tick aborted");
        }
    }

    async fn on_order_filled(&mut self, order_id: &OrderId) {
        self.process_order_filled(order_id).await;
    }

    async fn on_order_failed(&mut self, order_id: &OrderId, reason: &str) {
        self.process_order_failed(order_id, reason).await;
    }

    async fn on_order_cancelled(&mut self, order_id: &OrderId) {
        self.process_order_cancelled(order_id).await;
    }
}
