//! Tick scheduling and event routing for executor instances.
//!
//! A [`Runner`] owns one [`Strategy`] and drives it from a single task:
//! a `tokio::select!` over the tick interval and the order-event mailbox.
//! Ticks are awaited to completion before the next branch is polled, so
//! tick logic and event handlers never observe each other mid-mutation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::histogram;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error};

use crate::market::connector::OrderId;
use crate::metrics::METRIC_TICK_DURATION;
use crate::trading::events::{OrderEvent, OrderEventKind};

/// Executor lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ExecutorStatus {
    /// Actively quoting the maker leg.
    #[strum(serialize = "running")]
    Running,
    /// Maker leg filled; waiting for both orders to reach a terminal state.
    #[strum(serialize = "shutting_down")]
    ShuttingDown,
    /// Terminal. No further transitions.
    #[strum(serialize = "stopped")]
    Stopped,
}

/// Behavior a runner drives: periodic ticks plus asynchronous order events.
#[async_trait]
pub trait Strategy: Send {
    /// Current lifecycle status; the runner exits once this is `Stopped`.
    fn status(&self) -> ExecutorStatus;

    /// One-time pre-flight before the first tick (e.g. balance validation).
    async fn on_start(&mut self);

    /// One control-loop tick.
    async fn on_tick(&mut self);

    /// An order fully filled.
    async fn on_order_filled(&mut self, order_id: &OrderId);

    /// An order failed at its venue.
    async fn on_order_failed(&mut self, order_id: &OrderId, reason: &str);

    /// An order cancellation was confirmed.
    async fn on_order_cancelled(&mut self, order_id: &OrderId);
}

/// Single-task driver for one strategy instance.
///
/// The runner is the serialization boundary required by the executor: all
/// slot mutation happens on this task, whether triggered by cadence or by
/// pushed events.
pub struct Runner<S: Strategy> {
    strategy: S,
    events: UnboundedReceiver<OrderEvent>,
    tick_interval: Duration,
}

impl<S: Strategy> Runner<S> {
    /// Create a runner with the given tick cadence and event mailbox.
    pub fn new(strategy: S, events: UnboundedReceiver<OrderEvent>, tick_interval: Duration) -> Self {
        Self {
            strategy,
            events,
            tick_interval,
        }
    }

    /// Drive the strategy until it stops, then return it for inspection.
    pub async fn run(mut self) -> S {
        self.strategy.on_start().await;

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        while self.strategy.status() != ExecutorStatus::Stopped {
            tokio::select! {
                _ = ticker.tick() => {
                    let started = Instant::now();
                    self.strategy.on_tick().await;
                    histogram!(METRIC_TICK_DURATION)
                        .record(started.elapsed().as_secs_f64() * 1000.0);
                }
                event = self.events.recv() => match event {
                    Some(event) => self.dispatch(event).await,
                    None => {
                        // Event layer went away; without notifications the
                        // lifecycle cannot make progress on fills.
                        error!("order event channel closed, stopping runner");
                        break;
                    }
                },
            }
        }

        self.strategy
    }

    async fn dispatch(&mut self, event: OrderEvent) {
        debug!(order_id = %event.order_id, kind = ?event.kind, "order event");
        match event.kind {
            OrderEventKind::Filled => self.strategy.on_order_filled(&event.order_id).await,
            OrderEventKind::Failed { reason } => {
                self.strategy.on_order_failed(&event.order_id, &reason).await;
            }
            OrderEventKind::Cancelled => self.strategy.on_order_cancelled(&event.order_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Strategy that counts calls and stops after a fixed number of ticks.
    struct CountingStrategy {
        ticks: Arc<AtomicUsize>,
        fills: Arc<AtomicUsize>,
        stop_after: usize,
        started: bool,
    }

    #[async_trait]
    impl Strategy for CountingStrategy {
        fn status(&self) -> ExecutorStatus {
            if self.ticks.load(Ordering::SeqCst) >= self.stop_after
                || self.fills.load(Ordering::SeqCst) > 0
            {
                ExecutorStatus::Stopped
            } else {
                ExecutorStatus::Running
            }
        }

        async fn on_start(&mut self) {
            self.started = true;
        }

        async fn on_tick(&mut self) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }

        async fn on_order_filled(&mut self, _order_id: &OrderId) {
            self.fills.fetch_add(1, Ordering::SeqCst);
        }

        async fn on_order_failed(&mut self, _order_id: &OrderId, _reason: &str) {}

        async fn on_order_cancelled(&mut self, _order_id: &OrderId) {}
    }

    #[tokio::test(start_paused = true)]
    async fn runner_ticks_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let strategy = CountingStrategy {
            ticks: ticks.clone(),
            fills: Arc::new(AtomicUsize::new(0)),
            stop_after: 3,
            started: false,
        };

        let strategy = Runner::new(strategy, rx, Duration::from_millis(10)).run().await;

        assert!(strategy.started);
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn runner_routes_fill_events() {
        let fills = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let strategy = CountingStrategy {
            ticks: Arc::new(AtomicUsize::new(0)),
            fills: fills.clone(),
            stop_after: 1000,
            started: false,
        };
        tx.send(OrderEvent::filled(OrderId::new("o-1"))).unwrap();

        Runner::new(strategy, rx, Duration::from_millis(10)).run().await;

        assert_eq!(fills.load(Ordering::SeqCst), 1);
    }
}
