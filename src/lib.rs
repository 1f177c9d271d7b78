//! Cross-exchange market-making arbitrage executor.
//!
//! This library rests a limit ("maker") order on one venue and, upon fill,
//! immediately hedges with a market ("taker") order on another venue
//! quoting an economically equivalent pair, repricing the maker order every
//! tick so the eventual hedge stays profitable net of fees.
//!
//! # Strategy
//!
//! ```text
//! taker hedge price:   100.00  (size-aware quote, full amount)
//! two-leg costs:         0.1%  (fees + gas, reference asset)
//! target margin:         0.2%
//! ─────────────────────────────
//! maker sell quote:    100.30  (repriced every tick)
//! ```
//!
//! A maker fill triggers the taker hedge synchronously with the fill event;
//! both legs terminal stops the executor.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Venue types, connector traits and the mock venue
//! - [`trading`]: Order status, tracked orders and lifecycle events
//! - [`arbitrage`]: Validity, pricing and the executor state machine
//! - [`runtime`]: Tick scheduling and event routing
//! - [`metrics`]: Prometheus metrics

pub mod arbitrage;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod runtime;
pub mod trading;

pub use config::{AppConfig, ArbitrageConfig};
pub use error::{BotError, Result};
