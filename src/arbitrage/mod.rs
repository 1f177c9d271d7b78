//! Arbitrage module: validity checks, pricing and the executor core.
//!
//! This module handles:
//! - Leg interchangeability validation
//! - Taker pricing and two-leg transaction costs
//! - The maker/taker order lifecycle state machine

pub mod executor;
pub mod pricing;
pub mod validator;

pub use executor::{CloseReason, ExecutorStats, XemmExecutor};
pub use pricing::{PricingEngine, PricingSnapshot, ResolvedLeg};
pub use validator::{are_tokens_interchangeable, is_arbitrage_valid};
