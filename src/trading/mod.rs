//! Trading module for order bookkeeping.
//!
//! This module handles:
//! - Order status and tracked-order state
//! - Asynchronous order lifecycle events

pub mod events;
pub mod order;

pub use events::{OrderEvent, OrderEventKind};
pub use order::{OrderStatus, TrackedOrder};
