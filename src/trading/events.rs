//! Out-of-band order lifecycle notifications.
//!
//! The connector/event layer pushes these asynchronously; the [`Runner`]
//! (see [`crate::runtime`]) routes them into the executor's handlers on the
//! same task that runs ticks, so slot mutation stays serialized.
//!
//! [`Runner`]: crate::runtime::Runner

use crate::market::connector::OrderId;

/// What happened to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEventKind {
    /// Order fully filled.
    Filled,
    /// Order failed at the venue.
    Failed {
        /// Venue-reported failure reason.
        reason: String,
    },
    /// Order cancellation confirmed by the venue.
    Cancelled,
}

/// A lifecycle notification for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEvent {
    /// Order the event refers to.
    pub order_id: OrderId,
    /// Event kind.
    pub kind: OrderEventKind,
}

impl OrderEvent {
    /// A fill notification.
    pub fn filled(order_id: OrderId) -> Self {
        Self {
            order_id,
            kind: OrderEventKind::Filled,
        }
    }

    /// A failure notification.
    pub fn failed(order_id: OrderId, reason: impl Into<String>) -> Self {
        Self {
            order_id,
            kind: OrderEventKind::Failed {
                reason: reason.into(),
            },
        }
    }

    /// A cancellation confirmation.
    pub fn cancelled(order_id: OrderId) -> Self {
        Self {
            order_id,
            kind: OrderEventKind::Cancelled,
        }
    }
}
