//! Order status and tracking types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::market::connector::{OrderId, OrderSnapshot};

/// Order status as reported by a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, not yet acknowledged on the book.
    #[strum(serialize = "pending", serialize = "PENDING")]
    Pending,
    /// Resting on the book.
    #[strum(serialize = "live", serialize = "LIVE")]
    Live,
    /// Fully filled.
    #[strum(serialize = "filled", serialize = "FILLED")]
    Filled,
    /// Cancelled before filling.
    #[strum(serialize = "canceled", serialize = "cancelled", serialize = "CANCELED", serialize = "CANCELLED")]
    Cancelled,
    /// Rejected or failed at the venue.
    #[strum(serialize = "failed", serialize = "FAILED")]
    Failed,
}

impl OrderStatus {
    /// Check if status is terminal (won't change).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Failed
        )
    }

    /// Check if the order is still working on the book.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Live)
    }

    /// Check if order was filled.
    pub fn is_filled(&self) -> bool {
        matches!(self, OrderStatus::Filled)
    }
}

/// An order owned by the executor, with its last known snapshot.
///
/// At most one live maker and one live taker `TrackedOrder` exist per
/// executor instance.
#[derive(Debug, Clone)]
pub struct TrackedOrder {
    /// Venue-assigned order id.
    pub order_id: OrderId,
    /// Price the order was placed at.
    pub price: Decimal,
    /// Order quantity.
    pub amount: Decimal,
    /// Last known status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: OffsetDateTime,
}

impl TrackedOrder {
    /// Track a freshly placed order.
    pub fn new(order_id: OrderId, price: Decimal, amount: Decimal) -> Self {
        Self {
            order_id,
            price,
            amount,
            status: OrderStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// True while the order may still fill.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// True once the order can no longer change.
    pub fn is_done(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fold a venue snapshot into the tracked state.
    pub fn apply_snapshot(&mut self, snapshot: &OrderSnapshot) {
        self.price = snapshot.price;
        self.amount = snapshot.amount;
        self.status = snapshot.status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn status_terminal_classification() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Live.is_terminal());

        assert!(OrderStatus::Pending.is_open());
        assert!(OrderStatus::Live.is_open());
        assert!(!OrderStatus::Filled.is_open());
    }

    #[test]
    fn tracked_order_lifecycle() {
        let mut order = TrackedOrder::new(OrderId::new("o-1"), dec!(100.3), dec!(1));
        assert!(order.is_open());
        assert!(!order.is_done());

        order.apply_snapshot(&OrderSnapshot {
            order_id: OrderId::new("o-1"),
            price: dec!(100.3),
            amount: dec!(1),
            status: OrderStatus::Filled,
        });
        assert!(order.is_done());
        assert!(order.status.is_filled());
    }
}
