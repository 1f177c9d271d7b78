//! Market module for venue access.
//!
//! This module handles:
//! - Venue and trading-pair types
//! - Connector and rate-oracle traits
//! - Mock venue for testing and paper trading

pub mod connector;
pub mod mock;
pub mod types;

pub use connector::{
    GasFee, OrderCandidate, OrderId, OrderRequest, OrderSnapshot, RateOracle, VenueConnector,
};
pub use mock::{FixedRateOracle, MockVenue, MockVenueConfig};
pub use types::{Leg, OrderType, Side, TradingPair, VenueId, VenueKind};
