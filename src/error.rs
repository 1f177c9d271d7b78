//! Unified error types for the arbitrage executor.

use thiserror::Error;

/// Unified error type for the bot.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Invalid configuration values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Executor construction or lifecycle error.
    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),

    /// Venue connector error.
    #[error("connector error: {0}")]
    Connector(#[from] ConnectorError),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the arbitrage executor itself.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// The two legs are not economically interchangeable.
    ///
    /// Fatal at construction; the executor is never instantiated.
    #[error("arbitrage not valid: {buying_pair} and {selling_pair} are not interchangeable")]
    InvalidArbitrage {
        /// Pair traded on the buying leg.
        buying_pair: String,
        /// Pair traded on the selling leg.
        selling_pair: String,
    },

    /// Order amount must be positive.
    #[error("invalid order amount: {0}")]
    InvalidAmount(rust_decimal::Decimal),

    /// A connector call failed inside a tick.
    #[error("connector failure: {0}")]
    Connector(#[from] ConnectorError),
}

/// Venue connector and rate-oracle errors.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Quote could not be produced for the requested size.
    #[error("quote failed for {pair} on {venue}: {reason}")]
    QuoteFailed {
        /// Venue the quote was requested from.
        venue: String,
        /// Pair the quote was requested for.
        pair: String,
        /// Reason for failure.
        reason: String,
    },

    /// Order placement was rejected.
    #[error("order placement failed on {venue}: {reason}")]
    PlacementFailed {
        /// Venue the order was sent to.
        venue: String,
        /// Rejection reason.
        reason: String,
    },

    /// Cancellation request failed.
    #[error("failed to cancel order {order_id}: {reason}")]
    CancelFailed {
        /// Order id the cancel targeted.
        order_id: String,
        /// Reason for failure.
        reason: String,
    },

    /// Order snapshot query failed.
    #[error("failed to query order {order_id}: {reason}")]
    SnapshotFailed {
        /// Order id queried.
        order_id: String,
        /// Reason for failure.
        reason: String,
    },

    /// No conversion rate available for an asset pair.
    #[error("no rate available for {base}-{quote}")]
    RateUnavailable {
        /// Base asset.
        base: String,
        /// Quote asset.
        quote: String,
    },

    /// Fee schedule could not be resolved.
    #[error("fee quote failed on {venue}: {reason}")]
    FeeQuoteFailed {
        /// Venue the fee was requested from.
        venue: String,
        /// Reason for failure.
        reason: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BotError>;
