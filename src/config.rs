//! Application configuration loaded from environment variables.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::BotError;
use crate::market::types::{Leg, Side, TradingPair, VenueKind};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    // === Buying leg ===
    /// Venue the buying leg trades on.
    pub buying_venue: String,

    /// Execution model of the buying venue (amm or clob).
    #[serde(default = "default_venue_kind")]
    pub buying_venue_kind: VenueKind,

    /// Trading pair on the buying venue, e.g. "ETH-USDT".
    pub buying_pair: String,

    // === Selling leg ===
    /// Venue the selling leg trades on.
    pub selling_venue: String,

    /// Execution model of the selling venue (amm or clob).
    #[serde(default = "default_venue_kind")]
    pub selling_venue_kind: VenueKind,

    /// Trading pair on the selling venue, e.g. "WETH-USDC".
    pub selling_pair: String,

    // === Trading parameters ===
    /// Side the maker order rests on (BUY rests on the buying leg).
    #[serde(default = "default_maker_side")]
    pub maker_side: Side,

    /// Order quantity in base asset, identical on both legs.
    #[serde(default = "default_order_amount")]
    pub order_amount: Decimal,

    /// Profitability margin embedded in the maker quote (fraction).
    #[serde(default = "default_target_profitability")]
    pub target_profitability: Decimal,

    /// Profitability below which the maker order is repriced (fraction).
    #[serde(default = "default_min_profitability")]
    pub min_profitability: Decimal,

    /// Milliseconds between control-loop ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maker order placement retries before the executor closes as failed.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    // === Observability ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_venue_kind() -> VenueKind {
    VenueKind::Clob
}

fn default_maker_side() -> Side {
    Side::Buy
}

fn default_order_amount() -> Decimal {
    Decimal::ONE
}

fn default_target_profitability() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_min_profitability() -> Decimal {
    Decimal::new(3, 3) // 0.003
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_max_retries() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.buying_venue == self.selling_venue {
            return Err("BUYING_VENUE and SELLING_VENUE must differ".to_string());
        }

        if self.order_amount <= Decimal::ZERO {
            return Err("ORDER_AMOUNT must be positive".to_string());
        }

        if self.min_profitability > self.target_profitability {
            return Err(
                "MIN_PROFITABILITY must not exceed TARGET_PROFITABILITY".to_string(),
            );
        }

        if self.tick_interval_ms == 0 {
            return Err("TICK_INTERVAL_MS must be positive".to_string());
        }

        self.buying_pair.parse::<TradingPair>()?;
        self.selling_pair.parse::<TradingPair>()?;

        Ok(())
    }

    /// Build the immutable executor configuration from the raw values.
    pub fn arbitrage_config(&self) -> Result<ArbitrageConfig, BotError> {
        let buying_pair: TradingPair = self
            .buying_pair
            .parse()
            .map_err(BotError::InvalidConfig)?;
        let selling_pair: TradingPair = self
            .selling_pair
            .parse()
            .map_err(BotError::InvalidConfig)?;

        Ok(ArbitrageConfig {
            buying_leg: Leg::new(self.buying_venue.as_str(), buying_pair),
            selling_leg: Leg::new(self.selling_venue.as_str(), selling_pair),
            maker_side: self.maker_side,
            order_amount: self.order_amount,
            target_profitability: self.target_profitability,
            min_profitability: self.min_profitability,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            max_retries: self.max_retries,
        })
    }
}

/// Immutable per-executor configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct ArbitrageConfig {
    /// Leg the position is bought on.
    pub buying_leg: Leg,
    /// Leg the position is sold on.
    pub selling_leg: Leg,
    /// Which side the maker order rests on.
    pub maker_side: Side,
    /// Order quantity, identical on both legs (1:1 hedge).
    pub order_amount: Decimal,
    /// Profitability margin embedded in the maker quote.
    pub target_profitability: Decimal,
    /// Floor below which the maker order is repriced.
    pub min_profitability: Decimal,
    /// Control-loop tick cadence.
    pub tick_interval: Duration,
    /// Maker placement retries before closing as failed.
    pub max_retries: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_app_config() -> AppConfig {
        AppConfig {
            buying_venue: "uniswap_polygon".to_string(),
            buying_venue_kind: VenueKind::Amm,
            buying_pair: "WETH-USDC".to_string(),
            selling_venue: "binance".to_string(),
            selling_venue_kind: VenueKind::Clob,
            selling_pair: "ETH-USDT".to_string(),
            maker_side: Side::Buy,
            order_amount: dec!(1),
            target_profitability: dec!(0.01),
            min_profitability: dec!(0.003),
            tick_interval_ms: 1000,
            max_retries: 10,
            rust_log: "info".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_order_amount(), dec!(1));
        assert_eq!(default_target_profitability(), dec!(0.01));
        assert_eq!(default_min_profitability(), dec!(0.003));
        assert_eq!(default_tick_interval_ms(), 1000);
        assert_eq!(default_max_retries(), 10);
    }

    #[test]
    fn validate_accepts_good_config() {
        assert!(test_app_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_same_venue_on_both_legs() {
        let mut config = test_app_config();
        config.selling_venue = config.buying_venue.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_amount() {
        let mut config = test_app_config();
        config.order_amount = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_profitability_bounds() {
        let mut config = test_app_config();
        config.min_profitability = dec!(0.02);
        assert!(config.validate().is_err());
    }

    #[test]
    fn arbitrage_config_parses_pairs() {
        let config = test_app_config().arbitrage_config().unwrap();
        assert_eq!(config.buying_leg.pair.base, "WETH");
        assert_eq!(config.selling_leg.pair.quote, "USDT");
        assert_eq!(config.tick_interval, Duration::from_millis(1000));
    }

    #[test]
    fn validate_rejects_malformed_pair() {
        let mut config = test_app_config();
        config.buying_pair = "WETHUSDC".to_string();
        assert!(config.validate().is_err());
    }
}
