//! Venue and trading-pair types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a trading venue (e.g. "binance", "uniswap_polygon").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueId(pub String);

impl VenueId {
    /// Create a venue id from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Venue name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VenueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Venue execution model, used to select the fee computation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    /// Automated market maker; fees are a fixed gas-token amount.
    #[strum(serialize = "amm", serialize = "AMM")]
    Amm,
    /// Central limit order book; fees are quoted by the connector.
    #[strum(serialize = "clob", serialize = "CLOB")]
    Clob,
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    #[strum(serialize = "BUY", serialize = "buy")]
    Buy,
    /// Sell order.
    #[strum(serialize = "SELL", serialize = "sell")]
    Sell,
}

impl Side {
    /// The opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// True for [`Side::Buy`].
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Resting limit order.
    #[strum(serialize = "LIMIT", serialize = "limit")]
    Limit,
    /// Immediate market order.
    #[strum(serialize = "MARKET", serialize = "market")]
    Market,
}

/// A base/quote trading pair, e.g. `ETH-USDT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    /// Base asset symbol.
    pub base: String,
    /// Quote asset symbol.
    pub quote: String,
}

impl TradingPair {
    /// Create a pair from base and quote symbols.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for TradingPair {
    type Err = String;

    /// Parse a `BASE-QUOTE` pair string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((base, quote)) if !base.is_empty() && !quote.is_empty() => {
                Ok(Self::new(base.to_uppercase(), quote.to_uppercase()))
            }
            _ => Err(format!("invalid trading pair '{s}', expected BASE-QUOTE")),
        }
    }
}

/// One leg of an arbitrage: a venue plus the pair traded on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Venue the leg trades on.
    pub venue: VenueId,
    /// Trading pair on that venue.
    pub pair: TradingPair,
}

impl Leg {
    /// Create a leg.
    pub fn new(venue: impl Into<VenueId>, pair: TradingPair) -> Self {
        Self {
            venue: venue.into(),
            pair,
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.venue, self.pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trading_pair_parsing() {
        let pair: TradingPair = "ETH-USDT".parse().unwrap();
        assert_eq!(pair.base, "ETH");
        assert_eq!(pair.quote, "USDT");
        assert_eq!(pair.to_string(), "ETH-USDT");

        let lower: TradingPair = "weth-usdc".parse().unwrap();
        assert_eq!(lower.base, "WETH");

        assert!("ETHUSDT".parse::<TradingPair>().is_err());
        assert!("-USDT".parse::<TradingPair>().is_err());
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
        assert!(Side::Buy.is_buy());
        assert!(!Side::Sell.is_buy());
    }

    #[test]
    fn venue_kind_from_string() {
        assert_eq!(VenueKind::from_str("amm").unwrap(), VenueKind::Amm);
        assert_eq!(VenueKind::from_str("CLOB").unwrap(), VenueKind::Clob);
    }
}
