//! Arbitrage validity checks.
//!
//! Two legs may only be arbitraged against each other when their base and
//! quote assets are economically interchangeable: identical symbols, a
//! wrapped/native pair, or both stablecoin-like.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::market::types::TradingPair;

/// Wrapped/native equivalence classes treated as the same asset.
const INTERCHANGEABLE_TOKENS: &[[&str; 2]] = &[
    ["WETH", "ETH"],
    ["WBTC", "BTC"],
    ["WBNB", "BNB"],
    ["WMATIC", "MATIC"],
    ["WAVAX", "AVAX"],
    ["WONE", "ONE"],
];

static WRAPPED_TO_NATIVE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    INTERCHANGEABLE_TOKENS
        .iter()
        .map(|[wrapped, native]| (*wrapped, *native))
        .collect()
});

/// Check whether two asset symbols are economically interchangeable.
pub fn are_tokens_interchangeable(first: &str, second: &str) -> bool {
    let same_token = first == second;
    let wrapped_pair = INTERCHANGEABLE_TOKENS
        .iter()
        .any(|class| class.contains(&first) && class.contains(&second));
    // for now, all stablecoins are considered interchangeable
    let stablecoins = first.contains("USD") && second.contains("USD");
    same_token || wrapped_pair || stablecoins
}

/// Check that both the base and quote assets of the two pairs are
/// interchangeable, i.e. the two legs cover the same net position.
pub fn is_arbitrage_valid(pair_a: &TradingPair, pair_b: &TradingPair) -> bool {
    are_tokens_interchangeable(&pair_a.base, &pair_b.base)
        && are_tokens_interchangeable(&pair_a.quote, &pair_b.quote)
}

/// Resolve a symbol to its native form, unwrapping known wrapped tokens
/// (WETH → ETH). Used to pick the common reference asset for fee costing.
pub fn reference_asset(symbol: &str) -> &str {
    WRAPPED_TO_NATIVE.get(symbol).copied().unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(s: &str) -> TradingPair {
        s.parse().unwrap()
    }

    #[test]
    fn identical_tokens_are_interchangeable() {
        assert!(are_tokens_interchangeable("ETH", "ETH"));
        assert!(!are_tokens_interchangeable("ETH", "BTC"));
    }

    #[test]
    fn wrapped_native_pairs_are_interchangeable() {
        assert!(are_tokens_interchangeable("WETH", "ETH"));
        assert!(are_tokens_interchangeable("BTC", "WBTC"));
        assert!(are_tokens_interchangeable("WONE", "ONE"));
        assert!(!are_tokens_interchangeable("WETH", "BTC"));
    }

    #[test]
    fn stablecoins_are_interchangeable() {
        assert!(are_tokens_interchangeable("USDT", "USDC"));
        assert!(are_tokens_interchangeable("BUSD", "USDT"));
        assert!(!are_tokens_interchangeable("USDT", "DAI"));
    }

    #[test]
    fn valid_arbitrage_pairs() {
        assert!(is_arbitrage_valid(&pair("ETH-USDT"), &pair("WETH-USDC")));
        assert!(!is_arbitrage_valid(&pair("ETH-USDT"), &pair("BTC-USDC")));
        // stablecoin base + wrapped quote
        assert!(is_arbitrage_valid(&pair("USDT-BTC"), &pair("USDC-WBTC")));
    }

    #[test]
    fn reference_asset_unwraps_wrapped_tokens() {
        assert_eq!(reference_asset("WETH"), "ETH");
        assert_eq!(reference_asset("WMATIC"), "MATIC");
        assert_eq!(reference_asset("ETH"), "ETH");
        assert_eq!(reference_asset("USDT"), "USDT");
    }
}
