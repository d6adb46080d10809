//! Ethereum mainnet venue registry and reference assets
//!
//! Each venue carries the factory its pools resolve through and the router
//! an executing caller would submit the planned swap to. Everything here is
//! a default: callers override the set through [`crate::DiscoveryConfig`].

use serde::{Deserialize, Serialize};
use web3::types::Address;

use crate::types::DexProtocol;

/// A deployed AMM instance discovery can resolve pools against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub protocol: DexProtocol,
    pub factory: Address,
    pub router: Address,
}

/// Swap fee charged by all V2-family pairs, in pips.
pub const V2_FEE_PIPS: u32 = 3000;

/// Fee tiers a V3 factory may host a pool at, in pips.
pub const V3_FEE_TIERS: [u32; 3] = [500, 3000, 10_000];

pub fn uniswap_v2() -> Venue {
    Venue {
        protocol: DexProtocol::UniswapV2,
        factory: mainnet("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
        router: mainnet("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D"),
    }
}

pub fn sushiswap() -> Venue {
    Venue {
        protocol: DexProtocol::SushiswapV2,
        factory: mainnet("0xC0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac"),
        router: mainnet("0xd9e1cE17f2641f24aE83637ab66a2cca9C378B9F"),
    }
}

pub fn uniswap_v3() -> Venue {
    Venue {
        protocol: DexProtocol::UniswapV3,
        factory: mainnet("0x1F98431c8aD98523631AE4a59f267346ea31F984"),
        router: mainnet("0xE592427A0AEce92De3Edee1F18E0157C05861564"),
    }
}

/// All venues discovery queries by default.
pub fn default_venues() -> Vec<Venue> {
    vec![uniswap_v2(), sushiswap(), uniswap_v3()]
}

/// High-liquidity reference assets used as the default quote tokens and as
/// the intermediate set for two-hop routes: WETH, USDC, USDT, DAI.
pub fn default_quote_tokens() -> Vec<Address> {
    vec![
        mainnet("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), // WETH
        mainnet("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), // USDC
        mainnet("0xdAC17F958D2ee523a2206206994597C13D831ec7"), // USDT
        mainnet("0x6B175474E89094C44Da98b954EedeAC495271d0F"), // DAI
    ]
}

fn mainnet(text: &str) -> Address {
    crate::address::parse_address(text).expect("mainnet address constant")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PoolKind;

    #[test]
    fn default_venues_cover_both_families() {
        let venues = default_venues();
        assert!(venues
            .iter()
            .any(|v| v.protocol.kind() == PoolKind::ConstantProduct));
        assert!(venues
            .iter()
            .any(|v| v.protocol.kind() == PoolKind::ConcentratedLiquidity));
    }

    #[test]
    fn reference_assets_are_distinct() {
        let quotes = default_quote_tokens();
        for (i, a) in quotes.iter().enumerate() {
            for b in quotes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
