//! Core value types exchanged between discovery, pricing, and route search

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use web3::types::Address;

use crate::error::ChainError;

/// Venue a pool was discovered on.
///
/// A closed set: pricing dispatches on [`DexProtocol::kind`] with an
/// exhaustive match, so adding a venue is a compile-checked change rather
/// than a string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DexProtocol {
    UniswapV2,
    SushiswapV2,
    UniswapV3,
}

/// Pricing family behind a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    ConstantProduct,
    ConcentratedLiquidity,
}

impl DexProtocol {
    pub fn kind(&self) -> PoolKind {
        match self {
            DexProtocol::UniswapV2 | DexProtocol::SushiswapV2 => PoolKind::ConstantProduct,
            DexProtocol::UniswapV3 => PoolKind::ConcentratedLiquidity,
        }
    }
}

/// A priced liquidity venue, snapshotted at discovery time.
///
/// Constructed fresh from live chain reads on every discovery call and
/// never mutated afterwards: reserves are a read-time snapshot, not a
/// subscription. For concentrated-liquidity pools `reserve0`/`reserve1`
/// hold the derived effective reserves, not on-chain balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexPool {
    /// Pool contract address
    pub address: Address,
    /// Venue the pool belongs to
    pub protocol: DexProtocol,
    /// The pool's own canonical token ordering, read from the contract
    pub token0: Address,
    pub token1: Address,
    /// Balances in base units (effective reserves for V3-family pools)
    pub reserve0: u128,
    pub reserve1: u128,
    /// Swap fee in pips (3000 = 0.3%)
    pub fee_pips: u32,
    /// Secondary ranking magnitude: reserve product for constant-product
    /// pools, raw on-chain liquidity for concentrated-liquidity pools
    pub liquidity: u128,
}

impl DexPool {
    /// A pool with an empty side cannot execute a swap and is excluded from
    /// route candidacy.
    pub fn is_usable(&self) -> bool {
        self.reserve0 > 0 && self.reserve1 > 0
    }

    /// Swap fee as a fraction in [0, 1).
    pub fn fee_fraction(&self) -> Decimal {
        Decimal::from(self.fee_pips) / Decimal::from(swaproute_amm::PIPS)
    }

    /// Orient the reserves for a trade entering with `token_in`, matching
    /// against the pool's own token ordering rather than any assumed query
    /// order. `None` if the token is not in the pool.
    pub fn reserves_for(&self, token_in: Address) -> Option<(u128, u128)> {
        if token_in == self.token0 {
            Some((self.reserve0, self.reserve1))
        } else if token_in == self.token1 {
            Some((self.reserve1, self.reserve0))
        } else {
            None
        }
    }

    /// Whether this pool trades exactly the `a`/`b` pair, in either
    /// direction.
    pub fn links(&self, a: Address, b: Address) -> bool {
        (self.token0 == a && self.token1 == b) || (self.token0 == b && self.token1 == a)
    }
}

/// A priced execution plan: `pools[i]` executes the `path[i] -> path[i+1]`
/// hop.
///
/// `amount_out` is the deterministic composition of per-hop pricing applied
/// in path order, and `price_impact` the per-hop impacts summed additively
/// (not compounded). A pure value object for the caller to execute or
/// discard; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRoute {
    pub path: Vec<Address>,
    pub pools: Vec<DexPool>,
    pub amount_in: u128,
    pub amount_out: u128,
    pub price_impact: Decimal,
    pub gas_estimate: u64,
}

impl SwapRoute {
    pub fn hops(&self) -> usize {
        self.pools.len()
    }
}

/// Outcome of a single factory/pool lookup. `Absent` and `Failed` are both
/// "no candidate" for routing but stay distinguishable for logs and
/// metrics.
#[derive(Debug)]
pub enum PoolLookup {
    Found(DexPool),
    Absent,
    Failed(ChainError),
}
