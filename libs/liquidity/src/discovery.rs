//! Pool discovery across AMM venues
//!
//! Resolves candidate pools for a token against every configured venue (and
//! fee tier, where the venue has them) through read-only factory and pool
//! calls. Lookups within a batch are independent network round trips and
//! run as a bounded concurrent fan-out. Individual lookups fail soft: a
//! venue that errors is logged and omitted, so route quality degrades
//! gracefully with missing venues instead of blocking on them. No retries;
//! a failed sub-lookup is recorded as absence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use web3::types::Address;

use swaproute_amm::V3Math;

use crate::abi;
use crate::chain::EthCall;
use crate::config::DiscoveryConfig;
use crate::error::ChainError;
use crate::types::{DexPool, PoolKind, PoolLookup};
use crate::venues::{Venue, V2_FEE_PIPS};

/// Counters describing how a discovery session's lookups resolved.
#[derive(Debug, Default)]
struct DiscoveryMetrics {
    lookups: AtomicU64,
    found: AtomicU64,
    absent: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of the discovery counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryMetricsSnapshot {
    pub lookups: u64,
    pub found: u64,
    pub absent: u64,
    pub failed: u64,
}

impl DiscoveryMetrics {
    fn snapshot(&self) -> DiscoveryMetricsSnapshot {
        DiscoveryMetricsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            found: self.found.load(Ordering::Relaxed),
            absent: self.absent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// One factory/pool resolution unit within a discovery batch.
enum Lookup {
    V2 {
        venue: Venue,
        token_a: Address,
        token_b: Address,
    },
    V3 {
        venue: Venue,
        token_a: Address,
        token_b: Address,
        fee_pips: u32,
    },
}

pub struct PoolDiscovery {
    client: Arc<dyn EthCall>,
    config: DiscoveryConfig,
    metrics: DiscoveryMetrics,
}

impl PoolDiscovery {
    pub fn new(client: Arc<dyn EthCall>, config: DiscoveryConfig) -> Self {
        Self {
            client,
            config,
            metrics: DiscoveryMetrics::default(),
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn metrics(&self) -> DiscoveryMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Find all pools pairing `token` with the given quote assets (the
    /// configured reference set when `None`), across every venue and fee
    /// tier. Failed lookups are omitted, never fatal.
    pub async fn find_pools_for_token(
        &self,
        token: Address,
        quote_tokens: Option<&[Address]>,
    ) -> Vec<DexPool> {
        let quotes: Vec<Address> = quote_tokens
            .map(<[Address]>::to_vec)
            .unwrap_or_else(|| self.config.quote_tokens.clone())
            .into_iter()
            .filter(|quote| *quote != token)
            .collect();
        self.resolve_batch(token, &quotes).await
    }

    /// Two-token specialization used by route search; runs the same
    /// per-venue resolution as [`Self::find_pools_for_token`].
    pub async fn find_direct_pools(&self, token_a: Address, token_b: Address) -> Vec<DexPool> {
        if token_a == token_b {
            return Vec::new();
        }
        self.resolve_batch(token_a, &[token_b]).await
    }

    async fn resolve_batch(&self, token: Address, quotes: &[Address]) -> Vec<DexPool> {
        let mut lookups = Vec::new();
        for venue in &self.config.venues {
            for &quote in quotes {
                match venue.protocol.kind() {
                    PoolKind::ConstantProduct => lookups.push(Lookup::V2 {
                        venue: *venue,
                        token_a: token,
                        token_b: quote,
                    }),
                    PoolKind::ConcentratedLiquidity => {
                        for &fee_pips in &self.config.v3_fee_tiers {
                            lookups.push(Lookup::V3 {
                                venue: *venue,
                                token_a: token,
                                token_b: quote,
                                fee_pips,
                            });
                        }
                    }
                }
            }
        }

        let concurrency = self.config.max_concurrent_lookups.max(1);
        let outcomes: Vec<PoolLookup> = stream::iter(lookups)
            .map(|lookup| self.run_lookup(lookup))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut pools = Vec::new();
        for outcome in outcomes {
            self.metrics.lookups.fetch_add(1, Ordering::Relaxed);
            match outcome {
                PoolLookup::Found(pool) => {
                    self.metrics.found.fetch_add(1, Ordering::Relaxed);
                    pools.push(pool);
                }
                PoolLookup::Absent => {
                    self.metrics.absent.fetch_add(1, Ordering::Relaxed);
                }
                PoolLookup::Failed(_) => {
                    self.metrics.failed.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        info!(token = ?token, pools = pools.len(), "discovery batch complete");
        pools
    }

    async fn run_lookup(&self, lookup: Lookup) -> PoolLookup {
        match lookup {
            Lookup::V2 {
                venue,
                token_a,
                token_b,
            } => self.lookup_v2_pool(venue, token_a, token_b).await,
            Lookup::V3 {
                venue,
                token_a,
                token_b,
                fee_pips,
            } => self.lookup_v3_pool(venue, token_a, token_b, fee_pips).await,
        }
    }

    async fn lookup_v2_pool(&self, venue: Venue, token_a: Address, token_b: Address) -> PoolLookup {
        // V2 factories register pairs under lower-address-first ordering
        let (lower, higher) = if token_a <= token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let calldata = abi::call_pair(abi::GET_PAIR, lower, higher);
        let raw = match self.client.eth_call(venue.factory, calldata).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(venue = ?venue.protocol, %error, "factory lookup failed");
                return PoolLookup::Failed(error);
            }
        };
        let pair = match abi::decode_address(&raw) {
            Ok(pair) => pair,
            Err(error) => {
                warn!(venue = ?venue.protocol, %error, "factory returned malformed pair");
                return PoolLookup::Failed(error);
            }
        };
        if pair.is_zero() {
            debug!(venue = ?venue.protocol, "no pair registered");
            return PoolLookup::Absent;
        }

        self.read_v2_pool(venue, pair).await
    }

    async fn read_v2_pool(&self, venue: Venue, pair: Address) -> PoolLookup {
        let reads = tokio::try_join!(
            self.client.eth_call(pair, abi::call(abi::GET_RESERVES)),
            self.client.eth_call(pair, abi::call(abi::TOKEN0)),
            self.client.eth_call(pair, abi::call(abi::TOKEN1)),
        );
        let (reserves_raw, token0_raw, token1_raw) = match reads {
            Ok(raw) => raw,
            Err(error) => {
                warn!(venue = ?venue.protocol, pool = ?pair, %error, "pair state read failed");
                return PoolLookup::Failed(error);
            }
        };

        let decoded = (|| -> Result<DexPool, ChainError> {
            let reserve0 = abi::decode_u128(&reserves_raw, 0)?;
            let reserve1 = abi::decode_u128(&reserves_raw, 1)?;
            Ok(DexPool {
                address: pair,
                protocol: venue.protocol,
                token0: abi::decode_address(&token0_raw)?,
                token1: abi::decode_address(&token1_raw)?,
                reserve0,
                reserve1,
                fee_pips: V2_FEE_PIPS,
                // Ranking signal only; saturation is acceptable
                liquidity: reserve0.saturating_mul(reserve1),
            })
        })();

        match decoded {
            Ok(pool) if pool.is_usable() => PoolLookup::Found(pool),
            Ok(pool) => {
                debug!(pool = ?pool.address, "skipping pair with an empty reserve");
                PoolLookup::Absent
            }
            Err(error) => {
                warn!(venue = ?venue.protocol, pool = ?pair, %error, "pair state malformed");
                PoolLookup::Failed(error)
            }
        }
    }

    async fn lookup_v3_pool(
        &self,
        venue: Venue,
        token_a: Address,
        token_b: Address,
        fee_pips: u32,
    ) -> PoolLookup {
        let calldata = abi::call_pool_query(abi::GET_POOL, token_a, token_b, fee_pips);
        let raw = match self.client.eth_call(venue.factory, calldata).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(venue = ?venue.protocol, fee_pips, %error, "factory lookup failed");
                return PoolLookup::Failed(error);
            }
        };
        let pool = match abi::decode_address(&raw) {
            Ok(pool) => pool,
            Err(error) => {
                warn!(venue = ?venue.protocol, fee_pips, %error, "factory returned malformed pool");
                return PoolLookup::Failed(error);
            }
        };
        if pool.is_zero() {
            debug!(venue = ?venue.protocol, fee_pips, "no pool at this fee tier");
            return PoolLookup::Absent;
        }

        self.read_v3_pool(venue, pool, fee_pips).await
    }

    async fn read_v3_pool(&self, venue: Venue, address: Address, fee_pips: u32) -> PoolLookup {
        let reads = tokio::try_join!(
            self.client.eth_call(address, abi::call(abi::LIQUIDITY)),
            self.client.eth_call(address, abi::call(abi::SLOT0)),
            self.client.eth_call(address, abi::call(abi::TOKEN0)),
            self.client.eth_call(address, abi::call(abi::TOKEN1)),
        );
        let (liquidity_raw, slot0_raw, token0_raw, token1_raw) = match reads {
            Ok(raw) => raw,
            Err(error) => {
                warn!(venue = ?venue.protocol, pool = ?address, %error, "pool state read failed");
                return PoolLookup::Failed(error);
            }
        };

        let decoded = (|| -> Result<(u128, u128, Address, Address), ChainError> {
            Ok((
                abi::decode_u128(&liquidity_raw, 0)?,
                // First slot0 word is sqrtPriceX96
                abi::decode_u128(&slot0_raw, 0)?,
                abi::decode_address(&token0_raw)?,
                abi::decode_address(&token1_raw)?,
            ))
        })();
        let (liquidity, sqrt_price_x96, token0, token1) = match decoded {
            Ok(state) => state,
            Err(error) => {
                warn!(venue = ?venue.protocol, pool = ?address, %error, "pool state malformed");
                return PoolLookup::Failed(error);
            }
        };

        if liquidity == 0 {
            debug!(pool = ?address, "pool has no active liquidity");
            return PoolLookup::Absent;
        }

        let (reserve0, reserve1) = match V3Math::effective_reserves(liquidity, sqrt_price_x96) {
            Ok(reserves) => reserves,
            Err(error) => {
                warn!(pool = ?address, %error, "could not derive effective reserves");
                return PoolLookup::Failed(ChainError::Malformed(error.to_string()));
            }
        };

        let pool = DexPool {
            address,
            protocol: venue.protocol,
            token0,
            token1,
            reserve0,
            reserve1,
            fee_pips,
            liquidity,
        };
        if pool.is_usable() {
            PoolLookup::Found(pool)
        } else {
            debug!(pool = ?address, "derived reserves are empty");
            PoolLookup::Absent
        }
    }
}
