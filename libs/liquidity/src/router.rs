//! Best-route search over discovered pools
//!
//! Evaluates direct pools first, then two-hop paths through the configured
//! reference assets, and returns the highest-output route within the
//! caller's price-impact budget. Pure computation once pool lists are in
//! hand; the only suspension points are the discovery reads.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;
use web3::types::Address;

use swaproute_amm::{V2Math, V3Math};

use crate::cache::PoolCache;
use crate::discovery::PoolDiscovery;
use crate::types::{DexPool, PoolKind, SwapRoute};

pub struct RouteFinder {
    discovery: Arc<PoolDiscovery>,
    cache: Arc<PoolCache>,
}

impl RouteFinder {
    /// The cache is supplied by the caller and owns the session's snapshot
    /// semantics; dropping it is the only way to force fresh discovery.
    pub fn new(discovery: Arc<PoolDiscovery>, cache: Arc<PoolCache>) -> Self {
        Self { discovery, cache }
    }

    /// Find the best route for swapping `amount_in` of `token_in` into
    /// `token_out`, keeping accumulated price impact within
    /// `max_price_impact` (a fraction, e.g. 0.05 for 5%).
    ///
    /// Direct candidates are evaluated before two-hop candidates and only a
    /// strictly greater output displaces the incumbent, so direct routes
    /// win ties. `None` means no candidate satisfied the budget -- an
    /// expected outcome, not an error.
    ///
    /// Paths are bounded at two hops through a single intermediate; any
    /// `max_hops` above 2 behaves as 2. A bounded-depth graph search is the
    /// known extension here.
    pub async fn find_best_swap_route(
        &self,
        token_in: Address,
        token_out: Address,
        amount_in: u128,
        max_hops: usize,
        max_price_impact: Decimal,
    ) -> Option<SwapRoute> {
        if token_in == token_out || max_hops == 0 {
            return None;
        }

        let mut best: Option<SwapRoute> = None;

        let direct_pools = self.discovery.find_direct_pools(token_in, token_out).await;
        for pool in &direct_pools {
            let Some((amount_out, impact)) = quote_pool(pool, token_in, amount_in) else {
                continue;
            };
            if impact > max_price_impact {
                debug!(pool = ?pool.address, %impact, "direct candidate over impact budget");
                continue;
            }
            if best
                .as_ref()
                .map_or(true, |route| amount_out > route.amount_out)
            {
                best = Some(SwapRoute {
                    path: vec![token_in, token_out],
                    pools: vec![pool.clone()],
                    amount_in,
                    amount_out,
                    price_impact: impact,
                    gas_estimate: self.discovery.config().gas_per_direct_swap,
                });
            }
        }

        if max_hops > 1 {
            if let Some(two_hop) = self
                .find_two_hop_route(token_in, token_out, amount_in, max_price_impact)
                .await
            {
                if best
                    .as_ref()
                    .map_or(true, |route| two_hop.amount_out > route.amount_out)
                {
                    best = Some(two_hop);
                }
            }
        }

        best
    }

    async fn find_two_hop_route(
        &self,
        token_in: Address,
        token_out: Address,
        amount_in: u128,
        max_price_impact: Decimal,
    ) -> Option<SwapRoute> {
        let intermediates: Vec<Address> = self
            .discovery
            .config()
            .quote_tokens
            .iter()
            .copied()
            .filter(|token| *token != token_in && *token != token_out)
            .collect();
        if intermediates.is_empty() {
            return None;
        }

        // One cached discovery per endpoint covers every intermediate
        // pairing: the endpoint batches already span the reference set.
        let in_pools = self.cache.get_or_discover(&self.discovery, token_in).await;
        let out_pools = self.cache.get_or_discover(&self.discovery, token_out).await;

        let mut best: Option<SwapRoute> = None;
        for intermediate in intermediates {
            let hop1: Vec<&DexPool> = in_pools
                .iter()
                .filter(|pool| pool.links(token_in, intermediate))
                .collect();
            if hop1.is_empty() {
                continue;
            }
            let hop2: Vec<&DexPool> = out_pools
                .iter()
                .filter(|pool| pool.links(intermediate, token_out))
                .collect();
            if hop2.is_empty() {
                continue;
            }

            for first in &hop1 {
                let Some((mid_amount, first_impact)) = quote_pool(first, token_in, amount_in)
                else {
                    continue;
                };
                // The first hop alone blowing the budget rules out every
                // pairing it could anchor
                if first_impact > max_price_impact {
                    continue;
                }

                for second in &hop2 {
                    let Some((amount_out, second_impact)) =
                        quote_pool(second, intermediate, mid_amount)
                    else {
                        continue;
                    };
                    let total_impact = first_impact + second_impact;
                    if total_impact > max_price_impact {
                        continue;
                    }
                    if best
                        .as_ref()
                        .map_or(true, |route| amount_out > route.amount_out)
                    {
                        best = Some(SwapRoute {
                            path: vec![token_in, intermediate, token_out],
                            pools: vec![(*first).clone(), (*second).clone()],
                            amount_in,
                            amount_out,
                            price_impact: total_impact,
                            gas_estimate: self.discovery.config().gas_per_two_hop_swap,
                        });
                    }
                }
            }
        }

        best
    }
}

/// Score a single pool for a trade: output amount and price impact, or
/// `None` when the pool cannot serve it (degenerate state, token not in the
/// pool, or zero computed output).
fn quote_pool(pool: &DexPool, token_in: Address, amount_in: u128) -> Option<(u128, Decimal)> {
    if !pool.is_usable() {
        return None;
    }
    let (reserve_in, reserve_out) = pool.reserves_for(token_in)?;

    let amount_out = match V2Math::get_amount_out(amount_in, reserve_in, reserve_out, pool.fee_pips)
    {
        Ok(amount) => amount,
        Err(error) => {
            debug!(pool = ?pool.address, %error, "output calculation failed");
            return None;
        }
    };
    if amount_out == 0 {
        return None;
    }

    let impact = match pool.protocol.kind() {
        PoolKind::ConstantProduct => {
            V2Math::price_impact(amount_in, reserve_in, reserve_out, amount_out)
        }
        PoolKind::ConcentratedLiquidity => {
            V3Math::price_impact(amount_in, pool.reserve0, pool.reserve1)
        }
    };
    match impact {
        Ok(impact) => Some((amount_out, impact)),
        Err(error) => {
            debug!(pool = ?pool.address, %error, "impact calculation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DexProtocol;

    fn pool(reserve0: u128, reserve1: u128) -> DexPool {
        DexPool {
            address: Address::from_low_u64_be(100),
            protocol: DexProtocol::UniswapV2,
            token0: Address::from_low_u64_be(1),
            token1: Address::from_low_u64_be(2),
            reserve0,
            reserve1,
            fee_pips: 3000,
            liquidity: reserve0.saturating_mul(reserve1),
        }
    }

    #[test]
    fn quote_matches_pair_arithmetic() {
        let (amount_out, impact) =
            quote_pool(&pool(1_000_000, 2_000_000), Address::from_low_u64_be(1), 1000).unwrap();
        assert_eq!(amount_out, 1992);
        assert!(impact > Decimal::ZERO);
    }

    #[test]
    fn degenerate_pool_is_not_quotable() {
        assert!(quote_pool(&pool(0, 2_000_000), Address::from_low_u64_be(1), 1000).is_none());
        assert!(quote_pool(&pool(1_000_000, 0), Address::from_low_u64_be(1), 1000).is_none());
    }

    #[test]
    fn foreign_token_is_not_quotable() {
        assert!(
            quote_pool(&pool(1_000_000, 2_000_000), Address::from_low_u64_be(9), 1000).is_none()
        );
    }

    #[test]
    fn dust_trade_with_zero_output_is_rejected() {
        // 1 unit in against a heavily skewed pool floors to zero out
        assert!(quote_pool(&pool(1_000_000_000, 10), Address::from_low_u64_be(1), 1).is_none());
    }
}
