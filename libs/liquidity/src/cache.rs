//! Session-scoped pool snapshot cache
//!
//! Maps a token to the pool list its discovery batch produced. Populated
//! lazily on the first request per token, appended only after the full
//! batch completes, and never evicted or refreshed: reserves are snapshots,
//! and callers needing fresh state start a new cache instance.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;
use web3::types::Address;

use crate::discovery::PoolDiscovery;
use crate::types::DexPool;

pub struct PoolCache {
    pools: DashMap<Address, Vec<DexPool>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PoolCache {
    pub fn new() -> Self {
        Self {
            pools: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached snapshot for `token`, running discovery first on a
    /// miss. Concurrent misses on the same token race benignly: the first
    /// full batch to land wins and later duplicates are discarded.
    pub async fn get_or_discover(
        &self,
        discovery: &PoolDiscovery,
        token: Address,
    ) -> Vec<DexPool> {
        if let Some(pools) = self.pools.get(&token) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(token = ?token, pools = pools.len(), "pool cache hit");
            return pools.value().clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let discovered = discovery.find_pools_for_token(token, None).await;
        self.pools.entry(token).or_insert(discovered).value().clone()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for PoolCache {
    fn default() -> Self {
        Self::new()
    }
}
