//! Discovery and routing configuration

use serde::{Deserialize, Serialize};
use web3::types::Address;

use crate::venues::{self, Venue};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// JSON-RPC endpoint for read-only contract calls
    pub rpc_url: String,

    /// Per-call timeout in milliseconds
    pub rpc_timeout_ms: u64,

    /// Upper bound on in-flight registry/pool reads within one discovery
    /// batch; keeps the fan-out inside upstream rate limits
    pub max_concurrent_lookups: usize,

    /// Venues whose factories are queried
    pub venues: Vec<Venue>,

    /// Quote assets paired against a queried token; also the intermediate
    /// set considered for two-hop routes
    pub quote_tokens: Vec<Address>,

    /// Fee tiers probed on concentrated-liquidity factories, in pips
    pub v3_fee_tiers: Vec<u32>,

    /// Fixed gas estimate for a single-hop route
    pub gas_per_direct_swap: u64,

    /// Fixed gas estimate for a two-hop route
    pub gas_per_two_hop_swap: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://eth.llamarpc.com".to_string(),
            rpc_timeout_ms: 10_000,
            max_concurrent_lookups: 8,
            venues: venues::default_venues(),
            quote_tokens: venues::default_quote_tokens(),
            v3_fee_tiers: venues::V3_FEE_TIERS.to_vec(),
            gas_per_direct_swap: 150_000,
            gas_per_two_hop_swap: 250_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_json() {
        let config = DiscoveryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DiscoveryConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.venues, config.venues);
        assert_eq!(parsed.quote_tokens, config.quote_tokens);
        assert_eq!(parsed.v3_fee_tiers, config.v3_fee_tiers);
    }
}
