//! Swaproute Liquidity
//!
//! Discovers and prices liquidity pools for a token across AMM venues and
//! computes the best execution path (direct or two-hop) under a
//! maximum-price-impact budget. This crate is a library boundary only: it
//! exposes the discovery entry points, the route search, and the
//! `DexPool`/`SwapRoute` value types, and consumes nothing from its
//! environment beyond read-only contract calls.
//!
//! Features:
//! - Async pool discovery across V2-family and V3 factories with a bounded
//!   concurrent fan-out
//! - Per-token session cache with snapshot semantics (no invalidation)
//! - Best-output route selection with additive impact accounting
//! - Soft-failing lookups: an unreachable venue degrades results, never
//!   aborts them

pub mod abi;
pub mod address;
pub mod cache;
pub mod chain;
pub mod config;
pub mod discovery;
pub mod error;
pub mod router;
pub mod types;
pub mod venues;

pub use cache::PoolCache;
pub use chain::{EthCall, Web3EthClient};
pub use config::DiscoveryConfig;
pub use discovery::{DiscoveryMetricsSnapshot, PoolDiscovery};
pub use error::{ChainError, LiquidityError};
pub use router::RouteFinder;
pub use types::{DexPool, DexProtocol, PoolKind, PoolLookup, SwapRoute};
pub use venues::Venue;
