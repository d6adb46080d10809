//! # Swaproute AMM Library - Pool Pricing Mathematics
//!
//! ## Purpose
//!
//! Pricing engine for automated-market-maker pools: converts raw pool state
//! into output amounts and price impact for a given trade direction and size.
//! Implements the V2 constant-product formula with integer floor semantics at
//! the token-unit boundary, and the effective-reserves projection used to
//! price V3-style concentrated-liquidity pools.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool reserves and liquidity magnitudes from the
//!   discovery layer, trade parameters from the route search
//! - **Output Destinations**: Route search candidate scoring
//! - **Precision**: `Decimal` arithmetic internally, floored to `u128` base
//!   units at the API boundary (no floating point)
//!
//! ## Concentrated-liquidity fidelity
//!
//! V3-family pools are priced through a single effective-reserves projection
//! derived from the pool's raw liquidity and its current sqrt price. This is
//! a deliberate, labeled approximation: it ignores tick ranges entirely, and
//! its price-impact figure is a coarse liquidity-ratio stand-in rather than
//! tick-accurate math. See [`v3_math`] for the exact formulas.

pub mod v2_math;
pub mod v3_math;

pub use v2_math::V2Math;
pub use v3_math::V3Math;

/// Common types for AMM calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Fee denominator: fees are expressed in pips (hundredths of a basis
/// point), the unit V3 factories use on-chain. 3000 pips = 0.30%.
pub const PIPS: u32 = 1_000_000;

pub(crate) fn to_decimal(value: u128) -> anyhow::Result<Decimal> {
    use rust_decimal::prelude::FromPrimitive;
    Decimal::from_u128(value)
        .ok_or_else(|| anyhow::anyhow!("value {} exceeds supported precision", value))
}
