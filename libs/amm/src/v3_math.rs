//! Concentrated-liquidity (V3-family) pricing approximation
//!
//! True V3 reserves are tick-range dependent. This module projects a pool's
//! raw liquidity magnitude and current sqrt price onto a single pair of
//! effective reserves (`r0 = L / sqrt(price)`, `r1 = L * sqrt(price)`), which
//! the constant-product formula is then applied to. Price impact for this
//! family is a coarse liquidity-ratio stand-in, not tick-accurate math.
//! Ignoring tick boundaries overstates depth for trades that would cross
//! them.

use anyhow::{bail, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::to_decimal;

/// Multiplier applied to the raw liquidity ratio when approximating
/// concentrated-liquidity price impact.
const IMPACT_SCALE: Decimal = dec!(2);

/// Number of fractional bits in the Q64.96 sqrt-price encoding
const X96_BITS: u32 = 96;

/// Low bits folded away so the sqrt price fits Decimal's 96-bit mantissa;
/// costs at most 2^-48 relative precision.
const FOLD_BITS: u32 = 48;

/// V3 AMM math over liquidity magnitude and sqrt price
pub struct V3Math;

impl V3Math {
    /// Decode a Q64.96 sqrt price into a plain `Decimal` square-root price.
    ///
    /// Rejects values too small to survive the mantissa fold; such a pool
    /// is priced below any representable range and cannot be quoted.
    pub fn sqrt_price_from_x96(sqrt_price_x96: u128) -> Result<Decimal> {
        let hi = sqrt_price_x96 >> FOLD_BITS;
        if hi == 0 {
            bail!("sqrt price {} below representable range", sqrt_price_x96);
        }
        let hi = to_decimal(hi)?;
        Ok(hi / Decimal::from(1u64 << (X96_BITS - FOLD_BITS)))
    }

    /// Project liquidity and current sqrt price onto effective reserves:
    /// `reserve0 ≈ L / sqrt(price)`, `reserve1 ≈ L * sqrt(price)`.
    ///
    /// Both results are floored to base units. Zero liquidity or a zero
    /// price is an error; the discovery layer treats such pools as absent.
    pub fn effective_reserves(liquidity: u128, sqrt_price_x96: u128) -> Result<(u128, u128)> {
        if liquidity == 0 {
            bail!("pool has no active liquidity");
        }

        let l = to_decimal(liquidity)?;
        let sqrt_price = Self::sqrt_price_from_x96(sqrt_price_x96)?;

        let reserve0 = l
            .checked_div(sqrt_price)
            .ok_or_else(|| anyhow::anyhow!("overflow deriving reserve0"))?
            .floor();
        let reserve1 = l
            .checked_mul(sqrt_price)
            .ok_or_else(|| anyhow::anyhow!("overflow deriving reserve1"))?
            .floor();

        let reserve0 = reserve0
            .to_u128()
            .ok_or_else(|| anyhow::anyhow!("reserve0 out of range"))?;
        let reserve1 = reserve1
            .to_u128()
            .ok_or_else(|| anyhow::anyhow!("reserve1 out of range"))?;

        Ok((reserve0, reserve1))
    }

    /// Approximate price impact as the trade's share of the pool's combined
    /// effective reserves, scaled by a fixed constant.
    ///
    /// Intentionally coarse: it answers "how large is this trade relative to
    /// available depth", not "where does the tick walk end".
    pub fn price_impact(amount_in: u128, reserve0: u128, reserve1: u128) -> Result<Decimal> {
        let total = reserve0
            .checked_add(reserve1)
            .ok_or_else(|| anyhow::anyhow!("combined reserves out of range"))?;
        if total == 0 {
            bail!("pool has no effective reserves");
        }
        if amount_in == 0 {
            return Ok(Decimal::ZERO);
        }

        let amount_in = to_decimal(amount_in)?;
        let total = to_decimal(total)?;

        Ok(amount_in / total * IMPACT_SCALE)
    }
}
