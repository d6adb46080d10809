//! Constant-product (V2-family) swap math
//!
//! Preserves full precision using Decimal internally and floors to integer
//! base units at the API boundary, matching on-chain pair arithmetic.

use anyhow::{bail, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{to_decimal, PIPS};

/// V2 AMM math functions over raw reserve pairs
pub struct V2Math;

impl V2Math {
    /// Calculate the output amount for a swap against a constant-product pool.
    ///
    /// Applies the fee to the input, then the x*y=k formula:
    /// `out = floor(a_eff * reserve_out / (reserve_in + a_eff))` with
    /// `a_eff = amount_in * (1 - fee)`.
    ///
    /// # Arguments
    /// * `amount_in` - Input amount in the input token's base units
    /// * `reserve_in` - Pool reserve on the input side
    /// * `reserve_out` - Pool reserve on the output side
    /// * `fee_pips` - Swap fee in pips (3000 = 0.3%)
    ///
    /// A zero `amount_in` yields zero output; zero reserves are an error.
    /// The result is strictly less than `reserve_out`.
    pub fn get_amount_out(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_pips: u32,
    ) -> Result<u128> {
        if reserve_in == 0 || reserve_out == 0 {
            bail!("pool has an empty reserve");
        }
        if fee_pips >= PIPS {
            bail!("fee {} pips is not below 100%", fee_pips);
        }
        if amount_in == 0 {
            return Ok(0);
        }

        let amount_in = to_decimal(amount_in)?;
        let reserve_in = to_decimal(reserve_in)?;
        let reserve_out = to_decimal(reserve_out)?;

        let fee_multiplier = Decimal::from(PIPS - fee_pips) / Decimal::from(PIPS);
        let amount_in_after_fee = amount_in * fee_multiplier;

        let numerator = amount_in_after_fee
            .checked_mul(reserve_out)
            .ok_or_else(|| anyhow::anyhow!("overflow in output calculation"))?;
        let denominator = reserve_in + amount_in_after_fee;

        let amount_out = (numerator / denominator).floor();
        amount_out
            .to_u128()
            .ok_or_else(|| anyhow::anyhow!("output amount out of range"))
    }

    /// Calculate the price impact of a swap as a fraction of the pre-trade
    /// marginal price.
    ///
    /// Pre-trade price is `reserve_out / reserve_in`; post-trade price uses
    /// the updated reserves `(reserve_in + amount_in, reserve_out - amount_out)`.
    /// Returns `|after - before| / before`, so a zero-size trade has zero
    /// impact.
    pub fn price_impact(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        amount_out: u128,
    ) -> Result<Decimal> {
        if reserve_in == 0 || reserve_out == 0 {
            bail!("pool has an empty reserve");
        }
        if amount_out >= reserve_out {
            bail!("output {} would drain the pool", amount_out);
        }
        if amount_in == 0 {
            return Ok(Decimal::ZERO);
        }

        let amount_in = to_decimal(amount_in)?;
        let amount_out = to_decimal(amount_out)?;
        let reserve_in = to_decimal(reserve_in)?;
        let reserve_out = to_decimal(reserve_out)?;

        let price_before = reserve_out / reserve_in;
        let price_after = (reserve_out - amount_out) / (reserve_in + amount_in);

        Ok((price_after - price_before).abs() / price_before)
    }
}
