//! Error types for chain access and the library surface
//!
//! Read failures never escape discovery: they are downgraded to omission at
//! the lookup level. Only programming-contract violations (malformed token
//! identifiers) surface as hard errors to the caller.

use thiserror::Error;

/// Failure of a single read-only contract call.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("rpc call failed: {0}")]
    Rpc(String),

    #[error("call timed out after {0} ms")]
    Timeout(u64),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Hard errors of the library surface.
#[derive(Debug, Error)]
pub enum LiquidityError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Chain(#[from] ChainError),
}
