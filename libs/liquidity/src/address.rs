//! Address parsing and EIP-55 checksum normalization

use web3::signing::keccak256;
use web3::types::Address;

use crate::error::LiquidityError;

/// Parse a hex token or pool identifier. Strict: a malformed identifier is
/// a contract violation and surfaces as a hard error rather than being
/// silently skipped.
pub fn parse_address(text: &str) -> Result<Address, LiquidityError> {
    let stripped = text.strip_prefix("0x").unwrap_or(text);
    if stripped.len() != 40 {
        return Err(LiquidityError::InvalidAddress(text.to_string()));
    }
    let bytes =
        hex::decode(stripped).map_err(|_| LiquidityError::InvalidAddress(text.to_string()))?;
    Ok(Address::from_slice(&bytes))
}

/// Render an address in its EIP-55 checksummed form.
pub fn to_checksum(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
