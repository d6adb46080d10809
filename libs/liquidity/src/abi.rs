//! Calldata encoding and return-word decoding for the handful of read-only
//! factory and pool functions discovery touches. Hand-rolled selectors keep
//! the wire layer dependency-free and explicit about what is read.

use web3::types::Address;

use crate::error::ChainError;

/// `getPair(address,address)` on V2-family factories
pub const GET_PAIR: [u8; 4] = [0xe6, 0xa4, 0x39, 0x05];
/// `getPool(address,address,uint24)` on the V3 factory
pub const GET_POOL: [u8; 4] = [0x16, 0x98, 0xee, 0x82];
/// `getReserves()` on a V2 pair
pub const GET_RESERVES: [u8; 4] = [0x09, 0x02, 0xf1, 0xac];
/// `token0()`
pub const TOKEN0: [u8; 4] = [0x0d, 0xfe, 0x16, 0x81];
/// `token1()`
pub const TOKEN1: [u8; 4] = [0xd2, 0x12, 0x20, 0xa7];
/// `liquidity()` on a V3 pool
pub const LIQUIDITY: [u8; 4] = [0x1a, 0x68, 0x65, 0x02];
/// `slot0()` on a V3 pool
pub const SLOT0: [u8; 4] = [0x38, 0x50, 0xc7, 0xbd];

/// Calldata for a no-argument call.
pub fn call(selector: [u8; 4]) -> Vec<u8> {
    selector.to_vec()
}

/// Calldata for a two-address call (`getPair`).
pub fn call_pair(selector: [u8; 4], a: Address, b: Address) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 64);
    data.extend_from_slice(&selector);
    data.extend_from_slice(&address_word(a));
    data.extend_from_slice(&address_word(b));
    data
}

/// Calldata for an address-pair-plus-fee call (`getPool`).
pub fn call_pool_query(selector: [u8; 4], a: Address, b: Address, fee_pips: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 96);
    data.extend_from_slice(&selector);
    data.extend_from_slice(&address_word(a));
    data.extend_from_slice(&address_word(b));
    data.extend_from_slice(&u32_word(fee_pips));
    data
}

/// Decode the first return word as an address.
pub fn decode_address(raw: &[u8]) -> Result<Address, ChainError> {
    if raw.len() < 32 {
        return Err(ChainError::Malformed(format!(
            "expected a 32-byte word, got {} bytes",
            raw.len()
        )));
    }
    Ok(Address::from_slice(&raw[12..32]))
}

/// Decode the `word`-th 32-byte return word as an unsigned 128-bit value.
/// Larger values (a `slot0` price outside the modeled range, for instance)
/// are rejected as malformed and the pool is omitted.
pub fn decode_u128(raw: &[u8], word: usize) -> Result<u128, ChainError> {
    let start = word * 32;
    let end = start + 32;
    if raw.len() < end {
        return Err(ChainError::Malformed(format!(
            "expected at least {} bytes, got {}",
            end,
            raw.len()
        )));
    }
    let slice = &raw[start..end];
    if slice[..16].iter().any(|byte| *byte != 0) {
        return Err(ChainError::Malformed("value exceeds 128 bits".to_string()));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&slice[16..]);
    Ok(u128::from_be_bytes(buf))
}

/// Encode an address as a single return word. Test transports use this to
/// fabricate factory and pool responses.
pub fn encode_address_word(address: Address) -> Vec<u8> {
    address_word(address).to_vec()
}

/// Encode a sequence of 128-bit values as return words.
pub fn encode_words(values: &[u128]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(values.len() * 32);
    for value in values {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&value.to_be_bytes());
        raw.extend_from_slice(&word);
    }
    raw
}

fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

fn u32_word(value: u32) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[28..].copy_from_slice(&value.to_be_bytes());
    word
}
