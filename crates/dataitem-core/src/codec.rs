//! Fixed-width integer fields.
//!
//! Every integer in the item header is little-endian: the 2-byte signature
//! type and the two 8-byte tag fields.

use crate::error::CoreError;

/// Encode a `u16` as 2 little-endian bytes.
pub const fn short_to_bytes(n: u16) -> [u8; 2] {
    n.to_le_bytes()
}

/// Decode 2 little-endian bytes.
pub const fn bytes_to_short(b: &[u8; 2]) -> u16 {
    u16::from_le_bytes(*b)
}

/// Encode a `u64` as 8 little-endian bytes.
pub const fn long_to_bytes(n: u64) -> [u8; 8] {
    n.to_le_bytes()
}

/// Decode 8 little-endian bytes.
pub const fn bytes_to_long(b: &[u8; 8]) -> u64 {
    u64::from_le_bytes(*b)
}

/// Read a `u16` at `offset`, failing if the buffer is too short.
pub fn read_short(buf: &[u8], offset: usize) -> Result<u16, CoreError> {
    let bytes: [u8; 2] = read_array(buf, offset)?;
    Ok(bytes_to_short(&bytes))
}

/// Read a `u64` at `offset`, failing if the buffer is too short.
pub fn read_long(buf: &[u8], offset: usize) -> Result<u64, CoreError> {
    let bytes: [u8; 8] = read_array(buf, offset)?;
    Ok(bytes_to_long(&bytes))
}

fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], CoreError> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            CoreError::MalformedItem(format!(
                "need {N} bytes at offset {offset}, buffer is {} bytes",
                buf.len()
            ))
        })
}
