//! Strong type definitions for data items.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Length of an encoded identifier (base64url of 32 bytes, unpadded).
pub const ITEM_ID_ENCODED_LEN: usize = 43;

/// A 32-byte data item identifier, computed as SHA-256(signature).
///
/// This is the canonical address of a signed item. Re-signing an item yields
/// a new signature and therefore a new identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub [u8; 32]);

impl ItemId {
    /// Derive the identifier from raw signature bytes.
    pub fn from_signature(signature: &[u8]) -> Self {
        Self(Sha256::digest(signature).into())
    }

    /// Create a new ItemId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encode as unpadded base64url.
    pub fn to_b64url(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Compute the textual identifier for a signature.
pub fn identifier(signature: &[u8]) -> String {
    ItemId::from_signature(signature).to_b64url()
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.to_b64url())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_b64url())
    }
}

impl FromStr for ItemId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ITEM_ID_ENCODED_LEN {
            return Err(CoreError::InvalidFieldLength {
                field: "item id",
                expected: ITEM_ID_ENCODED_LEN,
                actual: s.len(),
            });
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| CoreError::MalformedItem(format!("invalid item id: {e}")))?;
        Self::try_from(bytes.as_slice())
    }
}

impl AsRef<[u8]> for ItemId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for ItemId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for ItemId {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into().map_err(|_| CoreError::InvalidFieldLength {
            field: "item id",
            expected: 32,
            actual: slice.len(),
        })?;
        Ok(Self(arr))
    }
}
