//! Signer capability: the only interface the core needs from key custody.
//!
//! Implementations may sign locally or round-trip to a remote signer or
//! hardware wallet, so signing is async.

use async_trait::async_trait;
use std::fmt;

use crate::error::CoreError;

/// Signature schemes with a known wire layout.
///
/// The discriminant is written into the first two bytes of every item and
/// determines the signature and owner field lengths when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SignatureType {
    /// secp256k1 over an Ethereum personal-message digest.
    Ethereum = 3,
}

impl SignatureType {
    /// Convert to u16 for serialization.
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Try to parse from u16.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            3 => Some(Self::Ethereum),
            _ => None,
        }
    }

    /// Byte length of a signature of this type.
    pub const fn signature_length(self) -> usize {
        match self {
            Self::Ethereum => 65,
        }
    }

    /// Byte length of an owner (public key) of this type.
    pub const fn owner_length(self) -> usize {
        match self {
            Self::Ethereum => 65,
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u16())
    }
}

impl TryFrom<u16> for SignatureType {
    type Error = CoreError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_u16(value).ok_or(CoreError::UnsupportedSignatureType(value))
    }
}

/// A key-holding capability able to sign item messages.
///
/// # Contract
///
/// - `public_key()` returns exactly `owner_length()` bytes and has no side effects.
/// - `sign()` returns exactly `signature_length()` bytes, or
///   [`CoreError::Signing`] if the backend fails.
#[async_trait]
pub trait Signer: Send + Sync {
    /// The scheme this signer produces.
    fn signature_type(&self) -> SignatureType;

    /// The raw public key written into the owner field.
    fn public_key(&self) -> &[u8];

    /// Sign an arbitrary message.
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CoreError>;

    fn owner_length(&self) -> usize {
        self.signature_type().owner_length()
    }

    fn signature_length(&self) -> usize {
        self.signature_type().signature_length()
    }
}
