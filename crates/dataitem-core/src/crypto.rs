//! Cryptographic primitives for the Ethereum signature type.
//!
//! Wraps secp256k1 recoverable ECDSA and Keccak-256 with strong types.
//! Messages are signed with the Ethereum personal-message convention:
//! `keccak256("\x19Ethereum Signed Message:\n" || len || message)`.

use async_trait::async_trait;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use std::fmt;

use crate::error::CoreError;
use crate::signer::{SignatureType, Signer};

/// Length of an uncompressed SEC1 public key.
pub const PUBLIC_KEY_LEN: usize = 65;

/// Length of a recoverable signature (`r || s || v`).
pub const SIGNATURE_LEN: usize = 65;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Hash a message the way Ethereum wallets do before signing it.
pub fn hash_personal_message(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Derive the `0x`-prefixed Ethereum address of an uncompressed public key.
pub fn ethereum_address(public_key: &[u8]) -> Result<String, CoreError> {
    if public_key.len() != PUBLIC_KEY_LEN || public_key[0] != 0x04 {
        return Err(CoreError::InvalidKey(
            "expected a 65-byte uncompressed public key".into(),
        ));
    }
    Ok(address_of(public_key))
}

fn address_of(uncompressed: &[u8]) -> String {
    let hash = Keccak256::digest(&uncompressed[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Verify a personal-message signature against an uncompressed public key.
///
/// Accepts recovery bytes in both the `{27, 28}` and `{0, 1}` forms.
pub fn verify_ethereum_signature(
    owner: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<(), CoreError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CoreError::InvalidSignature);
    }

    let v = signature[64];
    let recovery_byte = if v >= 27 { v - 27 } else { v };
    let recovery_id = RecoveryId::from_byte(recovery_byte).ok_or(CoreError::InvalidSignature)?;
    let sig = Signature::from_slice(&signature[..64]).map_err(|_| CoreError::InvalidSignature)?;

    let prehash = hash_personal_message(message);
    let recovered = VerifyingKey::recover_from_prehash(&prehash, &sig, recovery_id)
        .map_err(|_| CoreError::InvalidSignature)?;

    if recovered.to_encoded_point(false).as_bytes() == owner {
        Ok(())
    } else {
        Err(CoreError::InvalidSignature)
    }
}

/// A signer backed by a raw secp256k1 private key.
#[derive(Clone)]
pub struct EthereumSigner {
    signing_key: SigningKey,
    public_key: [u8; PUBLIC_KEY_LEN],
}

impl EthereumSigner {
    /// Generate a new random signer.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::from_signing_key(SigningKey::random(&mut rng))
    }

    /// Create from 32 raw private key bytes.
    pub fn from_bytes(key: &[u8]) -> Result<Self, CoreError> {
        if key.len() != 32 {
            return Err(CoreError::InvalidKey(format!(
                "private key must be 32 bytes, got {}",
                key.len()
            )));
        }
        let signing_key = SigningKey::from_slice(key)
            .map_err(|_| CoreError::InvalidKey("private key is not a valid scalar".into()))?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Parse from a hex private key, with or without a `0x` prefix.
    pub fn from_hex(key: &str) -> Result<Self, CoreError> {
        let trimmed = key.strip_prefix("0x").unwrap_or(key);
        let bytes = hex::decode(trimmed).map_err(|e| CoreError::InvalidKey(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(signing_key.verifying_key().to_encoded_point(false).as_bytes());
        Self {
            signing_key,
            public_key,
        }
    }

    /// The signer's Ethereum address.
    pub fn address(&self) -> String {
        address_of(&self.public_key)
    }

    /// Sign synchronously. The async [`Signer::sign`] delegates here.
    pub fn sign_message(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN], CoreError> {
        let prehash = hash_personal_message(message);
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&prehash)
            .map_err(|e| CoreError::Signing(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&sig.to_bytes());
        out[64] = 27 + recovery_id.to_byte();
        Ok(out)
    }
}

impl fmt::Debug for EthereumSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthereumSigner({})", self.address())
    }
}

#[async_trait]
impl Signer for EthereumSigner {
    fn signature_type(&self) -> SignatureType {
        SignatureType::Ethereum
    }

    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CoreError> {
        self.sign_message(message).map(|sig| sig.to_vec())
    }
}
