//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use dataitem::{Issuer, IssuerConfig};
use dataitem_core::{
    CoreError, DataItem, DataItemBuilder, EthereumSigner, Signer, SignatureType, Tag,
};

/// A test fixture with a deterministic signer.
pub struct TestFixture {
    pub signer: EthereumSigner,
}

impl TestFixture {
    /// Create a new test fixture with a random signer.
    pub fn new() -> Self {
        Self {
            signer: EthereumSigner::random(),
        }
    }

    /// Create with a deterministic signer from a private key seed.
    ///
    /// Panics if `seed` is not a valid secp256k1 scalar (all zeros, or not
    /// below the curve order).
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            signer: EthereumSigner::from_bytes(&seed).expect("seed must be a valid private key"),
        }
    }

    /// Get the signer's public key.
    pub fn public_key(&self) -> &[u8] {
        self.signer.public_key()
    }

    /// An issuer around a clone of this fixture's signer.
    pub fn issuer(&self, config: IssuerConfig) -> Issuer<EthereumSigner> {
        Issuer::new(self.signer.clone(), config)
    }

    /// Assemble an unsigned item with the given tags.
    pub fn make_unsigned(&self, data: &[u8], tags: &[(&str, &str)]) -> DataItem {
        DataItemBuilder::new(data.to_vec())
            .tags(tags.iter().map(|(n, v)| Tag::new(*n, *v)))
            .build(&self.signer)
            .expect("fixture inputs are well-formed")
    }

    /// Assemble and sign an item with the given tags.
    pub async fn make_signed(&self, data: &[u8], tags: &[(&str, &str)]) -> DataItem {
        let mut item = self.make_unsigned(data, tags);
        item.sign(&self.signer).await.expect("local signing succeeds");
        item
    }

    /// Assemble and sign an item that references `target`.
    pub async fn make_reply(&self, target: &DataItem, data: &[u8]) -> DataItem {
        let target_id = target.id().expect("target must be signed");
        DataItemBuilder::new(data.to_vec())
            .target(target_id)
            .sign(&self.signer)
            .await
            .expect("fixture inputs are well-formed")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = 1;
            seed[24..].copy_from_slice(&(i as u64).to_be_bytes());
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// A signer that fails every request, for exercising error paths.
pub struct UnreachableSigner {
    public_key: Vec<u8>,
}

impl UnreachableSigner {
    /// Impersonate the owner of `signer` without holding its key.
    pub fn impersonating(signer: &impl Signer) -> Self {
        Self {
            public_key: signer.public_key().to_vec(),
        }
    }
}

#[async_trait::async_trait]
impl Signer for UnreachableSigner {
    fn signature_type(&self) -> SignatureType {
        SignatureType::Ethereum
    }

    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    async fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, CoreError> {
        Err(CoreError::Signing("remote signer unreachable".into()))
    }
}
