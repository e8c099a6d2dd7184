//! # Data Item Core
//!
//! Pure primitives for signed data items: the binary envelope, its tag
//! codec, the signing message, and the identifier.
//!
//! This crate contains no storage and no networking. The only suspension
//! point is [`Signer::sign`], so key custody can live anywhere.
//!
//! ## Key Types
//!
//! - [`DataItem`] - One owned buffer with lazily computed field views
//! - [`ItemId`] - SHA-256 of the signature, shown as unpadded base64url
//! - [`Signer`] - The key-holding capability an item is signed with
//! - [`EthereumSigner`] - secp256k1 signer using the Ethereum message convention
//!
//! ## Wire format
//!
//! Integers are little-endian, tags are Avro-encoded, and the signing message
//! is a SHA-384 deep hash. See [`item`], [`tags`] and [`deep_hash`].

pub mod codec;
pub mod crypto;
pub mod deep_hash;
pub mod error;
pub mod item;
pub mod signer;
pub mod tags;
pub mod types;
pub mod validation;

pub use crypto::{verify_ethereum_signature, EthereumSigner};
pub use deep_hash::{deep_hash, DeepHashChunk};
pub use error::{CoreError, ValidationError};
pub use item::{create_data, DataItem, DataItemBuilder, DataItemOptions};
pub use signer::{SignatureType, Signer};
pub use tags::{
    deserialize_tags, serialize_tags, validate_tags, Tag, MAX_TAGS, MAX_TAG_NAME_BYTES,
    MAX_TAG_VALUE_BYTES,
};
pub use types::{identifier, ItemId};
pub use validation::{validate_item_structure, verify_item};
