//! # Data Item
//!
//! The unified API for producing signed data items: self-describing binary
//! records bundled for storage on a decentralized ledger network.
//!
//! ## Overview
//!
//! - **Assembly**: payload, tags and optional target/anchor laid out in one buffer
//! - **Signing**: an async [`Signer`](core::Signer) signs a deep hash of the content
//! - **Identity**: the item's identifier is the SHA-256 of its signature
//! - **Inspection**: any buffer can be re-read field by field without a parse step
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dataitem::{Issuer, IssuerConfig};
//! use dataitem::core::{DataItemOptions, EthereumSigner, Tag};
//!
//! async fn example() {
//!     let signer = EthereumSigner::random();
//!     let issuer = Issuer::new(signer, IssuerConfig::default());
//!
//!     let options = DataItemOptions {
//!         tags: vec![Tag::new("Content-Type", "text/plain")],
//!         ..Default::default()
//!     };
//!     let item = issuer.issue(b"hello", &options).await.unwrap();
//!
//!     println!("{} ({} bytes)", item.id().unwrap(), item.len());
//!     // item.raw() is what gets uploaded.
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `dataitem::core` - Envelope, codecs, signers (the `dataitem-core` crate)

pub mod error;
pub mod issuer;

pub use dataitem_core as core;

pub use error::{IssuerError, Result};
pub use issuer::{Issuer, IssuerConfig};

pub use dataitem_core::{
    create_data, identifier, verify_item, DataItem, DataItemBuilder, DataItemOptions,
    EthereumSigner, ItemId, SignatureType, Signer, Tag,
};
