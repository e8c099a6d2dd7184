//! # Data Item Testkit
//!
//! Testing utilities for data items.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs whose outputs must stay stable across implementations
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust,no_run
//! use dataitem_testkit::vectors::{all_vectors, generate_item_from_vector};
//!
//! # async fn run() {
//! for vector in all_vectors() {
//!     let item = generate_item_from_vector(&vector).await;
//!     println!("{}: {}", vector.name, item.id().unwrap());
//! }
//! # }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use dataitem_testkit::generators::{ItemParams, unsigned_item_from_params};
//!
//! proptest! {
//!     #[test]
//!     fn assembly_is_deterministic(params: ItemParams) {
//!         let a = unsigned_item_from_params(&params);
//!         let b = unsigned_item_from_params(&params);
//!         prop_assert_eq!(a.raw(), b.raw());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use dataitem_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let item = fixture.make_unsigned(b"initial data", &[("App-Name", "Test")]);
//! assert!(!item.is_signed());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{unsigned_item_from_params, ItemParams};
pub use vectors::{all_vectors, generate_item_from_vector, verify_all_vectors, GoldenVector};
