//! Proptest generators for property-based testing.

use proptest::prelude::*;

use dataitem_core::{
    create_data, DataItem, DataItemOptions, EthereumSigner, ItemId, Tag, MAX_TAGS,
};

/// Generate a random signer.
///
/// Draws seeds from `1..` in the top byte so every seed is a valid scalar.
pub fn signer() -> impl Strategy<Value = EthereumSigner> {
    (1u8..=0x7f, any::<[u8; 31]>()).prop_map(|(head, tail)| {
        let mut seed = [0u8; 32];
        seed[0] = head;
        seed[1..].copy_from_slice(&tail);
        EthereumSigner::from_bytes(&seed).expect("seed below curve order")
    })
}

/// Generate a random ItemId.
pub fn item_id() -> impl Strategy<Value = ItemId> {
    any::<[u8; 32]>().prop_map(ItemId::from_bytes)
}

/// Generate a tag that passes validation.
pub fn tag() -> impl Strategy<Value = Tag> {
    ("[A-Za-z][A-Za-z0-9-]{0,23}", "[ -~]{1,48}").prop_map(|(name, value)| Tag::new(name, value))
}

/// Generate up to `max_len` valid tags.
pub fn tags(max_len: usize) -> impl Strategy<Value = Vec<Tag>> {
    prop::collection::vec(tag(), 0..=max_len.min(MAX_TAGS))
}

/// Generate an optional 32-byte target or anchor.
pub fn optional_field() -> impl Strategy<Value = Option<[u8; 32]>> {
    any::<Option<[u8; 32]>>()
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for generating an item.
#[derive(Debug, Clone)]
pub struct ItemParams {
    pub signer: EthereumSigner,
    pub target: Option<[u8; 32]>,
    pub anchor: Option<[u8; 32]>,
    pub tags: Vec<Tag>,
    pub data: Vec<u8>,
}

impl ItemParams {
    /// Assembly options for these parameters.
    pub fn options(&self) -> DataItemOptions {
        DataItemOptions {
            target: self.target.map(|t| t.to_vec()),
            anchor: self.anchor.map(|a| a.to_vec()),
            tags: self.tags.clone(),
        }
    }
}

impl Arbitrary for ItemParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            signer(),
            optional_field(), // target
            optional_field(), // anchor
            tags(8),
            payload(1000),
        )
            .prop_map(|(signer, target, anchor, tags, data)| ItemParams {
                signer,
                target,
                anchor,
                tags,
                data,
            })
            .boxed()
    }
}

/// Assemble an unsigned item from parameters.
pub fn unsigned_item_from_params(params: &ItemParams) -> DataItem {
    create_data(&params.data, &params.signer, &params.options())
        .expect("generated parameters are well-formed")
}

/// Assemble and sign an item from parameters.
///
/// Drives the async signer on a private current-thread runtime, so this must
/// not be called from inside another runtime.
pub fn signed_item_from_params(params: &ItemParams) -> DataItem {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime");
    let mut item = unsigned_item_from_params(params);
    runtime
        .block_on(item.sign(&params.signer))
        .expect("local signing succeeds");
    item
}
