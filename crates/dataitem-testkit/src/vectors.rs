//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the owner encoding, tag encoding, signing message,
//! signature and identifier so that every implementation of the item format
//! produces identical bytes. Signatures are RFC 6979 deterministic ECDSA over
//! the Ethereum personal-message hash of the signing message.

use serde::Serialize;

use dataitem_core::{
    create_data, verify_item, DataItem, DataItemOptions, EthereumSigner, Signer, Tag,
};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Raw secp256k1 private key.
    #[serde(serialize_with = "as_hex")]
    pub private_key: [u8; 32],
    /// Optional target.
    pub target: Option<[u8; 32]>,
    /// Optional anchor.
    pub anchor: Option<[u8; 32]>,
    /// Tags as `(name, value)` pairs.
    pub tags: &'static [(&'static str, &'static str)],
    /// Payload bytes.
    pub data: &'static [u8],
    /// Expected uncompressed owner key (hex).
    pub expected_owner: &'static str,
    /// Expected encoded tag section (hex).
    pub expected_tag_bytes: &'static str,
    /// Expected signing message (hex).
    pub expected_signature_data: &'static str,
    /// Expected `r || s || v` signature (hex).
    pub expected_signature: &'static str,
    /// Expected identifier (base64url).
    pub expected_id: &'static str,
}

fn as_hex<S: serde::Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// First Hardhat/Anvil development key.
const DEV_KEY: [u8; 32] = [
    0xac, 0x09, 0x74, 0xbe, 0xc3, 0x9a, 0x17, 0xe3, 0x6b, 0xa4, 0xa6, 0xb4, 0xd2, 0x38, 0xff,
    0x94, 0x4b, 0xac, 0xb4, 0x78, 0xcb, 0xed, 0x5e, 0xfc, 0xae, 0x78, 0x4d, 0x7b, 0xf4, 0xf2,
    0xff, 0x80,
];

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "hello with App-Name tag",
            private_key: DEV_KEY,
            target: None,
            anchor: None,
            tags: &[("App-Name", "Test")],
            data: b"hello",
            expected_owner: "048318535b54105d4a7aae60c08fc45f9687181b4fdfc625bd1a753fa7397fed75\
                             3547f11ca8696646f2f3acb08e31016afac23e630c5d11f59f61fef57b0d2aa5",
            expected_tag_bytes: "02104170702d4e616d65085465737400",
            expected_signature_data: "5ee39f5ab4546609ec1fbf818e224d30eeb179a5682b2bcb\
                                      cb398199ffabf890e3e0e220408c8928fc1cd2519ce03fc5",
            expected_signature: "0c69456742d7324a5ce6fe07ed9ad766872d6679e75879981b636b7ec9e24c04\
                                 79e66be0bd27243b9bf9a493de78300338d4a5d25010f721882e835d90432845\
                                 1b",
            expected_id: "M3tQiGO4IoSwHHB3uP5u6dZ6EQodhMFqDo-vHyK_67A",
        },
        GoldenVector {
            name: "empty item",
            private_key: [0x42; 32],
            target: None,
            anchor: None,
            tags: &[],
            data: b"",
            expected_owner: "0424653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c\
                             119fc5009a032aa9fe47f5e149bb8442f71f884ccb516590686d8ff6ab91c613",
            expected_tag_bytes: "",
            expected_signature_data: "41cf0aac667367b5a33eee8346e3e5c67b27be2e5cbe5b88\
                                      4c5ded9301685c2ed0ad647867e7cc57255eff5cc042eaa2",
            expected_signature: "d3db6b1c7926b7c6778aceb53e70c4273c4b9bcb67ff4b2030815c34b794b0e1\
                                 0d5d5b85c9c5b5ff4abfdd36caba430b6e216c82493e012c165d37048a280ff2\
                                 1c",
            expected_id: "SJ9Y2XndWvscdSKfAf_9wyglyda34JvA83ThoXvNMvg",
        },
        GoldenVector {
            name: "target and anchor",
            private_key: [0x42; 32],
            target: Some([0xaa; 32]),
            anchor: Some([0xbb; 32]),
            tags: &[("Content-Type", "text/plain")],
            data: b"world",
            expected_owner: "0424653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c\
                             119fc5009a032aa9fe47f5e149bb8442f71f884ccb516590686d8ff6ab91c613",
            expected_tag_bytes: "0218436f6e74656e742d5479706514746578742f706c61696e00",
            expected_signature_data: "2eecd5503d33d7201feed365cab376f9c408b88b5ee798e3\
                                      421aed07d5097a7a2e606e0fc9eaa0afa97389331b6ae50b",
            expected_signature: "b0fa9defcf48dc037f4cb1cfa01327e8b0aa6b090f0091c4da0848b28f4e4e58\
                                 60d3f7ffe52141e1ae1a329bbef40b23a1632e76f45312e68e71e9683966d919\
                                 1c",
            expected_id: "WsMmF-2ZWAf7KG1JeVbk8IRnmEcVPRpeADWnpPk8L64",
        },
    ]
}

fn signer_for(vector: &GoldenVector) -> EthereumSigner {
    EthereumSigner::from_bytes(&vector.private_key).expect("vector keys are valid")
}

fn options_for(vector: &GoldenVector) -> DataItemOptions {
    DataItemOptions {
        target: vector.target.map(|t| t.to_vec()),
        anchor: vector.anchor.map(|a| a.to_vec()),
        tags: vector.tags.iter().map(|(n, v)| Tag::new(*n, *v)).collect(),
    }
}

/// Assemble the unsigned item described by a golden vector.
pub fn unsigned_item_from_vector(vector: &GoldenVector) -> DataItem {
    create_data(vector.data, &signer_for(vector), &options_for(vector))
        .expect("vector inputs are well-formed")
}

/// Assemble and sign the item described by a golden vector.
pub async fn generate_item_from_vector(vector: &GoldenVector) -> DataItem {
    let signer = signer_for(vector);
    let mut item = unsigned_item_from_vector(vector);
    item.sign(&signer).await.expect("local signing succeeds");
    item
}

/// Check every golden vector against this implementation.
///
/// Returns `(name, matches, identifier)` per vector.
pub async fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();
    for v in all_vectors() {
        let item = generate_item_from_vector(&v).await;
        let id = item.id().map(|id| id.to_string()).unwrap_or_default();

        let matches = hex::encode(item.raw_owner()) == v.expected_owner
            && hex::encode(item.raw_tags()) == v.expected_tag_bytes
            && hex::encode(item.signature_data()) == v.expected_signature_data
            && hex::encode(item.raw_signature()) == v.expected_signature
            && id == v.expected_id
            && signer_for(&v).public_key() == item.raw_owner()
            && verify_item(&item).is_ok();

        results.push((v.name.to_string(), matches, id));
    }
    results
}

/// Render all vectors as a pretty-printed JSON vector file.
pub fn vectors_json() -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct VectorFile {
        version: &'static str,
        description: &'static str,
        vectors: Vec<GoldenVector>,
    }

    serde_json::to_string_pretty(&VectorFile {
        version: "1",
        description: "Golden vectors for signed data items (signature type 3).",
        vectors: all_vectors(),
    })
}
