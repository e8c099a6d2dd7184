//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the item format must produce identical:
//! - tag bytes
//! - unsigned item bytes
//! - signing message (deep hash)
//! - signature (RFC 6979 deterministic ECDSA)
//! - signed item bytes
//! - identifier
//!
//! The reference scenario pins the signing message, signature and identifier
//! to fixed values; the other vectors are checked for determinism and
//! round-tripping.

use dataitem::core::{deserialize_tags, serialize_tags, CoreError};
use dataitem::{
    create_data, identifier, verify_item, DataItem, DataItemBuilder, DataItemOptions,
    EthereumSigner, ItemId, Signer, Tag,
};
use serde::{Deserialize, Serialize};

/// First Hardhat/Anvil development key.
const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Deep hash of the reference item (`"hello"`, `App-Name=Test`, [`TEST_KEY`]).
const REFERENCE_SIGNATURE_DATA: &str = "5ee39f5ab4546609ec1fbf818e224d30eeb179a5682b2bcb\
                                        cb398199ffabf890e3e0e220408c8928fc1cd2519ce03fc5";

/// `r || s || v` over the personal-message hash of [`REFERENCE_SIGNATURE_DATA`].
const REFERENCE_SIGNATURE: &str = "0c69456742d7324a5ce6fe07ed9ad766872d6679e75879981b636b7ec9e24c04\
                                   79e66be0bd27243b9bf9a493de78300338d4a5d25010f721882e835d90432845\
                                   1b";

const REFERENCE_ID: &str = "M3tQiGO4IoSwHHB3uP5u6dZ6EQodhMFqDo-vHyK_67A";

fn is_b64url_unpadded(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A single golden test vector.
#[derive(Debug, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub private_key: String,
    pub owner: String,
    pub target: Option<String>,
    pub anchor: Option<String>,
    pub tags: Vec<Tag>,
    pub data: String,

    // Derived outputs (hex except id)
    pub tag_bytes: String,
    pub unsigned_item: String,
    pub signature_data: String,
    pub signature: String,
    pub signed_item: String,
    pub id: String,
}

async fn generate_vector(
    name: &str,
    description: &str,
    target: Option<[u8; 32]>,
    anchor: Option<[u8; 32]>,
    tags: Vec<Tag>,
    data: &[u8],
) -> GoldenVector {
    let signer = EthereumSigner::from_hex(TEST_KEY).unwrap();
    let options = DataItemOptions {
        target: target.map(|t| t.to_vec()),
        anchor: anchor.map(|a| a.to_vec()),
        tags: tags.clone(),
    };

    let mut item = create_data(data, &signer, &options).unwrap();
    let unsigned_item = hex::encode(item.raw());
    let signature_data = hex::encode(item.signature_data());
    let id = item.sign(&signer).await.unwrap();

    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        private_key: TEST_KEY.to_string(),
        owner: hex::encode(signer.public_key()),
        target: target.map(hex::encode),
        anchor: anchor.map(hex::encode),
        tags: tags.clone(),
        data: hex::encode(data),
        tag_bytes: hex::encode(serialize_tags(&tags)),
        unsigned_item,
        signature_data,
        signature: hex::encode(item.raw_signature()),
        signed_item: hex::encode(item.raw()),
        id: id.to_string(),
    }
}

async fn generate_all_vectors() -> Vec<GoldenVector> {
    vec![
        // Vector 1: nothing optional
        generate_vector("empty", "No target, anchor, tags or data", None, None, vec![], b"").await,
        // Vector 2: the reference scenario
        generate_vector(
            "hello_app_name",
            "Payload 'hello' with a single App-Name tag",
            None,
            None,
            vec![Tag::new("App-Name", "Test")],
            b"hello",
        )
        .await,
        // Vector 3: target only
        generate_vector(
            "target_only",
            "Target present, anchor absent",
            Some([0xaa; 32]),
            None,
            vec![Tag::new("Content-Type", "text/plain")],
            b"targeted",
        )
        .await,
        // Vector 4: anchor only
        generate_vector(
            "anchor_only",
            "Anchor present, target absent",
            None,
            Some([0xbb; 32]),
            vec![],
            b"anchored",
        )
        .await,
        // Vector 5: everything
        generate_vector(
            "all_fields",
            "Target, anchor, several tags, binary payload",
            Some([0x01; 32]),
            Some([0x02; 32]),
            vec![
                Tag::new("App-Name", "Golden"),
                Tag::new("App-Version", "1.0.0"),
                Tag::new("Unicode", "\u{00e9}t\u{00e9}"),
            ],
            &(0u8..=255).collect::<Vec<u8>>(),
        )
        .await,
    ]
}

#[tokio::test]
async fn test_reference_scenario() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let signer = EthereumSigner::from_hex(TEST_KEY).unwrap();
    let mut item = DataItemBuilder::new(b"hello".to_vec())
        .tag("App-Name", "Test")
        .build(&signer)
        .unwrap();
    assert!(item.raw_signature().iter().all(|b| *b == 0));
    assert_eq!(hex::encode(item.signature_data()), REFERENCE_SIGNATURE_DATA);

    let id = item.sign(&signer).await.unwrap();

    let signature = hex::encode(item.raw_signature());
    assert_eq!(&signature[..64], &REFERENCE_SIGNATURE[..64], "r mismatch");
    assert_eq!(&signature[64..128], &REFERENCE_SIGNATURE[64..128], "s mismatch");
    assert_eq!(&signature[128..], &REFERENCE_SIGNATURE[128..], "v mismatch");
    assert_eq!(id.to_string(), REFERENCE_ID);

    assert_eq!(item.raw_signature().len(), signer.signature_length());
    assert!(item.raw_signature().iter().any(|b| *b != 0));
    assert_eq!(item.raw_data(), b"hello");
    assert_eq!(
        deserialize_tags(item.raw_tags()).unwrap(),
        vec![Tag::new("App-Name", "Test")]
    );
    assert!(item.raw_target().is_empty());
    assert!(item.raw_anchor().is_empty());

    let text = id.to_string();
    assert_eq!(text.len(), 43);
    assert!(!text.contains('='));
    assert!(is_b64url_unpadded(&text));
    assert_eq!(text, identifier(item.raw_signature()));
    assert_eq!(text.parse::<ItemId>().unwrap(), id);

    assert!(verify_item(&item).is_ok());
}

#[tokio::test]
async fn test_vectors_deterministic() {
    let v1 = generate_all_vectors().await;
    let v2 = generate_all_vectors().await;

    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_eq!(a.unsigned_item, b.unsigned_item, "unsigned_item mismatch for {}", a.name);
        assert_eq!(a.signature_data, b.signature_data, "signature_data mismatch for {}", a.name);
        assert_eq!(a.signature, b.signature, "signature mismatch for {}", a.name);
        assert_eq!(a.signed_item, b.signed_item, "signed_item mismatch for {}", a.name);
        assert_eq!(a.id, b.id, "id mismatch for {}", a.name);
    }
}

#[tokio::test]
async fn test_vectors_reparse_and_verify() {
    for v in generate_all_vectors().await {
        let item = DataItem::from_bytes(hex::decode(&v.signed_item).unwrap()).unwrap();

        assert!(verify_item(&item).is_ok(), "verify failed for {}", v.name);
        assert_eq!(item.id().unwrap().to_string(), v.id, "id mismatch for {}", v.name);
        assert_eq!(hex::encode(item.raw_owner()), v.owner);
        assert_eq!(hex::encode(item.raw_tags()), v.tag_bytes);
        assert_eq!(item.tags().unwrap(), v.tags);
        assert_eq!(hex::encode(item.raw_data()), v.data);
        assert_eq!(
            v.target.as_deref().unwrap_or(""),
            hex::encode(item.raw_target()),
            "target mismatch for {}",
            v.name
        );
        assert_eq!(
            v.anchor.as_deref().unwrap_or(""),
            hex::encode(item.raw_anchor()),
            "anchor mismatch for {}",
            v.name
        );

        // Signing only fills the signature region
        let unsigned = hex::decode(&v.unsigned_item).unwrap();
        let signed = hex::decode(&v.signed_item).unwrap();
        assert_eq!(unsigned.len(), signed.len());
        assert_eq!(unsigned[..2], signed[..2]);
        assert_eq!(unsigned[67..], signed[67..]);
    }
}

#[tokio::test]
async fn test_vector_json_roundtrip() {
    let vectors = generate_all_vectors().await;

    #[derive(Serialize, Deserialize)]
    struct VectorFile {
        version: String,
        description: String,
        vectors: Vec<GoldenVector>,
    }

    let file = VectorFile {
        version: "1".to_string(),
        description: "Golden vectors for signed data items (signature type 3).".to_string(),
        vectors,
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    let parsed: VectorFile = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.vectors.len(), 5);
    assert_eq!(parsed.vectors[1].tags, vec![Tag::new("App-Name", "Test")]);
    assert_eq!(parsed.vectors[1].signature, REFERENCE_SIGNATURE);
    assert_eq!(parsed.vectors[1].id, REFERENCE_ID);
    println!("{}", json);
}

// =============================================================================
// REJECTION TEST VECTORS
// =============================================================================

#[test]
fn test_reject_short_and_long_target() {
    let signer = EthereumSigner::from_hex(TEST_KEY).unwrap();
    for len in [31, 33] {
        let options = DataItemOptions {
            target: Some(vec![0x01; len]),
            ..Default::default()
        };
        assert!(
            matches!(
                create_data(b"x", &signer, &options),
                Err(CoreError::InvalidFieldLength { field: "target", .. })
            ),
            "must reject {len}-byte target"
        );
    }
}

#[test]
fn test_reject_short_and_long_anchor() {
    let signer = EthereumSigner::from_hex(TEST_KEY).unwrap();
    for len in [31, 33] {
        let options = DataItemOptions {
            anchor: Some(vec![0x01; len]),
            ..Default::default()
        };
        assert!(
            matches!(
                create_data(b"x", &signer, &options),
                Err(CoreError::InvalidFieldLength { field: "anchor", .. })
            ),
            "must reject {len}-byte anchor"
        );
    }
}

#[test]
fn test_reject_malformed_private_key() {
    assert!(matches!(EthereumSigner::from_hex("abcd"), Err(CoreError::InvalidKey(_))));
    assert!(matches!(EthereumSigner::from_hex("zz"), Err(CoreError::InvalidKey(_))));
}

#[tokio::test]
async fn test_reject_double_sign() {
    let signer = EthereumSigner::from_hex(TEST_KEY).unwrap();
    let mut item = DataItemBuilder::new(b"x".to_vec()).sign(&signer).await.unwrap();
    let before = item.raw().to_vec();

    assert!(matches!(item.sign(&signer).await, Err(CoreError::AlreadySigned)));
    assert_eq!(item.raw(), before.as_slice());
}
