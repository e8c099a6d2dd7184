//! Item validation: signature verification and structural checks.

use crate::crypto::verify_ethereum_signature;
use crate::error::ValidationError;
use crate::item::DataItem;
use crate::signer::SignatureType;
use crate::tags::validate_tags;
use crate::types::ItemId;

/// Validate a signed item.
///
/// This performs:
/// - Signed-state check
/// - Identifier check against the signature
/// - Tag decoding, count and size limits
/// - Signature verification over the recomputed signing message
pub fn verify_item(item: &DataItem) -> Result<(), ValidationError> {
    // 1. Must be signed
    let id = item.id().ok_or(ValidationError::NotSigned)?;

    // 2. Identifier derives from the signature
    if id != ItemId::from_signature(item.raw_signature()) {
        return Err(ValidationError::IdMismatch);
    }

    // 3. Tags
    validate_item_structure(item)?;

    // 4. Verify signature
    let message = item.signature_data();
    match item.signature_type() {
        SignatureType::Ethereum => {
            verify_ethereum_signature(item.raw_owner(), &message, item.raw_signature())
                .map_err(|_| ValidationError::SignatureFailed)?;
        }
    }

    Ok(())
}

/// Validate the tag section without signature verification.
///
/// Useful for checking an unsigned item before handing it to a signer.
pub fn validate_item_structure(item: &DataItem) -> Result<(), ValidationError> {
    let tags = item.tags()?;
    if tags.len() as u64 != item.tag_count() {
        return Err(ValidationError::TagCountMismatch {
            declared: item.tag_count(),
            actual: tags.len() as u64,
        });
    }
    validate_tags(&tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::long_to_bytes;
    use crate::crypto::EthereumSigner;
    use crate::item::DataItemBuilder;

    fn make_test_signer() -> EthereumSigner {
        EthereumSigner::from_bytes(&[0x42; 32]).unwrap()
    }

    #[tokio::test]
    async fn test_valid_item() {
        let signer = make_test_signer();
        let item = DataItemBuilder::new(b"hello".to_vec())
            .tag("App-Name", "Test")
            .target([0x01; 32])
            .anchor([0x02; 32])
            .sign(&signer)
            .await
            .unwrap();

        assert!(verify_item(&item).is_ok());
    }

    #[test]
    fn test_unsigned_item() {
        let item = DataItemBuilder::new(b"hello".to_vec())
            .build(&make_test_signer())
            .unwrap();
        assert!(matches!(verify_item(&item), Err(ValidationError::NotSigned)));
        assert!(validate_item_structure(&item).is_ok());
    }

    #[tokio::test]
    async fn test_tampered_data_fails() {
        let item = DataItemBuilder::new(b"hello".to_vec())
            .sign(&make_test_signer())
            .await
            .unwrap();

        let mut raw = item.raw().to_vec();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = DataItem::from_bytes(raw).unwrap();

        assert!(matches!(verify_item(&tampered), Err(ValidationError::SignatureFailed)));
    }

    #[tokio::test]
    async fn test_tampered_signature_fails() {
        let item = DataItemBuilder::new(b"hello".to_vec())
            .sign(&make_test_signer())
            .await
            .unwrap();

        let mut raw = item.raw().to_vec();
        raw[10] ^= 0xff;
        let tampered = DataItem::from_bytes(raw).unwrap();

        assert_ne!(tampered.id(), item.id());
        assert!(matches!(verify_item(&tampered), Err(ValidationError::SignatureFailed)));
    }

    #[tokio::test]
    async fn test_tag_count_mismatch() {
        let item = DataItemBuilder::new(b"hello".to_vec())
            .tag("a", "b")
            .sign(&make_test_signer())
            .await
            .unwrap();

        // No target or anchor: tag count sits right after the two flags.
        let mut raw = item.raw().to_vec();
        raw[134..142].copy_from_slice(&long_to_bytes(5));
        let tampered = DataItem::from_bytes(raw).unwrap();

        assert!(matches!(
            verify_item(&tampered),
            Err(ValidationError::TagCountMismatch { declared: 5, actual: 1 })
        ));
    }

    #[tokio::test]
    async fn test_empty_tag_value_rejected() {
        let item = DataItemBuilder::new(b"hello".to_vec())
            .tag("name", "")
            .sign(&make_test_signer())
            .await
            .unwrap();

        assert!(matches!(verify_item(&item), Err(ValidationError::EmptyTag { index: 0 })));
    }
}
