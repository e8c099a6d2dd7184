//! Deep hash: a structured SHA-384 digest over nested byte strings.
//!
//! - Blob: `H(H("blob" || len) || H(data))`
//! - List: `acc = H("list" || count)`, then `acc = H(acc || deep_hash(item))` per item
//!
//! Lengths and counts are written as ASCII decimal.

use sha2::{Digest, Sha384};

/// Size of a deep hash digest in bytes.
pub const DEEP_HASH_LEN: usize = 48;

/// A node in the structure being hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepHashChunk<'a> {
    Blob(&'a [u8]),
    List(Vec<DeepHashChunk<'a>>),
}

impl<'a> From<&'a [u8]> for DeepHashChunk<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Blob(bytes)
    }
}

/// Compute the deep hash of a chunk.
pub fn deep_hash(chunk: &DeepHashChunk<'_>) -> [u8; DEEP_HASH_LEN] {
    match chunk {
        DeepHashChunk::Blob(data) => {
            let tag = sha384(&[b"blob", data.len().to_string().as_bytes()]);
            let body = sha384(&[*data]);
            sha384(&[&tag, &body])
        }
        DeepHashChunk::List(items) => {
            let mut acc = sha384(&[b"list", items.len().to_string().as_bytes()]);
            for item in items {
                let item_hash = deep_hash(item);
                acc = sha384(&[&acc, &item_hash]);
            }
            acc
        }
    }
}

fn sha384(parts: &[&[u8]]) -> [u8; DEEP_HASH_LEN] {
    let mut hasher = Sha384::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; DEEP_HASH_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_definition() {
        let data = b"hello";
        let tag = Sha384::digest(b"blob5");
        let body = Sha384::digest(data);
        let mut h = Sha384::new();
        h.update(tag);
        h.update(body);
        assert_eq!(deep_hash(&DeepHashChunk::Blob(data)).as_slice(), h.finalize().as_slice());
    }

    #[test]
    fn test_empty_list_is_tag_hash() {
        let expected = Sha384::digest(b"list0");
        assert_eq!(deep_hash(&DeepHashChunk::List(vec![])).as_slice(), expected.as_slice());
    }

    #[test]
    fn test_structure_matters() {
        let flat = DeepHashChunk::List(vec![
            DeepHashChunk::Blob(b"a"),
            DeepHashChunk::Blob(b"b"),
        ]);
        let nested = DeepHashChunk::List(vec![DeepHashChunk::List(vec![
            DeepHashChunk::Blob(b"a"),
            DeepHashChunk::Blob(b"b"),
        ])]);
        let joined = DeepHashChunk::List(vec![DeepHashChunk::Blob(b"ab")]);

        assert_ne!(deep_hash(&flat), deep_hash(&nested));
        assert_ne!(deep_hash(&flat), deep_hash(&joined));
    }

    #[test]
    fn test_order_matters() {
        let ab = DeepHashChunk::List(vec![b"a".as_slice().into(), b"b".as_slice().into()]);
        let ba = DeepHashChunk::List(vec![b"b".as_slice().into(), b"a".as_slice().into()]);
        assert_ne!(deep_hash(&ab), deep_hash(&ba));
    }
}
