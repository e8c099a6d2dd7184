//! Tag section encoding.
//!
//! Tags are encoded as Apache Avro binary for the schema
//! `array<record { name: bytes, value: bytes }>`:
//! - One block whose count is the number of tags (zig-zag varint)
//! - Each record is two Avro `bytes` values (zig-zag varint length, raw bytes)
//! - A zero-count block terminates the array
//!
//! An empty tag list is encoded as zero bytes, not as an empty Avro array.
//!
//! **CRITICAL**: These bytes feed the signing message. Changing the encoding
//! invalidates every existing signature.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};

/// Maximum number of tags on a single item.
pub const MAX_TAGS: usize = 128;

/// Maximum byte length of a tag name.
pub const MAX_TAG_NAME_BYTES: usize = 1024;

/// Maximum byte length of a tag value.
pub const MAX_TAG_VALUE_BYTES: usize = 3072;

/// A (name, value) pair attached to a data item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Tag {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Serialize an ordered tag list to its wire bytes.
pub fn serialize_tags(tags: &[Tag]) -> Vec<u8> {
    if tags.is_empty() {
        return Vec::new();
    }

    let mut buf = Vec::with_capacity(encoded_len_hint(tags));
    encode_long(&mut buf, tags.len() as i64);
    for tag in tags {
        encode_bytes(&mut buf, tag.name.as_bytes());
        encode_bytes(&mut buf, tag.value.as_bytes());
    }
    encode_long(&mut buf, 0);
    buf
}

/// Decode a tag section back into the ordered tag list.
pub fn deserialize_tags(bytes: &[u8]) -> Result<Vec<Tag>, CoreError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader { buf: bytes, pos: 0 };
    let mut tags = Vec::new();

    loop {
        let mut count = reader.long()?;
        if count == 0 {
            break;
        }
        if count < 0 {
            // Negative counts are followed by the block's byte size, which we skip.
            count = count
                .checked_neg()
                .ok_or_else(|| CoreError::TagDecoding("block count overflow".into()))?;
            reader.long()?;
        }
        for _ in 0..count {
            let name = reader.string()?;
            let value = reader.string()?;
            tags.push(Tag { name, value });
        }
    }

    if reader.pos != bytes.len() {
        return Err(CoreError::TagDecoding(format!(
            "{} trailing bytes after tag array",
            bytes.len() - reader.pos
        )));
    }

    Ok(tags)
}

/// Check a tag list against the size limits bundlers enforce.
pub fn validate_tags(tags: &[Tag]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags(tags.len()));
    }

    for (index, tag) in tags.iter().enumerate() {
        if tag.name.is_empty() || tag.value.is_empty() {
            return Err(ValidationError::EmptyTag { index });
        }
        if tag.name.len() > MAX_TAG_NAME_BYTES {
            return Err(ValidationError::TagNameTooLong {
                index,
                len: tag.name.len(),
            });
        }
        if tag.value.len() > MAX_TAG_VALUE_BYTES {
            return Err(ValidationError::TagValueTooLong {
                index,
                len: tag.value.len(),
            });
        }
    }

    Ok(())
}

fn encoded_len_hint(tags: &[Tag]) -> usize {
    // Two varints of at most 10 bytes frame the array, each string carries a length prefix.
    20 + tags
        .iter()
        .map(|t| t.name.len() + t.value.len() + 20)
        .sum::<usize>()
}

/// Encode an Avro `long` (zig-zag, then base-128 varint).
fn encode_long(buf: &mut Vec<u8>, n: i64) {
    let mut z = ((n << 1) ^ (n >> 63)) as u64;
    while z >= 0x80 {
        buf.push((z as u8) | 0x80);
        z >>= 7;
    }
    buf.push(z as u8);
}

/// Encode an Avro `bytes` value.
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_long(buf, bytes.len() as i64);
    buf.extend_from_slice(bytes);
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn long(&mut self) -> Result<i64, CoreError> {
        let mut z: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or_else(|| CoreError::TagDecoding("truncated varint".into()))?;
            self.pos += 1;

            if shift >= 64 {
                return Err(CoreError::TagDecoding("varint too long".into()));
            }
            z |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        Ok(((z >> 1) as i64) ^ -((z & 1) as i64))
    }

    fn bytes(&mut self) -> Result<&'a [u8], CoreError> {
        let len = self.long()?;
        let len = usize::try_from(len)
            .map_err(|_| CoreError::TagDecoding(format!("negative length {len}")))?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| CoreError::TagDecoding(format!("length {len} exceeds tag section")))?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn string(&mut self) -> Result<String, CoreError> {
        let raw = self.bytes()?;
        String::from_utf8(raw.to_vec()).map_err(|e| CoreError::TagDecoding(e.to_string()))
    }
}
