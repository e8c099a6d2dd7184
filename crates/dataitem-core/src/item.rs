//! DataItem: a single signed, addressable binary record.
//!
//! The item is one owned buffer. Nothing is parsed eagerly: every accessor
//! walks the header from the start, so a buffer received from elsewhere can
//! be inspected without side metadata.
//!
//! ```text
//! sig type (2) | signature | owner | target flag (1) [target (32)]
//!   | anchor flag (1) [anchor (32)] | tag count (8) | tag bytes (8)
//!   | tags | data
//! ```
//!
//! Once signed, the buffer is never mutated again. A changed item is a new item.

use bytes::Bytes;
use std::fmt;

use crate::codec::{bytes_to_long, long_to_bytes, read_long, read_short, short_to_bytes};
use crate::deep_hash::{deep_hash, DeepHashChunk, DEEP_HASH_LEN};
use crate::error::CoreError;
use crate::signer::{SignatureType, Signer};
use crate::tags::{deserialize_tags, serialize_tags, Tag};
use crate::types::ItemId;

/// Exact length of a target or anchor when present.
pub const OPTIONAL_FIELD_LEN: usize = 32;

/// Leading element of the signing message list.
pub const FORMAT_NAME: &[u8] = b"dataitem";

/// Format version element of the signing message list.
pub const FORMAT_VERSION: &[u8] = b"1";

/// Width of the signature type field.
const SIGNATURE_TYPE_LEN: usize = 2;

/// Tag count plus tag section length.
const TAG_HEADER_LEN: usize = 16;

/// Optional fields for item assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataItemOptions {
    /// 32-byte target, usually the identifier of another item or transaction.
    pub target: Option<Vec<u8>>,
    /// 32-byte anchor, used by uploaders to deduplicate or order items.
    pub anchor: Option<Vec<u8>>,
    /// Ordered tags. Order is part of the item's identity.
    pub tags: Vec<Tag>,
}

/// A data item buffer plus its derived identifier.
#[derive(Clone, PartialEq, Eq)]
pub struct DataItem {
    binary: Vec<u8>,
    /// Fixes the signature and owner widths; checked when the buffer is accepted.
    signature_type: SignatureType,
    id: Option<ItemId>,
}

/// Assemble an unsigned item.
///
/// All inputs are checked before the buffer is allocated, so a failure leaves
/// nothing behind.
pub fn create_data<S: Signer + ?Sized>(
    data: impl AsRef<[u8]>,
    signer: &S,
    options: &DataItemOptions,
) -> Result<DataItem, CoreError> {
    let data = data.as_ref();
    let signature_type = signer.signature_type();
    let owner = signer.public_key();

    let owner_length = signer.owner_length();
    if owner.len() != owner_length {
        return Err(CoreError::InvalidFieldLength {
            field: "owner",
            expected: owner_length,
            actual: owner.len(),
        });
    }
    if owner_length != signature_type.owner_length() {
        return Err(CoreError::InvalidFieldLength {
            field: "owner",
            expected: signature_type.owner_length(),
            actual: owner_length,
        });
    }

    let target = check_optional("target", options.target.as_deref())?;
    let anchor = check_optional("anchor", options.anchor.as_deref())?;
    let tag_bytes = serialize_tags(&options.tags);

    let total = SIGNATURE_TYPE_LEN
        + signature_type.signature_length()
        + owner_length
        + optional_len(target)
        + optional_len(anchor)
        + TAG_HEADER_LEN
        + tag_bytes.len()
        + data.len();

    let mut binary = Vec::with_capacity(total);
    binary.extend_from_slice(&short_to_bytes(signature_type.to_u16()));
    binary.resize(SIGNATURE_TYPE_LEN + signature_type.signature_length(), 0);
    binary.extend_from_slice(owner);
    write_optional(&mut binary, target);
    write_optional(&mut binary, anchor);
    binary.extend_from_slice(&long_to_bytes(options.tags.len() as u64));
    binary.extend_from_slice(&long_to_bytes(tag_bytes.len() as u64));
    binary.extend_from_slice(&tag_bytes);
    binary.extend_from_slice(data);
    debug_assert_eq!(binary.len(), total);

    tracing::debug!(
        signature_type = %signature_type,
        size = total,
        tags = options.tags.len(),
        "assembled data item"
    );

    Ok(DataItem {
        binary,
        signature_type,
        id: None,
    })
}

fn check_optional<'a>(
    field: &'static str,
    value: Option<&'a [u8]>,
) -> Result<Option<&'a [u8]>, CoreError> {
    match value {
        Some(bytes) if bytes.len() != OPTIONAL_FIELD_LEN => Err(CoreError::InvalidFieldLength {
            field,
            expected: OPTIONAL_FIELD_LEN,
            actual: bytes.len(),
        }),
        other => Ok(other),
    }
}

fn optional_len(value: Option<&[u8]>) -> usize {
    1 + value.map_or(0, <[u8]>::len)
}

fn write_optional(buf: &mut Vec<u8>, value: Option<&[u8]>) {
    match value {
        Some(bytes) => {
            buf.push(1);
            buf.extend_from_slice(bytes);
        }
        None => buf.push(0),
    }
}

impl DataItem {
    /// Accept a pre-built buffer.
    ///
    /// The layout is checked end to end so that accessors can slice without
    /// bounds failures. A non-zero signature region marks the item as signed.
    pub fn from_bytes(binary: impl Into<Vec<u8>>) -> Result<Self, CoreError> {
        let binary = binary.into();
        let signature_type = SignatureType::try_from(read_short(&binary, 0)?)?;

        let target_start =
            SIGNATURE_TYPE_LEN + signature_type.signature_length() + signature_type.owner_length();
        let anchor_start = check_optional_region(&binary, "target", target_start)?;
        let tags_start = check_optional_region(&binary, "anchor", anchor_start)?;

        read_long(&binary, tags_start)?;
        let tag_len = read_long(&binary, tags_start + 8)?;
        usize::try_from(tag_len)
            .ok()
            .and_then(|len| (tags_start + TAG_HEADER_LEN).checked_add(len))
            .filter(|end| *end <= binary.len())
            .ok_or_else(|| {
                CoreError::MalformedItem(format!(
                    "tag section of {tag_len} bytes exceeds buffer of {} bytes",
                    binary.len()
                ))
            })?;

        let mut item = Self {
            binary,
            signature_type,
            id: None,
        };
        if item.raw_signature().iter().any(|b| *b != 0) {
            item.id = Some(ItemId::from_signature(item.raw_signature()));
        }
        Ok(item)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Field accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The signature scheme named in the header.
    pub fn signature_type(&self) -> SignatureType {
        self.signature_type
    }

    /// The signature region (all zeros until signed).
    pub fn raw_signature(&self) -> &[u8] {
        &self.binary[SIGNATURE_TYPE_LEN..self.owner_start()]
    }

    /// The owner's public key.
    pub fn raw_owner(&self) -> &[u8] {
        &self.binary[self.owner_start()..self.target_start()]
    }

    /// The target, or an empty slice if absent.
    pub fn raw_target(&self) -> &[u8] {
        self.optional_at(self.target_start())
    }

    /// The anchor, or an empty slice if absent.
    pub fn raw_anchor(&self) -> &[u8] {
        self.optional_at(self.anchor_start())
    }

    /// Number of logical tags declared in the header.
    pub fn tag_count(&self) -> u64 {
        self.long_at(self.tags_start())
    }

    /// The encoded tag section.
    pub fn raw_tags(&self) -> &[u8] {
        let start = self.tags_start() + TAG_HEADER_LEN;
        &self.binary[start..self.data_start()]
    }

    /// The data payload.
    pub fn raw_data(&self) -> &[u8] {
        &self.binary[self.data_start()..]
    }

    /// The whole buffer, as it should be sent to a bundler.
    pub fn raw(&self) -> &[u8] {
        &self.binary
    }

    /// Consume the item, returning its buffer.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.binary)
    }

    /// Decode the tag section.
    pub fn tags(&self) -> Result<Vec<Tag>, CoreError> {
        deserialize_tags(self.raw_tags())
    }

    /// The identifier, once signed.
    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    /// Whether a signature has been written.
    pub fn is_signed(&self) -> bool {
        self.id.is_some()
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.binary.len()
    }

    /// Never true for a well-formed item; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.binary.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signing
    // ─────────────────────────────────────────────────────────────────────────

    /// The message a signer must sign: a deep hash over the item's content.
    ///
    /// Covers `["dataitem", "1", signature type, owner, target, anchor, tags, data]`.
    /// Absent fields contribute empty blobs.
    pub fn signature_data(&self) -> [u8; DEEP_HASH_LEN] {
        let signature_type = self.signature_type.to_string();
        deep_hash(&DeepHashChunk::List(vec![
            DeepHashChunk::Blob(FORMAT_NAME),
            DeepHashChunk::Blob(FORMAT_VERSION),
            DeepHashChunk::Blob(signature_type.as_bytes()),
            DeepHashChunk::Blob(self.raw_owner()),
            DeepHashChunk::Blob(self.raw_target()),
            DeepHashChunk::Blob(self.raw_anchor()),
            DeepHashChunk::Blob(self.raw_tags()),
            DeepHashChunk::Blob(self.raw_data()),
        ]))
    }

    /// Sign the item and derive its identifier.
    ///
    /// The buffer is only written after the signer returns a well-formed
    /// signature, so any error (or dropping the future) leaves the item
    /// unsigned and byte-identical.
    pub async fn sign<S: Signer + ?Sized>(&mut self, signer: &S) -> Result<ItemId, CoreError> {
        if self.is_signed() {
            return Err(CoreError::AlreadySigned);
        }
        if signer.signature_type() != self.signature_type {
            return Err(CoreError::Signing(format!(
                "signer produces type {} signatures, item expects type {}",
                signer.signature_type(),
                self.signature_type
            )));
        }
        if signer.public_key() != self.raw_owner() {
            return Err(CoreError::Signing(
                "signer public key does not match item owner".into(),
            ));
        }

        let message = self.signature_data();
        let signature = signer.sign(&message).await?;

        let expected = self.signature_type.signature_length();
        if signature.len() != expected {
            return Err(CoreError::Signing(format!(
                "signer returned {} bytes, expected {expected}",
                signature.len()
            )));
        }
        if signature.iter().all(|b| *b == 0) {
            return Err(CoreError::Signing("signer returned an all-zero signature".into()));
        }

        self.binary[SIGNATURE_TYPE_LEN..SIGNATURE_TYPE_LEN + expected].copy_from_slice(&signature);
        let id = ItemId::from_signature(&signature);
        self.id = Some(id);

        tracing::debug!(id = %id, size = self.binary.len(), "signed data item");
        Ok(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Offset chain: target → anchor → tags → data
    // ─────────────────────────────────────────────────────────────────────────

    fn owner_start(&self) -> usize {
        SIGNATURE_TYPE_LEN + self.signature_type.signature_length()
    }

    fn target_start(&self) -> usize {
        self.owner_start() + self.signature_type.owner_length()
    }

    fn anchor_start(&self) -> usize {
        self.skip_optional(self.target_start())
    }

    fn tags_start(&self) -> usize {
        self.skip_optional(self.anchor_start())
    }

    fn data_start(&self) -> usize {
        let tags_start = self.tags_start();
        tags_start + TAG_HEADER_LEN + self.long_at(tags_start + 8) as usize
    }

    /// Offset just past the optional field whose flag sits at `flag_offset`.
    fn skip_optional(&self, flag_offset: usize) -> usize {
        if self.binary[flag_offset] == 1 {
            flag_offset + 1 + OPTIONAL_FIELD_LEN
        } else {
            flag_offset + 1
        }
    }

    fn optional_at(&self, flag_offset: usize) -> &[u8] {
        &self.binary[flag_offset + 1..self.skip_optional(flag_offset)]
    }

    fn long_at(&self, offset: usize) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.binary[offset..offset + 8]);
        bytes_to_long(&bytes)
    }
}

/// Check the flag and optional field at `flag_offset`, returning the next offset.
fn check_optional_region(
    binary: &[u8],
    field: &str,
    flag_offset: usize,
) -> Result<usize, CoreError> {
    let next = match binary.get(flag_offset) {
        Some(0) => flag_offset + 1,
        Some(1) => flag_offset + 1 + OPTIONAL_FIELD_LEN,
        Some(other) => {
            return Err(CoreError::MalformedItem(format!(
                "{field} presence flag is {other}, expected 0 or 1"
            )))
        }
        None => {
            return Err(CoreError::MalformedItem(format!(
                "buffer ends before {field} presence flag"
            )))
        }
    };
    if next > binary.len() {
        return Err(CoreError::MalformedItem(format!("buffer ends inside {field}")));
    }
    Ok(next)
}

impl fmt::Debug for DataItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataItem")
            .field("signature_type", &self.signature_type)
            .field("id", &self.id)
            .field("len", &self.binary.len())
            .finish()
    }
}

impl AsRef<[u8]> for DataItem {
    fn as_ref(&self) -> &[u8] {
        &self.binary
    }
}

impl TryFrom<Vec<u8>> for DataItem {
    type Error = CoreError;

    fn try_from(binary: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(binary)
    }
}

/// Builder for assembling items.
pub struct DataItemBuilder {
    data: Vec<u8>,
    options: DataItemOptions,
}

impl DataItemBuilder {
    /// Start building an item around a payload.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            options: DataItemOptions::default(),
        }
    }

    /// Set the target.
    pub fn target(mut self, target: impl AsRef<[u8]>) -> Self {
        self.options.target = Some(target.as_ref().to_vec());
        self
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: impl AsRef<[u8]>) -> Self {
        self.options.anchor = Some(anchor.as_ref().to_vec());
        self
    }

    /// Append a tag.
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.tags.push(Tag::new(name, value));
        self
    }

    /// Append several tags, in order.
    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.options.tags.extend(tags);
        self
    }

    /// Assemble the unsigned item.
    pub fn build<S: Signer + ?Sized>(self, signer: &S) -> Result<DataItem, CoreError> {
        create_data(&self.data, signer, &self.options)
    }

    /// Assemble and sign.
    pub async fn sign<S: Signer + ?Sized>(self, signer: &S) -> Result<DataItem, CoreError> {
        let mut item = self.build(signer)?;
        item.sign(signer).await?;
        Ok(item)
    }
}
