//! Secure object payloads returned by attested reads
//!
//! A secure object response is a flat TLV sequence carrying the object data,
//! its attributes, attestation metadata and a signature over all of them.

use bytes::{BufMut, Bytes, BytesMut};
use derive_more::Display;
use nexum_se_apdu::{FormatError, utils::decode_tlv_length};
use tracing::trace;

use crate::constants::tags;

/// The kinds of object read from the element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ObjectKind {
    /// Hardware-generated chain public key
    #[display("public key")]
    PublicKey,
    /// Write-once asset identifier
    #[display("asset")]
    Asset,
    /// Attestation key certificate
    #[display("certificate")]
    Certificate,
}

/// Tags recognised inside a secure object payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ObjectTag {
    /// Object data
    Data = tags::TAG_1,
    /// Attribute blob
    Attributes = tags::TAG_2,
    /// Attestation timestamp
    Timestamp = tags::TAG_3,
    /// Freshness value
    Freshness = tags::TAG_4,
    /// Chip unique identifier
    ChipId = tags::TAG_5,
    /// Signature over the five preceding values
    Signature = tags::TAG_6,
}

impl ObjectTag {
    /// Tags covered by the attestation signature, in signing order
    pub const SIGNED: [Self; 5] = [
        Self::Data,
        Self::Attributes,
        Self::Timestamp,
        Self::Freshness,
        Self::ChipId,
    ];
}

impl TryFrom<u8> for ObjectTag {
    type Error = u8;

    fn try_from(tag: u8) -> Result<Self, u8> {
        match tag {
            tags::TAG_1 => Ok(Self::Data),
            tags::TAG_2 => Ok(Self::Attributes),
            tags::TAG_3 => Ok(Self::Timestamp),
            tags::TAG_4 => Ok(Self::Freshness),
            tags::TAG_5 => Ok(Self::ChipId),
            tags::TAG_6 => Ok(Self::Signature),
            other => Err(other),
        }
    }
}

/// Decoded secure object response with one slot per recognised tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecureObjectPayload {
    /// Object data (TAG_1)
    pub data: Option<Bytes>,
    /// Attribute blob (TAG_2)
    pub attributes: Option<Bytes>,
    /// Attestation timestamp (TAG_3)
    pub timestamp: Option<Bytes>,
    /// Freshness value (TAG_4)
    pub freshness: Option<Bytes>,
    /// Chip unique identifier (TAG_5)
    pub chip_id: Option<Bytes>,
    /// Signature (TAG_6)
    pub signature: Option<Bytes>,
}

impl SecureObjectPayload {
    /// Parse a response body into its tagged values
    ///
    /// Unrecognised tags are skipped. A repeated tag keeps the last value.
    ///
    /// # Errors
    /// Returns [`FormatError::Truncated`] when a length field or value runs
    /// past the end of the input.
    pub fn parse(body: &Bytes) -> Result<Self, FormatError> {
        let mut payload = Self::default();
        let mut pos = 0;

        while pos < body.len() {
            let tag = body[pos];
            let (len, consumed) = decode_tlv_length(&body[pos + 1..])?;
            let start = pos + 1 + consumed;
            let end = start + len;
            if end > body.len() {
                return Err(FormatError::Truncated {
                    needed: len,
                    available: body.len() - start,
                });
            }

            match ObjectTag::try_from(tag) {
                Ok(tag) => *payload.slot_mut(tag) = Some(body.slice(start..end)),
                Err(unknown) => {
                    trace!(tag = format_args!("{unknown:#04x}"), len, "Skipping unknown tag");
                }
            }
            pos = end;
        }

        Ok(payload)
    }

    /// Value stored under `tag`
    pub const fn get(&self, tag: ObjectTag) -> Option<&Bytes> {
        match tag {
            ObjectTag::Data => self.data.as_ref(),
            ObjectTag::Attributes => self.attributes.as_ref(),
            ObjectTag::Timestamp => self.timestamp.as_ref(),
            ObjectTag::Freshness => self.freshness.as_ref(),
            ObjectTag::ChipId => self.chip_id.as_ref(),
            ObjectTag::Signature => self.signature.as_ref(),
        }
    }

    /// Value stored under `tag`, failing if absent
    pub fn require(&self, tag: ObjectTag) -> Result<&Bytes, FormatError> {
        self.get(tag).ok_or(FormatError::MissingTag(tag as u8))
    }

    const fn slot_mut(&mut self, tag: ObjectTag) -> &mut Option<Bytes> {
        match tag {
            ObjectTag::Data => &mut self.data,
            ObjectTag::Attributes => &mut self.attributes,
            ObjectTag::Timestamp => &mut self.timestamp,
            ObjectTag::Freshness => &mut self.freshness,
            ObjectTag::ChipId => &mut self.chip_id,
            ObjectTag::Signature => &mut self.signature,
        }
    }

    /// Concatenation of the signed values, TAG_1 through TAG_5
    ///
    /// Absent tags contribute nothing.
    pub fn signed_region(&self) -> Bytes {
        let mut region = BytesMut::new();
        for value in ObjectTag::SIGNED.iter().filter_map(|&tag| self.get(tag)) {
            region.put_slice(value);
        }
        region.freeze()
    }
}

/// Fixed-layout attribute record of a secure object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    /// Object identifier
    pub object_id: u32,
    /// Object class
    pub object_class: u8,
    /// Authentication indicator
    pub authentication_indicator: u8,
    /// Authentication attempt counter
    pub auth_counter: u16,
    /// Authentication object identifier
    pub auth_id: u32,
    /// Maximum authentication attempts
    pub max_auth_attempts: u8,
    /// Access policy bytes
    pub policy: Bytes,
    /// Origin of the object
    pub origin: u8,
}

impl Attributes {
    /// Length of the fixed fields, policy excluded
    pub const FIXED_LEN: usize = 14;

    /// Parse an attribute blob
    ///
    /// The policy occupies everything between the fixed header and the
    /// trailing origin byte.
    ///
    /// # Errors
    /// Returns [`FormatError::MalformedAttributes`] when the blob is shorter
    /// than the fixed fields.
    pub fn parse(blob: &Bytes) -> Result<Self, FormatError> {
        let len = blob.len();
        if len < Self::FIXED_LEN {
            return Err(FormatError::MalformedAttributes(len));
        }

        Ok(Self {
            object_id: u32::from_be_bytes([blob[0], blob[1], blob[2], blob[3]]),
            object_class: blob[4],
            authentication_indicator: blob[5],
            auth_counter: u16::from_be_bytes([blob[6], blob[7]]),
            auth_id: u32::from_be_bytes([blob[8], blob[9], blob[10], blob[11]]),
            max_auth_attempts: blob[12],
            policy: blob.slice(13..len - 1),
            origin: blob[len - 1],
        })
    }
}

/// A secure object whose attestation signature verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object data
    pub data: Bytes,
    /// Parsed attributes
    pub attributes: Attributes,
}
