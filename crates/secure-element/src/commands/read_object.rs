use bytes::{Bytes, BytesMut};
use nexum_se_apdu::{ApduCommand, ExpectedLength};

use super::{CLA_PROPRIETARY, put_identifier};
use crate::constants::{command_tags, ins};

/// READ command for a secure object, optionally attested
///
/// Uses extended length fields. An attested read names the attestation key
/// the element must sign the returned object with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadObject {
    object_id: u32,
    attestation_key_id: Option<u32>,
    data: Bytes,
}

impl ReadObject {
    /// Plain read of `object_id`
    pub fn new(object_id: u32) -> Self {
        Self::build(object_id, None)
    }

    /// Read of `object_id` attested by the key at `attestation_key_id`
    pub fn attested(object_id: u32, attestation_key_id: u32) -> Self {
        Self::build(object_id, Some(attestation_key_id))
    }

    fn build(object_id: u32, attestation_key_id: Option<u32>) -> Self {
        let mut data = BytesMut::with_capacity(12);
        put_identifier(&mut data, command_tags::OBJECT_ID, object_id);
        if let Some(key_id) = attestation_key_id {
            put_identifier(&mut data, command_tags::ATTESTATION_KEY_ID, key_id);
        }

        Self {
            object_id,
            attestation_key_id,
            data: data.freeze(),
        }
    }

    /// Identifier of the object being read
    pub const fn object_id(&self) -> u32 {
        self.object_id
    }

    /// Identifier of the attestation key, if attested
    pub const fn attestation_key_id(&self) -> Option<u32> {
        self.attestation_key_id
    }
}

impl ApduCommand for ReadObject {
    fn class(&self) -> u8 {
        CLA_PROPRIETARY
    }

    fn instruction(&self) -> u8 {
        ins::READ
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.data)
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        Some(0)
    }

    fn is_extended(&self) -> bool {
        true
    }
}
