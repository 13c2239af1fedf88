use bytes::{BufMut, Bytes, BytesMut};
use nexum_se_apdu::{ApduCommand, ExpectedLength, FormatError, utils::put_tlv_length};

use super::{CLA_PROPRIETARY, put_identifier};
use crate::constants::{command_tags, ins};

/// P1 of WRITE commands creating a new object
const P1_CREATE: u8 = 0x06;

/// WRITE command generating a key pair inside the element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAddress {
    object_id: u32,
    curve: u8,
    data: Bytes,
}

impl CreateAddress {
    /// Generate a key on `curve` at `object_id`
    pub fn new(object_id: u32, curve: u8) -> Self {
        let mut data = BytesMut::with_capacity(9);
        put_identifier(&mut data, command_tags::OBJECT_ID, object_id);
        data.put_u8(command_tags::CURVE);
        data.put_u8(0x01);
        data.put_u8(curve);

        Self {
            object_id,
            curve,
            data: data.freeze(),
        }
    }

    /// Identifier of the key object to create
    pub const fn object_id(&self) -> u32 {
        self.object_id
    }

    /// Curve the key is generated on
    pub const fn curve(&self) -> u8 {
        self.curve
    }
}

impl ApduCommand for CreateAddress {
    fn class(&self) -> u8 {
        CLA_PROPRIETARY
    }

    fn instruction(&self) -> u8 {
        ins::WRITE
    }

    fn p1(&self) -> u8 {
        P1_CREATE
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.data)
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }
}

/// WRITE command storing an asset identifier as a write-once data object
///
/// The stored value is the chain id followed by the asset bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAsset {
    object_id: u32,
    data: Bytes,
}

impl CreateAsset {
    /// Store `asset` for `chain_id` at `object_id`
    ///
    /// # Errors
    /// Returns [`FormatError::TlvLengthTooLarge`] if the stored value does not
    /// fit a BER-TLV length field.
    pub fn new(object_id: u32, chain_id: u8, asset: &[u8]) -> Result<Self, FormatError> {
        let value_len = 1 + asset.len();
        let mut data = BytesMut::with_capacity(6 + 4 + value_len);
        put_identifier(&mut data, command_tags::OBJECT_ID, object_id);
        data.put_u8(command_tags::ASSET_DATA);
        put_tlv_length(&mut data, value_len)?;
        data.put_u8(chain_id);
        data.put_slice(asset);

        Ok(Self {
            object_id,
            data: data.freeze(),
        })
    }

    /// Identifier of the data object to create
    pub const fn object_id(&self) -> u32 {
        self.object_id
    }
}

impl ApduCommand for CreateAsset {
    fn class(&self) -> u8 {
        CLA_PROPRIETARY
    }

    fn instruction(&self) -> u8 {
        ins::WRITE
    }

    fn p1(&self) -> u8 {
        P1_CREATE
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.data)
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }
}
