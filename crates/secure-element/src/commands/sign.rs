use bytes::{BufMut, Bytes, BytesMut};
use nexum_se_apdu::{ApduCommand, ExpectedLength};

use super::CLA_PROPRIETARY;
use crate::constants::ins;

/// SIGN command over a raw payload
///
/// The payload length is not checked here; callers enforce the session limit
/// before building the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPayload {
    data: Bytes,
}

impl SignPayload {
    /// Sign `payload` with the key bound to `chain_id`
    pub fn new(chain_id: u8, payload: &[u8]) -> Self {
        let mut data = BytesMut::with_capacity(1 + payload.len());
        data.put_u8(chain_id);
        data.put_slice(payload);
        Self {
            data: data.freeze(),
        }
    }

    /// Chain identifier the payload is signed for
    pub fn chain_id(&self) -> u8 {
        self.data[0]
    }
}

impl ApduCommand for SignPayload {
    fn class(&self) -> u8 {
        CLA_PROPRIETARY
    }

    fn instruction(&self) -> u8 {
        ins::SIGN
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
