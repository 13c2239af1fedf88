use bytes::Bytes;
use nexum_se_apdu::{ApduCommand, ExpectedLength};

use super::CLA_ISO;
use crate::constants::ins;

/// SELECT command choosing an applet by its AID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectApplet {
    aid: Bytes,
}

impl SelectApplet {
    /// Select the applet identified by `aid`
    pub fn new(aid: impl Into<Bytes>) -> Self {
        Self { aid: aid.into() }
    }

    /// The application identifier being selected
    pub const fn aid(&self) -> &Bytes {
        &self.aid
    }
}

impl ApduCommand for SelectApplet {
    fn class(&self) -> u8 {
        CLA_ISO
    }

    fn instruction(&self) -> u8 {
        ins::SELECT
    }

    fn p1(&self) -> u8 {
        0x04
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.aid)
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }
}
