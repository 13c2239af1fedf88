//! APDU command definitions and traits
//!
//! This module provides types and traits for working with APDU commands
//! according to ISO/IEC 7816-4, in both short and extended length form.

use bytes::{BufMut, Bytes, BytesMut};

/// Expected length type for APDU commands
///
/// In extended form a value of zero requests the maximum (65536 bytes).
pub type ExpectedLength = u16;

/// Largest payload that fits a short Lc field
const SHORT_LC_MAX: usize = 0xFF;

/// Core trait for APDU commands
pub trait ApduCommand {
    /// Command class (CLA)
    fn class(&self) -> u8;

    /// Instruction code (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command payload data (optional)
    fn data(&self) -> Option<&[u8]>;

    /// Expected response length (optional)
    fn expected_length(&self) -> Option<ExpectedLength>;

    /// Whether Lc/Le use the extended (3-byte / 2-byte) encoding
    ///
    /// Payloads longer than 255 bytes are always encoded in extended form.
    fn is_extended(&self) -> bool {
        false
    }

    /// Convert to raw APDU bytes
    fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(self.command_length());
        let extended = self.uses_extended_length();

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.class());
        buffer.put_u8(self.instruction());
        buffer.put_u8(self.p1());
        buffer.put_u8(self.p2());

        // Add Lc and data if present
        if let Some(data) = self.data() {
            if extended {
                buffer.put_u8(0x00);
                buffer.put_u16(data.len() as u16);
            } else {
                buffer.put_u8(data.len() as u8);
            }
            buffer.put_slice(data);
        }

        // Add Le if present
        if let Some(le) = self.expected_length() {
            if extended {
                // Without data the extended Le carries its own 0x00 marker
                if self.data().is_none() {
                    buffer.put_u8(0x00);
                }
                buffer.put_u16(le);
            } else {
                buffer.put_u8(le as u8);
            }
        }

        buffer.freeze()
    }

    /// Calculate length of serialized command
    fn command_length(&self) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;
        let extended = self.uses_extended_length();

        if let Some(data) = self.data() {
            let lc = if extended { 3 } else { 1 };
            length += lc + data.len();
        }

        if self.expected_length().is_some() {
            length += match (extended, self.data().is_some()) {
                (false, _) => 1,
                (true, true) => 2,
                (true, false) => 3,
            };
        }

        length
    }

    /// Whether this command will be serialized in extended form
    fn uses_extended_length(&self) -> bool {
        self.is_extended() || self.data().is_some_and(|data| data.len() > SHORT_LC_MAX)
    }
}
