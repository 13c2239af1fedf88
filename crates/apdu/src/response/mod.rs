//! APDU response definitions
//!
//! This module provides the response type that splits raw bytes into payload
//! and status word according to ISO/IEC 7816-4.

pub mod status;

use bytes::Bytes;
use tracing::trace;

use crate::error::FormatError;
use status::StatusWord;

/// Basic APDU response structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response payload data, without the status word
    payload: Bytes,
    /// Status word
    status: StatusWord,
}

impl Response {
    /// Parse response from raw bytes (including status word)
    ///
    /// # Errors
    /// Returns [`FormatError::Truncated`] if the data is too short to contain a
    /// status word.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
        let Some(split) = data.len().checked_sub(2) else {
            return Err(FormatError::Truncated {
                needed: 2,
                available: data.len(),
            });
        };

        let (payload, sw) = data.split_at(split);
        let status = StatusWord::new(sw[0], sw[1]);

        trace!(
            sw1 = format_args!("{:#04x}", status.sw1),
            sw2 = format_args!("{:#04x}", status.sw2),
            payload_len = payload.len(),
            "Parsed APDU response"
        );

        Ok(Self {
            payload: Bytes::copy_from_slice(payload),
            status,
        })
    }

    /// Get the response payload data
    pub const fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Get the status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Check if the response indicates success
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Take the payload if the status word is `90 00`
    ///
    /// On any other status word the status is returned as the error.
    pub fn into_payload(self) -> Result<Bytes, StatusWord> {
        if self.is_success() {
            Ok(self.payload)
        } else {
            Err(self.status)
        }
    }
}
