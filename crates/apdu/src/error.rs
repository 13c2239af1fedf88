//! Error types for byte formats and card transports

/// Malformed hex, TLV or response framing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Hex string with an odd number of digits
    #[error("Hex string has odd length {0}")]
    OddHexLength(usize),

    /// Hex string containing a non-hex character
    #[error("Invalid hex character {c:?} at position {index}")]
    InvalidHexCharacter {
        /// Offending character
        c: char,
        /// Position of the character in the input
        index: usize,
    },

    /// Length that cannot be expressed in a 3-byte BER-TLV length field
    #[error("TLV length {0} exceeds 65535")]
    TlvLengthTooLarge(usize),

    /// Input ended before a complete field could be read
    #[error("Truncated input: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required to complete the field
        needed: usize,
        /// Bytes remaining in the input
        available: usize,
    },

    /// Attribute blob too short for the fixed attribute layout
    #[error("Malformed attribute blob of {0} bytes")]
    MalformedAttributes(usize),

    /// A mandatory TLV tag was absent
    #[error("Missing tag {0:#04x}")]
    MissingTag(u8),
}

/// Transport error type
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Transport is not available on this host
    #[error("Transport not supported on this host")]
    NotSupported,

    /// Transport used before it was started
    #[error("Transport not started")]
    NotStarted,

    /// Requested technology is not offered by the transport
    #[error("Technology not supported: {0}")]
    UnsupportedTechnology(String),

    /// Connection error
    #[error("Failed to connect to device")]
    Connection,

    /// No technology session is active
    #[error("No active technology session")]
    NoSession,

    /// Transmission error
    #[error("Failed to transmit data")]
    Transmission,

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Cancelled operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Other error with message
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Create a general other error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other(message.into())
    }
}
