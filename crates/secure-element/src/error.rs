use nexum_se_apdu::{FormatError, StatusWord, TransportError};

use crate::object::ObjectKind;

/// Result type for secure element operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for secure element operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport is unavailable or could not be started
    #[error("Secure element transport not supported on this device")]
    NotSupported,

    /// The element answered a command with a non-success status word
    #[error("{description} failed with status {status} ({})", status.description())]
    ChipCommand {
        /// Step that failed
        description: &'static str,
        /// Status word returned by the element
        status: StatusWord,
    },

    /// Attestation certificate not signed by the trusted root
    #[error("Untrusted attestation certificate: {0}")]
    UntrustedCertificate(&'static str),

    /// Secure object signature did not verify against the attestation key
    #[error("Attestation of the {0} object failed to verify")]
    Verification(ObjectKind),

    /// Object attributes do not match the expected policy
    #[error("{kind} object violates policy: {reason}")]
    PolicyViolation {
        /// Object that was checked
        kind: ObjectKind,
        /// Attribute that did not match
        reason: &'static str,
    },

    /// Payload exceeds the signable limit
    #[error("Payload of {len} bytes exceeds the {max} byte limit")]
    PayloadTooLarge {
        /// Length supplied by the caller
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Malformed hex, TLV or attribute data
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Transport I/O failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}
