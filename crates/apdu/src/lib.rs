//! APDU framing and transport primitives for secure elements
//!
//! This crate provides the byte-level building blocks used to talk to a
//! tamper-resistant secure element over a command/response transport:
//!
//! - Byte utilities: hex decoding, 32-byte chunk reordering and BER-TLV lengths
//! - Creating APDU commands in short or extended length form
//! - Splitting responses into payload and status word
//! - The [`CardTransport`] trait consumed by higher protocol layers
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

pub mod command;
pub mod error;
pub mod response;
pub mod transport;
pub mod utils;

pub use command::{ApduCommand, ExpectedLength};
pub use error::{FormatError, TransportError};
pub use response::Response;
pub use response::status::StatusWord;
pub use transport::{CardTransport, Technology, TechnologyOptions};
