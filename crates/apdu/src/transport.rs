//! Transport traits for APDU communication with secure elements
//!
//! A transport owns the physical link (contact-less reader, phone NFC stack,
//! PC/SC reader) and moves raw bytes. It has no knowledge of command
//! structure, status words or attestation.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::TransportError;

/// Link technology requested from a transport before exchanging APDUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Technology {
    /// ISO 14443-4 contact-less transport carrying APDUs
    IsoDep,
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsoDep => write!(f, "IsoDep"),
        }
    }
}

/// Options passed along with a technology request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechnologyOptions {
    /// Message shown by platforms that display a scanning prompt
    pub alert_message: Option<String>,
}

impl TechnologyOptions {
    /// Set the scanning prompt message
    pub fn with_alert_message(mut self, message: impl Into<String>) -> Self {
        self.alert_message = Some(message.into());
        self
    }
}

/// Trait for secure element transports
///
/// Exactly one exchange is in flight at a time; callers wait for
/// [`CardTransport::transceive`] to return before sending the next command.
pub trait CardTransport: Send + fmt::Debug {
    /// Whether this host offers the transport at all
    fn is_supported(&self) -> bool;

    /// Start the transport (initialise the platform stack)
    fn start(&mut self) -> Result<(), TransportError>;

    /// Acquire a link to a card using the requested technology
    fn request_technology(
        &mut self,
        technology: Technology,
        options: &TechnologyOptions,
    ) -> Result<(), TransportError>;

    /// Release the link acquired by [`CardTransport::request_technology`]
    fn cancel_technology_request(&mut self) -> Result<(), TransportError>;

    /// Configure the per-exchange timeout
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError>;

    /// Whether the default exchange timeout is too short for attested reads
    ///
    /// Sessions only call [`CardTransport::set_timeout`] when this is `true`.
    fn requires_timeout(&self) -> bool {
        false
    }

    /// Send raw APDU bytes to the card and return the response bytes
    fn transceive(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        trace!(command = %hex::encode(command), "Transmitting raw command");
        let result = self.do_transceive(command);
        match &result {
            Ok(response) => {
                trace!(response = %hex::encode(response), "Received raw response");
            }
            Err(e) => {
                debug!(error = ?e, "Transport error during transmission");
            }
        }
        result
    }

    /// Internal implementation of transceive
    /// This is the method that concrete implementations should override
    fn do_transceive(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;
}
