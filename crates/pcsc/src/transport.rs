//! PC/SC transport implementation

use std::{ffi::CString, fmt, time::Duration};

use bytes::Bytes;
use nexum_se_apdu::{CardTransport, Technology, TechnologyOptions, TransportError};
use pcsc::{Card, Context, Disposition, MAX_BUFFER_SIZE_EXTENDED, Scope};
use tracing::{debug, info};

use crate::{
    config::PcscConfig,
    error::PcscError,
    manager::list_readers,
    reader::select_reader,
};

/// Transport implementation using PC/SC
///
/// The context is established by [`CardTransport::start`] and a card
/// connection is held between a technology request and its cancellation.
pub struct PcscTransport {
    /// PC/SC context
    context: Option<Context>,
    /// Card connection, if established
    card: Option<Card>,
    /// Reader the card was found in
    reader_name: Option<String>,
    /// Configuration
    config: PcscConfig,
    /// Last timeout passed to `set_timeout`, kept for inspection only
    timeout: Option<Duration>,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("started", &self.context.is_some())
            .field("reader_name", &self.reader_name)
            .field("has_card", &self.card.is_some())
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PcscTransport {
    /// Create a transport that establishes its own context on start
    pub const fn new(config: PcscConfig) -> Self {
        Self {
            context: None,
            card: None,
            reader_name: None,
            config,
            timeout: None,
        }
    }

    pub(crate) const fn with_context(context: Context, config: PcscConfig) -> Self {
        Self {
            context: Some(context),
            card: None,
            reader_name: None,
            config,
            timeout: None,
        }
    }

    /// Name of the connected reader
    pub fn reader_name(&self) -> Option<&str> {
        self.reader_name.as_deref()
    }

    /// Check if the transport is connected to a card
    pub const fn has_card(&self) -> bool {
        self.card.is_some()
    }

    /// Timeout last passed to [`CardTransport::set_timeout`]
    ///
    /// PC/SC transmits block until the reader answers, so the value is only
    /// recorded and never applied. Sessions do not call `set_timeout` on this
    /// transport because [`CardTransport::requires_timeout`] is `false`.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Get the ATR of the current card
    pub fn atr(&self) -> Result<Vec<u8>, PcscError> {
        self.card.as_ref().map_or_else(
            || Err(PcscError::NoCard(self.reader_name.clone().unwrap_or_default())),
            |card| {
                card.get_attribute_owned(pcsc::Attribute::AtrString)
                    .map_err(Into::into)
            },
        )
    }

    fn connect_card(&mut self) -> Result<(), PcscError> {
        if self.card.is_some() {
            return Ok(());
        }
        let context = self.context.as_ref().ok_or(PcscError::NoContext)?;

        let readers = list_readers(context)?;
        let reader = select_reader(&readers, self.config.reader.as_deref()).ok_or_else(|| {
            match &self.config.reader {
                Some(name) => PcscError::ReaderNotFound(name.clone()),
                None => PcscError::NoCard("No reader with card found".to_string()),
            }
        })?;

        let reader_cstr = CString::new(reader.name())
            .map_err(|_| PcscError::ReaderNotFound(reader.name().to_string()))?;

        let card = match context.connect(
            &reader_cstr,
            self.config.share_mode.into(),
            self.config.protocols,
        ) {
            Ok(card) => card,
            Err(pcsc::Error::NoSmartcard) => {
                return Err(PcscError::NoCard(reader.name().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            reader = reader.name(),
            atr = %reader.atr().map(hex::encode).unwrap_or_default(),
            "Connected to card"
        );
        self.reader_name = Some(reader.name().to_string());
        self.card = Some(card);
        Ok(())
    }
}

impl CardTransport for PcscTransport {
    fn is_supported(&self) -> bool {
        self.context.is_some() || Context::establish(Scope::User).is_ok()
    }

    fn start(&mut self) -> Result<(), TransportError> {
        if self.context.is_none() {
            let context = Context::establish(Scope::User).map_err(PcscError::from)?;
            self.context = Some(context);
        }
        Ok(())
    }

    fn request_technology(
        &mut self,
        technology: Technology,
        options: &TechnologyOptions,
    ) -> Result<(), TransportError> {
        match technology {
            Technology::IsoDep => {}
            other => return Err(TransportError::UnsupportedTechnology(other.to_string())),
        }

        if let Some(message) = &options.alert_message {
            info!("{message}");
        }
        self.connect_card().map_err(Into::into)
    }

    fn cancel_technology_request(&mut self) -> Result<(), TransportError> {
        self.reader_name = None;
        if let Some(card) = self.card.take() {
            card.disconnect(Disposition::LeaveCard)
                .map_err(|(_, e)| PcscError::from(e))?;
        }
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        debug!(?timeout, "Recording exchange timeout");
        self.timeout = Some(timeout);
        Ok(())
    }

    fn do_transceive(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        let card = self.card.as_ref().ok_or(TransportError::NoSession)?;

        let mut response_buffer = vec![0u8; MAX_BUFFER_SIZE_EXTENDED];
        match card.transmit(command, &mut response_buffer) {
            Ok(response) => Ok(Bytes::copy_from_slice(response)),
            Err(e) => {
                // If card was reset or removed, clear our reference
                if matches!(e, pcsc::Error::ResetCard | pcsc::Error::RemovedCard) {
                    self.card = None;
                }
                Err(PcscError::from(e).into())
            }
        }
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        if let Some(card) = self.card.take() {
            let _ = card.disconnect(Disposition::LeaveCard);
        }
    }
}
