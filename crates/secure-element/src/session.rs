//! Session orchestration over a card transport
//!
//! A [`Session`] sequences applet selection, attested reads, the
//! read-or-create fallback and policy enforcement. Every top-level operation
//! acquires the transport technology through a guard that releases it exactly
//! once when the operation ends, whatever the outcome.

use bytes::Bytes;
use derive_more::Display;
use nexum_se_apdu::{
    ApduCommand, CardTransport, Response, Technology, utils::to_little_endian_chunks,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::attestation::{AttestationKey, verify_certificate};
use crate::commands::{CreateAddress, CreateAsset, ReadObject, SelectApplet, SignPayload};
use crate::config::SessionConfig;
use crate::identity::{Identity, ReadOutcome};
use crate::object::{ObjectKind, SecureObjectPayload, StoredObject};
use crate::{Error, Result};

/// Lifecycle of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SessionState {
    /// Transport not yet probed
    Uninitialized,
    /// Transport supported and started
    Ready,
    /// Reading the attested identity
    ReadingIdentity,
    /// Signing a payload
    Signing,
    /// Writing an asset identifier
    Provisioning,
    /// Last operation succeeded and the transport was released
    Done,
    /// Last operation failed and the transport was released
    Closed,
    /// Transport unavailable, every operation fails
    Unsupported,
}

/// Check the status word of a raw response and strip it
///
/// # Errors
/// [`Error::ChipCommand`] carrying `description` for any status other than
/// `90 00`, and [`Error::Format`] for responses shorter than a status word.
pub fn check_status(raw: &[u8], description: &'static str) -> Result<Bytes> {
    let response = Response::from_bytes(raw)?;
    response.into_payload().map_err(|status| {
        debug!(%status, description, "Command rejected");
        Error::ChipCommand {
            description,
            status,
        }
    })
}

/// Secure element session bound to one transport
#[derive(Debug)]
pub struct Session<T: CardTransport> {
    transport: T,
    config: SessionConfig,
    state: SessionState,
}

impl<T: CardTransport> Session<T> {
    /// Create a session, probing and starting the transport
    ///
    /// A transport that is unsupported or fails to start leaves the session
    /// in [`SessionState::Unsupported`]; operations then fail with
    /// [`Error::NotSupported`].
    pub fn new(transport: T, config: SessionConfig) -> Self {
        let mut session = Self {
            transport,
            config,
            state: SessionState::Uninitialized,
        };
        session.initialize();
        session
    }

    fn initialize(&mut self) {
        if !self.transport.is_supported() {
            warn!("Secure element transport not supported");
            self.state = SessionState::Unsupported;
            return;
        }

        self.state = match self.transport.start() {
            Ok(()) => SessionState::Ready,
            Err(e) => {
                warn!(error = %e, "Failed to start secure element transport");
                SessionState::Unsupported
            }
        };
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Session configuration
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the session and return the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Read and verify the element's identity
    ///
    /// Verifies the attestation certificate, reads the chain public key
    /// (generating it once if absent), then reads the optional asset. Both
    /// objects must carry a valid attestation signature and the configured
    /// policy.
    #[instrument(skip(self))]
    pub fn read_identity(&mut self) -> Result<Identity> {
        let mut link = self.open(SessionState::ReadingIdentity)?;
        let identity = link.read_identity()?;
        link.complete();
        Ok(identity)
    }

    /// Sign a raw payload
    ///
    /// Returns the element's response with each 32-byte chunk reversed.
    ///
    /// # Errors
    /// [`Error::PayloadTooLarge`] before any I/O when the payload exceeds the
    /// configured maximum.
    #[instrument(skip(self, payload), fields(len = payload.len()))]
    pub fn sign_raw_payload(&mut self, payload: &[u8]) -> Result<Bytes> {
        self.check_payload_len(payload.len())?;

        let mut link = self.open(SessionState::Signing)?;
        let command = SignPayload::new(link.session.config.sign_chain_id, payload);
        let signature = link.exchange(&command, "Sign payload")?;
        link.complete();

        Ok(to_little_endian_chunks(&signature))
    }

    /// Store an asset identifier for `chain_id` in the asset slot
    ///
    /// The read path never creates the asset; this is the only way to write
    /// it.
    #[instrument(skip(self, asset), fields(len = asset.len()))]
    pub fn provision_asset(&mut self, chain_id: u8, asset: &[u8]) -> Result<()> {
        self.check_payload_len(asset.len())?;
        let command = CreateAsset::new(self.config.objects.asset, chain_id, asset)?;

        let mut link = self.open(SessionState::Provisioning)?;
        link.exchange(&command, "Create asset")?;
        link.complete();
        info!("Asset provisioned");

        Ok(())
    }

    fn check_payload_len(&self, len: usize) -> Result<()> {
        let max = self.config.max_payload_len;
        if len > max {
            return Err(Error::PayloadTooLarge { len, max });
        }
        Ok(())
    }

    /// Acquire the technology and select the applet
    ///
    /// The returned guard releases the technology when dropped, including
    /// when activation itself fails.
    fn open(&mut self, operation: SessionState) -> Result<Link<'_, T>> {
        if matches!(
            self.state,
            SessionState::Unsupported | SessionState::Uninitialized
        ) {
            return Err(Error::NotSupported);
        }

        let mut link = Link {
            session: self,
            completed: false,
        };
        link.activate(operation)?;
        Ok(link)
    }
}

/// Active technology request, released on drop
struct Link<'a, T: CardTransport> {
    session: &'a mut Session<T>,
    completed: bool,
}

impl<T: CardTransport> Link<'_, T> {
    fn activate(&mut self, operation: SessionState) -> Result<()> {
        let session = &mut *self.session;
        session
            .transport
            .request_technology(Technology::IsoDep, &session.config.technology_options)?;

        if session.transport.requires_timeout() {
            session.transport.set_timeout(session.config.timeout)?;
        }

        let select = SelectApplet::new(session.config.aid.clone());
        self.exchange(&select, "Select applet")?;
        trace!(%operation, "Applet selected");
        self.session.state = operation;
        Ok(())
    }

    fn complete(&mut self) {
        self.completed = true;
    }

    fn exchange(&mut self, command: &impl ApduCommand, description: &'static str) -> Result<Bytes> {
        let raw = self.session.transport.transceive(&command.to_bytes())?;
        check_status(&raw, description)
    }

    fn read_identity(&mut self) -> Result<Identity> {
        let objects = self.session.config.objects;

        let certificate = self.exchange(
            &ReadObject::new(objects.attestation_certificate),
            "Read attestation certificate",
        )?;
        let key = verify_certificate(&certificate, &self.session.config.root_public_key)?;

        let public_key = self.read_or_create_key(&key)?;
        if let Some(object) = public_key.object() {
            self.session
                .config
                .key_policy
                .check(ObjectKind::PublicKey, &object.attributes)?;
        }

        let asset = match self.try_read_attested(&key, objects.asset, ObjectKind::Asset)? {
            Some(object) => {
                self.session
                    .config
                    .asset_policy
                    .check(ObjectKind::Asset, &object.attributes)?;
                ReadOutcome::Found(object)
            }
            None => {
                debug!("No asset provisioned");
                ReadOutcome::NotAvailable
            }
        };

        Identity::new(public_key, asset).ok_or(Error::Verification(ObjectKind::PublicKey))
    }

    /// Read the chain key, generating it and retrying exactly once if absent
    fn read_or_create_key(&mut self, key: &AttestationKey) -> Result<ReadOutcome> {
        let objects = self.session.config.objects;
        if let Some(object) =
            self.try_read_attested(key, objects.public_key, ObjectKind::PublicKey)?
        {
            return Ok(ReadOutcome::Found(object));
        }

        debug!("Public key absent, generating it");
        let create = CreateAddress::new(objects.public_key, self.session.config.curve);
        self.exchange(&create, "Create address")?;

        let object = self.read_attested(key, objects.public_key, ObjectKind::PublicKey)?;
        Ok(ReadOutcome::CreatedThenFound(object))
    }

    /// Attested read where a rejected command means the object is absent
    fn try_read_attested(
        &mut self,
        key: &AttestationKey,
        object_id: u32,
        kind: ObjectKind,
    ) -> Result<Option<StoredObject>> {
        match self.read_attested(key, object_id, kind) {
            Ok(object) => Ok(Some(object)),
            Err(Error::ChipCommand { status, .. }) => {
                debug!(%kind, %status, "Object not available");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn read_attested(
        &mut self,
        key: &AttestationKey,
        object_id: u32,
        kind: ObjectKind,
    ) -> Result<StoredObject> {
        let description = match kind {
            ObjectKind::PublicKey => "Read public key",
            ObjectKind::Asset => "Read asset",
            ObjectKind::Certificate => "Read attestation certificate",
        };
        let command = ReadObject::attested(object_id, self.session.config.objects.attestation_key);
        let body = self.exchange(&command, description)?;
        let payload = SecureObjectPayload::parse(&body)?;
        key.verify_object(&payload, kind)
    }
}

impl<T: CardTransport> Drop for Link<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.session.transport.cancel_technology_request() {
            warn!(error = %e, "Failed to release technology request");
        }
        self.session.state = if self.completed {
            SessionState::Done
        } else {
            SessionState::Closed
        };
    }
}
