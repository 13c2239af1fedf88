//! Attestation chain verification
//!
//! The chain of trust runs root key → attestation certificate → attestation
//! key → secure object signature. The certificate is checked once per
//! session and only the key it carries is kept.

use p256::ecdsa::{Signature, VerifyingKey, signature::hazmat::PrehashVerifier};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};
use x509_parser::prelude::{FromDer, X509Certificate};

use crate::object::{Attributes, ObjectKind, ObjectTag, SecureObjectPayload, StoredObject};
use crate::{Error, Result};

/// Public key certified by the manufacturer root, used to check object reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationKey(VerifyingKey);

impl AttestationKey {
    /// The underlying verifying key
    pub const fn verifying_key(&self) -> &VerifyingKey {
        &self.0
    }

    /// Uncompressed SEC1 encoding of the key
    pub fn to_uncompressed(&self) -> Vec<u8> {
        self.0.to_encoded_point(false).as_bytes().to_vec()
    }

    /// Verify the attestation signature of a secure object
    ///
    /// The signature (TAG_6) covers the concatenation of TAG_1 through TAG_5.
    /// Only after it verifies are the data and attributes returned.
    ///
    /// # Errors
    /// [`Error::Verification`] when the signature is absent, malformed or does
    /// not verify, and [`Error::Format`] when the verified payload lacks data
    /// or carries a malformed attribute blob.
    #[instrument(level = "debug", skip(self, payload))]
    pub fn verify_object(
        &self,
        payload: &SecureObjectPayload,
        kind: ObjectKind,
    ) -> Result<StoredObject> {
        let signature = payload
            .signature
            .as_deref()
            .and_then(parse_signature)
            .ok_or(Error::Verification(kind))?;

        let digest = Sha256::digest(payload.signed_region());
        if self.0.verify_prehash(&digest, &signature).is_err() {
            warn!("Secure object signature rejected");
            return Err(Error::Verification(kind));
        }

        let data = payload.require(ObjectTag::Data)?.clone();
        let attributes = Attributes::parse(payload.require(ObjectTag::Attributes)?)?;
        debug!(
            object_id = format_args!("{:#010x}", attributes.object_id),
            chip_id = %payload.chip_id.as_deref().map(hex::encode).unwrap_or_default(),
            "Secure object verified"
        );

        Ok(StoredObject { data, attributes })
    }
}

impl From<VerifyingKey> for AttestationKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key)
    }
}

/// Verify a DER certificate against the root key and extract its public key
///
/// # Errors
/// [`Error::UntrustedCertificate`] when the certificate cannot be parsed, its
/// signature does not verify under `root_public_key`, or it does not carry a
/// P-256 key. This is never retried.
#[instrument(level = "debug", skip_all, fields(len = der.len()))]
pub fn verify_certificate(der: &[u8], root_public_key: &[u8]) -> Result<AttestationKey> {
    let root = VerifyingKey::from_sec1_bytes(root_public_key)
        .map_err(|_| Error::UntrustedCertificate("root key is not a P-256 point"))?;

    let (_, certificate) = X509Certificate::from_der(der)
        .map_err(|_| Error::UntrustedCertificate("malformed certificate"))?;

    let signature = parse_signature(&certificate.signature_value.data)
        .ok_or(Error::UntrustedCertificate("malformed certificate signature"))?;

    let tbs: &[u8] = certificate.tbs_certificate.as_ref();
    let digest = Sha256::digest(tbs);
    if root.verify_prehash(&digest, &signature).is_err() {
        warn!("Attestation certificate not signed by the root key");
        return Err(Error::UntrustedCertificate("signature does not verify"));
    }

    let key = VerifyingKey::from_sec1_bytes(&certificate.public_key().subject_public_key.data)
        .map_err(|_| Error::UntrustedCertificate("certified key is not a P-256 point"))?;
    debug!("Attestation certificate verified");

    Ok(AttestationKey(key))
}

/// Accept DER encoded signatures and raw 64-byte `r || s`
fn parse_signature(bytes: &[u8]) -> Option<Signature> {
    Signature::from_der(bytes)
        .or_else(|_| Signature::from_slice(bytes))
        .ok()
}
