//! Session configuration

use std::time::Duration;

use bytes::Bytes;
use nexum_se_apdu::TechnologyOptions;

use crate::constants::{
    DEFAULT_TIMEOUT_MS, MAX_SIGN_PAYLOAD_LEN, ROOT_PUBLIC_KEY, SE_APPLET_AID, SIGN_CHAIN_ID,
    curves, objects,
};
use crate::policy::ObjectPolicy;

/// Identifiers of the secure objects a session touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectIds {
    /// Asset identifier slot
    pub asset: u32,
    /// Chain public key slot
    pub public_key: u32,
    /// Attestation key used to sign object reads
    pub attestation_key: u32,
    /// Certificate of the attestation key
    pub attestation_certificate: u32,
}

impl Default for ObjectIds {
    fn default() -> Self {
        Self {
            asset: objects::ASSET,
            public_key: objects::PUBLIC_KEY,
            attestation_key: objects::ATTESTATION_KEY,
            attestation_certificate: objects::ATTESTATION_CERTIFICATE,
        }
    }
}

/// Immutable configuration passed to a [`Session`](crate::Session)
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Applet to select
    pub aid: Bytes,
    /// Secure object identifiers
    pub objects: ObjectIds,
    /// Uncompressed root public key the attestation certificate must chain to
    pub root_public_key: Bytes,
    /// Curve used when generating the chain key
    pub curve: u8,
    /// Chain identifier sent with sign commands
    pub sign_chain_id: u8,
    /// Largest payload accepted for signing or provisioning
    pub max_payload_len: usize,
    /// Exchange timeout, applied only on transports that need it
    pub timeout: Duration,
    /// Options passed with the technology request
    pub technology_options: TechnologyOptions,
    /// Attributes required of the chain key
    pub key_policy: ObjectPolicy,
    /// Attributes required of the asset object
    pub asset_policy: ObjectPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            aid: Bytes::from_static(&SE_APPLET_AID),
            objects: ObjectIds::default(),
            root_public_key: Bytes::from_static(&ROOT_PUBLIC_KEY),
            curve: curves::NIST_P256,
            sign_chain_id: SIGN_CHAIN_ID,
            max_payload_len: MAX_SIGN_PAYLOAD_LEN,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            technology_options: TechnologyOptions::default(),
            key_policy: ObjectPolicy::signing_key(),
            asset_policy: ObjectPolicy::data_object(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration with the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the applet identifier
    pub fn with_aid(mut self, aid: impl Into<Bytes>) -> Self {
        self.aid = aid.into();
        self
    }

    /// Set the secure object identifiers
    pub fn with_objects(mut self, objects: ObjectIds) -> Self {
        self.objects = objects;
        self
    }

    /// Set the trusted root public key
    pub fn with_root_public_key(mut self, key: impl Into<Bytes>) -> Self {
        self.root_public_key = key.into();
        self
    }

    /// Set the curve for chain key generation
    pub fn with_curve(mut self, curve: u8) -> Self {
        self.curve = curve;
        self
    }

    /// Set the chain identifier used by sign commands
    pub fn with_sign_chain_id(mut self, chain_id: u8) -> Self {
        self.sign_chain_id = chain_id;
        self
    }

    /// Set the payload size limit
    pub fn with_max_payload_len(mut self, len: usize) -> Self {
        self.max_payload_len = len;
        self
    }

    /// Set the exchange timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the technology request options
    pub fn with_technology_options(mut self, options: TechnologyOptions) -> Self {
        self.technology_options = options;
        self
    }

    /// Set the chain key policy
    pub fn with_key_policy(mut self, policy: ObjectPolicy) -> Self {
        self.key_policy = policy;
        self
    }

    /// Set the asset object policy
    pub fn with_asset_policy(mut self, policy: ObjectPolicy) -> Self {
        self.asset_policy = policy;
        self
    }
}
