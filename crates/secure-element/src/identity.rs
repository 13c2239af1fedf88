use bytes::Bytes;
use nexum_se_apdu::utils::to_little_endian_chunks;

use crate::chains::Blockchain;
use crate::object::StoredObject;

/// Result of reading an object that may be provisioned on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Object was already present
    Found(StoredObject),
    /// Object was created and read back
    CreatedThenFound(StoredObject),
    /// Object is absent and no provisioning was attempted
    NotAvailable,
}

impl ReadOutcome {
    /// The object, if one was read
    pub const fn object(&self) -> Option<&StoredObject> {
        match self {
            Self::Found(object) | Self::CreatedThenFound(object) => Some(object),
            Self::NotAvailable => None,
        }
    }

    /// Take the object, if one was read
    pub fn into_object(self) -> Option<StoredObject> {
        match self {
            Self::Found(object) | Self::CreatedThenFound(object) => Some(object),
            Self::NotAvailable => None,
        }
    }

    /// Whether the object was created during this read
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::CreatedThenFound(_))
    }
}

/// Verified identity material read from the element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Public key bytes, reversed per 32-byte chunk
    pub wallet_address: Bytes,
    /// The verified public key object as stored
    pub public_key: StoredObject,
    /// Whether the key was generated during this read
    pub key_created: bool,
    /// Asset identifier without its chain id prefix
    pub asset: Option<Bytes>,
    /// Chain named by the asset's leading byte
    pub blockchain: Option<Blockchain>,
}

impl Identity {
    pub(crate) fn new(key: ReadOutcome, asset: ReadOutcome) -> Option<Self> {
        let key_created = key.was_created();
        let public_key = key.into_object()?;
        let wallet_address = to_little_endian_chunks(&public_key.data);

        let (asset, blockchain) = match asset.into_object() {
            Some(object) => match object.data.first() {
                Some(&chain_id) => (Some(object.data.slice(1..)), Blockchain::by_id(chain_id)),
                None => (Some(Bytes::new()), None),
            },
            None => (None, None),
        };

        Some(Self {
            wallet_address,
            public_key,
            key_created,
            asset,
            blockchain,
        })
    }
}
