//! Attribute policies a stored object must satisfy before it is trusted

use bytes::Bytes;

use crate::constants::attributes::{
    AUTH_OBJECT, CLASS_KEY, DATA_POLICY, KEY_POLICY, ORIGIN_INTERNAL,
};
use crate::object::{Attributes, ObjectKind};
use crate::{Error, Result};

/// Expected attribute values for one kind of object
///
/// `None` fields are not checked. The policy bytes always are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPolicy {
    /// Required object class
    pub object_class: Option<u8>,
    /// Required origin
    pub origin: Option<u8>,
    /// Authentication indicator the object must not carry
    pub forbidden_authentication_indicator: Option<u8>,
    /// Exact policy bytes
    pub policy: Bytes,
}

impl ObjectPolicy {
    /// Policy of a signing key generated inside the element
    pub const fn signing_key() -> Self {
        Self {
            object_class: Some(CLASS_KEY),
            origin: Some(ORIGIN_INTERNAL),
            forbidden_authentication_indicator: Some(AUTH_OBJECT),
            policy: Bytes::from_static(&KEY_POLICY),
        }
    }

    /// Policy of a write-once data object
    pub const fn data_object() -> Self {
        Self {
            object_class: None,
            origin: None,
            forbidden_authentication_indicator: None,
            policy: Bytes::from_static(&DATA_POLICY),
        }
    }

    /// Check `attributes` of a `kind` object against this policy
    ///
    /// # Errors
    /// Returns [`Error::PolicyViolation`] naming the first attribute that
    /// does not match.
    pub fn check(&self, kind: ObjectKind, attributes: &Attributes) -> Result<()> {
        let violation = |reason| Err(Error::PolicyViolation { kind, reason });

        if self
            .object_class
            .is_some_and(|class| class != attributes.object_class)
        {
            return violation("unexpected object class");
        }
        if self.origin.is_some_and(|origin| origin != attributes.origin) {
            return violation("object not generated on chip");
        }
        if self
            .forbidden_authentication_indicator
            .is_some_and(|indicator| indicator == attributes.authentication_indicator)
        {
            return violation("object is an authentication object");
        }
        if attributes.policy != self.policy {
            return violation("unexpected policy bytes");
        }

        Ok(())
    }
}
