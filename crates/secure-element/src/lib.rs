//! Attested identity reads and payload signing for hardware secure elements
//!
//! The crate establishes trust between an untrusted host and a secure chip:
//! a manufacturer root key certifies an attestation key, and the attestation
//! key signs every object read back from the element. A [`Session`] drives a
//! [`CardTransport`] through applet selection, attested reads, key
//! generation on first use and payload signing.
//!
//! ```no_run
//! # fn run<T: nexum_se_apdu::CardTransport>(transport: T) -> nexum_se::Result<()> {
//! use nexum_se::{Session, SessionConfig};
//!
//! let mut session = Session::new(transport, SessionConfig::default());
//! let identity = session.read_identity()?;
//! println!("wallet {}", hex::encode(&identity.wallet_address));
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod attestation;
pub mod chains;
pub mod commands;
pub mod config;
pub mod constants;
mod error;
pub mod identity;
pub mod object;
pub mod policy;
pub mod session;

pub use attestation::{AttestationKey, verify_certificate};
pub use chains::Blockchain;
pub use config::{ObjectIds, SessionConfig};
pub use error::{Error, Result};
pub use identity::{Identity, ReadOutcome};
pub use object::{Attributes, ObjectKind, ObjectTag, SecureObjectPayload, StoredObject};
pub use policy::ObjectPolicy;
pub use session::{Session, SessionState, check_status};

pub use nexum_se_apdu::{CardTransport, Technology, TechnologyOptions};
