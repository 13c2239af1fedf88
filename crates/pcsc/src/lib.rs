//! PC/SC transport for secure element sessions
//!
//! This crate provides an implementation of the `CardTransport` trait from
//! `nexum-se-apdu` using the PC/SC API, which also exposes contact-less
//! ISO-DEP cards held against a desktop reader.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nexum_se_apdu::{CardTransport, Technology, TechnologyOptions};
//! use nexum_se_transport_pcsc::{PcscConfig, PcscDeviceManager};
//!
//! let manager = PcscDeviceManager::new()?;
//! for reader in manager.list_readers()? {
//!     println!("{} (card: {})", reader.name(), reader.has_card());
//! }
//!
//! let mut transport = manager.open(PcscConfig::default());
//! transport.start()?;
//! transport.request_technology(Technology::IsoDep, &TechnologyOptions::default())?;
//! let response = transport.transceive(&[0x00, 0xA4, 0x04, 0x00, 0x00])?;
//! println!("Response: {}", hex::encode(&response));
//! transport.cancel_technology_request()?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;

pub use config::{PcscConfig, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;

// Re-export some pcsc types for convenience
pub use pcsc::{Protocol, Protocols};
