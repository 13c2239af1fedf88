//! Utility functions for the secure element CLI

pub(crate) mod reader;
pub(crate) mod session;

use nexum_se::Blockchain;

/// Resolve a chain given by name or numeric identifier
///
/// Identifiers outside the supported table are accepted so assets for newer
/// chains can still be written.
pub(crate) fn parse_chain_id(chain: &str) -> Result<u8, String> {
    if let Some(known) = Blockchain::by_name(chain) {
        return Ok(known.id);
    }

    let parsed = match chain.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => chain.parse(),
    };
    parsed.map_err(|_| format!("Unknown chain '{chain}'"))
}
