//! Session setup from command-line arguments

use std::time::Duration;

use nexum_se::SessionConfig;
use nexum_se_apdu::{FormatError, TechnologyOptions, utils::hex_to_bytes};
use nexum_se_transport_pcsc::PcscConfig;

const SCAN_PROMPT: &str = "Hold the card against the reader";

/// Build the session configuration, overriding the trusted root if given
pub(crate) fn session_config(
    root_key: Option<&str>,
    timeout_ms: u64,
) -> Result<SessionConfig, FormatError> {
    let mut config = SessionConfig::new()
        .with_timeout(Duration::from_millis(timeout_ms))
        .with_technology_options(TechnologyOptions::default().with_alert_message(SCAN_PROMPT));

    if let Some(key) = root_key {
        config = config.with_root_public_key(hex_to_bytes(key.trim_start_matches("0x"))?);
    }
    Ok(config)
}

/// Reader selection for the PC/SC transport
pub(crate) fn transport_config(reader: Option<&str>) -> PcscConfig {
    match reader {
        Some(name) => PcscConfig::new().with_reader(name),
        None => PcscConfig::new(),
    }
}
