use nexum_se::Session;
use nexum_se_apdu::utils::hex_to_bytes;
use nexum_se_transport_pcsc::PcscTransport;

use crate::utils::parse_chain_id;

/// Write an asset record and confirm it
pub(crate) fn provision_asset_command(
    session: &mut Session<PcscTransport>,
    chain: &str,
    asset: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let chain_id = parse_chain_id(chain)?;
    let asset = hex_to_bytes(asset.trim_start_matches("0x"))?;
    session.provision_asset(chain_id, &asset)?;

    println!("Asset provisioned for chain {chain_id} ({} bytes)", asset.len());
    Ok(())
}
