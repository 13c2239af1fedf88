use nexum_se::Session;
use nexum_se_apdu::utils::hex_to_bytes;
use nexum_se_transport_pcsc::PcscTransport;

/// Sign a hex payload and print the signature
pub(crate) fn sign_command(
    session: &mut Session<PcscTransport>,
    data: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = hex_to_bytes(data.trim_start_matches("0x"))?;
    let signature = session.sign_raw_payload(&payload)?;

    println!("Signature: {}", hex::encode(&signature));
    Ok(())
}
