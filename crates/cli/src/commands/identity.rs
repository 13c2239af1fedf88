use nexum_se::Session;
use nexum_se_transport_pcsc::PcscTransport;
use tracing::info;

/// Read the attested identity and print it
pub(crate) fn read_command(
    session: &mut Session<PcscTransport>,
) -> Result<(), Box<dyn std::error::Error>> {
    let identity = session.read_identity()?;
    if identity.key_created {
        info!("Generated a new signing key");
    }

    println!("Identity verified:");
    println!("  Wallet address: {}", hex::encode(&identity.wallet_address));
    println!("  Public key:     {}", hex::encode(&identity.public_key.data));
    println!("  Key created:    {}", if identity.key_created { "yes" } else { "no" });

    match (&identity.asset, identity.blockchain) {
        (Some(asset), Some(chain)) => {
            println!("  Blockchain:     {chain} ({})", chain.id);
            println!("  Asset:          {}", hex::encode(asset));
        }
        (Some(asset), None) => {
            println!("  Blockchain:     unknown");
            println!("  Asset:          {}", hex::encode(asset));
        }
        (None, _) => println!("  Asset:          not provisioned"),
    }

    Ok(())
}
