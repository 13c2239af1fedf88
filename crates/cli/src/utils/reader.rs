use nexum_se_transport_pcsc::PcscDeviceManager;

/// List all available readers
pub(crate) fn list_readers(manager: &PcscDeviceManager) -> Result<(), Box<dyn std::error::Error>> {
    let readers = manager.list_readers()?;

    if readers.is_empty() {
        println!("No readers found!");
        return Ok(());
    }

    println!("Available readers:");
    for (i, reader) in readers.iter().enumerate() {
        let status = if reader.has_card() {
            "card present"
        } else {
            "no card"
        };
        match reader.atr() {
            Some(atr) => println!("{}. {} ({}, ATR {})", i + 1, reader.name(), status, hex::encode(atr)),
            None => println!("{}. {} ({})", i + 1, reader.name(), status),
        }
    }

    Ok(())
}
