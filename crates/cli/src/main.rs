//! Command-line interface for attested secure element sessions

use clap::{Parser, Subcommand};
use nexum_se::{Session, constants::DEFAULT_TIMEOUT_MS};
use nexum_se_transport_pcsc::PcscDeviceManager;
use tracing::debug;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod commands;
mod utils;

use commands::*;
use utils::{reader::list_readers, session};

#[derive(Parser)]
#[command(version, about = "Read, verify and sign with an attested secure element")]
struct Cli {
    /// Optional reader name to use (will auto-detect if not specified)
    #[arg(short, long)]
    reader: Option<String>,

    /// Root public key in hex (uncompressed P-256) trusted to certify attestation keys
    #[arg(long)]
    root_key: Option<String>,

    /// Exchange timeout in milliseconds for transports that need one
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Trace level output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers
    List,

    /// Read and verify the wallet identity held by the secure element
    Read,

    /// Sign a raw payload with the on-chip key
    Sign {
        /// Payload in hex
        #[arg(required = true)]
        data: String,
    },

    /// Write an asset record for a chain
    ProvisionAsset {
        /// Chain name (e.g. ethereum) or numeric identifier
        #[arg(required = true)]
        chain: String,

        /// Asset bytes in hex
        #[arg(required = true)]
        asset: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let manager = PcscDeviceManager::new()?;

    if matches!(cli.command, Commands::List) {
        list_readers(&manager)?;
        return Ok(());
    }

    let config = session::session_config(cli.root_key.as_deref(), cli.timeout_ms)?;
    let transport = manager.open(session::transport_config(cli.reader.as_deref()));
    let mut session = Session::new(transport, config);
    debug!(state = %session.state(), "Session created");

    match &cli.command {
        Commands::List => unreachable!(), // Already handled above
        Commands::Read => read_command(&mut session)?,
        Commands::Sign { data } => sign_command(&mut session, data)?,
        Commands::ProvisionAsset { chain, asset } => {
            provision_asset_command(&mut session, chain, asset)?
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, &directives))
        .with_ansi(true)
        .init();
}

/// `RUST_LOG` style directives on top of a default level chosen by `--verbose`
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}
