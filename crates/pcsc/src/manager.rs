//! Device manager for PC/SC operations

use pcsc::{Context, Scope};

use crate::config::PcscConfig;
use crate::error::PcscError;
use crate::reader::PcscReader;
use crate::transport::PcscTransport;

/// Manager for PC/SC device operations
#[allow(missing_debug_implementations)]
pub struct PcscDeviceManager {
    /// PC/SC context
    context: Context,
}

impl PcscDeviceManager {
    /// Create a new PC/SC device manager
    pub fn new() -> Result<Self, PcscError> {
        let context = Context::establish(Scope::User)?;
        Ok(Self { context })
    }

    /// List all available card readers
    pub fn list_readers(&self) -> Result<Vec<PcscReader>, PcscError> {
        list_readers(&self.context)
    }

    /// Create a transport sharing this manager's context
    pub fn open(&self, config: PcscConfig) -> PcscTransport {
        PcscTransport::with_context(self.context.clone(), config)
    }
}

/// List readers known to `context` along with card presence
pub(crate) fn list_readers(context: &Context) -> Result<Vec<PcscReader>, PcscError> {
    let readers = context.list_readers_owned()?;
    if readers.is_empty() {
        return Err(PcscError::NoReadersAvailable);
    }

    let mut result = Vec::with_capacity(readers.len());
    for reader_name in readers {
        let mut reader_states = vec![pcsc::ReaderState::new(
            reader_name.as_c_str(),
            pcsc::State::UNAWARE,
        )];

        match context.get_status_change(None, &mut reader_states) {
            Ok(()) => result.push(PcscReader::from_reader_state(&reader_states[0])),
            // If we can't get status, assume no card
            Err(_) => result.push(PcscReader::new(
                reader_name.to_string_lossy().into_owned(),
                false,
                None,
            )),
        }
    }

    Ok(result)
}
