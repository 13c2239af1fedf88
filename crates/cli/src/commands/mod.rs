//! Subcommand implementations

mod identity;
mod provision;
mod sign;

pub(crate) use identity::read_command;
pub(crate) use provision::provision_asset_command;
pub(crate) use sign::sign_command;
