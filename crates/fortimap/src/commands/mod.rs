//! Command dispatch: bridges CLI args -> provider handlers -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod payload;
pub mod resource;
pub mod util;

use fortimap_api::RestClient;
use fortimap_core::{CoreError, Provider};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// A connected device plus what diagnostics need to name it.
pub struct Device {
    pub provider: Provider<RestClient>,
    pub url: String,
    pub profile: String,
}

impl Device {
    pub fn error(&self, err: CoreError) -> CliError {
        CliError::from_core(err, &self.url, &self.profile)
    }
}

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, device: &mut Device, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Read(args) => resource::read(device, &args, global).await,
        Command::List(args) => resource::list(device, &args, global).await,
        Command::Apply(args) => resource::apply(device, &args, global).await,
        Command::Destroy(args) => resource::destroy(device, &args, global).await,
        // Offline commands are handled before dispatch
        Command::Resources
        | Command::Schema(_)
        | Command::Payload(_)
        | Command::Config(_)
        | Command::Completions(_) => unreachable!(),
    }
}
