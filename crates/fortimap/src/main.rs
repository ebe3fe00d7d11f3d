mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fortimap_core::Provider;

use crate::cli::{Cli, Command};
use crate::commands::Device;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Catalog and payload previews never touch the device
        Command::Resources => commands::catalog::resources(&cli.global),
        Command::Schema(args) => commands::catalog::schema(&args, &cli.global),
        Command::Payload(args) => commands::payload::handle(&args, &cli.global),
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "fortimap", &mut std::io::stdout());
            Ok(())
        }

        // Everything else needs a device connection
        cmd => {
            let (conn, profile) = config::build_connection_config(&cli.global)?;
            let url = conn.url.to_string();
            let provider = Provider::connect(&conn).map_err(|e| CliError::from_core(e, &url, &profile))?;
            let mut device = Device { provider, url, profile };

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut device, &cli.global).await
        }
    }
}
