mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fourpaws_config::SessionFile;
use fourpaws_core::Platform;

use crate::cli::{Cli, Command};
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
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands work on the local file and never touch the backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "fourpaws", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the backend through a platform
        cmd => {
            let platform = build_platform(&cli.global)?;

            // Restores a persisted session (if any) and starts the
            // expiry forwarder before the first command runs.
            let state = platform.start().await;
            tracing::debug!(?state, command = ?cmd, "dispatching command");

            let result = commands::dispatch(cmd, &platform, &cli.global).await;
            platform.shutdown().await;
            result
        }
    }
}

/// Build a `Platform` from the config file, environment, and CLI overrides.
fn build_platform(global: &cli::GlobalOpts) -> Result<Platform, CliError> {
    let mut settings = fourpaws_config::load_settings()?;

    // CLI flags win over both the file and the environment.
    if let Some(ref backend) = global.backend {
        settings.backend = backend.clone();
    }
    if let Some(timeout) = global.timeout {
        settings.timeout = timeout;
    }

    let config = settings.platform_config()?;
    let credentials = Arc::new(SessionFile::default_location());
    Ok(Platform::with_credentials(config, credentials)?)
}
