mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Config(ref args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(ref args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "portsync", &mut std::io::stdout());
            Ok(())
        }

        Command::UpdatePorts(args) => commands::update_ports::handle(args, &cli.global).await,
        Command::UpdateDevice(args) => commands::device::update_device(args, &cli.global).await,
        Command::UpdateByIp(args) => commands::device::update_by_ip(args, &cli.global).await,
        Command::MissingReport(args) => commands::device::missing_report(args, &cli.global).await,
        Command::DeviceDown(args) => commands::alert::handle(args, &cli.global).await,
        Command::AddDevice(args) => commands::device::add_device(args, &cli.global).await,
        Command::IpDnsUpdate(args) => commands::dns::handle(args, &cli.global).await,
    }
}
