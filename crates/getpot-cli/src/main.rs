use clap::{Parser, Subcommand};
use getpot_cli::{
    bridge_options,
    commands::{available, config, request, resolve},
    GlobalOpts,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "getpot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "PO token bridge for the bgutil helper",
    long_about = "getpot locates the bgutil-pot-generate helper, invokes it with the \
                  request mapped to command-line flags, and prints the token parsed \
                  from the helper's output."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the configured helper is available
    Available,
    /// Show which helper path the bridge would use
    Resolve,
    /// Request one PO token and print it
    Request(request::RequestArgs),
    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "getpot_bridge=debug,getpot_cli=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        Commands::Available => match bridge_options(&cli.global) {
            Ok(options) => {
                return if available::run(options) {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                };
            }
            Err(err) => Err(err),
        },
        Commands::Resolve => bridge_options(&cli.global).and_then(resolve::run),
        Commands::Request(args) => {
            bridge_options(&cli.global).and_then(|options| request::run(options, args))
        }
        Commands::Config { action } => config::run(action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
