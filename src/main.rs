use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pagecheck::{commands, diagnostics};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "PAGECHECK_LOG";

#[derive(Parser)]
#[command(name = "pagecheck", about = "Check that every Inertia page referenced from PHP exists on disk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log resolution and scanning details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan PHP sources and report page references with no file on disk
    Check {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the page-directory cache fingerprint
    Fingerprint {
        /// Output as JSON instead of `key hash`
        #[arg(long)]
        json: bool,
    },
    /// Show every candidate path for a page name and which exist
    Resolve {
        /// Page name in dot or slash notation (e.g. `Auth/Login`)
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Check { json } => commands::check(*json),
        Commands::Fingerprint { json } => commands::fingerprint(*json).map(|()| return ExitCode::SUCCESS),
        Commands::Resolve { name } => commands::resolve(name),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
    };
}

/// Install a stderr subscriber filtered by `PAGECHECK_LOG`, defaulting to
/// `warn` (or `debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_err| return EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
