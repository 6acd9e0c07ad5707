//! kvplate CLI - Consul KV imports and consul-template files from config files

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;
mod util;

use commands::ConvertArgs;

#[derive(Parser)]
#[command(name = "kvplate")]
#[command(author = "kvplate Contributors")]
#[command(version)]
#[command(about = "Turn configuration files into Consul KV imports and consul-template files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten config files into a JSON array for `consul kv import`
    Kv(ConvertArgs),

    /// Replace every value with a consul-template keyOrDefault lookup
    #[command(alias = "tmpl")]
    Template(ConvertArgs),
}

/// Log to stderr so stdout only carries the converted output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match &cli.command {
        Commands::Kv(args) => commands::kv::run(args),
        Commands::Template(args) => commands::template::run(args),
    };

    let code = match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
