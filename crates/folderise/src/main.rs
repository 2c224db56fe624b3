//! Folderise CLI - serve a folder tree as HTML pages.
//!
//! Provides commands for:
//! - `serve`: Start the HTTP server
//! - `render`: Print the page for one folder
//! - `clear-cache`: Delete every cached page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ClearCacheArgs, RenderArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Folderise - serve a folder tree as a browsable HTML site.
#[derive(Parser)]
#[command(name = "folderise", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server.
    Serve(ServeArgs),
    /// Render one folder and print its HTML.
    Render(RenderArgs),
    /// Delete every cached page under the folder.
    ClearCache(ClearCacheArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    match command {
        Commands::Serve(args) => rt.block_on(args.execute()),
        Commands::Render(args) => rt.block_on(args.execute()),
        Commands::ClearCache(args) => rt.block_on(args.execute()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["folderise", "serve", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_render_defaults_to_root() {
        let cli = Cli::try_parse_from(["folderise", "render", "--folder", "site"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.path, "/");
    }
}
