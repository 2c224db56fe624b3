//! `folderise serve` command implementation.

use clap::Args;
use folderise_config::CliSettings;
use folderise_server::{ServerConfig, run_server};

use super::{ConfigArgs, build_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Watch the folder and invalidate cached pages on change (default: enabled).
    #[arg(long)]
    watch: Option<bool>,

    /// Disable watching.
    #[arg(long, conflicts_with = "watch")]
    no_watch: bool,

    /// Clear cached pages on startup (default: enabled).
    #[arg(long)]
    refresh: Option<bool>,

    /// Keep cached pages from a previous run.
    #[arg(long, conflicts_with = "refresh")]
    no_refresh: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            host: self.host.clone(),
            port: self.port,
            watch: self.resolve_watch(),
            refresh: self.resolve_refresh(),
            ..CliSettings::default()
        };
        let config = self.config.load(settings)?;
        let site = build_site(&config)?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Folder: {}", config.folder.display()));
        if site.plugins().is_empty() {
            output.info("Plugins: none");
        } else {
            output.info(&format!("Plugins: {}", site.plugins().names().join(", ")));
        }
        output.info(if config.watch {
            "Watch: enabled"
        } else {
            "Watch: disabled"
        });

        run_server(ServerConfig::from(&config), site).await?;
        Ok(())
    }

    /// Resolve `watch` from --watch/--no-watch flags.
    fn resolve_watch(&self) -> Option<bool> {
        self.no_watch.then_some(false).or(self.watch)
    }

    /// Resolve `refresh` from --refresh/--no-refresh flags.
    fn resolve_refresh(&self) -> Option<bool> {
        self.no_refresh.then_some(false).or(self.refresh)
    }
}
