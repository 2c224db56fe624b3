//! `folderise render` command implementation.

use clap::Args;
use folderise_config::CliSettings;

use super::{ConfigArgs, build_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Folder URL path to render, relative to the served folder.
    #[arg(default_value = "/")]
    pub(crate) path: String,
}

impl RenderArgs {
    /// Serve one page exactly as the server would and print it.
    ///
    /// Uses the cached page when present and writes one otherwise.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(CliSettings::default())?;
        let site = build_site(&config)?;

        let page = site.serve(&self.path).await?;
        output.page(&page.html)?;
        Ok(())
    }
}
