//! `folderise clear-cache` command implementation.

use clap::Args;
use folderise_config::CliSettings;

use super::{ConfigArgs, build_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the clear-cache command.
#[derive(Args)]
pub(crate) struct ClearCacheArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl ClearCacheArgs {
    /// Delete every cached page below the served folder.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(CliSettings::default())?;
        let site = build_site(&config)?;

        site.refresh().await;
        output.success(&format!(
            "Cleared cached pages under {}",
            config.folder.display()
        ));
        Ok(())
    }
}
