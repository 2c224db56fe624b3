//! HTTP server for folderise.
//!
//! Serves a folder tree over HTTP with axum:
//! - Regular files are returned as static assets (`tower-http` `ServeDir`)
//! - Every other path is rendered as a folder page through [`Site::serve`]
//! - Dot- and underscore-prefixed paths, including cache artifacts, are never served
//!
//! Before serving, the server optionally clears all cache artifacts and starts
//! a folder watcher whose events invalidate stale pages.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use folderise_server::{ServerConfig, run_server};
//!
//! let site = Arc::new(Site::from_config(&config, plugins));
//! run_server(ServerConfig::from(&config), site).await?;
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use folderise_site::Site;
use folderise_storage::FsWatcher;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Invalidate caches when the folder changes.
    pub watch: bool,
    /// Clear every cache artifact before serving.
    pub refresh: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            watch: true,
            refresh: true,
        }
    }
}

impl From<&folderise_config::Config> for ServerConfig {
    fn from(config: &folderise_config::Config) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            watch: config.watch,
            refresh: config.refresh,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid, the listener cannot be bound,
/// or the watcher cannot be started.
pub async fn run_server(config: ServerConfig, site: Arc<Site>) -> Result<(), ServerError> {
    if config.refresh {
        tracing::info!("Restarted, clearing cached pages");
        site.refresh().await;
    }

    // Dropping the handle stops the watcher.
    let _watch_handle = if config.watch {
        let (mut events, handle) = FsWatcher::new(site.root()).watch()?;
        let watch_site = Arc::clone(&site);
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                watch_site.handle_watch_event(&event).await;
            }
        });
        Some(handle)
    } else {
        None
    };

    let state = Arc::new(AppState { site });
    let app = app::create_router(state);

    let address = format!("{}:{}", config.host, config.port);
    let addr: SocketAddr = address
        .parse()
        .map_err(|source| ServerError::InvalidAddress {
            address: address.clone(),
            source,
        })?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;
    tracing::info!(address = %addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use folderise_config::Config;
    use folderise_plugins::PluginRegistry;

    #[test]
    fn test_server_config_from_config() {
        let mut config = Config::default();
        config.server.port = 9000;
        config.watch = false;

        let server = ServerConfig::from(&config);

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 9000);
        assert!(!server.watch);
        assert!(server.refresh);
    }

    #[tokio::test]
    async fn test_invalid_address_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.folder = tmp.path().to_path_buf();
        let site = Arc::new(Site::from_config(&config, Arc::new(PluginRegistry::new())));
        let server = ServerConfig {
            host: "not an address".to_owned(),
            watch: false,
            ..ServerConfig::default()
        };

        let err = run_server(server, site).await.unwrap_err();

        assert!(matches!(err, ServerError::InvalidAddress { .. }));
    }
}
