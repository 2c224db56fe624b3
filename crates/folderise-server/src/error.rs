//! Server errors.

/// Error starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Host and port do not form a socket address.
    #[error("Invalid address '{address}': {source}")]
    InvalidAddress {
        /// Address as configured.
        address: String,
        /// Parse error.
        #[source]
        source: std::net::AddrParseError,
    },
    /// Listener could not be bound.
    #[error("Cannot bind {address}: {source}")]
    Bind {
        /// Address being bound.
        address: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Folder watcher could not be started.
    #[error(transparent)]
    Watch(#[from] folderise_storage::WatchError),
    /// Server stopped with an error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
