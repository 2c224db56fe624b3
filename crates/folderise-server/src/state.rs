//! Application state.

use std::sync::Arc;

use folderise_site::Site;

/// State shared by all request handlers.
pub(crate) struct AppState {
    /// The served folder tree.
    pub(crate) site: Arc<Site>,
}
