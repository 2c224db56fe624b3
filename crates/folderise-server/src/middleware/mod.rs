//! Request and response middleware.

pub(crate) mod hidden;
pub(crate) mod middleman;
pub(crate) mod security;
