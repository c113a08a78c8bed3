/// Middleware modules for the API server
///
/// Session authentication lives in [`crate::app`] because it needs the
/// application state; this module holds stateless layers.
///
/// - `security`: Security response headers

pub mod security;
