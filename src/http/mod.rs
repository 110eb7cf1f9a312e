//! HTTP server module.
//!
//! Binds the listener, announces the deployment on stdout, and serves the router
//! until SIGTERM/SIGINT, letting in-flight requests finish.

mod server;
mod shutdown;

pub use server::{bind, serve, start_server, ServerError};
pub use shutdown::shutdown_signal;
