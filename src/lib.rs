//! pipeline-demo: a minimal HTTP service for validating a deployment pipeline.
//!
//! Exposes `/health`, `/` and `/metrics`, each returning a small JSON document
//! built from startup configuration and live process information.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod probe;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;
