//! HTTP side of the bridge: `/health` and `/webhook`.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::IngressError;
pub use server::{AppState, build_router, serve};
