//! HTTP gateway module
//!
//! Exposes the research routes over axum.

pub mod config;
pub mod handlers;
pub mod server;

pub use config::GatewayConfig;
pub use handlers::GatewayState;
pub use server::{build_router, start_server};
