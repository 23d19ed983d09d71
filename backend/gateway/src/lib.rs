//! objscan HTTP gateway.
//!
//! Thin upload surface over [`objscan_detection::Detector`]: an index page,
//! health checks, and `POST /upload`.

pub mod control_ui;
pub mod health_api;
pub mod server;
pub mod upload;

pub use server::{GatewayState, build_router, start_server};
