//! # folio-server
//!
//! Axum HTTP server for the folio portfolio backend.
//!
//! - API endpoints: contact form, GitHub proxy, combined stats
//! - Live visitor counting over Server-Sent Events (fan-out to all
//!   subscribed clients on every registry change)
//! - Static site serving with SPA fallback
//! - `/health` and Prometheus `/metrics`
//! - Graceful shutdown via `CancellationToken`

#![deny(unsafe_code)]

pub mod error;
pub mod metrics;
pub mod notify;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod visitors;

pub use server::{AppState, ServerError, ServerHandle, build_router, start};
