//! Remitex Gateway HTTP API Server
//!
//! One endpoint does the work: `POST /extract_payment_advice` takes a
//! multipart PDF upload, extracts its text, forwards it inside the fixed
//! extraction prompt to the configured completion provider, and returns the
//! model's reply as JSON. `GET /api/health` reports liveness.

pub mod extract_api;
pub mod health_api;
pub mod server;

pub use server::{build_router, start_server, GatewayState};
