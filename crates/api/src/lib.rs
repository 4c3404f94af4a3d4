//! HTTP surface of the payment watch list.
//!
//! Endpoints:
//! - POST /payments/subscribe — Start watching an address
//! - POST /payments/unsubscribe — Stop watching an address
//! - GET  /health — Liveness check

pub mod extract;
pub mod routes;
pub mod state;
