//! Celiguard Server
//!
//! The HTTP surface of the celiguard service: risk scoring at
//! `POST /diagnosis`, ingredient scanning at `POST /scan`, plus health
//! and Prometheus metrics endpoints. All inference state is loaded once
//! at startup and shared read-only across requests.

pub mod clients;
pub mod config;
pub mod routes;
pub mod state;

pub use config::{Cli, ServiceConfig};
pub use routes::create_router;
pub use state::AppState;
