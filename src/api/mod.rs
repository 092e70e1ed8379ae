//! HTTP API

pub mod routes;
pub mod server;
pub mod uploads;

pub use server::run_server;
