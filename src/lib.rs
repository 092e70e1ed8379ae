//! Lost & Found Board - community listing board backend
//!
//! This is the library interface, exposing the API server, session
//! authentication, and persistence layers for programmatic use and tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use error::Error;
