//! Configuration structures and loading utilities.
//!
//! This module contains all configuration structures used by the application,
//! including environment variable loading and default values.

pub mod forecast_client;
pub mod server;
pub mod webhook;

pub use server::*;
pub use webhook::*;
