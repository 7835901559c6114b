//! Data models for the webhook.
//!
//! Contains the Dialogflow request/response envelope, the upstream forecast
//! payloads and the operational endpoint responses.

pub mod api;
pub mod dialogflow;
pub mod forecast;

pub use api::*;
pub use dialogflow::*;
pub use forecast::*;
