//! Custom middleware implementations for the API.
//!
//! Request IDs for log correlation and Prometheus request metrics.

pub mod metrics;
pub mod request_id;

pub use metrics::*;
pub use request_id::*;
