//! API response models for the operational endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
    /// Active webhook version (feature set)
    pub webhook_version: u8,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}
