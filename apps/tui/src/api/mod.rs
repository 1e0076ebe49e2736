//! HTTP access to the storefront backend.
//!
//! Two read-only collections are exposed: `locations`, which heals itself
//! with fallback data when the backend is unreachable, and `experiences`,
//! whose failures propagate to the caller. Experiences are fetched once per
//! client and shared through [`ExperienceCache`].

pub mod cache;
pub mod client;
pub mod error;

use serde::{Deserialize, Serialize};

pub use cache::ExperienceCache;
pub use client::{ApiClient, ExperienceQuery, DEFAULT_API_BASE};
pub use error::ApiError;

/// Envelope used by the locations endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
