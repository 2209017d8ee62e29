#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::utils::hello_utils::timestamp_utc;

// ***************************************************************************
//                                Constants
// ***************************************************************************
pub const APP_TITLE       : &str = "FastAPI Hello World v2";
pub const APP_VERSION     : &str = "2.0.0";
pub const APP_DESCRIPTION : &str = "A simple FastAPI hello world application with enhanced features";

// Route patterns advertised by the info endpoint, in order.
pub const ENDPOINTS : [&str; 6] = ["/", "/hello/{name}", "/health", "/info", "/docs", "/redoc"];

pub const HEALTHY : &str = "healthy";

// ***************************************************************************
//                                Responses
// ***************************************************************************
/// Standard message response.
#[derive(Object, Debug)]
pub struct MessageResponse
{
    pub message: String,
    /// Time the request was handled (ISO 8601).
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl MessageResponse {
    /// Stamp a message with the current time and the application version.
    pub fn new(message: String) -> Self {
        Self {message, timestamp: timestamp_utc(), version: APP_VERSION.to_string()}
    }
}

/// Health check response.
#[derive(Object, Debug)]
pub struct HealthResponse
{
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {status: HEALTHY.to_string(), timestamp: timestamp_utc()}
    }
}

/// Application information.
#[derive(Object, Debug)]
pub struct InfoPayload
{
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<String>,
}

impl Default for InfoPayload {
    fn default() -> Self {
        Self {
            name: APP_TITLE.to_string(),
            version: APP_VERSION.to_string(),
            description: APP_DESCRIPTION.to_string(),
            endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_versioned() {
        let resp = MessageResponse::new("hi".to_string());
        assert_eq!(resp.version, APP_VERSION);
        assert!(resp.timestamp <= Utc::now());
    }

    #[test]
    fn info_endpoint_order() {
        let info = InfoPayload::default();
        assert_eq!(info.endpoints, vec!["/", "/hello/{name}", "/health", "/info", "/docs", "/redoc"]);
        assert_eq!(info.name, APP_TITLE);
    }
}
